use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{EntityTrait, PaginatorTrait};

use pizza_ordering::error::OrderingServiceError;
use pizza_ordering::infra::uow::UnitOfWork;
use pizza_ordering_schema::roles;

use crate::helpers::setup;

fn role(name: &str) -> roles::ActiveModel {
    roles::ActiveModel {
        name: Set(name.to_owned()),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    }
}

#[tokio::test]
async fn should_discard_whole_batch_when_one_write_fails() {
    let state = setup().await;
    let mut uow = UnitOfWork::new(state.db.clone());
    uow.set::<roles::Entity>().add(role("Admin"));
    uow.set::<roles::Entity>().add(role("User"));
    uow.set::<roles::Entity>().add(role("Admin"));
    assert_eq!(uow.pending(), 3);

    let result = uow.save_changes().await;
    assert!(
        matches!(result, Err(OrderingServiceError::ConstraintViolation(_))),
        "expected ConstraintViolation, got {result:?}"
    );
    assert_eq!(uow.pending(), 0);
    assert_eq!(roles::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn should_apply_batch_in_order() {
    let state = setup().await;
    let mut uow = UnitOfWork::new(state.db.clone());
    let first = uow.set::<roles::Entity>().add(role("Admin"));
    let second = uow.set::<roles::Entity>().add(role("User"));

    assert_eq!(uow.save_changes().await.unwrap(), 2);
    let first = first.take().unwrap();
    let second = second.take().unwrap();
    assert!(first.id < second.id);
    assert_eq!(roles::Entity::find().count(&state.db).await.unwrap(), 2);
}
