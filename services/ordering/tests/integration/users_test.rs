use pizza_ordering::error::OrderingServiceError;

use crate::helpers::{new_user, seed_user, setup};

#[tokio::test]
async fn should_create_and_find_user() {
    let state = setup().await;
    let user = seed_user(&state, "vahid").await;

    assert!(user.is_user_active);
    assert!(user.last_visit_date.is_none());
    let found = state.users_service().find_user(user.id).await.unwrap();
    assert_eq!(found.map(|u| u.username), Some("vahid".to_owned()));
}

#[tokio::test]
async fn should_return_user_already_exists() {
    let state = setup().await;
    seed_user(&state, "vahid").await;

    let result = state.users_service().create_user(new_user("vahid")).await;
    assert!(matches!(result, Err(OrderingServiceError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_reject_duplicate_email_on_commit() {
    let state = setup().await;
    seed_user(&state, "vahid").await;

    let mut other = new_user("sara");
    other.email = Some("vahid@example.com".to_owned());
    let result = state.users_service().create_user(other).await;
    assert!(
        matches!(result, Err(OrderingServiceError::ConstraintViolation(_))),
        "expected ConstraintViolation, got {result:?}"
    );
}

#[tokio::test]
async fn should_record_last_visit() {
    let state = setup().await;
    let user = seed_user(&state, "vahid").await;
    let service = state.users_service();

    assert!(service.record_visit(user.id).await.unwrap());
    assert!(!service.record_visit(user.id + 100).await.unwrap());

    let user = service.find_user(user.id).await.unwrap().unwrap();
    assert!(user.last_visit_date.is_some());
    assert!(user.updated_at.is_some());
}
