use pizza_ordering::domain::types::NewFood;
use pizza_ordering::error::OrderingServiceError;

use crate::helpers::setup;

fn margherita(category_id: i32) -> NewFood {
    NewFood {
        name: "Margherita".to_owned(),
        description: Some("Tomato, mozzarella, basil".to_owned()),
        price: 12_000,
        is_active: true,
        food_category_id: category_id,
    }
}

#[tokio::test]
async fn should_restrict_deleting_referenced_category() {
    let state = setup().await;
    let service = state.catalog_service();
    let pizza = service.create_category(Some("Pizza")).await.unwrap();
    let food = service.add_food(margherita(pizza.id)).await.unwrap();

    let result = service.delete_category(pizza.id).await;
    assert!(
        matches!(result, Err(OrderingServiceError::ConstraintViolation(_))),
        "expected ConstraintViolation, got {result:?}"
    );

    // still there after the rejected delete
    assert!(service.delete_food(food.id).await.unwrap());
    assert!(service.delete_category(pizza.id).await.unwrap());
}

#[tokio::test]
async fn should_delete_unreferenced_category() {
    let state = setup().await;
    let service = state.catalog_service();
    let drinks = service.create_category(Some("Drinks")).await.unwrap();

    assert!(service.delete_category(drinks.id).await.unwrap());
    assert!(!service.delete_category(drinks.id).await.unwrap());
}

#[tokio::test]
async fn should_reject_food_for_missing_category() {
    let state = setup().await;
    let service = state.catalog_service();

    let result = service.add_food(margherita(42)).await;
    assert!(matches!(result, Err(OrderingServiceError::InvalidReference(_))));
}

#[tokio::test]
async fn should_allow_unnamed_category() {
    let state = setup().await;
    let category = state.catalog_service().create_category(None).await.unwrap();
    assert!(category.name.is_none());
}
