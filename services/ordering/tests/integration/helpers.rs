use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use pizza_ordering::domain::types::{NewRole, NewUser, Role, User};
use pizza_ordering::state::AppState;
use pizza_ordering_migration::Migrator;

/// Fresh in-memory database with the full schema applied.
///
/// A single pooled connection keeps the in-memory database alive and
/// serializes transactions.
pub async fn setup() -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    AppState { db }
}

pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_owned(),
        display_name: None,
        email: Some(format!("{username}@example.com")),
        phone_number: None,
        password_hash: "hash".to_owned(),
    }
}

pub async fn seed_user(state: &AppState, username: &str) -> User {
    state
        .users_service()
        .create_user(new_user(username))
        .await
        .unwrap()
}

pub async fn seed_role(state: &AppState, name: &str) -> Role {
    let roles = state.roles_service();
    let outcome = roles.create_role(NewRole::new(name)).await;
    assert!(outcome.succeeded, "seeding role {name}: {}", outcome.error);
    roles.find_role_by_name(name).await.unwrap().unwrap()
}
