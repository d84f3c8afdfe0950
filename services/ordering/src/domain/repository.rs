#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{Food, FoodCategory, NewFood, NewRole, NewUser, Role, User};
use crate::error::OrderingServiceError;

/// Repository for roles.
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, OrderingServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, OrderingServiceError>;
    async fn exists_by_name(&self, name: &str) -> Result<bool, OrderingServiceError>;
    async fn create(&self, role: &NewRole) -> Result<Role, OrderingServiceError>;

    /// Roles the user is a member of, ordered by name ascending.
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Role>, OrderingServiceError>;
}

/// Repository for user/role membership rows.
pub trait UserRoleRepository: Send + Sync {
    /// Whether `user_id` holds the role named `role_name`.
    async fn exists(&self, user_id: i32, role_name: &str) -> Result<bool, OrderingServiceError>;

    /// Ids of the members of the role named `role_name`. Unknown role → empty.
    async fn user_ids_in_role(&self, role_name: &str) -> Result<Vec<i32>, OrderingServiceError>;

    async fn add(&self, user_id: i32, role_id: i32) -> Result<(), OrderingServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(&self, user_id: i32, role_id: i32) -> Result<bool, OrderingServiceError>;
}

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, OrderingServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, OrderingServiceError>;
    async fn exists_by_username(&self, username: &str) -> Result<bool, OrderingServiceError>;
    async fn create(&self, user: &NewUser) -> Result<User, OrderingServiceError>;

    /// Returns `false` if the user does not exist.
    async fn update_last_visit(
        &self,
        id: i32,
        at: DateTime<Utc>,
    ) -> Result<bool, OrderingServiceError>;
}

/// Repository for food categories and foods.
pub trait CatalogRepository: Send + Sync {
    async fn find_category(&self, id: i32) -> Result<Option<FoodCategory>, OrderingServiceError>;
    async fn create_category(
        &self,
        name: Option<&str>,
    ) -> Result<FoodCategory, OrderingServiceError>;
    async fn create_food(&self, food: &NewFood) -> Result<Food, OrderingServiceError>;

    /// Returns `false` if the category does not exist. A category still
    /// referenced by a food is rejected by the store.
    async fn delete_category(&self, id: i32) -> Result<bool, OrderingServiceError>;

    /// Returns `false` if the food does not exist.
    async fn delete_food(&self, id: i32) -> Result<bool, OrderingServiceError>;
}
