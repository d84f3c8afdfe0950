use chrono::Utc;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User};
use crate::error::OrderingServiceError;

pub struct UsersService<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UsersService<U> {
    pub async fn create_user(&self, input: NewUser) -> Result<User, OrderingServiceError> {
        input.validate().map_err(OrderingServiceError::Validation)?;
        if self.users.exists_by_username(&input.username).await? {
            return Err(OrderingServiceError::UserAlreadyExists);
        }
        let user = self.users.create(&input).await?;
        tracing::info!(user_id = user.id, username = %user.username, "user created");
        Ok(user)
    }

    pub async fn find_user(&self, user_id: i32) -> Result<Option<User>, OrderingServiceError> {
        self.users.find_by_id(user_id).await
    }

    /// Stamps the user's last visit with the current time. `false` if the
    /// user does not exist.
    pub async fn record_visit(&self, user_id: i32) -> Result<bool, OrderingServiceError> {
        self.users.update_last_visit(user_id, Utc::now()).await
    }
}
