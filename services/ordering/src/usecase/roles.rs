use pizza_auth_types::claims::ClaimsIdentity;

use crate::domain::repository::{RoleRepository, UserRepository, UserRoleRepository};
use crate::domain::types::{CreateRoleOutcome, NewRole, Role, User};
use crate::error::OrderingServiceError;

/// Role lookups, membership management and role creation.
pub struct RolesService<R: RoleRepository, U: UserRepository, M: UserRoleRepository> {
    pub roles: R,
    pub users: U,
    pub memberships: M,
}

impl<R, U, M> RolesService<R, U, M>
where
    R: RoleRepository,
    U: UserRepository,
    M: UserRoleRepository,
{
    // ── Lookups ──────────────────────────────────────────────────────────────

    pub async fn find_role_by_name(
        &self,
        role_name: &str,
    ) -> Result<Option<Role>, OrderingServiceError> {
        self.roles.find_by_name(role_name).await
    }

    pub async fn find_role_by_id(&self, role_id: i32) -> Result<Option<Role>, OrderingServiceError> {
        self.roles.find_by_id(role_id).await
    }

    /// Roles held by the user, ordered by name.
    pub async fn find_user_roles(&self, user_id: i32) -> Result<Vec<Role>, OrderingServiceError> {
        self.roles.list_by_user(user_id).await
    }

    pub async fn is_user_in_role(
        &self,
        user_id: i32,
        role_name: &str,
    ) -> Result<bool, OrderingServiceError> {
        self.memberships.exists(user_id, role_name).await
    }

    pub async fn find_users_in_role(
        &self,
        role_name: &str,
    ) -> Result<Vec<User>, OrderingServiceError> {
        let ids = self.memberships.user_ids_in_role(role_name).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.users.find_by_ids(&ids).await
    }

    /// Checks the caller's role claims. `false` for an anonymous caller.
    pub fn is_current_user_in_roles(
        &self,
        identity: Option<&ClaimsIdentity>,
        role_name: &str,
    ) -> bool {
        identity.is_some_and(|identity| identity.has_role(role_name))
    }

    // ── Membership ───────────────────────────────────────────────────────────

    pub async fn add_user_in_role_by_id(
        &self,
        user_id: i32,
        role_name: &str,
    ) -> Result<(), OrderingServiceError> {
        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            OrderingServiceError::InvalidReference(format!("user {user_id} does not exist"))
        })?;
        let role = self.require_role(role_name).await?;
        self.add_user_in_role(&user, &role).await
    }

    pub async fn add_user_in_role_by_name(
        &self,
        user: &User,
        role_name: &str,
    ) -> Result<(), OrderingServiceError> {
        let role = self.require_role(role_name).await?;
        self.add_user_in_role(user, &role).await
    }

    /// Links `user` to `role`. Both must still exist; an existing link is
    /// reported as a constraint violation.
    pub async fn add_user_in_role(
        &self,
        user: &User,
        role: &Role,
    ) -> Result<(), OrderingServiceError> {
        if self.users.find_by_id(user.id).await?.is_none() {
            return Err(OrderingServiceError::InvalidReference(format!(
                "user {} does not exist",
                user.id
            )));
        }
        if self.roles.find_by_id(role.id).await?.is_none() {
            return Err(OrderingServiceError::InvalidReference(format!(
                "role {} does not exist",
                role.id
            )));
        }
        self.memberships.add(user.id, role.id).await?;
        tracing::info!(user_id = user.id, role = %role.name, "user added to role");
        Ok(())
    }

    /// Returns `false` when the user did not hold the role.
    pub async fn remove_user_from_role(
        &self,
        user_id: i32,
        role_name: &str,
    ) -> Result<bool, OrderingServiceError> {
        let Some(role) = self.roles.find_by_name(role_name).await? else {
            return Ok(false);
        };
        let removed = self.memberships.remove(user_id, role.id).await?;
        if removed {
            tracing::info!(user_id, role = %role.name, "user removed from role");
        }
        Ok(removed)
    }

    async fn require_role(&self, role_name: &str) -> Result<Role, OrderingServiceError> {
        self.roles.find_by_name(role_name).await?.ok_or_else(|| {
            OrderingServiceError::InvalidReference(format!("role '{role_name}' does not exist"))
        })
    }

    // ── Creation ─────────────────────────────────────────────────────────────

    /// Creates a role unless one with the same name exists.
    ///
    /// The existence check and the insert are not atomic: a concurrent writer
    /// that wins the race makes the insert fail on the unique index, and that
    /// failure is reported in the outcome.
    pub async fn create_role(&self, role: NewRole) -> CreateRoleOutcome {
        if let Err(message) = role.validate() {
            tracing::warn!(error = %message, "role rejected");
            return CreateRoleOutcome::failure(message);
        }
        match self.roles.exists_by_name(&role.name).await {
            Ok(false) => {}
            Ok(true) => {
                tracing::warn!(role = %role.name, "role already exists");
                return CreateRoleOutcome::failure(CreateRoleOutcome::ALREADY_EXISTS);
            }
            Err(err) => return Self::failed(&role, err),
        }
        match self.roles.create(&role).await {
            Ok(created) => {
                tracing::info!(role_id = created.id, role = %created.name, "role created");
                CreateRoleOutcome::success()
            }
            Err(err) => Self::failed(&role, err),
        }
    }

    fn failed(role: &NewRole, err: OrderingServiceError) -> CreateRoleOutcome {
        let message = match &err {
            OrderingServiceError::Internal(source) => format!("{source:#}"),
            other => other.to_string(),
        };
        tracing::warn!(
            role = %role.name,
            kind = err.kind(),
            error = %message,
            "role creation failed"
        );
        CreateRoleOutcome::failure(message)
    }
}
