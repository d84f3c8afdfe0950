use sea_orm::{DatabaseConnection, DbErr};

use crate::config::OrderingConfig;
use crate::infra::db::{
    DbCatalogRepository, DbRoleRepository, DbUserRepository, DbUserRoleRepository,
};
use crate::usecase::catalog::CatalogService;
use crate::usecase::roles::RolesService;
use crate::usecase::users::UsersService;

/// Shared state: one connection pool, repositories and services built per call.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub async fn connect(config: &OrderingConfig) -> Result<Self, DbErr> {
        let db = pizza_core::db::connect(
            &config.database_url,
            config.database_max_connections,
            config.database_sqlx_logging,
        )
        .await?;
        Ok(Self { db })
    }

    // ── Repositories ─────────────────────────────────────────────────────────

    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_role_repo(&self) -> DbUserRoleRepository {
        DbUserRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog_repo(&self) -> DbCatalogRepository {
        DbCatalogRepository {
            db: self.db.clone(),
        }
    }

    // ── Services ─────────────────────────────────────────────────────────────

    pub fn roles_service(
        &self,
    ) -> RolesService<DbRoleRepository, DbUserRepository, DbUserRoleRepository> {
        RolesService {
            roles: self.role_repo(),
            users: self.user_repo(),
            memberships: self.user_role_repo(),
        }
    }

    pub fn users_service(&self) -> UsersService<DbUserRepository> {
        UsersService {
            users: self.user_repo(),
        }
    }

    pub fn catalog_service(&self) -> CatalogService<DbCatalogRepository> {
        CatalogService {
            catalog: self.catalog_repo(),
        }
    }
}
