use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel as _,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use pizza_ordering_schema::{food_categories, foods, roles, user_roles, users};

use crate::domain::repository::{
    CatalogRepository, RoleRepository, UserRepository, UserRoleRepository,
};
use crate::domain::types::{Food, FoodCategory, NewFood, NewRole, NewUser, Role, User};
use crate::error::OrderingServiceError;
use crate::infra::uow::UnitOfWork;

fn missing_after_commit(what: &str) -> OrderingServiceError {
    OrderingServiceError::Internal(anyhow!("{what} row missing after commit"))
}

// ── Role repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, OrderingServiceError> {
        let model = roles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find role by id")?;
        Ok(model.map(role_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, OrderingServiceError> {
        let model = roles::Entity::find()
            .filter(roles::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find role by name")?;
        Ok(model.map(role_from_model))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, OrderingServiceError> {
        let count = roles::Entity::find()
            .filter(roles::Column::Name.eq(name))
            .count(&self.db)
            .await
            .context("count roles by name")?;
        Ok(count > 0)
    }

    async fn create(&self, role: &NewRole) -> Result<Role, OrderingServiceError> {
        let mut uow = UnitOfWork::new(self.db.clone());
        let inserted = uow.set::<roles::Entity>().add(roles::ActiveModel {
            name: Set(role.name.clone()),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        });
        uow.save_changes().await?;
        inserted
            .take()
            .map(role_from_model)
            .ok_or_else(|| missing_after_commit("role"))
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Role>, OrderingServiceError> {
        let models = roles::Entity::find()
            .inner_join(user_roles::Entity)
            .filter(user_roles::Column::UserId.eq(user_id))
            .order_by_asc(roles::Column::Name)
            .all(&self.db)
            .await
            .context("list roles by user")?;
        Ok(models.into_iter().map(role_from_model).collect())
    }
}

fn role_from_model(model: roles::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Membership repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRoleRepository {
    pub db: DatabaseConnection,
}

impl UserRoleRepository for DbUserRoleRepository {
    async fn exists(&self, user_id: i32, role_name: &str) -> Result<bool, OrderingServiceError> {
        let count = user_roles::Entity::find()
            .inner_join(roles::Entity)
            .filter(roles::Column::Name.eq(role_name))
            .filter(user_roles::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .context("check user role membership")?;
        Ok(count > 0)
    }

    async fn user_ids_in_role(&self, role_name: &str) -> Result<Vec<i32>, OrderingServiceError> {
        let ids = user_roles::Entity::find()
            .select_only()
            .column(user_roles::Column::UserId)
            .inner_join(roles::Entity)
            .filter(roles::Column::Name.eq(role_name))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("list user ids in role")?;
        Ok(ids)
    }

    async fn add(&self, user_id: i32, role_id: i32) -> Result<(), OrderingServiceError> {
        let mut uow = UnitOfWork::new(self.db.clone());
        uow.set::<user_roles::Entity>().add(user_roles::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        });
        uow.save_changes().await?;
        Ok(())
    }

    async fn remove(&self, user_id: i32, role_id: i32) -> Result<bool, OrderingServiceError> {
        let mut uow = UnitOfWork::new(self.db.clone());
        let query = uow.set::<user_roles::Entity>().find();
        let existing = query
            .filter(user_roles::Column::UserId.eq(user_id))
            .filter(user_roles::Column::RoleId.eq(role_id))
            .one(uow.connection())
            .await
            .context("find user role for removal")?;
        let Some(row) = existing else {
            return Ok(false);
        };
        uow.set::<user_roles::Entity>()
            .remove(row.into_active_model());
        uow.save_changes().await?;
        Ok(true)
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, OrderingServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, OrderingServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, OrderingServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("count users by username")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &NewUser) -> Result<User, OrderingServiceError> {
        let mut uow = UnitOfWork::new(self.db.clone());
        let inserted = uow.set::<users::Entity>().add(users::ActiveModel {
            username: Set(user.username.clone()),
            display_name: Set(user.display_name.clone()),
            email: Set(user.email.clone()),
            phone_number: Set(user.phone_number.clone()),
            password: Set(user.password_hash.clone()),
            serial_number: Set(None),
            avatar_image: Set(None),
            is_email_confirmed: Set(false),
            is_phone_confirmed: Set(false),
            is_user_active: Set(true),
            lockout_enabled: Set(false),
            lockout_end: Set(None),
            access_failed_count: Set(0),
            two_factor_enabled: Set(false),
            last_visit_date: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        });
        uow.save_changes().await?;
        inserted
            .take()
            .map(user_from_model)
            .ok_or_else(|| missing_after_commit("user"))
    }

    async fn update_last_visit(
        &self,
        id: i32,
        at: DateTime<Utc>,
    ) -> Result<bool, OrderingServiceError> {
        let mut uow = UnitOfWork::new(self.db.clone());
        let query = uow.set::<users::Entity>().find();
        let existing = query
            .filter(users::Column::Id.eq(id))
            .one(uow.connection())
            .await
            .context("find user for visit update")?;
        let Some(row) = existing else {
            return Ok(false);
        };
        let mut user = row.into_active_model();
        user.last_visit_date = Set(Some(at));
        user.updated_at = Set(Some(Utc::now()));
        uow.set::<users::Entity>().update(user);
        uow.save_changes().await?;
        Ok(true)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        display_name: model.display_name,
        email: model.email,
        phone_number: model.phone_number,
        is_user_active: model.is_user_active,
        two_factor_enabled: model.two_factor_enabled,
        lockout_enabled: model.lockout_enabled,
        lockout_end: model.lockout_end,
        access_failed_count: model.access_failed_count,
        last_visit_date: model.last_visit_date,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Catalog repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCatalogRepository {
    pub db: DatabaseConnection,
}

impl CatalogRepository for DbCatalogRepository {
    async fn find_category(&self, id: i32) -> Result<Option<FoodCategory>, OrderingServiceError> {
        let model = food_categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find food category")?;
        Ok(model.map(category_from_model))
    }

    async fn create_category(
        &self,
        name: Option<&str>,
    ) -> Result<FoodCategory, OrderingServiceError> {
        let mut uow = UnitOfWork::new(self.db.clone());
        let inserted = uow
            .set::<food_categories::Entity>()
            .add(food_categories::ActiveModel {
                name: Set(name.map(str::to_owned)),
                created_at: Set(Utc::now()),
                updated_at: Set(None),
                ..Default::default()
            });
        uow.save_changes().await?;
        inserted
            .take()
            .map(category_from_model)
            .ok_or_else(|| missing_after_commit("food category"))
    }

    async fn create_food(&self, food: &NewFood) -> Result<Food, OrderingServiceError> {
        let mut uow = UnitOfWork::new(self.db.clone());
        let inserted = uow.set::<foods::Entity>().add(foods::ActiveModel {
            name: Set(food.name.clone()),
            description: Set(food.description.clone()),
            price: Set(food.price),
            is_active: Set(food.is_active),
            food_category_id: Set(food.food_category_id),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        });
        uow.save_changes().await?;
        inserted
            .take()
            .map(food_from_model)
            .ok_or_else(|| missing_after_commit("food"))
    }

    async fn delete_category(&self, id: i32) -> Result<bool, OrderingServiceError> {
        let mut uow = UnitOfWork::new(self.db.clone());
        let query = uow.set::<food_categories::Entity>().find();
        let existing = query
            .filter(food_categories::Column::Id.eq(id))
            .one(uow.connection())
            .await
            .context("find food category for deletion")?;
        let Some(row) = existing else {
            return Ok(false);
        };
        uow.set::<food_categories::Entity>()
            .remove(row.into_active_model());
        uow.save_changes().await?;
        Ok(true)
    }

    async fn delete_food(&self, id: i32) -> Result<bool, OrderingServiceError> {
        let mut uow = UnitOfWork::new(self.db.clone());
        let query = uow.set::<foods::Entity>().find();
        let existing = query
            .filter(foods::Column::Id.eq(id))
            .one(uow.connection())
            .await
            .context("find food for deletion")?;
        let Some(row) = existing else {
            return Ok(false);
        };
        uow.set::<foods::Entity>().remove(row.into_active_model());
        uow.save_changes().await?;
        Ok(true)
    }
}

fn category_from_model(model: food_categories::Model) -> FoodCategory {
    FoodCategory {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
    }
}

fn food_from_model(model: foods::Model) -> Food {
    Food {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        is_active: model.is_active,
        food_category_id: model.food_category_id,
        created_at: model.created_at,
    }
}
