use sea_orm_migration::prelude::*;

mod m20190115_000001_create_users;
mod m20190115_000002_create_roles;
mod m20190115_000003_create_user_roles;
mod m20190115_000004_create_food_categories;
mod m20190115_000005_create_foods;
mod m20190115_000006_create_orders;
mod m20190115_000007_create_order_details;
mod m20190115_000008_create_user_tokens;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20190115_000001_create_users::Migration),
            Box::new(m20190115_000002_create_roles::Migration),
            Box::new(m20190115_000003_create_user_roles::Migration),
            Box::new(m20190115_000004_create_food_categories::Migration),
            Box::new(m20190115_000005_create_foods::Migration),
            Box::new(m20190115_000006_create_orders::Migration),
            Box::new(m20190115_000007_create_order_details::Migration),
            Box::new(m20190115_000008_create_user_tokens::Migration),
        ]
    }
}
