use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Foods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Foods::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Foods::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Foods::Description).string_len(6000).null())
                    .col(ColumnDef::new(Foods::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(Foods::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Foods::FoodCategoryId).integer().not_null())
                    .col(
                        ColumnDef::new(Foods::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Foods::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_foods_food_category_id")
                            .from(Foods::Table, Foods::FoodCategoryId)
                            .to(FoodCategories::Table, FoodCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Foods::Table)
                    .col(Foods::FoodCategoryId)
                    .name("idx_foods_food_category_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Foods::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Foods {
    Table,
    Id,
    Name,
    Description,
    Price,
    IsActive,
    FoodCategoryId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum FoodCategories {
    Table,
    Id,
}
