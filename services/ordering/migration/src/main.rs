use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(pizza_ordering_migration::Migrator).await;
}
