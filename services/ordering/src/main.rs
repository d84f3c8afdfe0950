use anyhow::Context as _;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use pizza_core::config::Config;
use pizza_ordering::config::OrderingConfig;
use pizza_ordering::domain::types::{CreateRoleOutcome, NewRole};
use pizza_ordering::state::AppState;
use pizza_ordering_migration::Migrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pizza_core::tracing::init_tracing();

    let config = OrderingConfig::try_from_env().context("load ordering config")?;
    let state = AppState::connect(&config)
        .await
        .context("connect to database")?;

    Migrator::up(&state.db, None)
        .await
        .context("apply migrations")?;
    info!("migrations applied");

    let roles = state.roles_service();
    for name in &config.seed_roles {
        let outcome = roles.create_role(NewRole::new(name)).await;
        if outcome.succeeded {
            info!(role = %name, "role seeded");
        } else if outcome.error == CreateRoleOutcome::ALREADY_EXISTS {
            info!(role = %name, "role already present");
        } else {
            anyhow::bail!("failed to seed role '{name}': {}", outcome.error);
        }
    }
    Ok(())
}
