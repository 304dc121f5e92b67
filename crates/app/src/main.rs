//! Demo entry point: wires repositories, services and the dispatcher, then
//! runs the sample scenario once.

use std::process::ExitCode;
use std::sync::Arc;

use app::{AppError, Config, LogFormat, Services};
use domain::{Customer, Order, Product};
use infrastructure::{
    InMemoryRepository, PostgresCustomerRepository, PostgresOrderRepository,
    PostgresProductRepository, run_migrations,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn run(config: &Config) -> Result<(), AppError> {
    let dispatcher = Arc::new(app::default_dispatcher(config.delivery_policy));

    let order = match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(url)
                .await?;
            run_migrations(&pool).await?;
            tracing::info!("using PostgreSQL repositories");

            let services = Services::new(
                PostgresCustomerRepository::new(pool.clone()),
                PostgresProductRepository::new(pool.clone()),
                PostgresOrderRepository::new(pool),
                dispatcher,
            );
            app::run_scenario(&services).await?
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory repositories");

            let services = Services::new(
                InMemoryRepository::<Customer>::new(),
                InMemoryRepository::<Product>::new(),
                InMemoryRepository::<Order>::new(),
                dispatcher,
            );
            app::run_scenario(&services).await?
        }
    };

    tracing::info!(total = %order.total(), "done");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    init_tracing(&config);

    tracing::info!(
        policy = ?config.delivery_policy,
        database = config.uses_database(),
        "starting"
    );

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "scenario failed");
            ExitCode::FAILURE
        }
    }
}
