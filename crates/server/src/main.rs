mod config;
mod doc;
mod dtos;
mod error;
mod notifications;
mod routes;
mod state;
mod utils;

use config::Config;
use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use notifications::{NoticeKind, Notifier};
use state::AppState;
use std::error::Error;
use utils::shutdown::shutdown_signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    env_logger::init();

    let db = create_connection(&config.database_url).await?;
    if config.run_migrations {
        Migrator::up(&db, None).await?;
        info!("Database migrations applied");
    }

    let notifier = Notifier::new(config.notification_capacity);
    let app = routes::router(AppState::new(db, notifier.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Running axum on http://{}", config.bind_address);
    info!("API docs at http://{}/swagger-ui", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            notifier.publish(NoticeKind::Info, "Server is shutting down");
            notifier.close();
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
