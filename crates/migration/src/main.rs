use sea_orm_migration::prelude::*;

/// Applies or rolls back the school schema, reading `DATABASE_URL` from the environment
#[async_std::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
