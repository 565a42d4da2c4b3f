use crate::notifications::Notifier;
use sea_orm::DatabaseConnection;

/// Shared by every handler; cloning is cheap
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(db: DatabaseConnection, notifier: Notifier) -> Self {
        Self { db, notifier }
    }
}
