pub mod appresult;
pub mod auth;
pub mod conversations;
pub mod db;
pub mod reviews;
pub mod tagdata;
pub mod users;

use axum::extract::FromRef;
use sqlx::SqlitePool;

pub use appresult::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}
