use sqlx::prelude::FromRow;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use time::OffsetDateTime;

// ids are uuid v7 stored as TEXT, so id order is creation order
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS tag_data (
        uuid TEXT PRIMARY KEY,
        project_id TEXT NOT NULL,
        tag_number TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        category TEXT NOT NULL DEFAULT '',
        area TEXT NOT NULL DEFAULT '',
        discipline TEXT NOT NULL DEFAULT '',
        version INTEGER NOT NULL DEFAULT 1,
        revision_container_id TEXT,
        review_id TEXT
    )",
    "CREATE TABLE IF NOT EXISTS revision_containers (
        uuid TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        revision TEXT NOT NULL,
        project_id TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS revision_reviews (
        uuid TEXT PRIMARY KEY,
        revision_container_id TEXT NOT NULL,
        approver_id TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS conversations (
        uuid TEXT PRIMARY KEY,
        review_id TEXT NOT NULL,
        property TEXT,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS participants (
        conversation_id TEXT NOT NULL,
        user_id TEXT NOT NULL,
        PRIMARY KEY (conversation_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS messages (
        uuid TEXT PRIMARY KEY,
        conversation_id TEXT NOT NULL,
        author_id TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        is_deleted INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS users (
        uuid TEXT PRIMARY KEY,
        username TEXT NOT NULL
    )",
];

pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(url)
        .await?;
    init_schema(&db_pool).await?;
    Ok(db_pool)
}

pub async fn init_schema(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(db_pool).await?;
    }
    Ok(())
}

#[derive(Debug, Clone, FromRow)]
pub struct TagDataRow {
    pub uuid: String,
    pub project_id: String,
    pub tag_number: String,
    pub description: String,
    pub category: String,
    pub area: String,
    pub discipline: String,
    pub version: i64,
    pub revision_container_id: Option<String>,
    pub review_id: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub uuid: String,
    pub revision_container_id: String,
    pub approver_id: String,
    pub status: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct ConversationRow {
    pub uuid: String,
    pub review_id: String,
    pub property: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct MessageRow {
    pub uuid: String,
    pub conversation_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub is_deleted: bool,
}
