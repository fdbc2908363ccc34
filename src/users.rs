use std::collections::HashMap;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::AppResult;

// display name for ids the identity store doesn't know
pub const UNKNOWN_USER: &str = "Unknown user";

pub async fn upsert_user(
    db_pool: &SqlitePool,
    user_id: Uuid,
    username: &str,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO users (uuid,username) VALUES (?,?)
         ON CONFLICT(uuid) DO UPDATE SET username=excluded.username",
    )
    .bind(user_id.to_string())
    .bind(username)
    .execute(db_pool)
    .await?;
    Ok(())
}

pub async fn username_of(db_pool: &SqlitePool, user_id: &str) -> AppResult<String> {
    let row: Option<(String,)> = sqlx::query_as("SELECT username FROM users WHERE uuid=?")
        .bind(user_id)
        .fetch_optional(db_pool)
        .await?;

    Ok(row.map(|(username,)| username).unwrap_or_else(|| UNKNOWN_USER.to_owned()))
}

// batched lookup; every requested id is present in the result
pub async fn resolve_usernames(
    db_pool: &SqlitePool,
    user_ids: &[String],
) -> AppResult<HashMap<String, String>> {
    let mut usernames: HashMap<String, String> = user_ids
        .iter()
        .map(|id| (id.clone(), UNKNOWN_USER.to_owned()))
        .collect();

    if user_ids.is_empty() {
        return Ok(usernames);
    }

    let placeholders = vec!["?"; user_ids.len()].join(",");
    let sql = format!("SELECT uuid,username FROM users WHERE uuid IN ({placeholders})");
    let mut query = sqlx::query_as::<_, (String, String)>(&sql);
    for id in user_ids {
        query = query.bind(id);
    }

    for (uuid, username) in query.fetch_all(db_pool).await? {
        usernames.insert(uuid, username);
    }

    Ok(usernames)
}
