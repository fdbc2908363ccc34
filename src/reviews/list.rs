use axum::{Json, debug_handler, extract::{Path, State}};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::AppResult;
use crate::db::ReviewRow;

use super::ReviewDto;

#[debug_handler]
pub(crate) async fn all(State(db_pool): State<SqlitePool>) -> AppResult<Json<Vec<ReviewDto>>> {
    Ok(Json(list_reviews(&db_pool).await?))
}

#[debug_handler]
pub(crate) async fn for_tag(
    State(db_pool): State<SqlitePool>,
    Path(tag_id): Path<Uuid>,
) -> AppResult<Json<Vec<ReviewDto>>> {
    Ok(Json(list_reviews_for_tag(&db_pool, tag_id).await?))
}

#[debug_handler]
pub(crate) async fn for_project(
    State(db_pool): State<SqlitePool>,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<Vec<ReviewDto>>> {
    Ok(Json(list_reviews_for_project(&db_pool, project_id).await?))
}

pub async fn list_reviews(db_pool: &SqlitePool) -> AppResult<Vec<ReviewDto>> {
    let rows: Vec<ReviewRow> = sqlx::query_as(
        "SELECT uuid,revision_container_id,approver_id,status,created_at
         FROM revision_reviews",
    )
    .fetch_all(db_pool)
    .await?;

    Ok(rows.into_iter().map(ReviewDto::from).collect())
}

// reviews whose revision container holds the given tag snapshot
pub async fn list_reviews_for_tag(
    db_pool: &SqlitePool,
    tag_id: Uuid,
) -> AppResult<Vec<ReviewDto>> {
    let rows: Vec<ReviewRow> = sqlx::query_as(
        "SELECT r.uuid,r.revision_container_id,r.approver_id,r.status,r.created_at
         FROM revision_reviews r
         JOIN tag_data t ON t.revision_container_id = r.revision_container_id
         WHERE t.uuid=?",
    )
    .bind(tag_id.to_string())
    .fetch_all(db_pool)
    .await?;

    Ok(rows.into_iter().map(ReviewDto::from).collect())
}

pub async fn list_reviews_for_project(
    db_pool: &SqlitePool,
    project_id: Uuid,
) -> AppResult<Vec<ReviewDto>> {
    let rows: Vec<ReviewRow> = sqlx::query_as(
        "SELECT r.uuid,r.revision_container_id,r.approver_id,r.status,r.created_at
         FROM revision_reviews r
         JOIN revision_containers c ON c.uuid = r.revision_container_id
         WHERE c.project_id=?",
    )
    .bind(project_id.to_string())
    .fetch_all(db_pool)
    .await?;

    Ok(rows.into_iter().map(ReviewDto::from).collect())
}
