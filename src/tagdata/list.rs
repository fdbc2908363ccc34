use axum::{Json, debug_handler, extract::{Path, Query, State}};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::TagDataRow;
use crate::{AppError, AppResult};

use super::{TagDataDto, TagQuery};

#[debug_handler]
pub(crate) async fn one(
    State(db_pool): State<SqlitePool>,
    Path(tag_id): Path<Uuid>,
) -> AppResult<Json<TagDataDto>> {
    let tag = get_tag(&db_pool, tag_id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(tag))
}

#[debug_handler]
pub(crate) async fn all(
    State(db_pool): State<SqlitePool>,
    Query(TagQuery { project_id }): Query<TagQuery>,
) -> AppResult<Json<Vec<TagDataDto>>> {
    Ok(Json(list_tags(&db_pool, project_id).await?))
}

pub async fn get_tag(db_pool: &SqlitePool, tag_id: Uuid) -> AppResult<Option<TagDataDto>> {
    let row: Option<TagDataRow> = sqlx::query_as(
        "SELECT uuid,project_id,tag_number,description,category,area,discipline,version,revision_container_id,review_id
         FROM tag_data WHERE uuid=?",
    )
    .bind(tag_id.to_string())
    .fetch_optional(db_pool)
    .await?;

    Ok(row.map(TagDataDto::from))
}

pub async fn list_tags(
    db_pool: &SqlitePool,
    project_id: Option<Uuid>,
) -> AppResult<Vec<TagDataDto>> {
    let rows: Vec<TagDataRow> = match project_id {
        Some(project_id) => {
            sqlx::query_as(
                "SELECT uuid,project_id,tag_number,description,category,area,discipline,version,revision_container_id,review_id
                 FROM tag_data WHERE project_id=?",
            )
            .bind(project_id.to_string())
            .fetch_all(db_pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT uuid,project_id,tag_number,description,category,area,discipline,version,revision_container_id,review_id
                 FROM tag_data",
            )
            .fetch_all(db_pool)
            .await?
        }
    };

    Ok(rows.into_iter().map(TagDataDto::from).collect())
}
