use axum::{Json, debug_handler, extract::State};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::AppResult;
use crate::auth::Requester;

// one ingestion batch from the external source-of-truth (FAM) feed;
// containers land before tags so snapshots can point at them
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatch {
    #[serde(default)]
    pub containers: Vec<ContainerImport>,
    #[serde(default)]
    pub tags: Vec<TagImport>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerImport {
    pub id: Uuid,
    pub name: String,
    pub revision: String,
    pub project_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagImport {
    pub id: Uuid,
    pub project_id: Uuid,
    pub tag_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub discipline: String,
    #[serde(default)]
    pub revision_container_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub containers_imported: usize,
    pub tags_imported: usize,
}

#[debug_handler]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    Requester(_requester_id): Requester,
    Json(batch): Json<ImportBatch>,
) -> AppResult<Json<ImportSummary>> {
    Ok(Json(import_batch(&db_pool, batch).await?))
}

// upsert by id: reimporting replaces descriptive fields and bumps the
// version counter; review linkage is left alone
pub async fn import_batch(db_pool: &SqlitePool, batch: ImportBatch) -> AppResult<ImportSummary> {
    let summary = ImportSummary {
        containers_imported: batch.containers.len(),
        tags_imported: batch.tags.len(),
    };

    for container in batch.containers {
        sqlx::query(
            "INSERT INTO revision_containers (uuid,name,revision,project_id) VALUES (?,?,?,?)
             ON CONFLICT(uuid) DO UPDATE SET
               name=excluded.name,
               revision=excluded.revision,
               project_id=excluded.project_id",
        )
        .bind(container.id.to_string())
        .bind(&container.name)
        .bind(&container.revision)
        .bind(container.project_id.to_string())
        .execute(db_pool)
        .await?;
    }

    for tag in batch.tags {
        sqlx::query(
            "INSERT INTO tag_data
               (uuid,project_id,tag_number,description,category,area,discipline,version,revision_container_id)
             VALUES (?,?,?,?,?,?,?,1,?)
             ON CONFLICT(uuid) DO UPDATE SET
               project_id=excluded.project_id,
               tag_number=excluded.tag_number,
               description=excluded.description,
               category=excluded.category,
               area=excluded.area,
               discipline=excluded.discipline,
               version=tag_data.version + 1,
               revision_container_id=excluded.revision_container_id",
        )
        .bind(tag.id.to_string())
        .bind(tag.project_id.to_string())
        .bind(&tag.tag_number)
        .bind(&tag.description)
        .bind(&tag.category)
        .bind(&tag.area)
        .bind(&tag.discipline)
        .bind(tag.revision_container_id.map(|id| id.to_string()))
        .execute(db_pool)
        .await?;
    }

    tracing::info!(
        "imported {} containers, {} tags",
        summary.containers_imported,
        summary.tags_imported
    );

    Ok(summary)
}
