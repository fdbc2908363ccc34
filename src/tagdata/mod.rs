mod import;
mod list;

use axum::{Router, routing::{get, post}};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::db::TagDataRow;

pub use import::{ContainerImport, ImportBatch, ImportSummary, TagImport, import_batch};
pub use list::{get_tag, list_tags};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::all))
        .route("/import", post(import::create))
        .route("/{uuid}", get(list::one))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDataDto {
    pub id: String,
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

impl From<TagDataRow> for TagDataDto {
    fn from(row: TagDataRow) -> Self {
        Self {
            id: row.uuid,
            project_id: row.project_id,
            tag_number: row.tag_number,
            description: row.description,
            category: row.category,
            area: row.area,
            discipline: row.discipline,
            version: row.version,
            revision_container_id: row.revision_container_id,
            review_id: row.review_id,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct TagQuery {
    pub(crate) project_id: Option<Uuid>,
}
