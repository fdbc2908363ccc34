mod list;
mod new;
mod review;

use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::AppState;
use crate::db::ReviewRow;

pub use new::create_review;
pub use review::get_review;
pub use list::{list_reviews, list_reviews_for_project, list_reviews_for_tag};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::all).post(new::create))
        .route("/{uuid}", get(review::one))
        .route("/tag/{uuid}", get(list::for_tag))
        .route("/project/{uuid}", get(list::for_project))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: String,
    pub revision_container_id: String,
    pub approver_id: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ReviewRow> for ReviewDto {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.uuid,
            revision_container_id: row.revision_container_id,
            approver_id: row.approver_id,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub revision_container_id: Uuid,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "Open".to_owned()
}
