mod common;

use tagreview::tagdata::{ImportBatch, TagImport, get_tag, import_batch, list_tags};
use uuid::Uuid;

fn tag_import(id: Uuid, project_id: Uuid, description: &str) -> TagImport {
    TagImport {
        id,
        project_id,
        tag_number: "20-PT-0042".to_owned(),
        description: description.to_owned(),
        category: "Instrument".to_owned(),
        area: "A10".to_owned(),
        discipline: "I".to_owned(),
        revision_container_id: None,
    }
}

#[tokio::test]
async fn imported_tags_can_be_read_back() {
    let db_pool = common::test_pool().await;
    let tag_id = Uuid::now_v7();
    let project_id = Uuid::now_v7();

    let summary = import_batch(
        &db_pool,
        ImportBatch {
            containers: vec![],
            tags: vec![tag_import(tag_id, project_id, "pressure transmitter")],
        },
    )
    .await
    .unwrap();
    assert_eq!(summary.tags_imported, 1);

    let tag = get_tag(&db_pool, tag_id).await.unwrap().unwrap();
    assert_eq!(tag.tag_number, "20-PT-0042");
    assert_eq!(tag.description, "pressure transmitter");
    assert_eq!(tag.version, 1);
}

#[tokio::test]
async fn reimporting_a_tag_replaces_fields_and_bumps_the_version() {
    let db_pool = common::test_pool().await;
    let tag_id = Uuid::now_v7();
    let project_id = Uuid::now_v7();

    for description in ["first revision", "second revision"] {
        import_batch(
            &db_pool,
            ImportBatch {
                containers: vec![],
                tags: vec![tag_import(tag_id, project_id, description)],
            },
        )
        .await
        .unwrap();
    }

    let tag = get_tag(&db_pool, tag_id).await.unwrap().unwrap();
    assert_eq!(tag.description, "second revision");
    assert_eq!(tag.version, 2);
}

#[tokio::test]
async fn listing_filters_by_project() {
    let db_pool = common::test_pool().await;
    let project_a = Uuid::now_v7();
    let project_b = Uuid::now_v7();
    let in_a = common::seed_tag(&db_pool, project_a, None).await;
    let _in_b = common::seed_tag(&db_pool, project_b, None).await;

    let tags = list_tags(&db_pool, Some(project_a)).await.unwrap();

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, in_a.to_string());

    let all = list_tags(&db_pool, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn unknown_tag_is_absent() {
    let db_pool = common::test_pool().await;

    assert!(get_tag(&db_pool, Uuid::now_v7()).await.unwrap().is_none());
}
