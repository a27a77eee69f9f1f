//! Integration tests for the document batch store.

use assert_matches::assert_matches;
use projects_core::country::{CountryLookup, DEFAULT_LOCALE};
use projects_core::types::DbId;
use projects_db::error::{ConstraintKind, StoreError};
use projects_db::models::document::{DocumentListParams, UpsertDocument};
use projects_db::models::project::CreateProject;
use projects_db::repositories::{ProjectDocumentRepo, ProjectRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_project(pool: &PgPool) -> DbId {
    let countries = CountryLookup::new(
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../json/country.json"),
        DEFAULT_LOCALE,
    );
    let input = CreateProject {
        owner: "0x2222222222222222222222222222222222222222".to_string(),
        owner_id: None,
        owner_address: None,
        location: None,
        location_name: None,
        area: None,
        project_type: 0,
        unit: 0.0,
        country_id: None,
        iframe: None,
        descs: Vec::new(),
        specs: None,
    };
    ProjectRepo::create(pool, &countries, &input)
        .await
        .unwrap()
        .project
        .id
}

fn doc(id: DbId, project_id: DbId, url: &str) -> UpsertDocument {
    UpsertDocument {
        id,
        project_id,
        name: format!("doc-{id}"),
        url: url.to_string(),
        document_type: "pdf".to_string(),
    }
}

async fn count_documents(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM projects_document")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_upsert_inserts_and_updates(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let before = ProjectDocumentRepo::upsert_batch(&pool, &[doc(1, project_id, "s3://a/1")])
        .await
        .unwrap();
    assert_eq!(count_documents(&pool).await, 1);

    let mut changed = doc(1, project_id, "s3://a/1-v2");
    changed.document_type = "image".to_string();
    changed.name = "renamed".to_string();
    let rows = ProjectDocumentRepo::upsert_batch(&pool, &[changed, doc(2, project_id, "s3://a/2")])
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(count_documents(&pool).await, 2);

    let existing = ProjectDocumentRepo::find_by_id_include_deleted(&pool, 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(existing.url, "s3://a/1-v2");
    assert_eq!(existing.document_type, "image");
    assert!(existing.updated_at > before[0].updated_at);
    // Only url, type and updated_at are overwritten.
    assert_eq!(existing.name, "doc-1");
    assert_eq!(existing.created_at, before[0].created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_upsert_empty_is_noop(pool: PgPool) {
    let rows = ProjectDocumentRepo::upsert_batch(&pool, &[]).await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(count_documents(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_upsert_rejects_repeated_id(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let err = ProjectDocumentRepo::upsert_batch(
        &pool,
        &[doc(7, project_id, "a"), doc(7, project_id, "b")],
    )
    .await
    .unwrap_err();
    assert_matches!(err, StoreError::Validation { op: "upsert documents", .. });
    assert_eq!(count_documents(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_upsert_is_all_or_nothing(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let err = ProjectDocumentRepo::upsert_batch(
        &pool,
        &[doc(1, project_id, "ok"), doc(2, project_id + 100, "orphan")],
    )
    .await
    .unwrap_err();
    assert_matches!(
        err,
        StoreError::ConstraintViolation {
            kind: ConstraintKind::ForeignKey,
            ..
        }
    );
    assert_eq!(count_documents(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hard_delete_removes_rows(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    ProjectDocumentRepo::upsert_batch(
        &pool,
        &[
            doc(1, project_id, "a"),
            doc(2, project_id, "b"),
            doc(3, project_id, "c"),
        ],
    )
    .await
    .unwrap();

    let removed = ProjectDocumentRepo::delete(&pool, &[1, 3, 99]).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(count_documents(&pool).await, 1);
    assert!(ProjectDocumentRepo::find_by_id_include_deleted(&pool, 1)
        .await
        .unwrap()
        .is_none());

    assert_eq!(ProjectDocumentRepo::delete(&pool, &[]).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_documents_are_hidden_from_listing(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    ProjectDocumentRepo::upsert_batch(&pool, &[doc(1, project_id, "a"), doc(2, project_id, "b")])
        .await
        .unwrap();

    assert_eq!(ProjectDocumentRepo::soft_delete(&pool, &[1]).await.unwrap(), 1);
    // Already marked.
    assert_eq!(ProjectDocumentRepo::soft_delete(&pool, &[1]).await.unwrap(), 0);

    let page = ProjectDocumentRepo::list(&pool, &DocumentListParams::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, 2);

    let hidden = ProjectDocumentRepo::find_by_id_include_deleted(&pool, 1)
        .await
        .unwrap()
        .unwrap();
    assert!(hidden.deleted_at.is_some());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_pages(pool: PgPool) {
    let first = seed_project(&pool).await;
    let second = seed_project(&pool).await;
    for id in 1..=4 {
        ProjectDocumentRepo::upsert_batch(&pool, &[doc(id, first, "x")])
            .await
            .unwrap();
    }
    ProjectDocumentRepo::upsert_batch(&pool, &[doc(10, second, "y")])
        .await
        .unwrap();

    let all = ProjectDocumentRepo::list(&pool, &DocumentListParams::default())
        .await
        .unwrap();
    assert_eq!(all.total, 5);
    let ids: Vec<DbId> = all.items.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![10, 4, 3, 2, 1]);

    let paged = ProjectDocumentRepo::list(
        &pool,
        &DocumentListParams {
            skip: Some(1),
            limit: Some(2),
            project_id: Some(first),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(paged.total, 4);
    let ids: Vec<DbId> = paged.items.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![3, 2]);

    let by_ids = ProjectDocumentRepo::list(
        &pool,
        &DocumentListParams {
            ids: vec![2, 10, 77],
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_ids.total, 2);

    let combined = ProjectDocumentRepo::list(
        &pool,
        &DocumentListParams {
            ids: vec![2, 10],
            project_id: Some(second),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(combined.total, 1);
    assert_eq!(combined.items[0].id, 10);
}
