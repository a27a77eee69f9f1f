//! Integration tests for the project store.
//!
//! Exercises the repository layer against a real database:
//! - Create with nested descriptions and specs, and its rollback
//! - Update whitelist and missing ids
//! - Single-project reads with language selection and country enrichment
//! - Status changes, owner lookup and the two image operations

use std::collections::BTreeMap;

use assert_matches::assert_matches;
use projects_core::country::{CountryLookup, DEFAULT_LOCALE};
use projects_core::validation::Location;
use projects_db::error::{ConstraintKind, StoreError};
use projects_db::models::description::NewProjectDesc;
use projects_db::models::project::{CreateProject, UpdateProject};
use projects_db::models::status::ProjectStatus;
use projects_db::repositories::{ProjectImageRepo, ProjectRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const OWNER: &str = "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01";

fn countries() -> CountryLookup {
    CountryLookup::new(
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../json/country.json"),
        DEFAULT_LOCALE,
    )
}

fn desc(language: &str, name: &str) -> NewProjectDesc {
    NewProjectDesc {
        language: language.to_string(),
        name: name.to_string(),
        description: format!("{name} ({language})"),
    }
}

fn new_project() -> CreateProject {
    CreateProject {
        owner: OWNER.to_string(),
        owner_id: Some("user-1".to_string()),
        owner_address: Some("12 Tran Phu, Da Nang".to_string()),
        location: Some(Location {
            latitude: 16.05,
            longitude: 108.2,
        }),
        location_name: Some("Da Nang".to_string()),
        area: Some(12.5),
        project_type: 1,
        unit: 42.0,
        country_id: Some("VN".to_string()),
        iframe: None,
        descs: vec![desc("vi", "Điện sinh khối"), desc("en", "Biomass plant")],
        specs: Some(BTreeMap::from([
            ("capacity".to_string(), 42.0),
            ("efficiency".to_string(), 0.31),
        ])),
    }
}

fn update_from(project: &CreateProject) -> UpdateProject {
    UpdateProject {
        owner: project.owner.clone(),
        owner_id: project.owner_id.clone(),
        owner_address: project.owner_address.clone(),
        location: project.location,
        location_name: project.location_name.clone(),
        project_type: project.project_type,
        unit: project.unit,
        country_id: project.country_id.clone(),
        iframe: project.iframe.clone(),
    }
}

async fn count_projects(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_persists_aggregate(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &countries(), &new_project())
        .await
        .unwrap();

    assert_eq!(created.project.status, ProjectStatus::Registered);
    assert_eq!(created.project.owner, OWNER.to_lowercase());
    assert_eq!(created.project.latitude, Some(16.05));
    assert_eq!(created.project.thumbnail, None);
    assert_eq!(created.type_name, Some("Biomass to Gasification"));
    assert_eq!(created.descs.len(), 2);
    assert!(created.descs.iter().all(|d| d.project_id == created.project.id));
    assert_eq!(created.specs.as_ref().unwrap().specs.0["capacity"], 42.0);
    assert!(created.images.is_empty());

    let country = created.country.expect("country resolved in default locale");
    assert_eq!(country.name, "Việt Nam");
    assert_eq!(country.code, "VN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_malformed_owner(pool: PgPool) {
    let mut input = new_project();
    input.owner = "not-an-address".to_string();

    let err = ProjectRepo::create(&pool, &countries(), &input)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Validation { op: "create project", .. });
    assert_eq!(count_projects(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_out_of_range_location(pool: PgPool) {
    let mut input = new_project();
    input.location = Some(Location {
        latitude: 91.0,
        longitude: 0.0,
    });

    let err = ProjectRepo::create(&pool, &countries(), &input)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Validation { .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_repeated_language(pool: PgPool) {
    let mut input = new_project();
    input.descs = vec![desc("vi", "Một"), desc("vi", "Hai")];

    let err = ProjectRepo::create(&pool, &countries(), &input)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Validation { .. });
    assert_eq!(count_projects(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rolls_back_when_description_insert_fails(pool: PgPool) {
    let mut input = new_project();
    // Passes the up-front checks but violates the language length constraint.
    input.descs = vec![desc("vi", "Hợp lệ"), desc("a-language-tag-far-too-long", "Bad")];

    let err = ProjectRepo::create(&pool, &countries(), &input)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Validation { op: "create project", .. });

    assert_eq!(count_projects(&pool).await, 0);
    let descs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects_desc")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(descs, 0);

    // The sequence value consumed by the aborted insert never became visible.
    let err = ProjectRepo::get_by_id(&pool, &countries(), 1, None)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { entity: "Project", id: Some(1), .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_without_country_or_specs(pool: PgPool) {
    let mut input = new_project();
    input.country_id = None;
    input.specs = None;
    input.descs.clear();
    input.location = None;

    let created = ProjectRepo::create(&pool, &countries(), &input)
        .await
        .unwrap();
    assert!(created.country.is_none());
    assert!(created.specs.is_none());
    assert!(created.descs.is_empty());
    assert_eq!(created.project.latitude, None);
    assert_eq!(created.project.longitude, None);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_overwrites_whitelist_only(pool: PgPool) {
    let input = new_project();
    let created = ProjectRepo::create(&pool, &countries(), &input)
        .await
        .unwrap();
    let id = created.project.id;
    ProjectRepo::change_status(&pool, id, ProjectStatus::Active)
        .await
        .unwrap();
    ProjectImageRepo::set_thumbnail(&pool, id, "thumbs/a.png")
        .await
        .unwrap();

    let mut patch = update_from(&input);
    patch.location_name = Some("Hue".to_string());
    patch.unit = 150.0;
    patch.country_id = Some("TH".to_string());
    patch.iframe = Some("https://maps.example/embed".to_string());

    let updated_id = ProjectRepo::update(&pool, id, &patch).await.unwrap();
    assert_eq!(updated_id, id);

    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(project.location_name.as_deref(), Some("Hue"));
    assert_eq!(project.unit, 150.0);
    assert_eq!(project.country_id.as_deref(), Some("TH"));
    assert!(project.updated_at >= created.project.updated_at);

    // Status, thumbnail and associations are untouched.
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(project.thumbnail.as_deref(), Some("thumbs/a.png"));
    let detail = ProjectRepo::get_by_id(&pool, &countries(), id, Some("en"))
        .await
        .unwrap();
    assert_eq!(detail.descs.len(), 1);
    assert!(detail.specs.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_id_is_not_found(pool: PgPool) {
    let err = ProjectRepo::update(&pool, 9999, &update_from(&new_project()))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { op: "update project", id: Some(9999), .. });
}

// ---------------------------------------------------------------------------
// GetById
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_by_id_selects_language(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &countries(), &new_project())
        .await
        .unwrap();
    let id = created.project.id;

    let en = ProjectRepo::get_by_id(&pool, &countries(), id, Some("en"))
        .await
        .unwrap();
    assert_eq!(en.descs.len(), 1);
    assert_eq!(en.descs[0].name, "Biomass plant");
    assert_eq!(en.country.unwrap().name, "Vietnam");

    let default = ProjectRepo::get_by_id(&pool, &countries(), id, None)
        .await
        .unwrap();
    assert_eq!(default.descs[0].language, "vi");
    assert_eq!(default.country.unwrap().name, "Việt Nam");

    let missing = ProjectRepo::get_by_id(&pool, &countries(), id, Some("fr"))
        .await
        .unwrap();
    assert!(missing.descs.is_empty());
    assert!(missing.country.is_none());
    assert!(missing.specs.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_by_id_returns_gallery_oldest_first(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &countries(), &new_project())
        .await
        .unwrap();
    let id = created.project.id;

    for path in ["img/1.png", "img/2.png", "img/3.png"] {
        ProjectImageRepo::add_gallery_image(&pool, id, path)
            .await
            .unwrap();
    }

    let detail = ProjectRepo::get_by_id(&pool, &countries(), id, None)
        .await
        .unwrap();
    assert_eq!(detail.images, vec!["img/1.png", "img/2.png", "img/3.png"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_by_id_unknown_is_not_found(pool: PgPool) {
    let err = ProjectRepo::get_by_id(&pool, &countries(), 404, None)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { op: "get project", .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_country_failure_does_not_fail_read(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &countries(), &new_project())
        .await
        .unwrap();

    let broken = CountryLookup::new("/nonexistent/country.json", DEFAULT_LOCALE);
    let detail = ProjectRepo::get_by_id(&pool, &broken, created.project.id, None)
        .await
        .unwrap();
    assert!(detail.country.is_none());
    assert_eq!(detail.descs.len(), 1);
}

// ---------------------------------------------------------------------------
// Status, owner, images
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_transitions_are_unconstrained(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &countries(), &new_project())
        .await
        .unwrap();
    let id = created.project.id;

    for status in [
        ProjectStatus::Rejected,
        ProjectStatus::Active,
        ProjectStatus::Registered,
        ProjectStatus::Active,
    ] {
        ProjectRepo::change_status(&pool, id, status).await.unwrap();
        let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(project.status, status);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_status_unknown_id_is_not_found(pool: PgPool) {
    let err = ProjectRepo::change_status(&pool, 77, ProjectStatus::Active)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { id: Some(77), .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_owner(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &countries(), &new_project())
        .await
        .unwrap();

    let owner = ProjectRepo::get_owner(&pool, created.project.id)
        .await
        .unwrap();
    assert_eq!(owner, OWNER.to_lowercase());

    let err = ProjectRepo::get_owner(&pool, created.project.id + 1)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { op: "get project owner", .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_thumbnail_does_not_touch_gallery(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &countries(), &new_project())
        .await
        .unwrap();
    let id = created.project.id;

    ProjectImageRepo::add_gallery_image(&pool, id, "img/gallery.png")
        .await
        .unwrap();
    let path = ProjectImageRepo::set_thumbnail(&pool, id, "img/thumb.png")
        .await
        .unwrap();
    assert_eq!(path, "img/thumb.png");

    let detail = ProjectRepo::get_by_id(&pool, &countries(), id, None)
        .await
        .unwrap();
    assert_eq!(detail.project.thumbnail.as_deref(), Some("img/thumb.png"));
    assert_eq!(detail.images, vec!["img/gallery.png"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_thumbnail_unknown_project(pool: PgPool) {
    let err = ProjectImageRepo::set_thumbnail(&pool, 12, "img/x.png")
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { op: "set thumbnail", .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_image_requires_project(pool: PgPool) {
    let err = ProjectImageRepo::add_gallery_image(&pool, 12, "img/x.png")
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::ConstraintViolation {
            kind: ConstraintKind::ForeignKey,
            ..
        }
    );
}
