//! Repository for the `projects` table and its aggregate reads.

use std::collections::{HashMap, HashSet};

use projects_core::country::{Country, CountryLookup};
use projects_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use projects_core::types::DbId;
use projects_core::validation::{normalize_owner_address, require_finite_specs};
use sqlx::PgPool;

use crate::error::{store_err, StoreError};
use crate::filter::ProjectFilter;
use crate::models::description::ProjectDesc;
use crate::models::page::Page;
use crate::models::project::{
    CreateProject, Project, ProjectDetail, ProjectListParams, UpdateProject,
};
use crate::models::specification::ProjectSpecs;
use crate::models::status::ProjectStatus;
use crate::repositories::{ProjectDescRepo, ProjectImageRepo, ProjectSpecRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner, owner_id, owner_address, status, latitude, longitude, \
                       location_name, area, type, unit, country_id, thumbnail, iframe, \
                       created_at, updated_at";

/// Provides CRUD and aggregate reads for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Create a project with its descriptions and specification in one
    /// transaction. Status always starts as `Registered`.
    ///
    /// Any failing insert rolls back the whole create, so no project row is
    /// left without the descriptions it was submitted with. The returned
    /// detail carries the country resolved in the default locale.
    pub async fn create(
        pool: &PgPool,
        countries: &CountryLookup,
        input: &CreateProject,
    ) -> Result<ProjectDetail, StoreError> {
        const OP: &str = "create project";
        let owner = normalize_owner_address(&input.owner).map_err(|e| StoreError::from_core(OP, e))?;
        if let Some(location) = input.location {
            location.validate().map_err(|e| StoreError::from_core(OP, e))?;
        }
        if let Some(specs) = &input.specs {
            require_finite_specs(specs).map_err(|e| StoreError::from_core(OP, e))?;
        }
        let mut languages = HashSet::with_capacity(input.descs.len());
        if let Some(dup) = input.descs.iter().find(|d| !languages.insert(d.language.as_str())) {
            return Err(StoreError::Validation {
                op: OP,
                message: format!("language {:?} appears more than once", dup.language),
            });
        }

        let mut tx = pool.begin().await.map_err(store_err(OP))?;

        let query = format!(
            "INSERT INTO projects \
                (owner, owner_id, owner_address, status, latitude, longitude, \
                 location_name, area, type, unit, country_id, iframe) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&owner)
            .bind(&input.owner_id)
            .bind(&input.owner_address)
            .bind(ProjectStatus::Registered)
            .bind(input.location.map(|l| l.latitude))
            .bind(input.location.map(|l| l.longitude))
            .bind(&input.location_name)
            .bind(input.area)
            .bind(input.project_type)
            .bind(input.unit)
            .bind(&input.country_id)
            .bind(&input.iframe)
            .fetch_one(&mut *tx)
            .await
            .map_err(store_err(OP))?;

        let mut descs = Vec::with_capacity(input.descs.len());
        for desc in &input.descs {
            let row = ProjectDescRepo::insert(&mut *tx, project.id, desc)
                .await
                .map_err(store_err(OP))?;
            descs.push(row);
        }

        let specs = match &input.specs {
            Some(specs) => Some(
                ProjectSpecRepo::insert(&mut *tx, project.id, specs)
                    .await
                    .map_err(store_err(OP))?,
            ),
            None => None,
        };

        tx.commit().await.map_err(store_err(OP))?;

        let country = resolve_country(countries, &project, countries.default_locale()).await;
        Ok(ProjectDetail {
            type_name: project.type_name(),
            project,
            descs,
            specs,
            images: Vec::new(),
            country,
        })
    }

    /// Overwrite the updatable columns of a project and bump `updated_at`.
    ///
    /// Status, thumbnail, descriptions, specs and images are untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<DbId, StoreError> {
        const OP: &str = "update project";
        let owner = normalize_owner_address(&input.owner).map_err(|e| StoreError::from_core(OP, e))?;
        if let Some(location) = input.location {
            location.validate().map_err(|e| StoreError::from_core(OP, e))?;
        }

        let result = sqlx::query(
            "UPDATE projects SET \
                owner = $2, \
                owner_id = $3, \
                owner_address = $4, \
                latitude = $5, \
                longitude = $6, \
                location_name = $7, \
                type = $8, \
                unit = $9, \
                country_id = $10, \
                iframe = $11, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&owner)
        .bind(&input.owner_id)
        .bind(&input.owner_address)
        .bind(input.location.map(|l| l.latitude))
        .bind(input.location.map(|l| l.longitude))
        .bind(&input.location_name)
        .bind(input.project_type)
        .bind(input.unit)
        .bind(&input.country_id)
        .bind(&input.iframe)
        .execute(pool)
        .await
        .map_err(store_err(OP))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(OP, "Project", id));
        }
        Ok(id)
    }

    /// Find a bare project row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load one project with its gallery, specification, the description for
    /// `lang` and its country in the same locale.
    ///
    /// A blank or missing `lang` falls back to the lookup's default locale.
    pub async fn get_by_id(
        pool: &PgPool,
        countries: &CountryLookup,
        id: DbId,
        lang: Option<&str>,
    ) -> Result<ProjectDetail, StoreError> {
        const OP: &str = "get project";
        let locale = lang
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(countries.default_locale());

        let project = Self::find_by_id(pool, id)
            .await
            .map_err(store_err(OP))?
            .ok_or_else(|| StoreError::not_found(OP, "Project", id))?;

        let images = ProjectImageRepo::list_paths(pool, id)
            .await
            .map_err(store_err(OP))?;
        let specs = ProjectSpecRepo::find_by_project(pool, id)
            .await
            .map_err(store_err(OP))?;
        let descs = ProjectDescRepo::find_by_project_and_language(pool, id, locale)
            .await
            .map_err(store_err(OP))?
            .into_iter()
            .collect();

        let country = resolve_country(countries, &project, locale).await;
        Ok(ProjectDetail {
            type_name: project.type_name(),
            project,
            descs,
            specs,
            images,
            country,
        })
    }

    /// Page through projects matching `params`, newest first.
    ///
    /// Every returned project carries all of its descriptions and its
    /// specification. Gallery images are not loaded here. Countries resolve
    /// in the default locale.
    pub async fn list(
        pool: &PgPool,
        countries: &CountryLookup,
        params: &ProjectListParams,
    ) -> Result<Page<ProjectDetail>, StoreError> {
        const OP: &str = "list projects";
        let filter = ProjectFilter::from_params(params).map_err(|e| StoreError::from_core(OP, e))?;
        let rendered = filter.render();
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(params.skip);

        tracing::debug!(predicates = ?filter.names(), limit, offset, "Listing projects");

        let count_query = format!("SELECT COUNT(*) FROM projects p {}", rendered.where_clause);
        let total = filter
            .bind_query_scalar(sqlx::query_scalar::<_, i64>(&count_query))
            .fetch_one(pool)
            .await
            .map_err(store_err(OP))?;

        let query = format!(
            "SELECT {COLUMNS} FROM projects p {} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${} OFFSET ${}",
            rendered.where_clause,
            rendered.next_idx,
            rendered.next_idx + 1
        );
        let projects = filter
            .bind_query_as(sqlx::query_as::<_, Project>(&query))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(store_err(OP))?;

        let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let mut descs_by_project: HashMap<DbId, Vec<ProjectDesc>> = HashMap::new();
        for desc in ProjectDescRepo::list_by_projects(pool, &ids)
            .await
            .map_err(store_err(OP))?
        {
            descs_by_project.entry(desc.project_id).or_default().push(desc);
        }
        let mut specs_by_project: HashMap<DbId, ProjectSpecs> =
            ProjectSpecRepo::list_by_projects(pool, &ids)
                .await
                .map_err(store_err(OP))?
                .into_iter()
                .map(|s| (s.project_id, s))
                .collect();

        let mut items = Vec::with_capacity(projects.len());
        for project in projects {
            let country = resolve_country(countries, &project, countries.default_locale()).await;
            items.push(ProjectDetail {
                type_name: project.type_name(),
                descs: descs_by_project.remove(&project.id).unwrap_or_default(),
                specs: specs_by_project.remove(&project.id),
                images: Vec::new(),
                country,
                project,
            });
        }

        Ok(Page { total, items })
    }

    /// Set the status of a project. Transitions are not restricted.
    pub async fn change_status(
        pool: &PgPool,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<(), StoreError> {
        const OP: &str = "change project status";
        let result =
            sqlx::query("UPDATE projects SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status)
                .execute(pool)
                .await
                .map_err(store_err(OP))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(OP, "Project", id));
        }
        tracing::info!(project_id = id, status = status.label(), "Project status changed");
        Ok(())
    }

    /// The owner address of a project.
    pub async fn get_owner(pool: &PgPool, id: DbId) -> Result<String, StoreError> {
        const OP: &str = "get project owner";
        sqlx::query_scalar::<_, String>("SELECT owner FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(store_err(OP))?
            .ok_or_else(|| StoreError::not_found(OP, "Project", id))
    }
}

/// Resolve the project's country. Lookup failures are logged and yield `None`
/// so that enrichment never fails the surrounding read.
async fn resolve_country(
    countries: &CountryLookup,
    project: &Project,
    locale: &str,
) -> Option<Country> {
    let country_id = project
        .country_id
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())?;

    match countries.lookup(country_id, locale).await {
        Ok(country) => country,
        Err(err) => {
            tracing::warn!(
                project_id = project.id,
                country_id,
                locale,
                error = %err,
                "Country enrichment failed",
            );
            None
        }
    }
}
