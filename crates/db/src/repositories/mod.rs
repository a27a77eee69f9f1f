//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Public operations return
//! [`StoreError`](crate::error::StoreError) tagged with the operation name;
//! helpers shared between repositories return the raw `sqlx::Error` and let
//! the calling operation classify it.

pub mod project_desc_repo;
pub mod project_document_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod project_spec_repo;

pub use project_desc_repo::ProjectDescRepo;
pub use project_document_repo::ProjectDocumentRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use project_spec_repo::ProjectSpecRepo;
