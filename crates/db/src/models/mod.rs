//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` input DTOs for the writes that target that table

pub mod description;
pub mod document;
pub mod image;
pub mod page;
pub mod project;
pub mod specification;
pub mod status;
