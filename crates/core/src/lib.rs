//! Domain logic for the project registry that does not touch the database.
//!
//! Holds the shared id/timestamp types, the error taxonomy, project type and
//! unit-tier tables, input validation, and the file-backed country lookup.

pub mod country;
pub mod error;
pub mod pagination;
pub mod project_type;
pub mod text_match;
pub mod types;
pub mod unit_tier;
pub mod validation;
