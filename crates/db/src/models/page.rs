use serde::Serialize;

/// One page of a listing plus the number of rows matching the filter before
/// skip/limit were applied.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub total: i64,
    pub items: Vec<T>,
}
