//! Typed per-table access plus the composite session operations.
//!
//! Every function takes the connection explicitly so callers decide whether a
//! call runs on its own or inside a wider transaction.

mod cardio;
mod catalog;
mod hiit;
mod nutrition;
mod users;
mod workouts;

pub use cardio::*;
pub use catalog::*;
pub use hiit::*;
pub use nutrition::*;
pub use users::*;
pub use workouts::*;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};

/// Current instant in the same shape as the store's `created_at` default.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Rewrites an RFC 3339 instant in UTC with millisecond precision.
///
/// Stored timestamps are compared as text, which only matches time order when
/// every value has this shape.
pub fn normalize_timestamp(value: &str) -> Result<String> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
        .map_err(|e| Error::invalid_input(format!("timestamp {value:?}: {e}")))
}

pub(crate) fn normalize_optional(value: &Option<String>) -> Result<Option<String>> {
    value.as_deref().map(normalize_timestamp).transpose()
}

/// Same as [`normalize_optional`] for a nullable column in an update patch.
pub(crate) fn normalize_nullable(value: &Option<Option<String>>) -> Result<Option<Option<String>>> {
    value.as_ref().map(normalize_optional).transpose()
}

/// One page of a listing. Pages count from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: i64,
    per_page: i64,
}

impl Page {
    pub const DEFAULT_PER_PAGE: i64 = 20;
    pub const MAX_PER_PAGE: i64 = 100;

    pub fn new(page: i64, per_page: i64) -> Result<Self> {
        if page < 1 {
            return Err(Error::invalid_parameter(format!("page {page}")));
        }
        if !(1..=Self::MAX_PER_PAGE).contains(&per_page) {
            return Err(Error::invalid_parameter(format!(
                "per_page {per_page}, expected 1 to {}",
                Self::MAX_PER_PAGE
            )));
        }
        Ok(Self { page, per_page })
    }

    /// The first `per_page` rows.
    pub fn first(per_page: i64) -> Result<Self> {
        Self::new(1, per_page)
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    pub(crate) fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub(crate) fn limit(&self) -> i64 {
        self.per_page
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

/// Returns `NotFound` naming `$table` when no row has primary key `$id`.
macro_rules! ensure_exists {
    ($conn:expr, $table:ident, $id:expr) => {{
        let id: &str = $id;
        let found: bool = diesel::select(diesel::dsl::exists($table::table.find(id)))
            .get_result($conn)?;
        if !found {
            return Err(crate::error::Error::not_found(stringify!($table), id));
        }
    }};
}

pub(crate) use ensure_exists;
