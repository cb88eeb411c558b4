use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema::simplified_data_stats;

/// Row of the `simplified_data_stats` view.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = simplified_data_stats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DataStat {
    pub data_type: String,
    pub total_count: i64,
    pub custom_count: i64,
    pub global_count: i64,
}
