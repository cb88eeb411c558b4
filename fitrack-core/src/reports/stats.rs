use diesel::prelude::*;
use log::debug;

use crate::db::models::DataStat;
use crate::db::schema::simplified_data_stats;
use crate::error::Result;

/// Row counts of every catalog table, split into global and custom rows.
pub fn simplified_data_stats(conn: &mut SqliteConnection) -> Result<Vec<DataStat>> {
    debug!("Loading catalog statistics");
    Ok(simplified_data_stats::table
        .select(DataStat::as_select())
        .order(simplified_data_stats::data_type.asc())
        .load(conn)?)
}
