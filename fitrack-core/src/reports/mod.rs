//! Read-only projections: localized catalogs, per-user histories, the daily
//! summary and catalog statistics.
//!
//! None of these fail on a user or date range that matches nothing; they only
//! reject malformed parameters.

mod history;
mod localized;
mod stats;
mod summary;

pub use history::{
    CardioHistoryRow, HiitHistoryRow, NutritionHistoryRow, WorkoutHistoryRow,
    get_user_cardio_history, get_user_hiit_history, get_user_nutrition_history,
    get_user_workout_history,
};
pub use localized::{
    LocalizedCardioActivity, LocalizedExercise, LocalizedFood, LocalizedHiitWorkout,
    LocalizedRecipe, get_cardio_activities_localized, get_exercises_localized,
    get_foods_localized, get_hiit_workouts_localized, get_recipes_localized,
};
pub use stats::simplified_data_stats;
pub use summary::{DailySummary, get_user_daily_summary};

use chrono::{NaiveDate, Utc};

use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates an optional `YYYY-MM-DD` parameter and returns it normalized.
pub(crate) fn parse_date(value: Option<&str>) -> Result<Option<String>> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(|date| date.format(DATE_FORMAT).to_string())
                .map_err(|_| Error::invalid_parameter(format!("malformed date {raw:?}")))
        })
        .transpose()
}

pub(crate) fn today() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}
