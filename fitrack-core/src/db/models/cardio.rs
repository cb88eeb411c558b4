use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;
use super::user::User;
use crate::db::schema::{cardio_sessions, location_points};

/// A cardio activity instance. `is_running`, `is_paused`, `current_speed_kmh`
/// and the running totals change while the session is live.
#[derive(
    Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize,
)]
#[diesel(belongs_to(User))]
#[diesel(table_name = cardio_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CardioSession {
    pub id: String,
    pub user_id: String,
    pub activity_type: String,
    pub activity_title: String,
    pub format_title: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub duration_seconds: Option<i32>,
    pub distance_km: Option<f64>,
    pub average_speed_kmh: Option<f64>,
    pub current_speed_kmh: Option<f64>,
    pub steps: Option<i32>,
    pub calories: Option<i32>,
    pub target_distance_km: Option<f64>,
    pub target_duration_seconds: Option<i32>,
    pub is_running: bool,
    pub is_paused: bool,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone, Default, Serialize, Deserialize)]
#[diesel(table_name = cardio_sessions)]
pub struct NewCardioSession {
    pub id: Option<String>,
    pub user_id: String,
    pub activity_type: String,
    pub activity_title: String,
    pub format_title: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub duration_seconds: Option<i32>,
    pub distance_km: Option<f64>,
    pub average_speed_kmh: Option<f64>,
    pub current_speed_kmh: Option<f64>,
    pub steps: Option<i32>,
    pub calories: Option<i32>,
    pub target_distance_km: Option<f64>,
    pub target_duration_seconds: Option<i32>,
    pub is_running: Option<bool>,
    pub is_paused: Option<bool>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

impl NewCardioSession {
    pub fn new(
        user_id: impl Into<String>,
        activity_type: impl Into<String>,
        activity_title: impl Into<String>,
        format_title: impl Into<String>,
        start_time: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            activity_type: activity_type.into(),
            activity_title: activity_title.into(),
            format_title: format_title.into(),
            start_time: start_time.into(),
            ..Default::default()
        }
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = cardio_sessions)]
pub struct CardioSessionUpdate {
    pub user_id: Option<String>,
    pub activity_type: Option<String>,
    pub activity_title: Option<String>,
    pub format_title: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<Option<String>>,
    pub duration_seconds: Option<Option<i32>>,
    pub distance_km: Option<Option<f64>>,
    pub average_speed_kmh: Option<Option<f64>>,
    pub current_speed_kmh: Option<Option<f64>>,
    pub steps: Option<Option<i32>>,
    pub calories: Option<Option<i32>>,
    pub target_distance_km: Option<Option<f64>>,
    pub target_duration_seconds: Option<Option<i32>>,
    pub is_running: Option<bool>,
    pub is_paused: Option<bool>,
    pub notes: Option<Option<String>>,
}

impl Patch for CardioSessionUpdate {}

/// One GPS fix of a cardio session's route.
#[derive(
    Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize,
)]
#[diesel(belongs_to(CardioSession))]
#[diesel(table_name = location_points)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LocationPoint {
    pub id: String,
    pub cardio_session_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub speed_kmh: Option<f64>,
    pub recorded_at: String,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone, Default, Serialize, Deserialize)]
#[diesel(table_name = location_points)]
pub struct NewLocationPoint {
    pub id: Option<String>,
    pub cardio_session_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub speed_kmh: Option<f64>,
    pub recorded_at: String,
    pub created_at: Option<String>,
}

impl NewLocationPoint {
    pub fn new(
        cardio_session_id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        recorded_at: impl Into<String>,
    ) -> Self {
        Self {
            cardio_session_id: cardio_session_id.into(),
            latitude,
            longitude,
            recorded_at: recorded_at.into(),
            ..Default::default()
        }
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = location_points)]
pub struct LocationPointUpdate {
    pub cardio_session_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<Option<f64>>,
    pub speed_kmh: Option<Option<f64>>,
    pub recorded_at: Option<String>,
}

impl Patch for LocationPointUpdate {}
