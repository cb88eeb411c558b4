use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;
use super::user::User;
use crate::db::schema::hiit_sessions;
use crate::db::types::HiitPhase;

/// A live or finished HIIT session. `workout_id` is cleared when the
/// template it was started from is deleted.
#[derive(
    Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize,
)]
#[diesel(belongs_to(User))]
#[diesel(table_name = hiit_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HiitSession {
    pub id: String,
    pub user_id: String,
    pub workout_id: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub current_round: Option<i32>,
    pub current_phase: Option<HiitPhase>,
    pub is_completed: bool,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone, Default, Serialize, Deserialize)]
#[diesel(table_name = hiit_sessions)]
pub struct NewHiitSession {
    pub id: Option<String>,
    pub user_id: String,
    pub workout_id: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub current_round: Option<i32>,
    pub current_phase: Option<HiitPhase>,
    pub is_completed: Option<bool>,
    pub created_at: Option<String>,
}

impl NewHiitSession {
    pub fn new(user_id: impl Into<String>, start_time: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            start_time: start_time.into(),
            ..Default::default()
        }
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = hiit_sessions)]
pub struct HiitSessionUpdate {
    pub user_id: Option<String>,
    pub workout_id: Option<Option<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<Option<String>>,
    pub current_round: Option<Option<i32>>,
    pub current_phase: Option<Option<HiitPhase>>,
    pub is_completed: Option<bool>,
}

impl Patch for HiitSessionUpdate {}
