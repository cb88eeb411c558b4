use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;
use super::catalog::Exercise;
use super::user::User;
use crate::db::schema::{exercise_sets, workout_exercises, workout_sessions};

// Workout sessions

#[derive(
    Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize,
)]
#[diesel(belongs_to(User))]
#[diesel(table_name = workout_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkoutSession {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub is_completed: bool,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone, Default, Serialize, Deserialize)]
#[diesel(table_name = workout_sessions)]
pub struct NewWorkoutSession {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub is_completed: Option<bool>,
    pub created_at: Option<String>,
}

impl NewWorkoutSession {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        start_time: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            start_time: start_time.into(),
            ..Default::default()
        }
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = workout_sessions)]
pub struct WorkoutSessionUpdate {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<Option<String>>,
    pub is_completed: Option<bool>,
}

impl Patch for WorkoutSessionUpdate {}

// One exercise's slot within a session

#[derive(
    Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize,
)]
#[diesel(belongs_to(WorkoutSession, foreign_key = session_id))]
#[diesel(belongs_to(Exercise))]
#[diesel(table_name = workout_exercises)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkoutExercise {
    pub id: String,
    pub session_id: String,
    pub exercise_id: String,
    pub order_index: i32,
    pub created_at: String,
}

/// When `order_index` is omitted the exercise is appended after the
/// session's current last one.
#[derive(Insertable, Debug, Clone, Default, Serialize, Deserialize)]
#[diesel(table_name = workout_exercises)]
pub struct NewWorkoutExercise {
    pub id: Option<String>,
    pub session_id: String,
    pub exercise_id: String,
    pub order_index: Option<i32>,
    pub created_at: Option<String>,
}

impl NewWorkoutExercise {
    pub fn new(session_id: impl Into<String>, exercise_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            exercise_id: exercise_id.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, order_index: i32) -> Self {
        self.order_index = Some(order_index);
        self
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = workout_exercises)]
pub struct WorkoutExerciseUpdate {
    pub session_id: Option<String>,
    pub exercise_id: Option<String>,
    pub order_index: Option<i32>,
}

impl Patch for WorkoutExerciseUpdate {}

// Sets

#[derive(
    Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize,
)]
#[diesel(belongs_to(WorkoutExercise))]
#[diesel(table_name = exercise_sets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExerciseSet {
    pub id: String,
    pub workout_exercise_id: String,
    pub reps: i32,
    pub weight: f64,
    pub set_order: i32,
    pub is_completed: bool,
    pub created_at: String,
}

/// When `set_order` is omitted the set is appended after the exercise's
/// current last set.
#[derive(Insertable, Debug, Clone, Default, Serialize, Deserialize)]
#[diesel(table_name = exercise_sets)]
pub struct NewExerciseSet {
    pub id: Option<String>,
    pub workout_exercise_id: String,
    pub reps: i32,
    pub weight: f64,
    pub set_order: Option<i32>,
    pub is_completed: Option<bool>,
    pub created_at: Option<String>,
}

impl NewExerciseSet {
    pub fn new(workout_exercise_id: impl Into<String>, reps: i32, weight: f64) -> Self {
        Self {
            workout_exercise_id: workout_exercise_id.into(),
            reps,
            weight,
            ..Default::default()
        }
    }

    pub fn at(mut self, set_order: i32) -> Self {
        self.set_order = Some(set_order);
        self
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = exercise_sets)]
pub struct ExerciseSetUpdate {
    pub workout_exercise_id: Option<String>,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
    pub set_order: Option<i32>,
    pub is_completed: Option<bool>,
}

impl Patch for ExerciseSetUpdate {}
