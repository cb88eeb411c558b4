//! Per-user activity histories.
//!
//! Date bounds are inclusive `YYYY-MM-DD` values compared with the calendar
//! date written in `start_time` (`meals.date` for nutrition). An omitted bound
//! is open. Rows come most recent first.

use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Bool, Double, Integer, Nullable, Text};
use log::debug;
use serde::Serialize;

use super::parse_date;
use crate::error::Result;

/// One row per exercise performed in a session. A session without exercises
/// yields a single row with no exercise.
#[derive(Debug, Clone, PartialEq, Serialize, QueryableByName)]
pub struct WorkoutHistoryRow {
    #[diesel(sql_type = Text)]
    pub session_id: String,
    #[diesel(sql_type = Text)]
    pub session_name: String,
    #[diesel(sql_type = Text)]
    pub session_date: String,
    #[diesel(sql_type = Text)]
    pub start_time: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub end_time: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub duration_minutes: Option<f64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub exercise_name: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub sets_count: i64,
    #[diesel(sql_type = BigInt)]
    pub total_reps: i64,
    #[diesel(sql_type = Double)]
    pub total_weight: f64,
    #[diesel(sql_type = Bool)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, QueryableByName)]
pub struct CardioHistoryRow {
    #[diesel(sql_type = Text)]
    pub session_id: String,
    #[diesel(sql_type = Text)]
    pub session_date: String,
    #[diesel(sql_type = Text)]
    pub activity_type: String,
    #[diesel(sql_type = Text)]
    pub activity_title: String,
    #[diesel(sql_type = Text)]
    pub start_time: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub end_time: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub duration_minutes: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub distance_km: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub average_speed_kmh: Option<f64>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub steps: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub calories: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, QueryableByName)]
pub struct HiitHistoryRow {
    #[diesel(sql_type = Text)]
    pub session_id: String,
    #[diesel(sql_type = Text)]
    pub session_date: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub workout_title: Option<String>,
    #[diesel(sql_type = Text)]
    pub start_time: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub end_time: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub duration_minutes: Option<f64>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub current_round: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub total_rounds: Option<i32>,
    #[diesel(sql_type = Bool)]
    pub is_completed: bool,
}

/// One row per logged food item.
#[derive(Debug, Clone, PartialEq, Serialize, QueryableByName)]
pub struct NutritionHistoryRow {
    #[diesel(sql_type = Text)]
    pub meal_id: String,
    #[diesel(sql_type = Text)]
    pub meal_date: String,
    #[diesel(sql_type = Text)]
    pub meal_time: String,
    #[diesel(sql_type = Text)]
    pub meal_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub food_name: Option<String>,
    #[diesel(sql_type = Text)]
    pub portion: String,
    #[diesel(sql_type = Double)]
    pub calories: f64,
    #[diesel(sql_type = Text)]
    pub created_at: String,
}

const WORKOUT_HISTORY: &str = "\
SELECT ws.id AS session_id,
       ws.name AS session_name,
       substr(ws.start_time, 1, 10) AS session_date,
       ws.start_time AS start_time,
       ws.end_time AS end_time,
       ROUND((julianday(ws.end_time) - julianday(ws.start_time)) * 1440.0, 2) AS duration_minutes,
       e.name_en AS exercise_name,
       COUNT(es.id) AS sets_count,
       COALESCE(SUM(es.reps), 0) AS total_reps,
       COALESCE(SUM(es.reps * es.weight), 0.0) AS total_weight,
       ws.is_completed AS is_completed
FROM workout_sessions ws
LEFT JOIN workout_exercises we ON we.session_id = ws.id
LEFT JOIN exercises e ON e.id = we.exercise_id
LEFT JOIN exercise_sets es ON es.workout_exercise_id = we.id
WHERE ws.user_id = ?
  AND (? IS NULL OR substr(ws.start_time, 1, 10) >= ?)
  AND (? IS NULL OR substr(ws.start_time, 1, 10) <= ?)
GROUP BY ws.id, we.id
ORDER BY ws.start_time DESC, ws.id, we.order_index, we.created_at";

const CARDIO_HISTORY: &str = "\
SELECT cs.id AS session_id,
       substr(cs.start_time, 1, 10) AS session_date,
       cs.activity_type AS activity_type,
       cs.activity_title AS activity_title,
       cs.start_time AS start_time,
       cs.end_time AS end_time,
       COALESCE(
           ROUND(cs.duration_seconds / 60.0, 2),
           ROUND((julianday(cs.end_time) - julianday(cs.start_time)) * 1440.0, 2)
       ) AS duration_minutes,
       cs.distance_km AS distance_km,
       cs.average_speed_kmh AS average_speed_kmh,
       cs.steps AS steps,
       cs.calories AS calories,
       cs.notes AS notes
FROM cardio_sessions cs
WHERE cs.user_id = ?
  AND (? IS NULL OR substr(cs.start_time, 1, 10) >= ?)
  AND (? IS NULL OR substr(cs.start_time, 1, 10) <= ?)
ORDER BY cs.start_time DESC, cs.id";

const HIIT_HISTORY: &str = "\
SELECT hs.id AS session_id,
       substr(hs.start_time, 1, 10) AS session_date,
       hw.title_en AS workout_title,
       hs.start_time AS start_time,
       hs.end_time AS end_time,
       ROUND((julianday(hs.end_time) - julianday(hs.start_time)) * 1440.0, 2) AS duration_minutes,
       hs.current_round AS current_round,
       hw.total_rounds AS total_rounds,
       hs.is_completed AS is_completed
FROM hiit_sessions hs
LEFT JOIN hiit_workouts hw ON hw.id = hs.workout_id
WHERE hs.user_id = ?
  AND (? IS NULL OR substr(hs.start_time, 1, 10) >= ?)
  AND (? IS NULL OR substr(hs.start_time, 1, 10) <= ?)
ORDER BY hs.start_time DESC, hs.id";

const NUTRITION_HISTORY: &str = "\
SELECT m.id AS meal_id,
       m.date AS meal_date,
       m.meal_time AS meal_time,
       m.name AS meal_name,
       f.name_en AS food_name,
       mfi.portion AS portion,
       mfi.calories AS calories,
       mfi.created_at AS created_at
FROM meals m
JOIN meal_food_items mfi ON mfi.meal_id = m.id
LEFT JOIN foods f ON f.id = mfi.food_id
WHERE m.user_id = ?
  AND (? IS NULL OR m.date >= ?)
  AND (? IS NULL OR m.date <= ?)
ORDER BY m.date DESC, m.meal_time, mfi.created_at, mfi.rowid";

fn load_history<T>(
    conn: &mut SqliteConnection,
    query: &'static str,
    target_user_id: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<T>>
where
    T: QueryableByName<diesel::sqlite::Sqlite> + 'static,
{
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;
    debug!("History for {target_user_id} from {start:?} to {end:?}");
    Ok(sql_query(query)
        .bind::<Text, _>(target_user_id)
        .bind::<Nullable<Text>, _>(start.as_deref())
        .bind::<Nullable<Text>, _>(start.as_deref())
        .bind::<Nullable<Text>, _>(end.as_deref())
        .bind::<Nullable<Text>, _>(end.as_deref())
        .load(conn)?)
}

pub fn get_user_workout_history(
    conn: &mut SqliteConnection,
    target_user_id: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<WorkoutHistoryRow>> {
    load_history(conn, WORKOUT_HISTORY, target_user_id, start_date, end_date)
}

pub fn get_user_cardio_history(
    conn: &mut SqliteConnection,
    target_user_id: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<CardioHistoryRow>> {
    load_history(conn, CARDIO_HISTORY, target_user_id, start_date, end_date)
}

pub fn get_user_hiit_history(
    conn: &mut SqliteConnection,
    target_user_id: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<HiitHistoryRow>> {
    load_history(conn, HIIT_HISTORY, target_user_id, start_date, end_date)
}

pub fn get_user_nutrition_history(
    conn: &mut SqliteConnection,
    target_user_id: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<NutritionHistoryRow>> {
    load_history(conn, NUTRITION_HISTORY, target_user_id, start_date, end_date)
}
