//! Strength training: sessions, the exercises performed in them and their sets.

use diesel::dsl::max;
use diesel::prelude::*;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{
    Page, ensure_exists, normalize_nullable, normalize_optional, normalize_timestamp, now_timestamp,
};
use crate::db::models::{
    Exercise, ExerciseSet, ExerciseSetUpdate, NewExerciseSet, NewWorkoutExercise,
    NewWorkoutSession, Patch, WorkoutExercise, WorkoutExerciseUpdate, WorkoutSession,
    WorkoutSessionUpdate,
};
use crate::db::schema::{exercise_sets, exercises, users, workout_exercises, workout_sessions};
use crate::error::{Error, Result};

/// A session to start together with its exercises and planned sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub session: NewWorkoutSession,
    #[serde(default)]
    pub exercises: Vec<PlannedExercise>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub exercise_id: String,
    #[serde(default)]
    pub sets: Vec<PlannedSet>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannedSet {
    pub reps: i32,
    pub weight: f64,
}

/// A session with its exercises in `order_index` order, each with its sets in
/// `set_order` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutDetail {
    pub session: WorkoutSession,
    pub exercises: Vec<WorkoutExerciseDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutExerciseDetail {
    #[serde(flatten)]
    pub entry: WorkoutExercise,
    pub exercise: Exercise,
    pub sets: Vec<ExerciseSet>,
}

// Sessions

pub fn create_workout_session(
    conn: &mut SqliteConnection,
    new: &NewWorkoutSession,
) -> Result<WorkoutSession> {
    conn.transaction(|conn| {
        ensure_exists!(conn, users, &new.user_id);
        let new = NewWorkoutSession {
            start_time: normalize_timestamp(&new.start_time)?,
            end_time: normalize_optional(&new.end_time)?,
            created_at: normalize_optional(&new.created_at)?,
            ..new.clone()
        };
        diesel::insert_into(workout_sessions::table)
            .values(&new)
            .returning(WorkoutSession::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_workout_session(
    conn: &mut SqliteConnection,
    session_id: &str,
) -> Result<WorkoutSession> {
    workout_sessions::table
        .find(session_id)
        .select(WorkoutSession::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("workout_sessions", session_id))
}

pub fn update_workout_session(
    conn: &mut SqliteConnection,
    session_id: &str,
    patch: &WorkoutSessionUpdate,
) -> Result<WorkoutSession> {
    if patch.is_empty() {
        return get_workout_session(conn, session_id);
    }
    let patch = WorkoutSessionUpdate {
        start_time: normalize_optional(&patch.start_time)?,
        end_time: normalize_nullable(&patch.end_time)?,
        ..patch.clone()
    };
    diesel::update(workout_sessions::table.find(session_id))
        .set(&patch)
        .returning(WorkoutSession::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("workout_sessions", session_id))
}

pub fn delete_workout_session(conn: &mut SqliteConnection, session_id: &str) -> Result<()> {
    let deleted = diesel::delete(workout_sessions::table.find(session_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("workout_sessions", session_id));
    }
    Ok(())
}

/// The user's sessions, most recent first.
pub fn list_user_workouts(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<WorkoutSession>> {
    debug!("Listing workouts for {user_id}");
    Ok(workout_sessions::table
        .filter(workout_sessions::user_id.eq(user_id))
        .order((workout_sessions::start_time.desc(), workout_sessions::id.asc()))
        .select(WorkoutSession::as_select())
        .load(conn)?)
}

/// One page of [`list_user_workouts`].
pub fn list_user_workouts_page(
    conn: &mut SqliteConnection,
    user_id: &str,
    page: Page,
) -> Result<Vec<WorkoutSession>> {
    Ok(workout_sessions::table
        .filter(workout_sessions::user_id.eq(user_id))
        .order((workout_sessions::start_time.desc(), workout_sessions::id.asc()))
        .offset(page.offset())
        .limit(page.limit())
        .select(WorkoutSession::as_select())
        .load(conn)?)
}

/// The position after `last`, or 0 for the first entry.
fn next_position(last: Option<i32>, what: &str) -> Result<i32> {
    match last {
        None => Ok(0),
        Some(n) => n
            .checked_add(1)
            .ok_or_else(|| Error::invalid_input(format!("no {what} after {n}"))),
    }
}

// Exercises within a session

/// Appends after the session's last exercise unless `order_index` is given.
pub fn create_workout_exercise(
    conn: &mut SqliteConnection,
    new: &NewWorkoutExercise,
) -> Result<WorkoutExercise> {
    conn.transaction(|conn| {
        ensure_exists!(conn, workout_sessions, &new.session_id);
        ensure_exists!(conn, exercises, &new.exercise_id);

        let mut new = NewWorkoutExercise {
            created_at: normalize_optional(&new.created_at)?,
            ..new.clone()
        };
        if new.order_index.is_none() {
            let last: Option<i32> = workout_exercises::table
                .filter(workout_exercises::session_id.eq(&new.session_id))
                .select(max(workout_exercises::order_index))
                .first(conn)?;
            new.order_index = Some(next_position(last, "order_index")?);
        }

        diesel::insert_into(workout_exercises::table)
            .values(&new)
            .returning(WorkoutExercise::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn add_exercise_to_workout(
    conn: &mut SqliteConnection,
    session_id: &str,
    exercise_id: &str,
) -> Result<WorkoutExercise> {
    create_workout_exercise(conn, &NewWorkoutExercise::new(session_id, exercise_id))
}

pub fn get_workout_exercise(
    conn: &mut SqliteConnection,
    entry_id: &str,
) -> Result<WorkoutExercise> {
    workout_exercises::table
        .find(entry_id)
        .select(WorkoutExercise::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("workout_exercises", entry_id))
}

pub fn update_workout_exercise(
    conn: &mut SqliteConnection,
    entry_id: &str,
    patch: &WorkoutExerciseUpdate,
) -> Result<WorkoutExercise> {
    if patch.is_empty() {
        return get_workout_exercise(conn, entry_id);
    }
    diesel::update(workout_exercises::table.find(entry_id))
        .set(patch)
        .returning(WorkoutExercise::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("workout_exercises", entry_id))
}

pub fn delete_workout_exercise(conn: &mut SqliteConnection, entry_id: &str) -> Result<()> {
    let deleted = diesel::delete(workout_exercises::table.find(entry_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("workout_exercises", entry_id));
    }
    Ok(())
}

// Sets

/// Appends after the exercise's last set unless `set_order` is given.
pub fn create_exercise_set(
    conn: &mut SqliteConnection,
    new: &NewExerciseSet,
) -> Result<ExerciseSet> {
    conn.transaction(|conn| {
        ensure_exists!(conn, workout_exercises, &new.workout_exercise_id);

        let mut new = NewExerciseSet {
            created_at: normalize_optional(&new.created_at)?,
            ..new.clone()
        };
        if new.set_order.is_none() {
            let last: Option<i32> = exercise_sets::table
                .filter(exercise_sets::workout_exercise_id.eq(&new.workout_exercise_id))
                .select(max(exercise_sets::set_order))
                .first(conn)?;
            new.set_order = Some(next_position(last, "set_order")?);
        }

        diesel::insert_into(exercise_sets::table)
            .values(&new)
            .returning(ExerciseSet::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn add_set(
    conn: &mut SqliteConnection,
    workout_exercise_id: &str,
    reps: i32,
    weight: f64,
) -> Result<ExerciseSet> {
    create_exercise_set(conn, &NewExerciseSet::new(workout_exercise_id, reps, weight))
}

pub fn get_exercise_set(conn: &mut SqliteConnection, set_id: &str) -> Result<ExerciseSet> {
    exercise_sets::table
        .find(set_id)
        .select(ExerciseSet::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("exercise_sets", set_id))
}

pub fn update_exercise_set(
    conn: &mut SqliteConnection,
    set_id: &str,
    patch: &ExerciseSetUpdate,
) -> Result<ExerciseSet> {
    if patch.is_empty() {
        return get_exercise_set(conn, set_id);
    }
    diesel::update(exercise_sets::table.find(set_id))
        .set(patch)
        .returning(ExerciseSet::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("exercise_sets", set_id))
}

pub fn delete_exercise_set(conn: &mut SqliteConnection, set_id: &str) -> Result<()> {
    let deleted = diesel::delete(exercise_sets::table.find(set_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("exercise_sets", set_id));
    }
    Ok(())
}

// Composite operations

/// Creates the session, its exercises and their sets atomically.
pub fn start_workout(conn: &mut SqliteConnection, plan: &WorkoutPlan) -> Result<WorkoutDetail> {
    let session_id = conn.transaction(|conn| {
        let session = create_workout_session(conn, &plan.session)?;
        for (order_index, planned) in (0..).zip(&plan.exercises) {
            let new = NewWorkoutExercise::new(&session.id, &planned.exercise_id).at(order_index);
            let entry = create_workout_exercise(conn, &new)?;
            for (set_order, set) in (0..).zip(&planned.sets) {
                let new = NewExerciseSet::new(&entry.id, set.reps, set.weight).at(set_order);
                create_exercise_set(conn, &new)?;
            }
        }
        Ok::<_, Error>(session.id)
    })?;
    info!("Started workout {session_id}");
    load_workout(conn, &session_id)
}

pub fn complete_workout(conn: &mut SqliteConnection, session_id: &str) -> Result<WorkoutSession> {
    let patch = WorkoutSessionUpdate {
        end_time: Some(Some(now_timestamp())),
        is_completed: Some(true),
        ..Default::default()
    };
    let session = update_workout_session(conn, session_id, &patch)?;
    info!("Completed workout {session_id}");
    Ok(session)
}

pub fn load_workout(conn: &mut SqliteConnection, session_id: &str) -> Result<WorkoutDetail> {
    debug!("Loading workout {session_id}");
    let session = get_workout_session(conn, session_id)?;

    let rows: Vec<(WorkoutExercise, Exercise)> = workout_exercises::table
        .inner_join(exercises::table)
        .filter(workout_exercises::session_id.eq(&session.id))
        .order((
            workout_exercises::order_index.asc(),
            workout_exercises::created_at.asc(),
        ))
        .select((WorkoutExercise::as_select(), Exercise::as_select()))
        .load(conn)?;
    let (entries, catalog): (Vec<WorkoutExercise>, Vec<Exercise>) = rows.into_iter().unzip();

    let sets = ExerciseSet::belonging_to(&entries)
        .order((exercise_sets::set_order.asc(), exercise_sets::created_at.asc()))
        .select(ExerciseSet::as_select())
        .load::<ExerciseSet>(conn)?
        .grouped_by(&entries);

    let exercises = entries
        .into_iter()
        .zip(catalog)
        .zip(sets)
        .map(|((entry, exercise), sets)| WorkoutExerciseDetail {
            entry,
            exercise,
            sets,
        })
        .collect();

    Ok(WorkoutDetail { session, exercises })
}
