use diesel::prelude::*;
use log::{debug, info};

use super::{
    Page, ensure_exists, normalize_nullable, normalize_optional, normalize_timestamp, now_timestamp,
};
use crate::db::models::{HiitSession, HiitSessionUpdate, NewHiitSession, Patch};
use crate::db::schema::{hiit_sessions, hiit_workouts, users};
use crate::db::types::HiitPhase;
use crate::error::{Error, Result};

pub fn create_hiit_session(
    conn: &mut SqliteConnection,
    new: &NewHiitSession,
) -> Result<HiitSession> {
    conn.transaction(|conn| {
        ensure_exists!(conn, users, &new.user_id);
        if let Some(workout_id) = &new.workout_id {
            ensure_exists!(conn, hiit_workouts, workout_id);
        }
        let new = NewHiitSession {
            start_time: normalize_timestamp(&new.start_time)?,
            end_time: normalize_optional(&new.end_time)?,
            created_at: normalize_optional(&new.created_at)?,
            ..new.clone()
        };
        diesel::insert_into(hiit_sessions::table)
            .values(&new)
            .returning(HiitSession::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_hiit_session(conn: &mut SqliteConnection, session_id: &str) -> Result<HiitSession> {
    hiit_sessions::table
        .find(session_id)
        .select(HiitSession::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("hiit_sessions", session_id))
}

pub fn update_hiit_session(
    conn: &mut SqliteConnection,
    session_id: &str,
    patch: &HiitSessionUpdate,
) -> Result<HiitSession> {
    if patch.is_empty() {
        return get_hiit_session(conn, session_id);
    }
    let patch = HiitSessionUpdate {
        start_time: normalize_optional(&patch.start_time)?,
        end_time: normalize_nullable(&patch.end_time)?,
        ..patch.clone()
    };
    diesel::update(hiit_sessions::table.find(session_id))
        .set(&patch)
        .returning(HiitSession::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("hiit_sessions", session_id))
}

pub fn delete_hiit_session(conn: &mut SqliteConnection, session_id: &str) -> Result<()> {
    let deleted = diesel::delete(hiit_sessions::table.find(session_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("hiit_sessions", session_id));
    }
    Ok(())
}

/// The user's sessions, most recent first.
pub fn list_user_hiit_sessions(
    conn: &mut SqliteConnection,
    user_id: &str,
    page: Page,
) -> Result<Vec<HiitSession>> {
    debug!("Listing HIIT sessions for {user_id}");
    Ok(hiit_sessions::table
        .filter(hiit_sessions::user_id.eq(user_id))
        .order((hiit_sessions::start_time.desc(), hiit_sessions::id.asc()))
        .offset(page.offset())
        .limit(page.limit())
        .select(HiitSession::as_select())
        .load(conn)?)
}

/// Inserts the session as not completed, in the warmup phase of round 1
/// unless the payload says otherwise.
pub fn start_hiit_session(
    conn: &mut SqliteConnection,
    new: &NewHiitSession,
) -> Result<HiitSession> {
    let new = NewHiitSession {
        is_completed: Some(false),
        current_round: new.current_round.or(Some(1)),
        current_phase: new.current_phase.or(Some(HiitPhase::Warmup)),
        ..new.clone()
    };
    let session = create_hiit_session(conn, &new)?;
    info!("Started HIIT session {}", session.id);
    Ok(session)
}

pub fn advance_hiit_session(
    conn: &mut SqliteConnection,
    session_id: &str,
    phase: HiitPhase,
    round: i32,
) -> Result<HiitSession> {
    let patch = HiitSessionUpdate {
        current_phase: Some(Some(phase)),
        current_round: Some(Some(round)),
        ..Default::default()
    };
    update_hiit_session(conn, session_id, &patch)
}

pub fn complete_hiit_session(
    conn: &mut SqliteConnection,
    session_id: &str,
) -> Result<HiitSession> {
    let patch = HiitSessionUpdate {
        is_completed: Some(true),
        end_time: Some(Some(now_timestamp())),
        current_phase: Some(Some(HiitPhase::Finished)),
        ..Default::default()
    };
    let session = update_hiit_session(conn, session_id, &patch)?;
    info!("Completed HIIT session {session_id}");
    Ok(session)
}
