//! Cardio sessions and their GPS route.

use diesel::prelude::*;
use log::{debug, info};

use super::{
    Page, ensure_exists, normalize_nullable, normalize_optional, normalize_timestamp, now_timestamp,
};
use crate::db::models::{
    CardioSession, CardioSessionUpdate, LocationPoint, LocationPointUpdate, NewCardioSession,
    NewLocationPoint, Patch,
};
use crate::db::schema::{cardio_sessions, location_points, users};
use crate::error::{Error, Result};

pub fn create_cardio_session(
    conn: &mut SqliteConnection,
    new: &NewCardioSession,
) -> Result<CardioSession> {
    conn.transaction(|conn| {
        ensure_exists!(conn, users, &new.user_id);
        let new = NewCardioSession {
            start_time: normalize_timestamp(&new.start_time)?,
            end_time: normalize_optional(&new.end_time)?,
            created_at: normalize_optional(&new.created_at)?,
            ..new.clone()
        };
        diesel::insert_into(cardio_sessions::table)
            .values(&new)
            .returning(CardioSession::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_cardio_session(conn: &mut SqliteConnection, session_id: &str) -> Result<CardioSession> {
    cardio_sessions::table
        .find(session_id)
        .select(CardioSession::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("cardio_sessions", session_id))
}

pub fn update_cardio_session(
    conn: &mut SqliteConnection,
    session_id: &str,
    patch: &CardioSessionUpdate,
) -> Result<CardioSession> {
    if patch.is_empty() {
        return get_cardio_session(conn, session_id);
    }
    let patch = CardioSessionUpdate {
        start_time: normalize_optional(&patch.start_time)?,
        end_time: normalize_nullable(&patch.end_time)?,
        ..patch.clone()
    };
    diesel::update(cardio_sessions::table.find(session_id))
        .set(&patch)
        .returning(CardioSession::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("cardio_sessions", session_id))
}

pub fn delete_cardio_session(conn: &mut SqliteConnection, session_id: &str) -> Result<()> {
    let deleted = diesel::delete(cardio_sessions::table.find(session_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("cardio_sessions", session_id));
    }
    Ok(())
}

/// The user's sessions, most recent first.
pub fn list_user_cardio_sessions(
    conn: &mut SqliteConnection,
    user_id: &str,
    page: Page,
) -> Result<Vec<CardioSession>> {
    debug!("Listing cardio sessions for {user_id}");
    Ok(cardio_sessions::table
        .filter(cardio_sessions::user_id.eq(user_id))
        .order((cardio_sessions::start_time.desc(), cardio_sessions::id.asc()))
        .offset(page.offset())
        .limit(page.limit())
        .select(CardioSession::as_select())
        .load(conn)?)
}

/// Inserts the session in the running, unpaused state.
pub fn start_cardio_session(
    conn: &mut SqliteConnection,
    new: &NewCardioSession,
) -> Result<CardioSession> {
    let new = NewCardioSession {
        is_running: Some(true),
        is_paused: Some(false),
        ..new.clone()
    };
    let session = create_cardio_session(conn, &new)?;
    info!("Started {} session {}", session.activity_type, session.id);
    Ok(session)
}

pub fn pause_cardio_session(
    conn: &mut SqliteConnection,
    session_id: &str,
) -> Result<CardioSession> {
    let patch = CardioSessionUpdate {
        is_paused: Some(true),
        ..Default::default()
    };
    update_cardio_session(conn, session_id, &patch)
}

pub fn resume_cardio_session(
    conn: &mut SqliteConnection,
    session_id: &str,
) -> Result<CardioSession> {
    let patch = CardioSessionUpdate {
        is_running: Some(true),
        is_paused: Some(false),
        ..Default::default()
    };
    update_cardio_session(conn, session_id, &patch)
}

/// Sets `end_time` and clears the live flags.
pub fn complete_cardio_session(
    conn: &mut SqliteConnection,
    session_id: &str,
) -> Result<CardioSession> {
    let patch = CardioSessionUpdate {
        end_time: Some(Some(now_timestamp())),
        is_running: Some(false),
        is_paused: Some(false),
        ..Default::default()
    };
    let session = update_cardio_session(conn, session_id, &patch)?;
    info!("Completed cardio session {session_id}");
    Ok(session)
}

// Route

pub fn record_location_point(
    conn: &mut SqliteConnection,
    new: &NewLocationPoint,
) -> Result<LocationPoint> {
    conn.transaction(|conn| {
        ensure_exists!(conn, cardio_sessions, &new.cardio_session_id);
        let new = NewLocationPoint {
            recorded_at: normalize_timestamp(&new.recorded_at)?,
            created_at: normalize_optional(&new.created_at)?,
            ..new.clone()
        };
        diesel::insert_into(location_points::table)
            .values(&new)
            .returning(LocationPoint::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_location_point(conn: &mut SqliteConnection, point_id: &str) -> Result<LocationPoint> {
    location_points::table
        .find(point_id)
        .select(LocationPoint::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("location_points", point_id))
}

pub fn update_location_point(
    conn: &mut SqliteConnection,
    point_id: &str,
    patch: &LocationPointUpdate,
) -> Result<LocationPoint> {
    if patch.is_empty() {
        return get_location_point(conn, point_id);
    }
    let patch = LocationPointUpdate {
        recorded_at: normalize_optional(&patch.recorded_at)?,
        ..patch.clone()
    };
    diesel::update(location_points::table.find(point_id))
        .set(&patch)
        .returning(LocationPoint::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("location_points", point_id))
}

pub fn delete_location_point(conn: &mut SqliteConnection, point_id: &str) -> Result<()> {
    let deleted = diesel::delete(location_points::table.find(point_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("location_points", point_id));
    }
    Ok(())
}

/// The session's points in `recorded_at` order, whatever order they arrived in.
pub fn load_route(conn: &mut SqliteConnection, session_id: &str) -> Result<Vec<LocationPoint>> {
    debug!("Loading route of {session_id}");
    ensure_exists!(conn, cardio_sessions, session_id);
    Ok(location_points::table
        .filter(location_points::cardio_session_id.eq(session_id))
        .order((location_points::recorded_at.asc(), location_points::id.asc()))
        .select(LocationPoint::as_select())
        .load(conn)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::operations::test_support::{conn, user};

    fn run(user_id: &str) -> NewCardioSession {
        NewCardioSession::new(user_id, "run", "Run", "Free run", "2026-10-16T07:00:00Z")
    }

    #[test]
    fn live_state_transitions() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let session = start_cardio_session(&mut conn, &run("u1")).unwrap();
        assert!(session.is_running && !session.is_paused);

        let paused = pause_cardio_session(&mut conn, &session.id).unwrap();
        assert!(paused.is_paused);

        let resumed = resume_cardio_session(&mut conn, &session.id).unwrap();
        assert!(resumed.is_running && !resumed.is_paused);

        let done = complete_cardio_session(&mut conn, &session.id).unwrap();
        assert!(!done.is_running && !done.is_paused);
        assert!(done.end_time.is_some());
    }

    #[test]
    fn nullable_metrics_can_be_set_and_cleared() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let session = create_cardio_session(&mut conn, &run("u1")).unwrap();
        assert!(!session.is_running);
        assert_eq!(session.distance_km, None);

        let patch = CardioSessionUpdate {
            distance_km: Some(Some(5.2)),
            calories: Some(Some(320)),
            ..Default::default()
        };
        let updated = update_cardio_session(&mut conn, &session.id, &patch).unwrap();
        assert_eq!(updated.distance_km, Some(5.2));
        assert_eq!(updated.calories, Some(320));

        let clear = CardioSessionUpdate {
            distance_km: Some(None),
            ..Default::default()
        };
        let cleared = update_cardio_session(&mut conn, &session.id, &clear).unwrap();
        assert_eq!(cleared.distance_km, None);
        assert_eq!(cleared.calories, Some(320));
    }

    #[test]
    fn points_need_an_existing_session() {
        let mut conn = conn();
        let err = record_location_point(
            &mut conn,
            &NewLocationPoint::new("missing", 48.85, 2.35, "2026-10-16T07:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "cardio_sessions", .. }));
        assert!(load_route(&mut conn, "missing").unwrap_err().is_not_found());
    }

    #[test]
    fn deleting_the_session_drops_its_route() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let session = create_cardio_session(&mut conn, &run("u1")).unwrap();
        let point = record_location_point(
            &mut conn,
            &NewLocationPoint::new(&session.id, 48.85, 2.35, "2026-10-16T07:00:00Z"),
        )
        .unwrap();
        delete_cardio_session(&mut conn, &session.id).unwrap();
        assert!(get_location_point(&mut conn, &point.id).unwrap_err().is_not_found());
    }

    #[test]
    fn route_follows_instants_not_text() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let session = create_cardio_session(&mut conn, &run("u1")).unwrap();
        for (lat, at) in [
            (1.0, "2026-10-16T07:30:00Z"),
            (2.0, "2026-10-16T08:00:00+01:00"),
            (3.0, "2026-10-16T07:15:00Z"),
            (4.0, "2026-10-16T07:00:00.500Z"),
        ] {
            record_location_point(&mut conn, &NewLocationPoint::new(&session.id, lat, 2.35, at))
                .unwrap();
        }

        let route = load_route(&mut conn, &session.id).unwrap();
        let order: Vec<_> = route
            .iter()
            .map(|p| (p.latitude, p.recorded_at.as_str()))
            .collect();
        assert_eq!(
            order,
            [
                (2.0, "2026-10-16T07:00:00.000Z"),
                (4.0, "2026-10-16T07:00:00.500Z"),
                (3.0, "2026-10-16T07:15:00.000Z"),
                (1.0, "2026-10-16T07:30:00.000Z"),
            ]
        );

        let patch = LocationPointUpdate {
            recorded_at: Some("2026-10-16T06:00:00-02:00".into()),
            ..Default::default()
        };
        let moved = update_location_point(&mut conn, &route[0].id, &patch).unwrap();
        assert_eq!(moved.recorded_at, "2026-10-16T08:00:00.000Z");
        let last = load_route(&mut conn, &session.id).unwrap().pop().unwrap();
        assert_eq!(last.id, moved.id);
    }

    #[test]
    fn malformed_recorded_at_is_rejected() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let session = create_cardio_session(&mut conn, &run("u1")).unwrap();
        let err = record_location_point(
            &mut conn,
            &NewLocationPoint::new(&session.id, 48.85, 2.35, "16/10/2026 07:00"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "{err:?}");
        assert!(load_route(&mut conn, &session.id).unwrap().is_empty());
    }

    #[test]
    fn every_column_round_trips() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let new = NewCardioSession {
            id: Some("6f1c2a0e-8d4b-4c3e-9a7f-2b5d8e1f0c93".into()),
            end_time: Some("2026-10-16T07:45:00Z".into()),
            duration_seconds: Some(2700),
            distance_km: Some(8.4),
            average_speed_kmh: Some(11.2),
            current_speed_kmh: Some(12.5),
            steps: Some(7400),
            calories: Some(610),
            target_distance_km: Some(10.0),
            target_duration_seconds: Some(3600),
            is_running: Some(false),
            is_paused: Some(true),
            notes: Some("Windy".into()),
            created_at: Some("2026-10-16T06:59:00Z".into()),
            ..run("u1")
        };
        let session = create_cardio_session(&mut conn, &new).unwrap();
        assert_eq!(
            session,
            CardioSession {
                id: "6f1c2a0e-8d4b-4c3e-9a7f-2b5d8e1f0c93".into(),
                user_id: "u1".into(),
                activity_type: "run".into(),
                activity_title: "Run".into(),
                format_title: "Free run".into(),
                start_time: "2026-10-16T07:00:00.000Z".into(),
                end_time: Some("2026-10-16T07:45:00.000Z".into()),
                duration_seconds: Some(2700),
                distance_km: Some(8.4),
                average_speed_kmh: Some(11.2),
                current_speed_kmh: Some(12.5),
                steps: Some(7400),
                calories: Some(610),
                target_distance_km: Some(10.0),
                target_duration_seconds: Some(3600),
                is_running: false,
                is_paused: true,
                notes: Some("Windy".into()),
                created_at: "2026-10-16T06:59:00.000Z".into(),
            }
        );
        assert_eq!(get_cardio_session(&mut conn, &session.id).unwrap(), session);

        let point = record_location_point(
            &mut conn,
            &NewLocationPoint {
                altitude: Some(35.5),
                speed_kmh: Some(11.8),
                ..NewLocationPoint::new(&session.id, 48.8566, 2.3522, "2026-10-16T07:10:00Z")
            },
        )
        .unwrap();
        let stored = get_location_point(&mut conn, &point.id).unwrap();
        assert_eq!(stored, point);
        assert_eq!((stored.latitude, stored.longitude), (48.8566, 2.3522));
        assert_eq!((stored.altitude, stored.speed_kmh), (Some(35.5), Some(11.8)));
        assert_eq!(stored.recorded_at, "2026-10-16T07:10:00.000Z");
    }

    #[test]
    fn required_only_inserts_expose_generated_columns() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let session = create_cardio_session(&mut conn, &run("u1")).unwrap();
        let point = record_location_point(
            &mut conn,
            &NewLocationPoint::new(&session.id, 48.85, 2.35, "2026-10-16T07:00:00Z"),
        )
        .unwrap();

        for (id, created_at) in [
            (&session.id, &session.created_at),
            (&point.id, &point.created_at),
        ] {
            assert_eq!(id.len(), 36, "{id}");
            assert!(!created_at.is_empty());
        }
        assert!(!session.is_running && !session.is_paused);
        assert_eq!((session.end_time.as_deref(), session.notes.as_deref()), (None, None));
        assert_eq!((point.altitude, point.speed_kmh), (None, None));
    }

    #[test]
    fn empty_patches_return_the_current_rows() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let session = create_cardio_session(&mut conn, &run("u1")).unwrap();
        let point = record_location_point(
            &mut conn,
            &NewLocationPoint::new(&session.id, 48.85, 2.35, "2026-10-16T07:00:00Z"),
        )
        .unwrap();

        let same = update_cardio_session(&mut conn, &session.id, &Default::default()).unwrap();
        assert_eq!(same, session);
        let same = update_location_point(&mut conn, &point.id, &Default::default()).unwrap();
        assert_eq!(same, point);
        let err = update_location_point(&mut conn, "missing", &Default::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn sessions_are_listed_per_user_newest_first() {
        let mut conn = conn();
        user(&mut conn, "u1");
        user(&mut conn, "u2");
        for start in ["2026-10-14T07:00:00Z", "2026-10-16T07:00:00Z", "2026-10-15T09:00:00+02:00"] {
            create_cardio_session(
                &mut conn,
                &NewCardioSession::new("u1", "run", "Run", "Free run", start),
            )
            .unwrap();
        }
        create_cardio_session(&mut conn, &run("u2")).unwrap();

        let all = list_user_cardio_sessions(&mut conn, "u1", Page::default()).unwrap();
        let starts: Vec<_> = all.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(
            starts,
            [
                "2026-10-16T07:00:00.000Z",
                "2026-10-15T07:00:00.000Z",
                "2026-10-14T07:00:00.000Z",
            ]
        );
        let second = list_user_cardio_sessions(&mut conn, "u1", Page::new(2, 2).unwrap()).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].start_time, "2026-10-14T07:00:00.000Z");
        assert!(list_user_cardio_sessions(&mut conn, "u3", Page::default()).unwrap().is_empty());
    }
}
