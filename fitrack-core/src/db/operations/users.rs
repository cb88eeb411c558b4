use diesel::prelude::*;
use log::{debug, info};

use super::now_timestamp;
use crate::db::models::{NewUser, Patch, User, UserUpdate};
use crate::db::schema::users;
use crate::error::{Error, Result};

pub fn create_user(conn: &mut SqliteConnection, new: &NewUser) -> Result<User> {
    let user = diesel::insert_into(users::table)
        .values(new)
        .returning(User::as_returning())
        .get_result(conn)?;
    info!("Created user {}", user.id);
    Ok(user)
}

pub fn get_user(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
    debug!("Loading user {user_id}");
    users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("users", user_id))
}

/// Applies `patch` and refreshes `updated_at`. An empty patch leaves the row,
/// including `updated_at`, untouched.
pub fn update_user(conn: &mut SqliteConnection, user_id: &str, patch: &UserUpdate) -> Result<User> {
    if patch.is_empty() {
        return get_user(conn, user_id);
    }
    diesel::update(users::table.find(user_id))
        .set((patch, users::updated_at.eq(now_timestamp())))
        .returning(User::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("users", user_id))
}

pub fn mark_user_onboarded(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
    let patch = UserUpdate {
        is_onboarded: Some(true),
        ..Default::default()
    };
    update_user(conn, user_id, &patch)
}

/// Deletes the user together with their sessions, meals and custom catalog rows.
pub fn delete_user(conn: &mut SqliteConnection, user_id: &str) -> Result<()> {
    let deleted = diesel::delete(users::table.find(user_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("users", user_id));
    }
    info!("Deleted user {user_id}");
    Ok(())
}
