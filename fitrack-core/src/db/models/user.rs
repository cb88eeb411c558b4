use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;
use crate::db::schema::users;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_onboarded: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// `id` comes from the authentication provider and is never generated here.
#[derive(Insertable, Debug, Clone, Default, Serialize, Deserialize)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_onboarded: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl NewUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = users)]
pub struct UserUpdate {
    pub email: Option<Option<String>>,
    pub name: Option<Option<String>>,
    pub is_onboarded: Option<bool>,
}

impl Patch for UserUpdate {}
