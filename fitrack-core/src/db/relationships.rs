//! Static declaration of every foreign key in the schema.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDelete {
    /// Children are deleted with the parent.
    Cascade,
    /// Children keep living with the reference cleared.
    SetNull,
    /// Deleting a referenced parent fails.
    NoAction,
}

impl OnDelete {
    /// Spelling used by `pragma_foreign_key_list`.
    pub fn as_sql(self) -> &'static str {
        match self {
            OnDelete::Cascade => "CASCADE",
            OnDelete::SetNull => "SET NULL",
            OnDelete::NoAction => "NO ACTION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub constraint: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    pub referenced_table: &'static str,
    pub referenced_column: &'static str,
    pub is_one_to_one: bool,
    pub nullable: bool,
    pub on_delete: OnDelete,
}

impl Relationship {
    const fn many(
        constraint: &'static str,
        table: &'static str,
        column: &'static str,
        referenced_table: &'static str,
        nullable: bool,
        on_delete: OnDelete,
    ) -> Self {
        Self {
            constraint,
            table,
            column,
            referenced_table,
            referenced_column: "id",
            is_one_to_one: false,
            nullable,
            on_delete,
        }
    }
}

pub static RELATIONSHIPS: &[Relationship] = &[
    // Owned by a user
    Relationship::many(
        "workout_sessions_user_id_fkey",
        "workout_sessions",
        "user_id",
        "users",
        false,
        OnDelete::Cascade,
    ),
    Relationship::many(
        "cardio_sessions_user_id_fkey",
        "cardio_sessions",
        "user_id",
        "users",
        false,
        OnDelete::Cascade,
    ),
    Relationship::many(
        "hiit_sessions_user_id_fkey",
        "hiit_sessions",
        "user_id",
        "users",
        false,
        OnDelete::Cascade,
    ),
    Relationship::many("meals_user_id_fkey", "meals", "user_id", "users", false, OnDelete::Cascade),
    // Custom catalog rows
    Relationship::many(
        "exercises_user_id_fkey",
        "exercises",
        "user_id",
        "users",
        true,
        OnDelete::Cascade,
    ),
    Relationship::many("foods_user_id_fkey", "foods", "user_id", "users", true, OnDelete::Cascade),
    Relationship::many(
        "cardio_activities_user_id_fkey",
        "cardio_activities",
        "user_id",
        "users",
        true,
        OnDelete::Cascade,
    ),
    Relationship::many(
        "hiit_workouts_user_id_fkey",
        "hiit_workouts",
        "user_id",
        "users",
        true,
        OnDelete::Cascade,
    ),
    Relationship::many(
        "recipes_user_id_fkey",
        "recipes",
        "user_id",
        "users",
        true,
        OnDelete::Cascade,
    ),
    // Session composition
    Relationship::many(
        "workout_exercises_session_id_fkey",
        "workout_exercises",
        "session_id",
        "workout_sessions",
        false,
        OnDelete::Cascade,
    ),
    Relationship::many(
        "workout_exercises_exercise_id_fkey",
        "workout_exercises",
        "exercise_id",
        "exercises",
        false,
        OnDelete::NoAction,
    ),
    Relationship::many(
        "exercise_sets_workout_exercise_id_fkey",
        "exercise_sets",
        "workout_exercise_id",
        "workout_exercises",
        false,
        OnDelete::Cascade,
    ),
    Relationship::many(
        "location_points_cardio_session_id_fkey",
        "location_points",
        "cardio_session_id",
        "cardio_sessions",
        false,
        OnDelete::Cascade,
    ),
    Relationship::many(
        "hiit_sessions_workout_id_fkey",
        "hiit_sessions",
        "workout_id",
        "hiit_workouts",
        true,
        OnDelete::SetNull,
    ),
    Relationship::many(
        "meal_food_items_meal_id_fkey",
        "meal_food_items",
        "meal_id",
        "meals",
        false,
        OnDelete::Cascade,
    ),
    Relationship::many(
        "meal_food_items_food_id_fkey",
        "meal_food_items",
        "food_id",
        "foods",
        true,
        OnDelete::SetNull,
    ),
];

/// Foreign keys declared on `table`.
pub fn declared_on(table: &str) -> impl Iterator<Item = &'static Relationship> + '_ {
    RELATIONSHIPS.iter().filter(move |r| r.table == table)
}

/// Foreign keys pointing at `table`.
pub fn referencing(table: &str) -> impl Iterator<Item = &'static Relationship> + '_ {
    RELATIONSHIPS.iter().filter(move |r| r.referenced_table == table)
}

pub fn find(table: &str, column: &str) -> Option<&'static Relationship> {
    RELATIONSHIPS
        .iter()
        .find(|r| r.table == table && r.column == column)
}

/// One row of `pragma_foreign_key_list`, joined with column nullability.
#[derive(Debug, Clone, PartialEq, Eq, QueryableByName)]
pub struct StoredForeignKey {
    #[diesel(sql_type = Text)]
    pub table_name: String,
    #[diesel(sql_type = Text)]
    pub column_name: String,
    #[diesel(sql_type = Text)]
    pub referenced_table: String,
    #[diesel(sql_type = Text)]
    pub referenced_column: String,
    #[diesel(sql_type = Text)]
    pub on_delete: String,
    #[diesel(sql_type = Integer)]
    pub not_null: i32,
}

impl StoredForeignKey {
    fn matches(&self, declared: &Relationship) -> bool {
        self.table_name == declared.table
            && self.column_name == declared.column
            && self.referenced_table == declared.referenced_table
            && self.referenced_column == declared.referenced_column
            && self.on_delete == declared.on_delete.as_sql()
            && (self.not_null == 0) == declared.nullable
    }
}

pub fn foreign_keys_in_store(conn: &mut SqliteConnection) -> Result<Vec<StoredForeignKey>> {
    Ok(diesel::sql_query(
        "SELECT m.name AS table_name, fk.\"from\" AS column_name, \
                fk.\"table\" AS referenced_table, fk.\"to\" AS referenced_column, \
                fk.on_delete AS on_delete, col.\"notnull\" AS not_null \
         FROM sqlite_master m \
         JOIN pragma_foreign_key_list(m.name) fk \
         JOIN pragma_table_info(m.name) col ON col.name = fk.\"from\" \
         WHERE m.type = 'table' \
         ORDER BY m.name, fk.\"from\"",
    )
    .load(conn)?)
}

/// Checks that the store's foreign keys are exactly [`RELATIONSHIPS`].
pub fn verify(conn: &mut SqliteConnection) -> Result<()> {
    let stored = foreign_keys_in_store(conn)?;
    let mut problems = Vec::new();

    for declared in RELATIONSHIPS {
        if !stored.iter().any(|fk| fk.matches(declared)) {
            problems.push(format!("{} is missing or differs", declared.constraint));
        }
    }
    for fk in &stored {
        if !RELATIONSHIPS.iter().any(|declared| fk.matches(declared)) {
            problems.push(format!(
                "undeclared {}.{} -> {}",
                fk.table_name, fk.column_name, fk.referenced_table
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::Migration(problems.join("; ")))
    }
}
