//! Bulk import of catalog rows from a JSON document.

use std::fs;
use std::path::Path;

use diesel::prelude::*;
use log::info;
use serde::{Deserialize, Serialize};

use crate::db::models::{NewCardioActivity, NewExercise, NewFood, NewHiitWorkout, NewRecipe};
use crate::db::operations::{
    create_cardio_activity, create_exercise, create_food, create_hiit_workout, create_recipe,
};
use crate::error::{Error, Result};

/// Catalog rows to import. Every list may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSeed {
    pub exercises: Vec<NewExercise>,
    pub foods: Vec<NewFood>,
    pub cardio_activities: Vec<NewCardioActivity>,
    pub hiit_workouts: Vec<NewHiitWorkout>,
    pub recipes: Vec<NewRecipe>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub exercises: usize,
    pub foods: usize,
    pub cardio_activities: usize,
    pub hiit_workouts: usize,
    pub recipes: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.exercises + self.foods + self.cardio_activities + self.hiit_workouts + self.recipes
    }
}

impl CatalogSeed {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::invalid_input(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Inserts every row, or none of them if any insert fails.
    pub fn import(&self, conn: &mut SqliteConnection) -> Result<SeedReport> {
        let report = conn.transaction(|conn| {
            for exercise in &self.exercises {
                create_exercise(conn, exercise)?;
            }
            for food in &self.foods {
                create_food(conn, food)?;
            }
            for activity in &self.cardio_activities {
                create_cardio_activity(conn, activity)?;
            }
            for workout in &self.hiit_workouts {
                create_hiit_workout(conn, workout)?;
            }
            for recipe in &self.recipes {
                create_recipe(conn, recipe)?;
            }
            Ok::<_, Error>(SeedReport {
                exercises: self.exercises.len(),
                foods: self.foods.len(),
                cardio_activities: self.cardio_activities.len(),
                hiit_workouts: self.hiit_workouts.len(),
                recipes: self.recipes.len(),
            })
        })?;
        info!("Seeded {} catalog rows", report.total());
        Ok(report)
    }
}
