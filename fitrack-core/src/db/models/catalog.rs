//! Catalog entities: exercises, foods, cardio activities, HIIT workout
//! templates and recipes.
//!
//! Every catalog row is either global or owned by one user. Callers express
//! that with [`Ownership`]; the private `*Record` / `*Changes` structs spread it
//! over the `is_custom` and `user_id` columns.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;
use crate::db::schema::{cardio_activities, exercises, foods, hiit_workouts, recipes};
use crate::db::types::{Ingredients, Ownership, StringList};

// Exercises

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Exercise {
    pub id: String,
    pub name_en: String,
    pub name_fr: String,
    pub muscle_group: String,
    pub equipment: Option<String>,
    pub description: Option<String>,
    pub is_custom: bool,
    pub user_id: Option<String>,
    pub created_at: String,
}

impl Exercise {
    pub fn ownership(&self) -> Ownership {
        Ownership::from_columns(self.user_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExercise {
    pub id: Option<String>,
    pub name_en: String,
    pub name_fr: String,
    pub muscle_group: String,
    pub equipment: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Ownership,
    pub created_at: Option<String>,
}

impl NewExercise {
    pub fn new(
        name_en: impl Into<String>,
        name_fr: impl Into<String>,
        muscle_group: impl Into<String>,
    ) -> Self {
        Self {
            name_en: name_en.into(),
            name_fr: name_fr.into(),
            muscle_group: muscle_group.into(),
            ..Default::default()
        }
    }

    pub(crate) fn record(&self) -> ExerciseRecord<'_> {
        ExerciseRecord {
            id: self.id.as_deref(),
            name_en: &self.name_en,
            name_fr: &self.name_fr,
            muscle_group: &self.muscle_group,
            equipment: self.equipment.as_deref(),
            description: self.description.as_deref(),
            is_custom: self.owner.is_custom(),
            user_id: self.owner.user_id(),
            created_at: self.created_at.as_deref(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = exercises)]
pub(crate) struct ExerciseRecord<'a> {
    id: Option<&'a str>,
    name_en: &'a str,
    name_fr: &'a str,
    muscle_group: &'a str,
    equipment: Option<&'a str>,
    description: Option<&'a str>,
    is_custom: bool,
    user_id: Option<&'a str>,
    created_at: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseUpdate {
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub muscle_group: Option<String>,
    pub equipment: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub owner: Option<Ownership>,
}

impl Patch for ExerciseUpdate {}

impl ExerciseUpdate {
    pub(crate) fn changes(&self) -> ExerciseChanges<'_> {
        ExerciseChanges {
            name_en: self.name_en.as_deref(),
            name_fr: self.name_fr.as_deref(),
            muscle_group: self.muscle_group.as_deref(),
            equipment: self.equipment.as_ref().map(Option::as_deref),
            description: self.description.as_ref().map(Option::as_deref),
            is_custom: self.owner.as_ref().map(Ownership::is_custom),
            user_id: self.owner.as_ref().map(Ownership::user_id),
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = exercises)]
pub(crate) struct ExerciseChanges<'a> {
    name_en: Option<&'a str>,
    name_fr: Option<&'a str>,
    muscle_group: Option<&'a str>,
    equipment: Option<Option<&'a str>>,
    description: Option<Option<&'a str>>,
    is_custom: Option<bool>,
    user_id: Option<Option<&'a str>>,
}

// Foods

/// Nutritional values are per 100 g.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = foods)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Food {
    pub id: String,
    pub name_en: String,
    pub name_fr: String,
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub category: Option<String>,
    pub is_custom: bool,
    pub user_id: Option<String>,
    pub created_at: String,
}

impl Food {
    pub fn ownership(&self) -> Ownership {
        Ownership::from_columns(self.user_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewFood {
    pub id: Option<String>,
    pub name_en: String,
    pub name_fr: String,
    pub calories: f64,
    pub proteins: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub category: Option<String>,
    #[serde(default)]
    pub owner: Ownership,
    pub created_at: Option<String>,
}

impl NewFood {
    pub fn new(name_en: impl Into<String>, name_fr: impl Into<String>, calories: f64) -> Self {
        Self {
            name_en: name_en.into(),
            name_fr: name_fr.into(),
            calories,
            ..Default::default()
        }
    }

    pub(crate) fn record(&self) -> FoodRecord<'_> {
        FoodRecord {
            id: self.id.as_deref(),
            name_en: &self.name_en,
            name_fr: &self.name_fr,
            calories: self.calories,
            proteins: self.proteins,
            carbs: self.carbs,
            fats: self.fats,
            category: self.category.as_deref(),
            is_custom: self.owner.is_custom(),
            user_id: self.owner.user_id(),
            created_at: self.created_at.as_deref(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = foods)]
pub(crate) struct FoodRecord<'a> {
    id: Option<&'a str>,
    name_en: &'a str,
    name_fr: &'a str,
    calories: f64,
    proteins: Option<f64>,
    carbs: Option<f64>,
    fats: Option<f64>,
    category: Option<&'a str>,
    is_custom: bool,
    user_id: Option<&'a str>,
    created_at: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodUpdate {
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub calories: Option<f64>,
    pub proteins: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub category: Option<Option<String>>,
    pub owner: Option<Ownership>,
}

impl Patch for FoodUpdate {}

impl FoodUpdate {
    pub(crate) fn changes(&self) -> FoodChanges<'_> {
        FoodChanges {
            name_en: self.name_en.as_deref(),
            name_fr: self.name_fr.as_deref(),
            calories: self.calories,
            proteins: self.proteins,
            carbs: self.carbs,
            fats: self.fats,
            category: self.category.as_ref().map(Option::as_deref),
            is_custom: self.owner.as_ref().map(Ownership::is_custom),
            user_id: self.owner.as_ref().map(Ownership::user_id),
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = foods)]
pub(crate) struct FoodChanges<'a> {
    name_en: Option<&'a str>,
    name_fr: Option<&'a str>,
    calories: Option<f64>,
    proteins: Option<f64>,
    carbs: Option<f64>,
    fats: Option<f64>,
    category: Option<Option<&'a str>>,
    is_custom: Option<bool>,
    user_id: Option<Option<&'a str>>,
}

// Cardio activities

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = cardio_activities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CardioActivity {
    pub id: String,
    pub activity_type: String,
    pub name_en: String,
    pub name_fr: String,
    pub is_custom: bool,
    pub user_id: Option<String>,
    pub created_at: String,
}

impl CardioActivity {
    pub fn ownership(&self) -> Ownership {
        Ownership::from_columns(self.user_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCardioActivity {
    pub id: Option<String>,
    pub activity_type: String,
    pub name_en: String,
    pub name_fr: String,
    #[serde(default)]
    pub owner: Ownership,
    pub created_at: Option<String>,
}

impl NewCardioActivity {
    pub fn new(
        activity_type: impl Into<String>,
        name_en: impl Into<String>,
        name_fr: impl Into<String>,
    ) -> Self {
        Self {
            activity_type: activity_type.into(),
            name_en: name_en.into(),
            name_fr: name_fr.into(),
            ..Default::default()
        }
    }

    pub(crate) fn record(&self) -> CardioActivityRecord<'_> {
        CardioActivityRecord {
            id: self.id.as_deref(),
            activity_type: &self.activity_type,
            name_en: &self.name_en,
            name_fr: &self.name_fr,
            is_custom: self.owner.is_custom(),
            user_id: self.owner.user_id(),
            created_at: self.created_at.as_deref(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = cardio_activities)]
pub(crate) struct CardioActivityRecord<'a> {
    id: Option<&'a str>,
    activity_type: &'a str,
    name_en: &'a str,
    name_fr: &'a str,
    is_custom: bool,
    user_id: Option<&'a str>,
    created_at: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardioActivityUpdate {
    pub activity_type: Option<String>,
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub owner: Option<Ownership>,
}

impl Patch for CardioActivityUpdate {}

impl CardioActivityUpdate {
    pub(crate) fn changes(&self) -> CardioActivityChanges<'_> {
        CardioActivityChanges {
            activity_type: self.activity_type.as_deref(),
            name_en: self.name_en.as_deref(),
            name_fr: self.name_fr.as_deref(),
            is_custom: self.owner.as_ref().map(Ownership::is_custom),
            user_id: self.owner.as_ref().map(Ownership::user_id),
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = cardio_activities)]
pub(crate) struct CardioActivityChanges<'a> {
    activity_type: Option<&'a str>,
    name_en: Option<&'a str>,
    name_fr: Option<&'a str>,
    is_custom: Option<bool>,
    user_id: Option<Option<&'a str>>,
}

// HIIT workout templates

/// Durations are in seconds.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = hiit_workouts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HiitWorkout {
    pub id: String,
    pub title_en: String,
    pub title_fr: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub work_duration: i32,
    pub rest_duration: i32,
    pub total_duration: i32,
    pub total_rounds: i32,
    pub is_custom: bool,
    pub user_id: Option<String>,
    pub created_at: String,
}

impl HiitWorkout {
    pub fn ownership(&self) -> Ownership {
        Ownership::from_columns(self.user_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewHiitWorkout {
    pub id: Option<String>,
    pub title_en: String,
    pub title_fr: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub work_duration: i32,
    pub rest_duration: i32,
    pub total_duration: i32,
    pub total_rounds: i32,
    #[serde(default)]
    pub owner: Ownership,
    pub created_at: Option<String>,
}

impl NewHiitWorkout {
    pub(crate) fn record(&self) -> HiitWorkoutRecord<'_> {
        HiitWorkoutRecord {
            id: self.id.as_deref(),
            title_en: &self.title_en,
            title_fr: &self.title_fr,
            description_en: self.description_en.as_deref(),
            description_fr: self.description_fr.as_deref(),
            work_duration: self.work_duration,
            rest_duration: self.rest_duration,
            total_duration: self.total_duration,
            total_rounds: self.total_rounds,
            is_custom: self.owner.is_custom(),
            user_id: self.owner.user_id(),
            created_at: self.created_at.as_deref(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = hiit_workouts)]
pub(crate) struct HiitWorkoutRecord<'a> {
    id: Option<&'a str>,
    title_en: &'a str,
    title_fr: &'a str,
    description_en: Option<&'a str>,
    description_fr: Option<&'a str>,
    work_duration: i32,
    rest_duration: i32,
    total_duration: i32,
    total_rounds: i32,
    is_custom: bool,
    user_id: Option<&'a str>,
    created_at: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HiitWorkoutUpdate {
    pub title_en: Option<String>,
    pub title_fr: Option<String>,
    pub description_en: Option<Option<String>>,
    pub description_fr: Option<Option<String>>,
    pub work_duration: Option<i32>,
    pub rest_duration: Option<i32>,
    pub total_duration: Option<i32>,
    pub total_rounds: Option<i32>,
    pub owner: Option<Ownership>,
}

impl Patch for HiitWorkoutUpdate {}

impl HiitWorkoutUpdate {
    pub(crate) fn changes(&self) -> HiitWorkoutChanges<'_> {
        HiitWorkoutChanges {
            title_en: self.title_en.as_deref(),
            title_fr: self.title_fr.as_deref(),
            description_en: self.description_en.as_ref().map(Option::as_deref),
            description_fr: self.description_fr.as_ref().map(Option::as_deref),
            work_duration: self.work_duration,
            rest_duration: self.rest_duration,
            total_duration: self.total_duration,
            total_rounds: self.total_rounds,
            is_custom: self.owner.as_ref().map(Ownership::is_custom),
            user_id: self.owner.as_ref().map(Ownership::user_id),
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = hiit_workouts)]
pub(crate) struct HiitWorkoutChanges<'a> {
    title_en: Option<&'a str>,
    title_fr: Option<&'a str>,
    description_en: Option<Option<&'a str>>,
    description_fr: Option<Option<&'a str>>,
    work_duration: Option<i32>,
    rest_duration: Option<i32>,
    total_duration: Option<i32>,
    total_rounds: Option<i32>,
    is_custom: Option<bool>,
    user_id: Option<Option<&'a str>>,
}

// Recipes

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Recipe {
    pub id: String,
    pub name_en: String,
    pub name_fr: String,
    pub ingredients: Ingredients,
    pub steps_en: StringList,
    pub steps_fr: StringList,
    pub servings: i32,
    pub difficulty: Option<String>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<StringList>,
    pub is_custom: bool,
    pub user_id: Option<String>,
    pub created_at: String,
}

impl Recipe {
    pub fn ownership(&self) -> Ownership {
        Ownership::from_columns(self.user_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecipe {
    pub id: Option<String>,
    pub name_en: String,
    pub name_fr: String,
    pub ingredients: Ingredients,
    pub steps_en: StringList,
    pub steps_fr: StringList,
    pub servings: i32,
    pub difficulty: Option<String>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<StringList>,
    #[serde(default)]
    pub owner: Ownership,
    pub created_at: Option<String>,
}

impl NewRecipe {
    pub(crate) fn record(&self) -> RecipeRecord<'_> {
        RecipeRecord {
            id: self.id.as_deref(),
            name_en: &self.name_en,
            name_fr: &self.name_fr,
            ingredients: &self.ingredients,
            steps_en: &self.steps_en,
            steps_fr: &self.steps_fr,
            servings: self.servings,
            difficulty: self.difficulty.as_deref(),
            duration: self.duration.as_deref(),
            image_url: self.image_url.as_deref(),
            tags: self.tags.as_ref(),
            is_custom: self.owner.is_custom(),
            user_id: self.owner.user_id(),
            created_at: self.created_at.as_deref(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeRecord<'a> {
    id: Option<&'a str>,
    name_en: &'a str,
    name_fr: &'a str,
    ingredients: &'a Ingredients,
    steps_en: &'a StringList,
    steps_fr: &'a StringList,
    servings: i32,
    difficulty: Option<&'a str>,
    duration: Option<&'a str>,
    image_url: Option<&'a str>,
    tags: Option<&'a StringList>,
    is_custom: bool,
    user_id: Option<&'a str>,
    created_at: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeUpdate {
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub ingredients: Option<Ingredients>,
    pub steps_en: Option<StringList>,
    pub steps_fr: Option<StringList>,
    pub servings: Option<i32>,
    pub difficulty: Option<Option<String>>,
    pub duration: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub tags: Option<Option<StringList>>,
    pub owner: Option<Ownership>,
}

impl Patch for RecipeUpdate {}

impl RecipeUpdate {
    pub(crate) fn changes(&self) -> RecipeChanges<'_> {
        RecipeChanges {
            name_en: self.name_en.as_deref(),
            name_fr: self.name_fr.as_deref(),
            ingredients: self.ingredients.as_ref(),
            steps_en: self.steps_en.as_ref(),
            steps_fr: self.steps_fr.as_ref(),
            servings: self.servings,
            difficulty: self.difficulty.as_ref().map(Option::as_deref),
            duration: self.duration.as_ref().map(Option::as_deref),
            image_url: self.image_url.as_ref().map(Option::as_deref),
            tags: self.tags.as_ref().map(Option::as_ref),
            is_custom: self.owner.as_ref().map(Ownership::is_custom),
            user_id: self.owner.as_ref().map(Ownership::user_id),
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeChanges<'a> {
    name_en: Option<&'a str>,
    name_fr: Option<&'a str>,
    ingredients: Option<&'a Ingredients>,
    steps_en: Option<&'a StringList>,
    steps_fr: Option<&'a StringList>,
    servings: Option<i32>,
    difficulty: Option<Option<&'a str>>,
    duration: Option<Option<&'a str>>,
    image_url: Option<Option<&'a str>>,
    tags: Option<Option<&'a StringList>>,
    is_custom: Option<bool>,
    user_id: Option<Option<&'a str>>,
}
