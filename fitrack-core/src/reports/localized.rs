//! Catalog rows with their bilingual columns resolved to one language.
//!
//! Every function returns the whole catalog ordered by the resolved name (or
//! title), then id.

use diesel::prelude::*;
use log::debug;
use serde::Serialize;

use crate::db::models::{CardioActivity, Exercise, Food, HiitWorkout, Recipe};
use crate::db::schema::{cardio_activities, exercises, foods, hiit_workouts, recipes};
use crate::db::types::Ingredients;
use crate::error::Result;
use crate::locale::Language;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedExercise {
    pub id: String,
    pub name: String,
    pub muscle_group: String,
    pub equipment: Option<String>,
    pub description: Option<String>,
    pub is_custom: bool,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedFood {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub category: Option<String>,
    pub is_custom: bool,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedCardioActivity {
    pub id: String,
    pub activity_type: String,
    pub name: String,
    pub is_custom: bool,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedHiitWorkout {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub work_duration: i32,
    pub rest_duration: i32,
    pub total_duration: i32,
    pub total_rounds: i32,
    pub is_custom: bool,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedRecipe {
    pub id: String,
    pub name: String,
    pub ingredients: Ingredients,
    pub steps: Vec<String>,
    pub image_url: Option<String>,
    pub duration: Option<String>,
    pub servings: i32,
    pub difficulty: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_custom: bool,
    pub user_id: Option<String>,
}

fn sort_by_label<T>(rows: &mut [T], key: impl Fn(&T) -> (&str, &str)) {
    rows.sort_by(|a, b| key(a).cmp(&key(b)));
}

pub fn get_exercises_localized(
    conn: &mut SqliteConnection,
    user_language: Option<&str>,
) -> Result<Vec<LocalizedExercise>> {
    let language = Language::from_tag(user_language)?;
    debug!("Localizing exercises in {language}");
    let mut rows: Vec<LocalizedExercise> = exercises::table
        .select(Exercise::as_select())
        .load::<Exercise>(conn)?
        .into_iter()
        .map(|e| LocalizedExercise {
            name: language.pick(&e.name_en, &e.name_fr).to_string(),
            id: e.id,
            muscle_group: e.muscle_group,
            equipment: e.equipment,
            description: e.description,
            is_custom: e.is_custom,
            user_id: e.user_id,
        })
        .collect();
    sort_by_label(&mut rows, |r| (r.name.as_str(), r.id.as_str()));
    Ok(rows)
}

pub fn get_foods_localized(
    conn: &mut SqliteConnection,
    user_language: Option<&str>,
) -> Result<Vec<LocalizedFood>> {
    let language = Language::from_tag(user_language)?;
    debug!("Localizing foods in {language}");
    let mut rows: Vec<LocalizedFood> = foods::table
        .select(Food::as_select())
        .load::<Food>(conn)?
        .into_iter()
        .map(|f| LocalizedFood {
            name: language.pick(&f.name_en, &f.name_fr).to_string(),
            id: f.id,
            calories: f.calories,
            proteins: f.proteins,
            carbs: f.carbs,
            fats: f.fats,
            category: f.category,
            is_custom: f.is_custom,
            user_id: f.user_id,
        })
        .collect();
    sort_by_label(&mut rows, |r| (r.name.as_str(), r.id.as_str()));
    Ok(rows)
}

pub fn get_cardio_activities_localized(
    conn: &mut SqliteConnection,
    user_language: Option<&str>,
) -> Result<Vec<LocalizedCardioActivity>> {
    let language = Language::from_tag(user_language)?;
    debug!("Localizing cardio activities in {language}");
    let mut rows: Vec<LocalizedCardioActivity> = cardio_activities::table
        .select(CardioActivity::as_select())
        .load::<CardioActivity>(conn)?
        .into_iter()
        .map(|a| LocalizedCardioActivity {
            name: language.pick(&a.name_en, &a.name_fr).to_string(),
            id: a.id,
            activity_type: a.activity_type,
            is_custom: a.is_custom,
            user_id: a.user_id,
        })
        .collect();
    sort_by_label(&mut rows, |r| (r.name.as_str(), r.id.as_str()));
    Ok(rows)
}

pub fn get_hiit_workouts_localized(
    conn: &mut SqliteConnection,
    user_language: Option<&str>,
) -> Result<Vec<LocalizedHiitWorkout>> {
    let language = Language::from_tag(user_language)?;
    debug!("Localizing HIIT workouts in {language}");
    let mut rows: Vec<LocalizedHiitWorkout> = hiit_workouts::table
        .select(HiitWorkout::as_select())
        .load::<HiitWorkout>(conn)?
        .into_iter()
        .map(|w| LocalizedHiitWorkout {
            title: language.pick(&w.title_en, &w.title_fr).to_string(),
            description: language
                .pick_opt(w.description_en.as_deref(), w.description_fr.as_deref())
                .map(str::to_string),
            id: w.id,
            work_duration: w.work_duration,
            rest_duration: w.rest_duration,
            total_duration: w.total_duration,
            total_rounds: w.total_rounds,
            is_custom: w.is_custom,
            user_id: w.user_id,
        })
        .collect();
    sort_by_label(&mut rows, |r| (r.title.as_str(), r.id.as_str()));
    Ok(rows)
}

pub fn get_recipes_localized(
    conn: &mut SqliteConnection,
    user_language: Option<&str>,
) -> Result<Vec<LocalizedRecipe>> {
    let language = Language::from_tag(user_language)?;
    debug!("Localizing recipes in {language}");
    let mut rows: Vec<LocalizedRecipe> = recipes::table
        .select(Recipe::as_select())
        .load::<Recipe>(conn)?
        .into_iter()
        .map(|r| LocalizedRecipe {
            name: language.pick(&r.name_en, &r.name_fr).to_string(),
            steps: language
                .pick_list(r.steps_en.as_slice(), r.steps_fr.as_slice())
                .to_vec(),
            id: r.id,
            ingredients: r.ingredients,
            image_url: r.image_url,
            duration: r.duration,
            servings: r.servings,
            difficulty: r.difficulty,
            tags: r.tags.map(|tags| tags.0),
            is_custom: r.is_custom,
            user_id: r.user_id,
        })
        .collect();
    sort_by_label(&mut rows, |r| (r.name.as_str(), r.id.as_str()));
    Ok(rows)
}
