use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;
use super::user::User;
use crate::db::schema::{meal_food_items, meals};

/// Foods eaten together. `date` is `YYYY-MM-DD`.
#[derive(
    Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize,
)]
#[diesel(belongs_to(User))]
#[diesel(table_name = meals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Meal {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub meal_time: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone, Default, Serialize, Deserialize)]
#[diesel(table_name = meals)]
pub struct NewMeal {
    pub id: Option<String>,
    pub user_id: String,
    pub date: String,
    pub meal_time: String,
    pub name: String,
    pub created_at: Option<String>,
}

impl NewMeal {
    pub fn new(
        user_id: impl Into<String>,
        date: impl Into<String>,
        meal_time: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            date: date.into(),
            meal_time: meal_time.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = meals)]
pub struct MealUpdate {
    pub user_id: Option<String>,
    pub date: Option<String>,
    pub meal_time: Option<String>,
    pub name: Option<String>,
}

impl Patch for MealUpdate {}

/// A line of a meal. `calories` is captured when the item is logged and is
/// not recomputed if the referenced food changes later.
#[derive(
    Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize,
)]
#[diesel(belongs_to(Meal))]
#[diesel(table_name = meal_food_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MealFoodItem {
    pub id: String,
    pub meal_id: String,
    pub food_id: Option<String>,
    pub calories: f64,
    pub portion: String,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone, Default, Serialize, Deserialize)]
#[diesel(table_name = meal_food_items)]
pub struct NewMealFoodItem {
    pub id: Option<String>,
    pub meal_id: String,
    pub food_id: Option<String>,
    pub calories: f64,
    pub portion: String,
    pub created_at: Option<String>,
}

impl NewMealFoodItem {
    pub fn new(meal_id: impl Into<String>, calories: f64, portion: impl Into<String>) -> Self {
        Self {
            meal_id: meal_id.into(),
            calories,
            portion: portion.into(),
            ..Default::default()
        }
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = meal_food_items)]
pub struct MealFoodItemUpdate {
    pub meal_id: Option<String>,
    pub food_id: Option<Option<String>>,
    pub calories: Option<f64>,
    pub portion: Option<String>,
}

impl Patch for MealFoodItemUpdate {}
