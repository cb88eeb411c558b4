//! Meals and the food items logged in them.

use chrono::NaiveDate;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use log::debug;
use serde::Serialize;

use super::{Page, ensure_exists, normalize_optional};
use crate::db::models::{
    Meal, MealFoodItem, MealFoodItemUpdate, MealUpdate, NewMeal, NewMealFoodItem, Patch,
};
use crate::db::schema::{foods, meal_food_items, meals, users};
use crate::error::{Error, Result};

/// A meal with its items in entry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealDetail {
    pub meal: Meal,
    pub items: Vec<MealFoodItem>,
    pub total_calories: f64,
}

/// What a user ate on one day.
///
/// Calories add up the logged snapshots. Macros are derived from the linked
/// food for items whose portion is a weight in grams; other items add none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub date: String,
    pub total_calories: f64,
    pub total_proteins: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub meals_count: i64,
}

pub fn create_meal(conn: &mut SqliteConnection, new: &NewMeal) -> Result<Meal> {
    conn.transaction(|conn| {
        ensure_exists!(conn, users, &new.user_id);
        let new = NewMeal {
            created_at: normalize_optional(&new.created_at)?,
            ..new.clone()
        };
        diesel::insert_into(meals::table)
            .values(&new)
            .returning(Meal::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_meal(conn: &mut SqliteConnection, meal_id: &str) -> Result<Meal> {
    meals::table
        .find(meal_id)
        .select(Meal::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("meals", meal_id))
}

pub fn update_meal(conn: &mut SqliteConnection, meal_id: &str, patch: &MealUpdate) -> Result<Meal> {
    if patch.is_empty() {
        return get_meal(conn, meal_id);
    }
    diesel::update(meals::table.find(meal_id))
        .set(patch)
        .returning(Meal::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("meals", meal_id))
}

pub fn delete_meal(conn: &mut SqliteConnection, meal_id: &str) -> Result<()> {
    let deleted = diesel::delete(meals::table.find(meal_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("meals", meal_id));
    }
    Ok(())
}

/// The user's meals, latest day first and by time of day within a day.
pub fn list_user_meals(
    conn: &mut SqliteConnection,
    user_id: &str,
    date: Option<&str>,
    meal_time: Option<&str>,
    page: Page,
) -> Result<Vec<Meal>> {
    debug!("Listing meals for {user_id}");
    let mut query = meals::table
        .filter(meals::user_id.eq(user_id))
        .order((meals::date.desc(), meals::meal_time.asc(), meals::id.asc()))
        .offset(page.offset())
        .limit(page.limit())
        .select(Meal::as_select())
        .into_boxed();
    if let Some(date) = date {
        query = query.filter(meals::date.eq(date));
    }
    if let Some(meal_time) = meal_time {
        query = query.filter(meals::meal_time.eq(meal_time));
    }
    Ok(query.load(conn)?)
}

/// Totals for `date` (`YYYY-MM-DD`). An unknown user has an empty day.
pub fn daily_nutrition_totals(
    conn: &mut SqliteConnection,
    user_id: &str,
    date: &str,
) -> Result<NutritionTotals> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| Error::invalid_parameter(format!("date {date:?}: {e}")))?;

    let meals_count: i64 = meals::table
        .filter(meals::user_id.eq(user_id))
        .filter(meals::date.eq(date))
        .count()
        .get_result(conn)?;
    let items: Vec<(f64, String, Option<(f64, f64, f64)>)> = meal_food_items::table
        .inner_join(meals::table)
        .left_join(foods::table)
        .filter(meals::user_id.eq(user_id))
        .filter(meals::date.eq(date))
        .select((
            meal_food_items::calories,
            meal_food_items::portion,
            (foods::proteins, foods::carbs, foods::fats).nullable(),
        ))
        .load(conn)?;

    let mut totals = NutritionTotals {
        date: date.to_string(),
        total_calories: 0.0,
        total_proteins: 0.0,
        total_carbs: 0.0,
        total_fats: 0.0,
        meals_count,
    };
    for (calories, portion, macros) in items {
        totals.total_calories += calories;
        if let (Some((proteins, carbs, fats)), Some(grams)) = (macros, portion_grams(&portion)) {
            let factor = grams / 100.0;
            totals.total_proteins += proteins * factor;
            totals.total_carbs += carbs * factor;
            totals.total_fats += fats * factor;
        }
    }
    totals.total_calories = totals.total_calories.round();
    totals.total_proteins = round_tenth(totals.total_proteins);
    totals.total_carbs = round_tenth(totals.total_carbs);
    totals.total_fats = round_tenth(totals.total_fats);
    Ok(totals)
}

/// `"150g"`, `"150 g"` or a bare `"150"`.
fn portion_grams(portion: &str) -> Option<f64> {
    let portion = portion.trim();
    let number = portion.strip_suffix('g').unwrap_or(portion).trim_end();
    number.parse::<f64>().ok().filter(|g| g.is_finite() && *g >= 0.0)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Logs an item with an explicit calorie snapshot.
pub fn add_meal_item(
    conn: &mut SqliteConnection,
    new: &NewMealFoodItem,
) -> Result<MealFoodItem> {
    conn.transaction(|conn| {
        ensure_exists!(conn, meals, &new.meal_id);
        if let Some(food_id) = &new.food_id {
            ensure_exists!(conn, foods, food_id);
        }
        let new = NewMealFoodItem {
            created_at: normalize_optional(&new.created_at)?,
            ..new.clone()
        };
        diesel::insert_into(meal_food_items::table)
            .values(&new)
            .returning(MealFoodItem::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

/// Logs `grams` of a catalog food, snapshotting its calories for that portion.
pub fn log_food_portion(
    conn: &mut SqliteConnection,
    meal_id: &str,
    food_id: &str,
    grams: f64,
) -> Result<MealFoodItem> {
    if !grams.is_finite() || grams <= 0.0 {
        return Err(Error::invalid_input(format!("portion of {grams} g")));
    }
    conn.transaction(|conn| {
        let calories_per_100g: f64 = foods::table
            .find(food_id)
            .select(foods::calories)
            .first(conn)
            .optional()?
            .ok_or_else(|| Error::not_found("foods", food_id))?;
        let calories = calories_per_100g * grams / 100.0;
        let new = NewMealFoodItem {
            food_id: Some(food_id.to_string()),
            ..NewMealFoodItem::new(meal_id, calories, format!("{grams}g"))
        };
        add_meal_item(conn, &new)
    })
}

pub fn get_meal_item(conn: &mut SqliteConnection, item_id: &str) -> Result<MealFoodItem> {
    meal_food_items::table
        .find(item_id)
        .select(MealFoodItem::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("meal_food_items", item_id))
}

pub fn update_meal_item(
    conn: &mut SqliteConnection,
    item_id: &str,
    patch: &MealFoodItemUpdate,
) -> Result<MealFoodItem> {
    if patch.is_empty() {
        return get_meal_item(conn, item_id);
    }
    diesel::update(meal_food_items::table.find(item_id))
        .set(patch)
        .returning(MealFoodItem::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("meal_food_items", item_id))
}

pub fn delete_meal_item(conn: &mut SqliteConnection, item_id: &str) -> Result<()> {
    let deleted = diesel::delete(meal_food_items::table.find(item_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("meal_food_items", item_id));
    }
    Ok(())
}

pub fn load_meal(conn: &mut SqliteConnection, meal_id: &str) -> Result<MealDetail> {
    debug!("Loading meal {meal_id}");
    let meal = get_meal(conn, meal_id)?;
    let items: Vec<MealFoodItem> = MealFoodItem::belonging_to(&meal)
        .order((
            meal_food_items::created_at.asc(),
            sql::<BigInt>("meal_food_items.rowid").asc(),
        ))
        .select(MealFoodItem::as_select())
        .load(conn)?;
    let total_calories = items.iter().map(|item| item.calories).sum();
    Ok(MealDetail {
        meal,
        items,
        total_calories,
    })
}
