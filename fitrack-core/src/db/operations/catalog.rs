//! Catalog tables. Rows are global or owned by one user; the `list_*_visible_to`
//! readers return the globals plus the given user's own rows.

use diesel::prelude::*;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{Page, ensure_exists};
use crate::db::models::{
    CardioActivity, CardioActivityUpdate, Exercise, ExerciseUpdate, Food, FoodUpdate, HiitWorkout,
    HiitWorkoutUpdate, NewCardioActivity, NewExercise, NewFood, NewHiitWorkout, NewRecipe, Patch,
    Recipe, RecipeUpdate,
};
use crate::db::schema::{cardio_activities, exercises, foods, hiit_workouts, recipes, users};
use crate::db::types::Ownership;
use crate::error::{Error, Result};

fn ensure_owner_exists(conn: &mut SqliteConnection, owner: &Ownership) -> Result<()> {
    if let Some(user_id) = owner.user_id() {
        ensure_exists!(conn, users, user_id);
    }
    Ok(())
}

/// `%term%` for `LIKE ... ESCAPE '\'`, with the term's own wildcards escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Narrows an exercise search. Unset fields match every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseFilter {
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
}

// Exercises

pub fn create_exercise(conn: &mut SqliteConnection, new: &NewExercise) -> Result<Exercise> {
    conn.transaction(|conn| {
        ensure_owner_exists(conn, &new.owner)?;
        diesel::insert_into(exercises::table)
            .values(new.record())
            .returning(Exercise::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_exercise(conn: &mut SqliteConnection, exercise_id: &str) -> Result<Exercise> {
    exercises::table
        .find(exercise_id)
        .select(Exercise::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("exercises", exercise_id))
}

pub fn update_exercise(
    conn: &mut SqliteConnection,
    exercise_id: &str,
    patch: &ExerciseUpdate,
) -> Result<Exercise> {
    if patch.is_empty() {
        return get_exercise(conn, exercise_id);
    }
    diesel::update(exercises::table.find(exercise_id))
        .set(patch.changes())
        .returning(Exercise::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("exercises", exercise_id))
}

/// Fails with `Constraint` while any workout still references the exercise.
pub fn delete_exercise(conn: &mut SqliteConnection, exercise_id: &str) -> Result<()> {
    let deleted = diesel::delete(exercises::table.find(exercise_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("exercises", exercise_id));
    }
    Ok(())
}

pub fn list_exercises_visible_to(
    conn: &mut SqliteConnection,
    user_id: Option<&str>,
) -> Result<Vec<Exercise>> {
    debug!("Listing exercises visible to {user_id:?}");
    let mut query = exercises::table
        .select(Exercise::as_select())
        .order((exercises::name_en.asc(), exercises::id.asc()))
        .into_boxed();
    query = match user_id {
        Some(user_id) => {
            query.filter(exercises::user_id.is_null().or(exercises::user_id.eq(user_id)))
        }
        None => query.filter(exercises::user_id.is_null()),
    };
    Ok(query.load(conn)?)
}

/// One page of the exercises visible to `user_id` that match `filter`.
pub fn search_exercises(
    conn: &mut SqliteConnection,
    user_id: Option<&str>,
    filter: &ExerciseFilter,
    page: Page,
) -> Result<Vec<Exercise>> {
    debug!("Searching exercises visible to {user_id:?} with {filter:?}");
    let mut query = exercises::table
        .select(Exercise::as_select())
        .order((exercises::name_en.asc(), exercises::id.asc()))
        .offset(page.offset())
        .limit(page.limit())
        .into_boxed();
    query = match user_id {
        Some(user_id) => {
            query.filter(exercises::user_id.is_null().or(exercises::user_id.eq(user_id)))
        }
        None => query.filter(exercises::user_id.is_null()),
    };
    if let Some(muscle_group) = &filter.muscle_group {
        query = query.filter(exercises::muscle_group.eq(muscle_group));
    }
    if let Some(equipment) = &filter.equipment {
        query = query.filter(exercises::equipment.eq(equipment));
    }
    Ok(query.load(conn)?)
}

/// Distinct muscle groups of the visible exercises, sorted.
pub fn list_muscle_groups(
    conn: &mut SqliteConnection,
    user_id: Option<&str>,
) -> Result<Vec<String>> {
    let mut query = exercises::table
        .select(exercises::muscle_group)
        .distinct()
        .order(exercises::muscle_group.asc())
        .into_boxed();
    query = match user_id {
        Some(user_id) => {
            query.filter(exercises::user_id.is_null().or(exercises::user_id.eq(user_id)))
        }
        None => query.filter(exercises::user_id.is_null()),
    };
    Ok(query.load(conn)?)
}

/// Distinct equipment of the visible exercises, sorted. Blank values are
/// left out.
pub fn list_equipment(conn: &mut SqliteConnection, user_id: Option<&str>) -> Result<Vec<String>> {
    let mut query = exercises::table
        .filter(exercises::equipment.ne(""))
        .select(exercises::equipment)
        .distinct()
        .order(exercises::equipment.asc())
        .into_boxed();
    query = match user_id {
        Some(user_id) => {
            query.filter(exercises::user_id.is_null().or(exercises::user_id.eq(user_id)))
        }
        None => query.filter(exercises::user_id.is_null()),
    };
    let equipment: Vec<Option<String>> = query.load(conn)?;
    Ok(equipment.into_iter().flatten().collect())
}

// Foods

pub fn create_food(conn: &mut SqliteConnection, new: &NewFood) -> Result<Food> {
    conn.transaction(|conn| {
        ensure_owner_exists(conn, &new.owner)?;
        diesel::insert_into(foods::table)
            .values(new.record())
            .returning(Food::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_food(conn: &mut SqliteConnection, food_id: &str) -> Result<Food> {
    foods::table
        .find(food_id)
        .select(Food::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("foods", food_id))
}

pub fn update_food(conn: &mut SqliteConnection, food_id: &str, patch: &FoodUpdate) -> Result<Food> {
    if patch.is_empty() {
        return get_food(conn, food_id);
    }
    diesel::update(foods::table.find(food_id))
        .set(patch.changes())
        .returning(Food::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("foods", food_id))
}

/// Meal items that referenced the food keep their calorie snapshot and lose
/// the link.
pub fn delete_food(conn: &mut SqliteConnection, food_id: &str) -> Result<()> {
    let deleted = diesel::delete(foods::table.find(food_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("foods", food_id));
    }
    Ok(())
}

pub fn list_foods_visible_to(
    conn: &mut SqliteConnection,
    user_id: Option<&str>,
) -> Result<Vec<Food>> {
    debug!("Listing foods visible to {user_id:?}");
    let mut query = foods::table
        .select(Food::as_select())
        .order((foods::name_en.asc(), foods::id.asc()))
        .into_boxed();
    query = match user_id {
        Some(user_id) => query.filter(foods::user_id.is_null().or(foods::user_id.eq(user_id))),
        None => query.filter(foods::user_id.is_null()),
    };
    Ok(query.load(conn)?)
}

/// One page of the foods visible to `user_id` whose English or French name
/// contains `search`, ignoring ASCII case. A blank search matches every food.
pub fn search_foods(
    conn: &mut SqliteConnection,
    user_id: Option<&str>,
    search: Option<&str>,
    page: Page,
) -> Result<Vec<Food>> {
    debug!("Searching foods visible to {user_id:?} for {search:?}");
    let mut query = foods::table
        .select(Food::as_select())
        .order((foods::name_en.asc(), foods::id.asc()))
        .offset(page.offset())
        .limit(page.limit())
        .into_boxed();
    query = match user_id {
        Some(user_id) => query.filter(foods::user_id.is_null().or(foods::user_id.eq(user_id))),
        None => query.filter(foods::user_id.is_null()),
    };
    if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
        let pattern = like_pattern(term);
        query = query.filter(
            foods::name_en
                .like(pattern.clone())
                .escape('\\')
                .or(foods::name_fr.like(pattern).escape('\\')),
        );
    }
    Ok(query.load(conn)?)
}

// Cardio activities

pub fn create_cardio_activity(
    conn: &mut SqliteConnection,
    new: &NewCardioActivity,
) -> Result<CardioActivity> {
    conn.transaction(|conn| {
        ensure_owner_exists(conn, &new.owner)?;
        diesel::insert_into(cardio_activities::table)
            .values(new.record())
            .returning(CardioActivity::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_cardio_activity(
    conn: &mut SqliteConnection,
    activity_id: &str,
) -> Result<CardioActivity> {
    cardio_activities::table
        .find(activity_id)
        .select(CardioActivity::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("cardio_activities", activity_id))
}

pub fn update_cardio_activity(
    conn: &mut SqliteConnection,
    activity_id: &str,
    patch: &CardioActivityUpdate,
) -> Result<CardioActivity> {
    if patch.is_empty() {
        return get_cardio_activity(conn, activity_id);
    }
    diesel::update(cardio_activities::table.find(activity_id))
        .set(patch.changes())
        .returning(CardioActivity::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("cardio_activities", activity_id))
}

pub fn delete_cardio_activity(conn: &mut SqliteConnection, activity_id: &str) -> Result<()> {
    let deleted = diesel::delete(cardio_activities::table.find(activity_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("cardio_activities", activity_id));
    }
    Ok(())
}

pub fn list_cardio_activities_visible_to(
    conn: &mut SqliteConnection,
    user_id: Option<&str>,
) -> Result<Vec<CardioActivity>> {
    debug!("Listing cardio activities visible to {user_id:?}");
    let mut query = cardio_activities::table
        .select(CardioActivity::as_select())
        .order((cardio_activities::name_en.asc(), cardio_activities::id.asc()))
        .into_boxed();
    query = match user_id {
        Some(user_id) => query.filter(
            cardio_activities::user_id
                .is_null()
                .or(cardio_activities::user_id.eq(user_id)),
        ),
        None => query.filter(cardio_activities::user_id.is_null()),
    };
    Ok(query.load(conn)?)
}

// HIIT workout templates

pub fn create_hiit_workout(
    conn: &mut SqliteConnection,
    new: &NewHiitWorkout,
) -> Result<HiitWorkout> {
    conn.transaction(|conn| {
        ensure_owner_exists(conn, &new.owner)?;
        diesel::insert_into(hiit_workouts::table)
            .values(new.record())
            .returning(HiitWorkout::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_hiit_workout(conn: &mut SqliteConnection, workout_id: &str) -> Result<HiitWorkout> {
    hiit_workouts::table
        .find(workout_id)
        .select(HiitWorkout::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("hiit_workouts", workout_id))
}

pub fn update_hiit_workout(
    conn: &mut SqliteConnection,
    workout_id: &str,
    patch: &HiitWorkoutUpdate,
) -> Result<HiitWorkout> {
    if patch.is_empty() {
        return get_hiit_workout(conn, workout_id);
    }
    diesel::update(hiit_workouts::table.find(workout_id))
        .set(patch.changes())
        .returning(HiitWorkout::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("hiit_workouts", workout_id))
}

/// Sessions started from the template keep their history and lose the link.
pub fn delete_hiit_workout(conn: &mut SqliteConnection, workout_id: &str) -> Result<()> {
    let deleted = diesel::delete(hiit_workouts::table.find(workout_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("hiit_workouts", workout_id));
    }
    Ok(())
}

pub fn list_hiit_workouts_visible_to(
    conn: &mut SqliteConnection,
    user_id: Option<&str>,
) -> Result<Vec<HiitWorkout>> {
    debug!("Listing HIIT workouts visible to {user_id:?}");
    let mut query = hiit_workouts::table
        .select(HiitWorkout::as_select())
        .order((hiit_workouts::title_en.asc(), hiit_workouts::id.asc()))
        .into_boxed();
    query = match user_id {
        Some(user_id) => query.filter(
            hiit_workouts::user_id
                .is_null()
                .or(hiit_workouts::user_id.eq(user_id)),
        ),
        None => query.filter(hiit_workouts::user_id.is_null()),
    };
    Ok(query.load(conn)?)
}

// Recipes

pub fn create_recipe(conn: &mut SqliteConnection, new: &NewRecipe) -> Result<Recipe> {
    new.ingredients.validate()?;
    conn.transaction(|conn| {
        ensure_owner_exists(conn, &new.owner)?;
        diesel::insert_into(recipes::table)
            .values(new.record())
            .returning(Recipe::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    })
}

pub fn get_recipe(conn: &mut SqliteConnection, recipe_id: &str) -> Result<Recipe> {
    recipes::table
        .find(recipe_id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("recipes", recipe_id))
}

pub fn update_recipe(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    patch: &RecipeUpdate,
) -> Result<Recipe> {
    if patch.is_empty() {
        return get_recipe(conn, recipe_id);
    }
    if let Some(ingredients) = &patch.ingredients {
        ingredients.validate()?;
    }
    diesel::update(recipes::table.find(recipe_id))
        .set(patch.changes())
        .returning(Recipe::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("recipes", recipe_id))
}

pub fn delete_recipe(conn: &mut SqliteConnection, recipe_id: &str) -> Result<()> {
    let deleted = diesel::delete(recipes::table.find(recipe_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::not_found("recipes", recipe_id));
    }
    Ok(())
}

pub fn list_recipes_visible_to(
    conn: &mut SqliteConnection,
    user_id: Option<&str>,
) -> Result<Vec<Recipe>> {
    debug!("Listing recipes visible to {user_id:?}");
    let mut query = recipes::table
        .select(Recipe::as_select())
        .order((recipes::name_en.asc(), recipes::id.asc()))
        .into_boxed();
    query = match user_id {
        Some(user_id) => {
            query.filter(recipes::user_id.is_null().or(recipes::user_id.eq(user_id)))
        }
        None => query.filter(recipes::user_id.is_null()),
    };
    Ok(query.load(conn)?)
}

#[cfg(test)]
mod tests {
    use diesel::sql_query;

    use super::*;
    use crate::db::operations::test_support::{conn, user};
    use crate::db::types::{Ingredient, Ingredients, StringList};

    fn oats_recipe() -> NewRecipe {
        NewRecipe {
            name_en: "Porridge".into(),
            name_fr: "Porridge".into(),
            ingredients: [Ingredient::new("Oats", 80.0, "g")].into_iter().collect(),
            steps_en: ["Boil milk", "Add oats"].into_iter().collect(),
            steps_fr: ["Faire bouillir le lait", "Ajouter l'avoine"].into_iter().collect(),
            servings: 1,
            ..Default::default()
        }
    }

    fn hiit_template() -> NewHiitWorkout {
        NewHiitWorkout {
            title_en: "Tabata".into(),
            title_fr: "Tabata".into(),
            work_duration: 20,
            rest_duration: 10,
            total_duration: 240,
            total_rounds: 8,
            ..Default::default()
        }
    }

    #[test]
    fn required_only_inserts_expose_generated_columns() {
        let mut conn = conn();
        let exercise =
            create_exercise(&mut conn, &NewExercise::new("Squat", "Squat", "legs")).unwrap();
        let food = create_food(&mut conn, &NewFood::new("Apple", "Pomme", 52.0)).unwrap();
        let activity =
            create_cardio_activity(&mut conn, &NewCardioActivity::new("run", "Run", "Course"))
                .unwrap();
        let template = create_hiit_workout(&mut conn, &hiit_template()).unwrap();
        let recipe = create_recipe(&mut conn, &oats_recipe()).unwrap();

        for (id, created_at) in [
            (&exercise.id, &exercise.created_at),
            (&food.id, &food.created_at),
            (&activity.id, &activity.created_at),
            (&template.id, &template.created_at),
            (&recipe.id, &recipe.created_at),
        ] {
            assert_eq!(id.len(), 36, "{id}");
            assert!(!created_at.is_empty());
        }
        assert!(!exercise.is_custom);
        assert_eq!(food.proteins, 0.0);
        assert_eq!(activity.ownership(), Ownership::Global);
        assert_eq!(recipe.steps_en, StringList(vec!["Boil milk".into(), "Add oats".into()]));
        assert_eq!(recipe.tags, None);
    }

    #[test]
    fn owned_rows_record_the_owner() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let mut new = NewFood::new("Shake", "Shake", 120.0);
        new.owner = Ownership::owned("u1");
        let food = create_food(&mut conn, &new).unwrap();
        assert!(food.is_custom);
        assert_eq!(food.user_id.as_deref(), Some("u1"));
        assert_eq!(food.ownership(), Ownership::owned("u1"));
    }

    #[test]
    fn unknown_owner_is_not_found() {
        let mut conn = conn();
        let mut new = NewExercise::new("Curl", "Curl", "arms");
        new.owner = Ownership::owned("ghost");
        let err = create_exercise(&mut conn, &new).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "users", .. }), "{err:?}");
    }

    #[test]
    fn custom_flag_without_owner_is_rejected_by_the_store() {
        let mut conn = conn();
        let statements = [
            "INSERT INTO exercises (name_en, name_fr, muscle_group, is_custom) \
             VALUES ('a', 'a', 'legs', 1)",
            "INSERT INTO foods (name_en, name_fr, calories, is_custom) VALUES ('a', 'a', 1, 1)",
            "INSERT INTO cardio_activities (activity_type, name_en, name_fr, is_custom) \
             VALUES ('run', 'a', 'a', 1)",
            "INSERT INTO hiit_workouts (title_en, title_fr, work_duration, rest_duration, \
             total_duration, total_rounds, is_custom) VALUES ('a', 'a', 1, 1, 1, 1, 1)",
            "INSERT INTO recipes (name_en, name_fr, ingredients, steps_en, steps_fr, servings, \
             is_custom) VALUES ('a', 'a', '[]', '[]', '[]', 1, 1)",
        ];
        for statement in statements {
            let err = Error::from(sql_query(statement).execute(&mut conn).unwrap_err());
            assert!(err.is_constraint(), "{statement}: {err:?}");
        }
    }

    #[test]
    fn owner_without_custom_flag_is_rejected_by_the_store() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let err = Error::from(
            sql_query(
                "INSERT INTO foods (name_en, name_fr, calories, is_custom, user_id) \
                 VALUES ('a', 'a', 1, 0, 'u1')",
            )
            .execute(&mut conn)
            .unwrap_err(),
        );
        assert!(err.is_constraint(), "{err:?}");
    }

    #[test]
    fn visibility_is_globals_plus_own_rows() {
        let mut conn = conn();
        user(&mut conn, "u1");
        user(&mut conn, "u2");
        create_exercise(&mut conn, &NewExercise::new("Bench", "Développé", "chest")).unwrap();
        let mut mine = NewExercise::new("My curl", "Mon curl", "arms");
        mine.owner = Ownership::owned("u1");
        create_exercise(&mut conn, &mine).unwrap();
        let mut theirs = NewExercise::new("Their curl", "Leur curl", "arms");
        theirs.owner = Ownership::owned("u2");
        create_exercise(&mut conn, &theirs).unwrap();

        let names =
            |rows: Vec<Exercise>| rows.into_iter().map(|e| e.name_en).collect::<Vec<_>>();
        assert_eq!(
            names(list_exercises_visible_to(&mut conn, Some("u1")).unwrap()),
            ["Bench", "My curl"]
        );
        assert_eq!(names(list_exercises_visible_to(&mut conn, None).unwrap()), ["Bench"]);
    }

    #[test]
    fn updates_patch_only_given_columns() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let mut new = NewExercise::new("Squat", "Squat", "legs");
        new.equipment = Some("barbell".into());
        let exercise = create_exercise(&mut conn, &new).unwrap();

        let unchanged =
            update_exercise(&mut conn, &exercise.id, &ExerciseUpdate::default()).unwrap();
        assert_eq!(unchanged, exercise);

        let patch = ExerciseUpdate {
            equipment: Some(None),
            owner: Some(Ownership::owned("u1")),
            ..Default::default()
        };
        let updated = update_exercise(&mut conn, &exercise.id, &patch).unwrap();
        assert_eq!(updated.equipment, None);
        assert_eq!(updated.muscle_group, "legs");
        assert!(updated.is_custom);
        assert_eq!(updated.user_id.as_deref(), Some("u1"));

        let err = update_exercise(&mut conn, "missing", &patch).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn recipe_json_columns_round_trip() {
        let mut conn = conn();
        let mut new = oats_recipe();
        new.tags = Some(["breakfast"].into_iter().collect());
        let recipe = create_recipe(&mut conn, &new).unwrap();
        let loaded = get_recipe(&mut conn, &recipe.id).unwrap();
        assert_eq!(loaded.ingredients, new.ingredients);
        assert_eq!(loaded.tags, new.tags);

        let patch = RecipeUpdate {
            tags: Some(None),
            servings: Some(2),
            ..Default::default()
        };
        let updated = update_recipe(&mut conn, &recipe.id, &patch).unwrap();
        assert_eq!(updated.tags, None);
        assert_eq!(updated.servings, 2);
    }

    #[test]
    fn malformed_ingredients_never_reach_the_store() {
        let mut conn = conn();
        let mut new = oats_recipe();
        new.ingredients = Ingredients(vec![Ingredient::new("", 1.0, "g")]);
        assert!(matches!(
            create_recipe(&mut conn, &new),
            Err(Error::InvalidInput(_))
        ));
        assert!(list_recipes_visible_to(&mut conn, None).unwrap().is_empty());
    }

    #[test]
    fn deletes_report_missing_rows() {
        let mut conn = conn();
        let food = create_food(&mut conn, &NewFood::new("Apple", "Pomme", 52.0)).unwrap();
        delete_food(&mut conn, &food.id).unwrap();
        assert!(delete_food(&mut conn, &food.id).unwrap_err().is_not_found());
        assert!(get_food(&mut conn, &food.id).unwrap_err().is_not_found());
    }

    #[test]
    fn empty_patches_return_the_current_rows() {
        let mut conn = conn();
        let food = create_food(&mut conn, &NewFood::new("Apple", "Pomme", 52.0)).unwrap();
        let activity =
            create_cardio_activity(&mut conn, &NewCardioActivity::new("run", "Run", "Course"))
                .unwrap();
        let template = create_hiit_workout(&mut conn, &hiit_template()).unwrap();
        let recipe = create_recipe(&mut conn, &oats_recipe()).unwrap();

        assert_eq!(update_food(&mut conn, &food.id, &Default::default()).unwrap(), food);
        assert_eq!(
            update_cardio_activity(&mut conn, &activity.id, &Default::default()).unwrap(),
            activity
        );
        assert_eq!(
            update_hiit_workout(&mut conn, &template.id, &Default::default()).unwrap(),
            template
        );
        assert_eq!(update_recipe(&mut conn, &recipe.id, &Default::default()).unwrap(), recipe);
        let err = update_recipe(&mut conn, "missing", &Default::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    fn exercise(name: &str, muscle_group: &str, equipment: Option<&str>) -> NewExercise {
        NewExercise {
            equipment: equipment.map(str::to_string),
            ..NewExercise::new(name, name, muscle_group)
        }
    }

    #[test]
    fn exercises_filter_by_muscle_group_and_equipment() {
        let mut conn = conn();
        user(&mut conn, "u1");
        for new in [
            exercise("Squat", "legs", Some("barbell")),
            exercise("Lunge", "legs", None),
            exercise("Bench", "chest", Some("barbell")),
            exercise("Fly", "chest", Some("dumbbell")),
            exercise("Plank", "core", Some("")),
        ] {
            create_exercise(&mut conn, &new).unwrap();
        }
        let mine = NewExercise {
            owner: Ownership::owned("u1"),
            ..exercise("Sissy squat", "legs", Some("bench"))
        };
        create_exercise(&mut conn, &mine).unwrap();

        let names = |rows: Vec<Exercise>| rows.into_iter().map(|e| e.name_en).collect::<Vec<_>>();
        let legs = ExerciseFilter {
            muscle_group: Some("legs".into()),
            ..Default::default()
        };
        let found = search_exercises(&mut conn, None, &legs, Page::default()).unwrap();
        assert_eq!(names(found), ["Lunge", "Squat"]);
        let found = search_exercises(&mut conn, Some("u1"), &legs, Page::default()).unwrap();
        assert_eq!(names(found), ["Lunge", "Sissy squat", "Squat"]);

        let barbell_chest = ExerciseFilter {
            muscle_group: Some("chest".into()),
            equipment: Some("barbell".into()),
        };
        let found = search_exercises(&mut conn, None, &barbell_chest, Page::default()).unwrap();
        assert_eq!(names(found), ["Bench"]);

        let all = ExerciseFilter::default();
        let second = search_exercises(&mut conn, None, &all, Page::new(2, 2).unwrap()).unwrap();
        assert_eq!(names(second), ["Lunge", "Plank"]);

        assert_eq!(list_muscle_groups(&mut conn, None).unwrap(), ["chest", "core", "legs"]);
        assert_eq!(list_equipment(&mut conn, None).unwrap(), ["barbell", "dumbbell"]);
        assert_eq!(
            list_equipment(&mut conn, Some("u1")).unwrap(),
            ["barbell", "bench", "dumbbell"]
        );
    }

    #[test]
    fn foods_are_searched_by_either_name() {
        let mut conn = conn();
        for (en, fr) in [
            ("Apple", "Pomme"),
            ("Pineapple", "Ananas"),
            ("Potato", "Pomme de terre"),
            ("100% juice", "Jus 100%"),
            ("Rice", "Riz"),
        ] {
            create_food(&mut conn, &NewFood::new(en, fr, 50.0)).unwrap();
        }

        let names = |rows: Vec<Food>| rows.into_iter().map(|f| f.name_en).collect::<Vec<_>>();
        let found = search_foods(&mut conn, None, Some("apple"), Page::default()).unwrap();
        assert_eq!(names(found), ["Apple", "Pineapple"]);
        let found = search_foods(&mut conn, None, Some("pomme"), Page::default()).unwrap();
        assert_eq!(names(found), ["Apple", "Potato"]);
        let found = search_foods(&mut conn, None, Some("0%"), Page::default()).unwrap();
        assert_eq!(names(found), ["100% juice"]);
        let found = search_foods(&mut conn, None, Some("_"), Page::default()).unwrap();
        assert!(found.is_empty());
        let found = search_foods(&mut conn, None, Some("  "), Page::first(2).unwrap()).unwrap();
        assert_eq!(names(found), ["100% juice", "Apple"]);
    }
}
