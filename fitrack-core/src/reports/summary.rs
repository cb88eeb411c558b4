use diesel::dsl::sum;
use diesel::prelude::*;
use log::debug;
use serde::Serialize;

use super::{parse_date, today};
use crate::db::schema::{
    cardio_sessions, hiit_sessions, meal_food_items, meals, users, workout_sessions,
};
use crate::error::Result;

/// One user's activity for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub summary_date: String,
    pub total_meals: i64,
    pub total_calories_nutrition: f64,
    pub workout_sessions: i64,
    pub hiit_sessions: i64,
    pub cardio_sessions: i64,
    /// Sum of the day's cardio session calories.
    pub total_calories_burned: i64,
}

/// Summarizes `target_date` (today in UTC when omitted). Returns one row for a
/// known user and none for an unknown one.
pub fn get_user_daily_summary(
    conn: &mut SqliteConnection,
    target_user_id: &str,
    target_date: Option<&str>,
) -> Result<Vec<DailySummary>> {
    let date = parse_date(target_date)?.unwrap_or_else(today);
    debug!("Daily summary of {target_user_id} for {date}");

    let known: i64 = users::table
        .filter(users::id.eq(target_user_id))
        .count()
        .get_result(conn)?;
    if known == 0 {
        return Ok(Vec::new());
    }
    let started_that_day = format!("{date}%");

    let total_meals: i64 = meals::table
        .filter(meals::user_id.eq(target_user_id))
        .filter(meals::date.eq(&date))
        .count()
        .get_result(conn)?;
    let total_calories_nutrition: Option<f64> = meal_food_items::table
        .inner_join(meals::table)
        .filter(meals::user_id.eq(target_user_id))
        .filter(meals::date.eq(&date))
        .select(sum(meal_food_items::calories))
        .first(conn)?;
    let workout_count: i64 = workout_sessions::table
        .filter(workout_sessions::user_id.eq(target_user_id))
        .filter(workout_sessions::start_time.like(&started_that_day))
        .count()
        .get_result(conn)?;
    let hiit_count: i64 = hiit_sessions::table
        .filter(hiit_sessions::user_id.eq(target_user_id))
        .filter(hiit_sessions::start_time.like(&started_that_day))
        .count()
        .get_result(conn)?;
    let cardio_count: i64 = cardio_sessions::table
        .filter(cardio_sessions::user_id.eq(target_user_id))
        .filter(cardio_sessions::start_time.like(&started_that_day))
        .count()
        .get_result(conn)?;
    let calories_burned: Option<i64> = cardio_sessions::table
        .filter(cardio_sessions::user_id.eq(target_user_id))
        .filter(cardio_sessions::start_time.like(&started_that_day))
        .select(sum(cardio_sessions::calories))
        .first(conn)?;

    Ok(vec![DailySummary {
        summary_date: date,
        total_meals,
        total_calories_nutrition: total_calories_nutrition.unwrap_or(0.0),
        workout_sessions: workout_count,
        hiit_sessions: hiit_count,
        cardio_sessions: cardio_count,
        total_calories_burned: calories_burned.unwrap_or(0),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{
        CardioSessionUpdate, NewCardioSession, NewHiitSession, NewMeal, NewMealFoodItem,
    };
    use crate::db::operations::test_support::{conn, user};
    use crate::db::operations::{
        add_meal_item, create_cardio_session, create_hiit_session, create_meal,
        update_cardio_session,
    };
    use crate::error::Error;

    #[test]
    fn empty_day_for_a_known_user() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let rows = get_user_daily_summary(&mut conn, "u1", Some("2024-01-15")).unwrap();
        assert_eq!(
            rows,
            [DailySummary {
                summary_date: "2024-01-15".into(),
                total_meals: 0,
                total_calories_nutrition: 0.0,
                workout_sessions: 0,
                hiit_sessions: 0,
                cardio_sessions: 0,
                total_calories_burned: 0,
            }]
        );
    }

    #[test]
    fn defaults_to_today() {
        let mut conn = conn();
        user(&mut conn, "u1");
        let rows = get_user_daily_summary(&mut conn, "u1", None).unwrap();
        assert_eq!(rows[0].summary_date, today());
    }

    #[test]
    fn counts_only_the_requested_day() {
        let mut conn = conn();
        user(&mut conn, "u1");
        user(&mut conn, "u2");
        let lunch =
            create_meal(&mut conn, &NewMeal::new("u1", "2024-01-15", "12:00", "Lunch")).unwrap();
        add_meal_item(&mut conn, &NewMealFoodItem::new(&lunch.id, 450.5, "1 plate")).unwrap();
        let other_day =
            create_meal(&mut conn, &NewMeal::new("u1", "2024-01-16", "12:00", "Lunch")).unwrap();
        add_meal_item(&mut conn, &NewMealFoodItem::new(&other_day.id, 999.0, "1 plate")).unwrap();
        create_meal(&mut conn, &NewMeal::new("u2", "2024-01-15", "12:00", "Lunch")).unwrap();

        for (start, calories) in [("2024-01-15T07:00:00Z", 300), ("2024-01-15T19:00:00Z", 150)] {
            let run = create_cardio_session(
                &mut conn,
                &NewCardioSession::new("u1", "run", "Run", "Free run", start),
            )
            .unwrap();
            let patch = CardioSessionUpdate {
                calories: Some(Some(calories)),
                ..Default::default()
            };
            update_cardio_session(&mut conn, &run.id, &patch).unwrap();
        }
        create_hiit_session(&mut conn, &NewHiitSession::new("u1", "2024-01-14T18:00:00Z")).unwrap();

        let day = &get_user_daily_summary(&mut conn, "u1", Some("2024-01-15")).unwrap()[0];
        assert_eq!(day.total_meals, 1);
        assert_eq!(day.total_calories_nutrition, 450.5);
        assert_eq!(day.cardio_sessions, 2);
        assert_eq!(day.total_calories_burned, 450);
        assert_eq!(day.hiit_sessions, 0);
        assert_eq!(day.workout_sessions, 0);
    }

    #[test]
    fn unknown_user_and_bad_date() {
        let mut conn = conn();
        assert!(get_user_daily_summary(&mut conn, "ghost", Some("2024-01-15")).unwrap().is_empty());
        user(&mut conn, "u1");
        assert!(matches!(
            get_user_daily_summary(&mut conn, "u1", Some("Jan 15")),
            Err(Error::InvalidParameter(_))
        ));
    }
}
