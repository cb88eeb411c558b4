use fitrack::Database;
use fitrack::db::models::{
    NewCardioSession, NewExercise, NewExerciseSet, NewFood, NewLocationPoint, NewMeal,
    NewMealFoodItem, NewUser, NewWorkoutExercise, NewWorkoutSession,
};
use fitrack::db::operations::{
    add_meal_item, complete_cardio_session, complete_workout, create_exercise,
    create_exercise_set, create_food, create_meal, create_user, create_workout_exercise,
    create_workout_session, delete_user, get_cardio_session, list_foods_visible_to, load_route,
    load_workout, record_location_point, start_cardio_session,
};
use fitrack::db::types::Ownership;
use fitrack::reports::{
    get_exercises_localized, get_user_cardio_history, get_user_daily_summary,
    get_user_nutrition_history, get_user_workout_history,
};
use fitrack::seed::CatalogSeed;
use uuid::Uuid;

fn new_user(conn: &mut diesel::SqliteConnection) -> String {
    let id = Uuid::new_v4().to_string();
    create_user(conn, &NewUser::new(&id)).unwrap();
    id
}

#[test]
fn workout_recovers_exercise_and_set_order() {
    let db = Database::in_memory().unwrap();
    let mut conn = db.conn().unwrap();
    let user = new_user(&mut conn);
    let squat = create_exercise(&mut conn, &NewExercise::new("Squat", "Flexion", "legs")).unwrap();
    let lunge = create_exercise(&mut conn, &NewExercise::new("Lunge", "Fente", "legs")).unwrap();

    let session = create_workout_session(
        &mut conn,
        &NewWorkoutSession::new(&user, "Leg Day", "2024-01-15T08:00:00.000Z"),
    )
    .unwrap();
    // Inserted out of order on purpose.
    let second = create_workout_exercise(
        &mut conn,
        &NewWorkoutExercise::new(&session.id, &lunge.id).at(1),
    )
    .unwrap();
    let first = create_workout_exercise(
        &mut conn,
        &NewWorkoutExercise::new(&session.id, &squat.id).at(0),
    )
    .unwrap();
    create_exercise_set(&mut conn, &NewExerciseSet::new(&first.id, 5, 100.0).at(1)).unwrap();
    create_exercise_set(&mut conn, &NewExerciseSet::new(&first.id, 8, 80.0).at(0)).unwrap();
    create_exercise_set(&mut conn, &NewExerciseSet::new(&second.id, 10, 20.0)).unwrap();

    let detail = load_workout(&mut conn, &session.id).unwrap();
    assert_eq!(detail.session.name, "Leg Day");
    let names: Vec<_> = detail.exercises.iter().map(|e| e.exercise.name_en.as_str()).collect();
    assert_eq!(names, ["Squat", "Lunge"]);
    let squat_sets: Vec<_> = detail.exercises[0]
        .sets
        .iter()
        .map(|s| (s.set_order, s.reps))
        .collect();
    assert_eq!(squat_sets, [(0, 8), (1, 5)]);
    assert_eq!(detail.exercises[1].sets[0].set_order, 0);

    let done = complete_workout(&mut conn, &session.id).unwrap();
    assert!(done.is_completed);
    assert!(done.end_time.is_some());
}

#[test]
fn daily_summary_totals() {
    let db = Database::in_memory().unwrap();
    let mut conn = db.conn().unwrap();
    let user = new_user(&mut conn);

    let meal = create_meal(&mut conn, &NewMeal::new(&user, "2024-01-15", "08:00", "Breakfast"))
        .unwrap();
    add_meal_item(&mut conn, &NewMealFoodItem::new(&meal.id, 200.0, "1 bowl")).unwrap();
    add_meal_item(&mut conn, &NewMealFoodItem::new(&meal.id, 300.0, "2 slices")).unwrap();
    let session = create_workout_session(
        &mut conn,
        &NewWorkoutSession {
            is_completed: Some(true),
            end_time: Some("2024-01-15T10:00:00.000Z".into()),
            ..NewWorkoutSession::new(&user, "Push", "2024-01-15T09:00:00.000Z")
        },
    )
    .unwrap();
    assert!(session.is_completed);

    let summary = get_user_daily_summary(&mut conn, &user, Some("2024-01-15")).unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].total_meals, 1);
    assert_eq!(summary[0].total_calories_nutrition, 500.0);
    assert_eq!(summary[0].workout_sessions, 1);
    assert_eq!(summary[0].cardio_sessions, 0);
}

#[test]
fn route_comes_back_in_recorded_order() {
    let db = Database::in_memory().unwrap();
    let mut conn = db.conn().unwrap();
    let user = new_user(&mut conn);

    let run = start_cardio_session(
        &mut conn,
        &NewCardioSession::new(&user, "run", "Run", "Free run", "2024-01-15T07:00:00.000Z"),
    )
    .unwrap();
    assert!(run.is_running);

    for (second, lat) in [("02", 48.8570), ("00", 48.8566), ("01", 48.8568)] {
        record_location_point(
            &mut conn,
            &NewLocationPoint::new(&run.id, lat, 2.3522, format!("2024-01-15T07:00:{second}.000Z")),
        )
        .unwrap();
    }

    let route = load_route(&mut conn, &run.id).unwrap();
    let stamps: Vec<_> = route.iter().map(|p| p.recorded_at.as_str()).collect();
    assert_eq!(
        stamps,
        [
            "2024-01-15T07:00:00.000Z",
            "2024-01-15T07:00:01.000Z",
            "2024-01-15T07:00:02.000Z",
        ]
    );

    let finished = complete_cardio_session(&mut conn, &run.id).unwrap();
    assert!(!finished.is_running);
    assert!(finished.end_time.is_some());
    assert_eq!(get_cardio_session(&mut conn, &run.id).unwrap(), finished);
}

#[test]
fn seeded_catalog_is_localized_and_scoped() {
    let db = Database::in_memory().unwrap();
    let mut conn = db.conn().unwrap();
    let user = new_user(&mut conn);

    let seed = CatalogSeed::from_json(
        r#"{
            "exercises": [
                {"name_en": "Squat", "name_fr": "Flexion", "muscle_group": "legs"},
                {"name_en": "Plank", "name_fr": "", "muscle_group": "core"}
            ],
            "foods": [{"name_en": "Oats", "name_fr": "Avoine", "calories": 389.0}]
        }"#,
    )
    .unwrap();
    assert_eq!(seed.import(&mut conn).unwrap().total(), 3);
    create_food(
        &mut conn,
        &NewFood {
            owner: Ownership::owned(&user),
            ..NewFood::new("Protein shake", "Shake protéiné", 120.0)
        },
    )
    .unwrap();

    let names: Vec<_> = get_exercises_localized(&mut conn, Some("fr-FR"))
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["Flexion", "Plank"]);

    assert_eq!(list_foods_visible_to(&mut conn, Some(user.as_str())).unwrap().len(), 2);
    assert_eq!(list_foods_visible_to(&mut conn, None).unwrap().len(), 1);

    delete_user(&mut conn, &user).unwrap();
    assert_eq!(list_foods_visible_to(&mut conn, None).unwrap().len(), 1);
}

#[test]
fn histories_are_scoped_to_the_user() {
    let db = Database::in_memory().unwrap();
    let mut conn = db.conn().unwrap();
    let alice = new_user(&mut conn);
    let bob = new_user(&mut conn);

    for (user, day) in [(&alice, "2024-01-14"), (&alice, "2024-01-15"), (&bob, "2024-01-15")] {
        create_workout_session(
            &mut conn,
            &NewWorkoutSession::new(user, "Session", format!("{day}T08:00:00.000Z")),
        )
        .unwrap();
        let meal = create_meal(&mut conn, &NewMeal::new(user, day, "12:00", "Lunch")).unwrap();
        add_meal_item(&mut conn, &NewMealFoodItem::new(&meal.id, 500.0, "1 plate")).unwrap();
    }

    let alice_workouts = get_user_workout_history(&mut conn, &alice, None, None).unwrap();
    let dates: Vec<_> = alice_workouts.iter().map(|r| r.session_date.as_str()).collect();
    assert_eq!(dates, ["2024-01-15", "2024-01-14"]);

    let bob_meals = get_user_nutrition_history(&mut conn, &bob, Some("2024-01-15"), None).unwrap();
    assert_eq!(bob_meals.len(), 1);
    assert_eq!(bob_meals[0].food_name, None);
    assert!(
        get_user_nutrition_history(&mut conn, &bob, None, Some("2024-01-14"))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn histories_order_by_instant_across_offsets() {
    let db = Database::in_memory().unwrap();
    let mut conn = db.conn().unwrap();
    let user = new_user(&mut conn);

    for (name, start) in [
        ("early", "2024-01-15T07:30:00Z"),
        ("latest", "2024-01-15T09:00:00+01:00"),
        ("earliest", "2024-01-15T07:15:00Z"),
    ] {
        create_workout_session(&mut conn, &NewWorkoutSession::new(&user, name, start)).unwrap();
        start_cardio_session(
            &mut conn,
            &NewCardioSession::new(&user, "run", name, "Free run", start),
        )
        .unwrap();
    }

    let workouts = get_user_workout_history(&mut conn, &user, None, None).unwrap();
    let names: Vec<_> = workouts.iter().map(|r| r.session_name.as_str()).collect();
    assert_eq!(names, ["latest", "early", "earliest"]);

    let runs = get_user_cardio_history(&mut conn, &user, None, None).unwrap();
    let titles: Vec<_> = runs.iter().map(|r| r.activity_title.as_str()).collect();
    assert_eq!(titles, ["latest", "early", "earliest"]);
}
