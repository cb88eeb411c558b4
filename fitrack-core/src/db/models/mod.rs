//! Row, insert and update shapes for every table.
//!
//! Each table has three shapes:
//! - the persisted row (`Exercise`, `WorkoutSession`, ...),
//! - an insert payload (`New*`) where defaulted or generated columns are `Option`,
//! - an update patch (`*Update`) where every mutable column is optional and
//!   nullable columns are `Option<Option<_>>` so they can be cleared.

mod cardio;
mod catalog;
mod hiit;
mod nutrition;
mod stats;
mod user;
mod workout;

pub use cardio::{
    CardioSession, CardioSessionUpdate, LocationPoint, LocationPointUpdate, NewCardioSession,
    NewLocationPoint,
};
pub use catalog::{
    CardioActivity, CardioActivityUpdate, Exercise, ExerciseUpdate, Food, FoodUpdate, HiitWorkout,
    HiitWorkoutUpdate, NewCardioActivity, NewExercise, NewFood, NewHiitWorkout, NewRecipe, Recipe,
    RecipeUpdate,
};
pub use hiit::{HiitSession, HiitSessionUpdate, NewHiitSession};
pub use nutrition::{Meal, MealFoodItem, MealFoodItemUpdate, MealUpdate, NewMeal, NewMealFoodItem};
pub use stats::DataStat;
pub use user::{NewUser, User, UserUpdate};
pub use workout::{
    ExerciseSet, ExerciseSetUpdate, NewExerciseSet, NewWorkoutExercise, NewWorkoutSession,
    WorkoutExercise, WorkoutExerciseUpdate, WorkoutSession, WorkoutSessionUpdate,
};

/// A partial update. The default value is the empty patch.
pub trait Patch: Default + PartialEq {
    /// True when applying the patch would change nothing.
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
