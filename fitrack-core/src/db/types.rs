//! Column types that need more than a plain scalar mapping.

use std::fmt;
use std::str::FromStr;

use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Who a catalog row belongs to.
///
/// Stored as the `is_custom` flag plus the nullable `user_id` column; the
/// table check `is_custom = (user_id IS NOT NULL)` keeps the pair consistent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Shared catalog entry.
    #[default]
    Global,
    /// A user's private variant.
    Owned(String),
}

impl Ownership {
    pub fn owned(user_id: impl Into<String>) -> Self {
        Ownership::Owned(user_id.into())
    }

    pub(crate) fn from_columns(user_id: Option<&str>) -> Self {
        match user_id {
            Some(user_id) => Ownership::Owned(user_id.to_string()),
            None => Ownership::Global,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Ownership::Owned(_))
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Ownership::Global => None,
            Ownership::Owned(user_id) => Some(user_id),
        }
    }

    /// Global rows are visible to everyone, owned rows only to their owner.
    pub fn is_visible_to(&self, user_id: &str) -> bool {
        match self {
            Ownership::Global => true,
            Ownership::Owned(owner) => owner == user_id,
        }
    }
}

/// Ordered list of strings stored as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl StringList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for StringList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        StringList(iter.into_iter().map(Into::into).collect())
    }
}

/// One line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(food_name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// A recipe's ingredient list, stored as a JSON array of [`Ingredient`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(transparent)]
pub struct Ingredients(pub Vec<Ingredient>);

impl Ingredients {
    pub fn validate(&self) -> Result<()> {
        for (position, ingredient) in self.0.iter().enumerate() {
            if ingredient.food_name.trim().is_empty() {
                return Err(Error::invalid_input(format!(
                    "ingredient {position} has no food_name"
                )));
            }
            if ingredient.unit.trim().is_empty() {
                return Err(Error::invalid_input(format!(
                    "ingredient {position} ({}) has no unit",
                    ingredient.food_name
                )));
            }
            if !ingredient.quantity.is_finite() || ingredient.quantity < 0.0 {
                return Err(Error::invalid_input(format!(
                    "ingredient {position} ({}) has quantity {}",
                    ingredient.food_name, ingredient.quantity
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<Ingredient> for Ingredients {
    fn from_iter<I: IntoIterator<Item = Ingredient>>(iter: I) -> Self {
        Ingredients(iter.into_iter().collect())
    }
}

macro_rules! json_text_column {
    ($ty:ident) => {
        impl ToSql<Text, Sqlite> for $ty {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
                out.set_value(serde_json::to_string(&self.0)?);
                Ok(IsNull::No)
            }
        }

        impl FromSql<Text, Sqlite> for $ty {
            fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let text = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
                Ok($ty(serde_json::from_str(&text)?))
            }
        }
    };
}

json_text_column!(StringList);
json_text_column!(Ingredients);

/// Phase of a live HIIT session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum HiitPhase {
    Warmup,
    Work,
    Rest,
    Cooldown,
    Finished,
}

impl HiitPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            HiitPhase::Warmup => "warmup",
            HiitPhase::Work => "work",
            HiitPhase::Rest => "rest",
            HiitPhase::Cooldown => "cooldown",
            HiitPhase::Finished => "finished",
        }
    }
}

impl fmt::Display for HiitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HiitPhase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "warmup" => Ok(HiitPhase::Warmup),
            "work" => Ok(HiitPhase::Work),
            "rest" => Ok(HiitPhase::Rest),
            "cooldown" => Ok(HiitPhase::Cooldown),
            "finished" => Ok(HiitPhase::Finished),
            other => Err(Error::invalid_input(format!("unknown HIIT phase {other:?}"))),
        }
    }
}

impl ToSql<Text, Sqlite> for HiitPhase {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for HiitPhase {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Ok(text.parse()?)
    }
}
