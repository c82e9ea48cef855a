use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

/// Audience a course is aimed at
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[cfg_attr(feature = "database", derive(sea_orm::DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    #[cfg_attr(feature = "database", sea_orm(string_value = "student"))]
    Student,
    #[cfg_attr(feature = "database", sea_orm(string_value = "kids"))]
    Kids,
}

impl Category {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn all() -> Vec<Category> {
        Category::iter().collect()
    }
}

/// Difficulty level of a course
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[cfg_attr(feature = "database", derive(sea_orm::DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    #[cfg_attr(feature = "database", sea_orm(string_value = "beginner"))]
    Beginner,
    #[cfg_attr(feature = "database", sea_orm(string_value = "intermediate"))]
    Intermediate,
    #[cfg_attr(feature = "database", sea_orm(string_value = "advanced"))]
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn all() -> Vec<Level> {
        Level::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from_str("kids"), Ok(Category::Kids));
        assert_eq!(Category::from_str("student"), Ok(Category::Student));
        assert!(Category::from_str("adults").is_err());
        assert_eq!(Category::all().len(), 2);
    }

    #[test]
    fn test_level_ordering_follows_difficulty() {
        let mut levels = Level::all();
        levels.reverse();
        levels.sort();
        assert_eq!(
            levels,
            vec![Level::Beginner, Level::Intermediate, Level::Advanced]
        );
        assert_eq!(Level::Intermediate.as_str(), "intermediate");
    }
}
