use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;

/// Course completion percentage, always within `0..=100`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64")]
pub struct Progress(u8);

impl Progress {
    pub const MIN: Self = Progress(0);
    pub const MAX: Self = Progress(100);

    /// Builds a progress value, clamping anything outside `0..=100`
    pub fn clamped(value: i64) -> Self {
        Progress(value.clamp(0, 100) as u8)
    }

    pub fn is_complete(self) -> bool {
        self == Self::MAX
    }

    pub fn as_i16(self) -> i16 {
        self.0 as i16
    }
}

impl From<i64> for Progress {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl Deref for Progress {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating must be between {min} and {max}, got {value}", min = Rating::MIN, max = Rating::MAX)]
pub struct RatingOutOfRange {
    pub value: i64,
}

/// A review score of one to five stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, RatingOutOfRange> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(RatingOutOfRange { value })
        }
    }

    pub fn as_i16(self) -> i16 {
        self.0 as i16
    }

    /// Mean of a set of ratings, `0.0` for an empty set
    pub fn average<I>(ratings: I) -> f64
    where
        I: IntoIterator<Item = i16>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0i64, 0u32), |(sum, count), r| (sum + r as i64, count + 1));

        if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        }
    }
}

impl Deref for Rating {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(*Progress::clamped(-20), 0);
        assert_eq!(*Progress::clamped(42), 42);
        assert_eq!(*Progress::clamped(250), 100);
        assert!(Progress::clamped(100).is_complete());
        assert!(!Progress::clamped(99).is_complete());
    }

    #[test]
    fn test_progress_deserializes_with_clamping() {
        let progress: Progress = serde_json::from_str("140").unwrap();
        assert_eq!(progress, Progress::MAX);
        let progress: Progress = serde_json::from_str("-3").unwrap();
        assert_eq!(progress, Progress::MIN);
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(*Rating::new(1).unwrap(), 1);
        assert_eq!(*Rating::new(5).unwrap(), 5);
        assert_eq!(
            Rating::new(9).unwrap_err().to_string(),
            "rating must be between 1 and 5, got 9"
        );
    }

    #[test]
    fn test_rating_average() {
        assert_eq!(Rating::average(Vec::new()), 0.0);
        assert_eq!(Rating::average(vec![5, 4]), 4.5);
        assert_eq!(Rating::average(vec![1, 2, 3]), 2.0);
    }
}
