//! Course feedback: ratings, comments and the per-course summary.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Course, CourseId, DisplayName, Error, UserId};

/// Lowest accepted rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted rating.
pub const RATING_MAX: u8 = 5;

/// Raised when a rating falls outside `RATING_MIN..=RATING_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rating must be between 1 and 5.")]
pub struct RatingOutOfRange {
    pub value: i64,
}

/// A rating in `1..=5`.
///
/// # Examples
/// ```
/// use course_market::domain::Rating;
///
/// assert!(Rating::new(5).is_ok());
/// assert!(Rating::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, RatingOutOfRange> {
        u8::try_from(value)
            .ok()
            .filter(|rating| (RATING_MIN..=RATING_MAX).contains(rating))
            .map(Self)
            .ok_or(RatingOutOfRange { value })
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Feedback identifier as stored in the `feedbacks` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FeedbackId(i32);

impl FeedbackId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

/// A stored feedback row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: FeedbackId,
    pub course_id: CourseId,
    pub user_id: UserId,
    pub comment: String,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}

/// Feedback joined with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub feedback: Feedback,
    pub author: DisplayName,
}

/// Feedback about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub course_id: CourseId,
    pub user_id: UserId,
    pub comment: String,
    pub rating: Rating,
}

/// Count and mean of the ratings on one course.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    count: u32,
    total: u64,
}

impl RatingSummary {
    pub fn from_entries(entries: &[FeedbackEntry]) -> Self {
        entries.iter().fold(Self::default(), |summary, entry| Self {
            count: summary.count.saturating_add(1),
            total: summary.total + u64::from(entry.feedback.rating.get()),
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean rating rounded to two decimals, or `None` without feedback.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let mean = self.total as f64 / f64::from(self.count);
        Some((mean * 100.0).round() / 100.0)
    }
}

/// A course together with its feedback, as shown after a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseFeedback {
    pub course: Course,
    pub feedbacks: Vec<FeedbackEntry>,
    pub summary: RatingSummary,
}

impl CourseFeedback {
    pub fn new(course: Course, feedbacks: Vec<FeedbackEntry>) -> Self {
        let summary = RatingSummary::from_entries(&feedbacks);
        Self {
            course,
            feedbacks,
            summary,
        }
    }
}

/// Outcome of a feedback submission.
///
/// Rejection is a normal outcome rather than an `Err`: the caller still gets
/// the course and its current feedback to redisplay.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackSubmission {
    Accepted(CourseFeedback),
    Rejected {
        error: Error,
        current: CourseFeedback,
    },
}
