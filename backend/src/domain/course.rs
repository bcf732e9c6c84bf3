//! Courses, lessons and the instructor course form.
//!
//! Raw form input arrives as [`CourseFields`]. Validation collects every
//! problem into [`FieldErrors`] so a client can redisplay the whole form in
//! one round trip; a successful pass yields a [`CourseDraft`].

use std::fmt;

use serde::Serialize;

use super::{CategoryId, FieldError, FieldErrors, UserId};

/// Course identifier as stored in the `courses` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CourseId(i32);

impl CourseId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lesson identifier as stored in the `lessons` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LessonId(i32);

impl LessonId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Reasons a price string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PriceValidationError {
    #[error("Price is required.")]
    Empty,
    #[error("Price must be a decimal number.")]
    Invalid,
    #[error("Price must not be negative.")]
    Negative,
    #[error("Price must have at most two decimal places.")]
    TooPrecise,
    #[error("Price is too large.")]
    TooLarge,
}

/// Non-negative price held in minor units (cents).
///
/// # Examples
/// ```
/// use course_market::domain::Price;
///
/// let price = Price::parse("49.99").unwrap();
/// assert_eq!(price.cents(), 4999);
/// assert_eq!(price.to_string(), "49.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Parse a decimal string such as `"49.99"`, `"5"` or `"0.5"`.
    pub fn parse(raw: &str) -> Result<Self, PriceValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PriceValidationError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(PriceValidationError::Negative);
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(PriceValidationError::Invalid);
        }
        if fraction.len() > 2 {
            return Err(PriceValidationError::TooPrecise);
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| PriceValidationError::TooLarge)?
        };
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| PriceValidationError::Invalid)? * 10,
            _ => fraction.parse().map_err(|_| PriceValidationError::Invalid)?,
        };

        units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .map(Self)
            .ok_or(PriceValidationError::TooLarge)
    }

    /// Restore a price from stored cents.
    pub fn from_cents(cents: i64) -> Result<Self, PriceValidationError> {
        if cents < 0 {
            return Err(PriceValidationError::Negative);
        }
        Ok(Self(cents))
    }

    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Maximum number of characters in a course title.
pub const COURSE_TITLE_MAX: usize = 200;

/// Maximum number of characters in a lesson title.
pub const LESSON_TITLE_MAX: usize = 200;

/// Non-blank course title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTitle(String);

/// Reasons a course title is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CourseTitleError {
    #[error("Title is required.")]
    Empty,
    #[error("Title must be at most {max} characters.")]
    TooLong { max: usize },
}

impl CourseTitle {
    pub fn new(title: &str) -> Result<Self, CourseTitleError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(CourseTitleError::Empty);
        }
        if trimmed.chars().count() > COURSE_TITLE_MAX {
            return Err(CourseTitleError::TooLong {
                max: COURSE_TITLE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub title: CourseTitle,
    pub description: Option<String>,
    pub price: Price,
    pub category_id: CategoryId,
    pub instructor_id: UserId,
}

/// A persisted lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    pub title: String,
    pub content: String,
}

/// Unvalidated instructor course form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category_id: Option<i64>,
    pub lesson_title: Option<String>,
    pub lesson_content: Option<String>,
}

/// Validated course attributes, ready to insert or overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: CourseTitle,
    pub description: Option<String>,
    pub price: Price,
    pub category_id: CategoryId,
}

/// First lesson written alongside a new course. Both parts may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonDraft {
    pub title: String,
    pub content: String,
}

/// Everything the repository needs to create a course atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub instructor_id: UserId,
    pub course: CourseDraft,
    pub first_lesson: LessonDraft,
}

impl CourseFields {
    /// Validate the course attributes, collecting every field error.
    ///
    /// Category existence is not checked here; callers consult the category
    /// repository and append to the returned errors.
    pub fn validate(&self) -> Result<CourseDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = match CourseTitle::new(self.title.as_deref().unwrap_or_default()) {
            Ok(title) => Some(title),
            Err(error) => {
                let code = match error {
                    CourseTitleError::Empty => "required",
                    CourseTitleError::TooLong { .. } => "too_long",
                };
                errors.push(FieldError::new("title", code, error.to_string()));
                None
            }
        };

        let price = match Price::parse(self.price.as_deref().unwrap_or_default()) {
            Ok(price) => Some(price),
            Err(error) => {
                let code = match error {
                    PriceValidationError::Empty => "required",
                    _ => "invalid_price",
                };
                errors.push(FieldError::new("price", code, error.to_string()));
                None
            }
        };

        let category_id = match self.category_id {
            None => {
                errors.push(FieldError::new(
                    "categoryId",
                    "required",
                    "Category is required.",
                ));
                None
            }
            Some(raw) => match i32::try_from(raw) {
                Ok(id) if id > 0 => Some(CategoryId::new(id)),
                _ => {
                    errors.push(FieldError::new(
                        "categoryId",
                        "invalid_category",
                        "Category must be a positive identifier.",
                    ));
                    None
                }
            },
        };

        if self
            .lesson_title
            .as_deref()
            .is_some_and(|lesson| lesson.chars().count() > LESSON_TITLE_MAX)
        {
            errors.push(FieldError::new(
                "lessonTitle",
                "too_long",
                format!("Lesson title must be at most {LESSON_TITLE_MAX} characters."),
            ));
        }

        match (title, price, category_id) {
            (Some(title), Some(price), Some(category_id)) if errors.is_empty() => Ok(CourseDraft {
                title,
                description: self
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .map(str::to_owned),
                price,
                category_id,
            }),
            _ => Err(errors),
        }
    }

    /// First lesson from the optional lesson fields.
    pub fn lesson(&self) -> LessonDraft {
        LessonDraft {
            title: self.lesson_title.clone().unwrap_or_default(),
            content: self.lesson_content.clone().unwrap_or_default(),
        }
    }
}
