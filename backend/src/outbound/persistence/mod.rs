//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL
//! through `diesel-async` and a `bb8` connection pool.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. No business rules live here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: pool and Diesel failures become the port's
//!   `Connection` or `Query` variant.
//!
//! # Example
//!
//! ```ignore
//! use course_market::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/courses")).await?;
//! let courses = DieselCourseRepository::new(pool);
//! ```

mod diesel_category_repository;
mod diesel_course_repository;
mod diesel_error_mapping;
mod diesel_feedback_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_feedback_repository::DieselFeedbackRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
