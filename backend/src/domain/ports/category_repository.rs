//! Read-only access to course categories.
use async_trait::async_trait;

use crate::domain::{Category, CategoryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "category repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by id.
    async fn list_all(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    async fn find_by_id(&self, id: CategoryId)
    -> Result<Option<Category>, CategoryRepositoryError>;
}
