//! PostgreSQL-backed `CategoryRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::CategoryRow;
use super::pool::DbPool;
use super::schema::categories;

#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
    map_diesel_error(
        error,
        CategoryRepositoryError::query,
        CategoryRepositoryError::connection,
    )
}

fn row_to_category(row: CategoryRow) -> Category {
    Category::new(CategoryId::new(row.id), row.name)
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list_all(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CategoryRepositoryError::connection))?;
        let rows: Vec<CategoryRow> = categories::table
            .order(categories::id.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_category).collect())
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CategoryRepositoryError::connection))?;
        let row = categories::table
            .find(id.get())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_category))
    }
}
