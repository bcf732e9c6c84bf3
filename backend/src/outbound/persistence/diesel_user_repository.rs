//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, ImageReference, Role, User, UserId, UserValidationError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UserProfileChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

pub(crate) fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let role: Role = row
        .role
        .parse()
        .map_err(|err: UserValidationError| UserPersistenceError::query(err.to_string()))?;
    let display_name = DisplayName::new(row.display_name)
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let image = row
        .image_url
        .map(ImageReference::new)
        .transpose()
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(UserId::from_uuid(row.id), role, display_name)
        .with_profile(row.description, image))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;
        let row = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn save_profile(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;
        let changes = UserProfileChangeset {
            description: user.description(),
            image_url: user.image().map(ImageReference::as_str),
        };
        let updated = diesel::update(users::table.filter(users::id.eq(*user.id().as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(UserPersistenceError::query(format!(
                "user {} not found",
                user.id()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(role: &str, image_url: Option<&str>) -> UserRow {
        UserRow {
            id: Uuid::nil(),
            display_name: "Ingrid Instructor".to_owned(),
            role: role.to_owned(),
            description: Some("Teaches Rust".to_owned()),
            image_url: image_url.map(str::to_owned),
        }
    }

    #[rstest]
    fn rows_convert_to_users() {
        let user = row_to_user(row("instructor", Some("/uploads/profiles/a.png"))).expect("user");
        assert_eq!(user.role(), Role::Instructor);
        assert_eq!(user.description(), Some("Teaches Rust"));
        assert_eq!(
            user.image().map(ImageReference::as_str),
            Some("/uploads/profiles/a.png")
        );
    }

    #[rstest]
    #[case(row("admin", None))]
    #[case(row("student", Some("")))]
    fn corrupt_rows_are_query_errors(#[case] row: UserRow) {
        assert!(matches!(
            row_to_user(row),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
