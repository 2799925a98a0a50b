//! User repository
//!
//! - create: plain INSERT, duplicate names surface as `Conflict`
//! - get: user plus owned samples

use samplereg_core::Sample;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{samples::SampleRepo, DbError};
use crate::models::{Page, UserName};

pub const DUPLICATE_USER: &str = "An account belonging to this user is already registered";

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// User with the samples registered against them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserWithSamples {
    pub id: i64,
    pub name: String,
    pub samples: Vec<Sample>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &UserName) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("INSERT INTO users (name) VALUES (?) RETURNING id, name")
            .bind(name.as_str())
            .fetch_one(self.pool)
            .await
            .map_err(|e| DbError::on_unique(e, DUPLICATE_USER))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name FROM users ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find(&self, id: i64) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Get a user and their samples, or `NotFound`
    pub async fn get(&self, id: i64) -> Result<UserWithSamples, DbError> {
        let user = self.find(id).await?.ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })?;

        let samples = SampleRepo::new(self.pool).for_owner(user.id).await?;

        Ok(UserWithSamples {
            id: user.id,
            name: user.name,
            samples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn create_and_list() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepo::new(&pool);

        let john = repo.create(&UserName::new("John Doe").unwrap()).await.unwrap();
        repo.create(&UserName::new("Jane Doe").unwrap()).await.unwrap();

        let users = repo.list(Page::default()).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], john);

        let second = repo.list(Page::new(1, 10)).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepo::new(&pool);
        let name = UserName::new("John Doe").unwrap();

        repo.create(&name).await.unwrap();
        let err = repo.create(&name).await.unwrap_err();

        assert!(matches!(err, DbError::Conflict { detail } if detail == DUPLICATE_USER));
    }

    #[tokio::test]
    async fn get_missing_user() {
        let pool = create_memory_pool().await.unwrap();
        let err = UserRepo::new(&pool).get(42).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "user", .. }));
    }
}
