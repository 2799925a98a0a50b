//! Sample repository

use samplereg_core::{NewSample, Sample};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::DbError;
use crate::models::Page;

pub const DUPLICATE_LABEL: &str = "A sample with this label is already registered";

const SAMPLE_COLUMNS: &str =
    "id, owner_id, sample_label, proposal_number, inner_diameter, outer_diameter";

fn sample_from_row(row: &SqliteRow) -> Result<Sample, sqlx::Error> {
    Ok(Sample {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        sample_label: row.try_get("sample_label")?,
        proposal_number: row.try_get("proposal_number")?,
        inner_diameter: row.try_get("inner_diameter")?,
        outer_diameter: row.try_get("outer_diameter")?,
    })
}

/// Sample repository
pub struct SampleRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SampleRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a sample owned by `owner_id`. Duplicate labels surface as `Conflict`.
    pub async fn create(&self, owner_id: i64, sample: &NewSample) -> Result<Sample, DbError> {
        let sql = format!(
            "INSERT INTO samples (sample_label, proposal_number, inner_diameter, outer_diameter, owner_id) \
             VALUES (?, ?, ?, ?, ?) RETURNING {SAMPLE_COLUMNS}"
        );

        let row = sqlx::query(&sql)
            .bind(&sample.sample_label)
            .bind(&sample.proposal_number)
            .bind(sample.inner_diameter)
            .bind(sample.outer_diameter)
            .bind(owner_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| DbError::on_unique(e, DUPLICATE_LABEL))?;

        Ok(sample_from_row(&row)?)
    }

    pub async fn label_exists(&self, label: &str) -> Result<bool, DbError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM samples WHERE sample_label = ?")
                .bind(label)
                .fetch_one(self.pool)
                .await?;

        Ok(count > 0)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Sample>, DbError> {
        let sql = format!("SELECT {SAMPLE_COLUMNS} FROM samples ORDER BY id LIMIT ? OFFSET ?");
        let rows = sqlx::query(&sql)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.iter().map(sample_from_row).collect::<Result<_, _>>()?)
    }

    pub async fn for_owner(&self, owner_id: i64) -> Result<Vec<Sample>, DbError> {
        let sql = format!("SELECT {SAMPLE_COLUMNS} FROM samples WHERE owner_id = ? ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.iter().map(sample_from_row).collect::<Result<_, _>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, UserRepo};
    use crate::models::UserName;

    fn sample(label: &str) -> NewSample {
        NewSample {
            user: "John Doe".into(),
            sample_label: label.into(),
            proposal_number: "P-1".into(),
            inner_diameter: 2.0,
            outer_diameter: 4.5,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_for_owner() {
        let pool = create_memory_pool().await.unwrap();
        let owner = UserRepo::new(&pool)
            .create(&UserName::new("John Doe").unwrap())
            .await
            .unwrap();
        let repo = SampleRepo::new(&pool);

        let created = repo.create(owner.id, &sample("S-1")).await.unwrap();
        assert_eq!(created.owner_id, owner.id);
        assert_eq!(created.outer_diameter, 4.5);

        assert!(repo.label_exists("S-1").await.unwrap());
        assert!(!repo.label_exists("S-2").await.unwrap());
        assert_eq!(repo.for_owner(owner.id).await.unwrap(), vec![created.clone()]);
        assert_eq!(repo.list(Page::default()).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn duplicate_label_is_conflict() {
        let pool = create_memory_pool().await.unwrap();
        let owner = UserRepo::new(&pool)
            .create(&UserName::new("John Doe").unwrap())
            .await
            .unwrap();
        let repo = SampleRepo::new(&pool);

        repo.create(owner.id, &sample("S-1")).await.unwrap();
        let err = repo.create(owner.id, &sample("S-1")).await.unwrap_err();

        assert!(matches!(err, DbError::Conflict { detail } if detail == DUPLICATE_LABEL));
    }

    #[tokio::test]
    async fn missing_owner_rejected_by_foreign_key() {
        let pool = create_memory_pool().await.unwrap();
        let err = SampleRepo::new(&pool)
            .create(99, &sample("S-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
