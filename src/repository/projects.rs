//! Projects repository (`projets` table)

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::project::{Project, ProjectRecord},
};

/// Normalized project document as written to the database
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDocument {
    pub name: String,
    pub client: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// RFC 3339
    pub start_date: String,
    /// RFC 3339
    pub end_date: Option<String>,
    /// Serialized `Vec<EquipmentUsage>`
    pub equipment_usage: String,
}

#[derive(Clone)]
pub struct ProjectsRepository {
    pool: Pool<Postgres>,
}

impl ProjectsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all projects, most recent start first
    pub async fn list(&self) -> AppResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRecord>(
            "SELECT * FROM projets ORDER BY start_date DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Get project by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Project> {
        sqlx::query_as::<_, ProjectRecord>("SELECT * FROM projets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Project::from)
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Create a project
    pub async fn create(&self, id: &str, doc: &ProjectDocument) -> AppResult<Project> {
        let row = sqlx::query_as::<_, ProjectRecord>(
            r#"
            INSERT INTO projets (
                id, name, client, location, description,
                start_date, end_date, equipment_usage
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&doc.name)
        .bind(&doc.client)
        .bind(&doc.location)
        .bind(&doc.description)
        .bind(&doc.start_date)
        .bind(&doc.end_date)
        .bind(&doc.equipment_usage)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    /// Overwrite a project document
    pub async fn replace(&self, id: &str, doc: &ProjectDocument) -> AppResult<Project> {
        sqlx::query_as::<_, ProjectRecord>(
            r#"
            UPDATE projets SET
                name = $2, client = $3, location = $4, description = $5,
                start_date = $6, end_date = $7, equipment_usage = $8,
                modif_date = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&doc.name)
        .bind(&doc.client)
        .bind(&doc.location)
        .bind(&doc.description)
        .bind(&doc.start_date)
        .bind(&doc.end_date)
        .bind(&doc.equipment_usage)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .map(Project::from)
        .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Delete a project
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project {} not found", id)));
        }
        Ok(())
    }
}
