//! Repository for the `projects` table.

use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::Project;

const COLUMNS: &str =
    "id, name, created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create(pool: &PgPool, name: &str, actor: &Actor) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, created_by, updated_by) \
             VALUES ($1, $2, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    /// Find an active project by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
