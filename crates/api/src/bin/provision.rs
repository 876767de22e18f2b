//! Provision an API key against the Postgres store.
//!
//! Creates a project (or reuses `PROJECT_ID`), generates a secret, stores
//! only its hash and last four characters, and prints the plaintext once.
//!
//! | Env Var          | Default                      |
//! |------------------|------------------------------|
//! | `DATABASE_URL`   | required                     |
//! | `PROJECT_ID`     | unset (create a new project) |
//! | `PROJECT_NAME`   | `Default project`            |
//! | `API_KEY_PEPPER` | empty                        |

use anyhow::{bail, Context};
use kennel_api::bootstrap;
use kennel_api::config::LogFormat;
use kennel_core::actor::Actor;
use kennel_core::api_keys::generate_api_key;
use kennel_core::types::DbId;
use kennel_db::repositories::{ApiKeyRepo, ProjectRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    bootstrap::init_tracing(LogFormat::Text);

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pepper = std::env::var("API_KEY_PEPPER").unwrap_or_default();
    let actor = Actor::service("kennel-provision", Some("bootstrap"));

    let pool = kennel_db::create_pool(&database_url, 2)
        .await
        .context("Failed to connect to database")?;
    kennel_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let project = match std::env::var("PROJECT_ID").ok().filter(|v| !v.is_empty()) {
        Some(raw) => {
            let id: DbId = raw.parse().context("PROJECT_ID must be a UUID")?;
            match ProjectRepo::find_by_id(&pool, id).await? {
                Some(project) => project,
                None => bail!("Project {id} does not exist"),
            }
        }
        None => {
            let name =
                std::env::var("PROJECT_NAME").unwrap_or_else(|_| "Default project".to_string());
            let project = ProjectRepo::create(&pool, &name, &actor).await?;
            tracing::info!(project_id = %project.id, name = %project.name, "Created project");
            project
        }
    };

    let generated = generate_api_key(&pepper);
    let key = ApiKeyRepo::create(&pool, project.id, &generated.hash, &generated.last4, &actor)
        .await
        .context("Failed to store API key")?;

    tracing::info!(
        project_id = %project.id,
        api_key_id = %key.id,
        last4 = %key.last4,
        "Provisioned API key"
    );
    tracing::info!(api_key = %generated.plaintext, "Store this secret now; it is not shown again");

    Ok(())
}
