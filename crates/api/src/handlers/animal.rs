//! `POST /animals` with optional owner linking. The remaining animal routes
//! use the generic handlers in [`super::entity`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kennel_core::error::CoreError;
use kennel_core::types::DbId;
use kennel_db::models::animal::{validate_create_animal, Animal, CreateAnimal};
use kennel_db::models::animal_relationship::{
    validate_create_animal_relationship, CreateAnimalRelationship, OWNERSHIP_OWNER,
};
use kennel_db::models::customer::Customer;
use kennel_db::Entity;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Request body for `POST /animals`: the animal itself plus an optional
/// owning customer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnimalRequest {
    #[serde(flatten)]
    pub animal: CreateAnimal,
    pub customer_id: Option<DbId>,
}

/// POST /api/v1/animals
///
/// With `customerId`, an `OWNER` relationship is created right after the
/// animal. The relationship is validated and its customer resolved within
/// the caller's project before anything is written, so a bad link never
/// leaves an orphaned animal behind. The response is the animal either way.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(input): Json<CreateAnimalRequest>,
) -> AppResult<(StatusCode, Json<Animal>)> {
    validate_create_animal(&input.animal)?;
    let actor = auth.actor();
    let services = &state.services;

    let owner = match input.customer_id {
        Some(customer_id) => {
            let relationship = owner_relationship(customer_id);
            validate_create_animal_relationship(&relationship)?;
            services
                .customers
                .find_by_id(auth.project_id, customer_id)
                .await?
                .ok_or_else(|| CoreError::not_found(Customer::KIND.name(), customer_id))?;
            Some(relationship)
        }
        None => None,
    };

    let animal = services
        .animals
        .create(auth.project_id, &input.animal, &actor)
        .await?;

    if let Some(mut relationship) = owner {
        relationship.animal_id = animal.id;
        services
            .animal_relationships
            .create(auth.project_id, &relationship, &actor)
            .await?;
    }

    Ok((StatusCode::CREATED, Json(animal)))
}

/// The `OWNER` link for a not-yet-created animal; `animal_id` is filled in
/// once the animal exists.
fn owner_relationship(customer_id: DbId) -> CreateAnimalRelationship {
    CreateAnimalRelationship {
        animal_id: DbId::nil(),
        customer_id,
        ownership_type: OWNERSHIP_OWNER.to_string(),
        metadata: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_relationship_passes_validation() {
        let customer = DbId::new_v4();
        let relationship = owner_relationship(customer);
        assert_eq!(relationship.customer_id, customer);
        assert_eq!(relationship.ownership_type, OWNERSHIP_OWNER);
        assert!(validate_create_animal_relationship(&relationship).is_ok());
    }
}
