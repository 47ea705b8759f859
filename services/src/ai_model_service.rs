use chrono::Utc;
use db::models::{ai_model, assessment};
use marker::Weights;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel};
use serde::Deserialize;
use tracing::info;
use util::object_id;

use crate::error::{ServiceError, ServiceResult};
use crate::validation::{ensure_id, required};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AiModelInput {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub first_model: Option<String>,
    pub second_model: Option<String>,
    pub first_weight: Option<i32>,
    pub second_weight: Option<i32>,
}

fn check_weights(first: i32, second: i32) -> ServiceResult<()> {
    if Weights::new(first, second).validate().is_err() {
        return Err(ServiceError::BadRequest(format!(
            "AI model weights must sum to 100 (got {first} + {second})."
        )));
    }
    Ok(())
}

pub async fn find(db: &DatabaseConnection, model_id: &str) -> ServiceResult<ai_model::Model> {
    ensure_id(model_id, "model_id")?;
    ai_model::Model::find_by_id(db, model_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("AI model not found."))
}

pub async fn create_model(db: &DatabaseConnection, input: AiModelInput) -> ServiceResult<ai_model::Model> {
    let name = required(input.name.as_deref(), "Name")?;
    let provider = required(input.provider.as_deref(), "Provider")?;
    let first_model = required(input.first_model.as_deref(), "First model")?;
    let second_model = required(input.second_model.as_deref(), "Second model")?;
    let (Some(first_weight), Some(second_weight)) = (input.first_weight, input.second_weight) else {
        return Err(ServiceError::bad_request("Both weights are required."));
    };
    check_weights(first_weight, second_weight)?;

    let now = Utc::now();
    let created = ai_model::ActiveModel {
        id: Set(object_id::new_id()),
        name: Set(name),
        provider: Set(provider),
        first_model: Set(first_model),
        second_model: Set(second_model),
        first_weight: Set(first_weight),
        second_weight: Set(second_weight),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(model_id = %created.id, "AI model created");
    Ok(created)
}

pub async fn list_models(db: &DatabaseConnection) -> ServiceResult<Vec<ai_model::Model>> {
    Ok(ai_model::Model::list_all(db).await?)
}

/// Partial update; the resulting weight pair must still sum to 100.
pub async fn update_model(db: &DatabaseConnection, model_id: &str, input: AiModelInput) -> ServiceResult<ai_model::Model> {
    let existing = find(db, model_id).await?;
    let first_weight = input.first_weight.unwrap_or(existing.first_weight);
    let second_weight = input.second_weight.unwrap_or(existing.second_weight);
    check_weights(first_weight, second_weight)?;

    let mut active = existing.into_active_model();
    if let Some(v) = input.name.as_deref() {
        active.name = Set(required(Some(v), "Name")?);
    }
    if let Some(v) = input.provider.as_deref() {
        active.provider = Set(required(Some(v), "Provider")?);
    }
    if let Some(v) = input.first_model.as_deref() {
        active.first_model = Set(required(Some(v), "First model")?);
    }
    if let Some(v) = input.second_model.as_deref() {
        active.second_model = Set(required(Some(v), "Second model")?);
    }
    active.first_weight = Set(first_weight);
    active.second_weight = Set(second_weight);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

pub async fn delete_model(db: &DatabaseConnection, model_id: &str) -> ServiceResult<()> {
    let existing = find(db, model_id).await?;
    if assessment::Model::count_where(db, assessment::Column::AiModelId, model_id).await? > 0 {
        return Err(ServiceError::bad_request(
            "AI model is used by an assessment and cannot be deleted.",
        ));
    }
    ai_model::Entity::delete_by_id(existing.id).exec(db).await?;
    Ok(())
}
