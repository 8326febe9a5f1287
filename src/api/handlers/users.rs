use std::sync::Arc;

use axum::extract::{Path, State};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::instrument;

use crate::api::errors::ApiError;
use crate::api::extract::JsonOrEmpty;
use crate::api::response::Envelope;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{NewUser, User, UserChanges, UserError};

/// Repository handle shared by every user handler through router state
pub type SharedUserRepository = Arc<dyn UserRepository>;

/// Request body for creating a user
///
/// Fields are optional here so that a missing field is reported as
/// "All fields are required" instead of a deserialization failure. A field
/// holding anything other than a JSON string counts as missing.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "string_field")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    pub role: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        NewUser::new(
            req.name.unwrap_or_default(),
            req.email.unwrap_or_default(),
            req.city.unwrap_or_default(),
            req.role.unwrap_or_default(),
        )
    }
}

/// Request body for updating a user; any subset of fields may be present
///
/// Non-string values are ignored like absent ones.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "string_field")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    pub role: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges::new(req.name, req.email, req.city, req.role)
    }
}

fn string_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

/// List every user
///
/// GET /users/get
#[instrument(skip_all)]
pub async fn get_users(
    State(repo): State<SharedUserRepository>,
) -> Result<Envelope<Vec<User>>, ApiError> {
    let users = repo.list().await?;

    Ok(Envelope::ok(users))
}

/// Get a user by ID
///
/// GET /users/getbyid/:id
#[instrument(skip_all)]
pub async fn get_user_by_id(
    State(repo): State<SharedUserRepository>,
    Path(id): Path<String>,
) -> Result<Envelope<User>, ApiError> {
    let user = repo.find_by_id(&id).await?.ok_or_else(|| {
        tracing::debug!("User not found: {}", id);
        UserError::NotFound
    })?;

    Ok(Envelope::ok(user))
}

/// Create a new user
///
/// POST /users/create
#[instrument(skip_all)]
pub async fn create_user(
    State(repo): State<SharedUserRepository>,
    JsonOrEmpty(req): JsonOrEmpty<CreateUserRequest>,
) -> Result<Envelope<User>, ApiError> {
    let new_user = NewUser::try_from(req)?;

    let user = repo.insert(new_user).await?;

    tracing::info!("User created: {}", user.id);

    Ok(Envelope::created(user).with_message("User created successfully"))
}

/// Update the supplied fields of a user
///
/// PUT /users/update/:id
#[instrument(skip_all)]
pub async fn update_user(
    State(repo): State<SharedUserRepository>,
    Path(id): Path<String>,
    JsonOrEmpty(req): JsonOrEmpty<UpdateUserRequest>,
) -> Result<Envelope<User>, ApiError> {
    let user = repo
        .update(&id, UserChanges::from(req))
        .await?
        .ok_or_else(|| {
            tracing::debug!("User not found: {}", id);
            UserError::NotFound
        })?;

    tracing::info!("User updated: {}", id);

    Ok(Envelope::ok(user))
}

/// Delete a user, responding with the users that remain
///
/// DELETE /users/delete/:id
#[instrument(skip_all)]
pub async fn delete_user(
    State(repo): State<SharedUserRepository>,
    Path(id): Path<String>,
) -> Result<Envelope<Vec<User>>, ApiError> {
    let remaining = repo.remove_and_list(&id).await?.ok_or_else(|| {
        tracing::debug!("User not found: {}", id);
        UserError::NotFound
    })?;

    tracing::info!("User deleted: {}", id);

    Ok(Envelope::ok(remaining).with_message("User deleted successfully"))
}
