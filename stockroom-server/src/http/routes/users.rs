//! User endpoints
//!
//! Responses never carry the password or its hash.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, RecordId};
use crate::http::server::AppState;
use crate::models::patch::{non_null, present};
use crate::models::{
    Email, NewUser, Pagination, PaginationParams, Password, UserName, UserUpdate, ValidationError,
};

/// Create user request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ValidationError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        NewUser::new(&req.name, &req.email, &req.password)
    }
}

/// Partial user update; none of the fields accept null
#[derive(Deserialize, Default)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub password: Option<Option<String>>,
}

impl TryFrom<UpdateUserRequest> for UserUpdate {
    type Error = ValidationError;

    fn try_from(req: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: non_null("name", req.name)?
                .map(|name| UserName::new(&name))
                .transpose()?,
            email: non_null("email", req.email)?
                .map(|email| Email::new(&email))
                .transpose()?,
            password: non_null("password", req.password)?
                .map(|password| Password::new(&password)),
        })
    }
}

/// User response (no password field)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

/// GET /users - list users with pagination
async fn list_users(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let page = Pagination::from(params);
    let users = UserRepo::new(&state.pool).list(page).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /users - create a new user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let new = NewUser::try_from(req)?;
    let user = UserRepo::new(&state.pool).create(new).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /users/{id} - partial update
async fn update_user(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let update = UserUpdate::try_from(req)?;
    let user = UserRepo::new(&state.pool).update(id, update).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{id} - delete a user
async fn delete_user(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    let collection = get(list_users).post(create_user);

    Router::new()
        .route("/users", collection.clone())
        .route("/users/", collection)
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
