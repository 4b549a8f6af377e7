use axum::{extract::State, Json};

use service::auth::domain::{AuthUser, TechnologyView};
use service::auth::Principal;

use crate::errors::ApiError;
use crate::security::CurrentUser;
use crate::state::ServerState;

#[utoipa::path(get, path = "/users/me", tag = "users", security(("bearer" = [])),
    responses((status = 200, description = "Profile of the authenticated user", body = crate::openapi::UserProfileDoc), (status = 401, description = "Unauthorized")))]
pub async fn me(State(state): State<ServerState>, CurrentUser(user): CurrentUser) -> Result<Json<AuthUser>, ApiError> {
    let profile = state.users.profile(user.username()).await?;
    Ok(Json(profile))
}

#[utoipa::path(get, path = "/technologies", tag = "users", security(("bearer" = [])),
    responses((status = 200, description = "Known technologies", body = [crate::openapi::TechnologyDoc]), (status = 401, description = "Unauthorized")))]
pub async fn technologies(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> Result<Json<Vec<TechnologyView>>, ApiError> {
    Ok(Json(state.users.technologies().await?))
}
