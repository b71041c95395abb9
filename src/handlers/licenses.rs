// src/handlers/licenses.rs
//
// Rotas administrativas de licença (por username) e as rotas "self" que o
// aplicativo chama para o próprio usuário logado.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, RequireRole},
    },
    models::licensing::{ActivateLicensePayload, License},
};

#[utoipa::path(
    get,
    path = "/api/licenses/{username}",
    tag = "Licenses",
    params(("username" = String, Path, description = "Usuário dono da licença")),
    responses(
        (status = 200, description = "Licença do usuário", body = License),
        (status = 404, description = "Usuário ou licença não encontrados")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_license(
    State(app_state): State<AppState>,
    _gate: RequireRole<AdminOnly>,
    Path(username): Path<String>,
) -> Result<Json<License>, AppError> {
    let license = app_state.license_service.get_by_username(&username).await?;
    Ok(Json(license))
}

#[utoipa::path(
    post,
    path = "/api/licenses/{username}/activate",
    tag = "Licenses",
    params(("username" = String, Path, description = "Usuário dono da licença")),
    request_body = ActivateLicensePayload,
    responses(
        (status = 200, description = "Licença ativada", body = License),
        (status = 403, description = "Chave de ativação incorreta")
    ),
    security(("api_jwt" = []))
)]
pub async fn activate_license(
    State(app_state): State<AppState>,
    _gate: RequireRole<AdminOnly>,
    Path(username): Path<String>,
    Json(payload): Json<ActivateLicensePayload>,
) -> Result<Json<License>, AppError> {
    let license = app_state
        .license_service
        .activate(&username, &payload.key, payload.validity_days)
        .await?;
    Ok(Json(license))
}

#[utoipa::path(
    post,
    path = "/api/licenses/{username}/block",
    tag = "Licenses",
    params(("username" = String, Path, description = "Usuário dono da licença")),
    responses((status = 200, description = "Licença bloqueada, nova chave emitida", body = License)),
    security(("api_jwt" = []))
)]
pub async fn block_license(
    State(app_state): State<AppState>,
    _gate: RequireRole<AdminOnly>,
    Path(username): Path<String>,
) -> Result<Json<License>, AppError> {
    let license = app_state.license_service.block(&username).await?;
    Ok(Json(license))
}

// A checagem de trial expirado acontece aqui, de forma preguiçosa, a cada
// chamada do aplicativo. A chave nunca é exposta nas rotas "self".
#[utoipa::path(
    post,
    path = "/api/self/license/ensure",
    tag = "Licenses",
    responses((status = 200, description = "Licença corrente do usuário logado", body = License)),
    security(("api_jwt" = []))
)]
pub async fn ensure_self_license(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<Json<License>, AppError> {
    let mut license = app_state.license_service.ensure_for_user(claims.sub).await?;
    license.activation_key = None;
    Ok(Json(license))
}

#[utoipa::path(
    post,
    path = "/api/self/license/activate",
    tag = "Licenses",
    request_body = ActivateLicensePayload,
    responses(
        (status = 200, description = "Licença ativada", body = License),
        (status = 403, description = "Chave de ativação incorreta")
    ),
    security(("api_jwt" = []))
)]
pub async fn activate_self_license(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<ActivateLicensePayload>,
) -> Result<Json<License>, AppError> {
    let mut license = app_state
        .license_service
        .activate_self(claims.sub, &payload.key, payload.validity_days)
        .await?;
    license.activation_key = None;
    Ok(Json(license))
}
