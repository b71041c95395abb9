// src/handlers/cms.rs

use axum::{extract::State, Json};
use serde_json::json;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{RequireRole, SuperadminOnly},
    models::cms::CmsConfig,
};

// Leitura pública: o site de marketing consome anonimamente.
// Sem configuração salva, devolve um objeto vazio.
#[utoipa::path(
    get,
    path = "/api/cms/config",
    tag = "CMS",
    responses((status = 200, description = "Configuração corrente do site", body = CmsConfig))
)]
pub async fn get_config(
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let config = app_state.cms_repo.get().await?;
    let dados = config.map(|c| c.dados).unwrap_or_else(|| json!({}));
    Ok(Json(dados))
}

// Sobrescrita integral do blob, restrita a superadmin.
#[utoipa::path(
    post,
    path = "/api/cms/config",
    tag = "CMS",
    responses((status = 200, description = "Configuração salva", body = CmsConfig)),
    security(("api_jwt" = []))
)]
pub async fn save_config(
    State(app_state): State<AppState>,
    _gate: RequireRole<SuperadminOnly>,
    Json(dados): Json<serde_json::Value>,
) -> Result<Json<CmsConfig>, AppError> {
    let config = app_state.cms_repo.upsert(&dados).await?;
    Ok(Json(config))
}
