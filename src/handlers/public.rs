// src/handlers/public.rs
//
// Rotas sem autenticação: captação de leads, registro pendente de
// aprovação, usuário de demonstração e pedidos de reset. As rotas
// administrativas correspondentes (listagem e aprovação) ficam aqui
// também, gated por admin.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AdminOnly, RequireRole},
    models::{
        auth::User,
        leads::{
            DemoUserResponse, Lead, NovoLeadPayload, PendingUser, RegisterPayload, ResetKind,
            ResetPayload, ResetRequest,
        },
    },
};

#[utoipa::path(
    post,
    path = "/api/public/register",
    tag = "Public",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Cadastro registrado, aguardando aprovação", body = PendingUser),
        (status = 409, description = "Nome de usuário já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let pendente = app_state.lead_service.registrar_pendente(&payload).await?;
    Ok((StatusCode::CREATED, Json(pendente)))
}

#[utoipa::path(
    post,
    path = "/api/public/demo-user",
    tag = "Public",
    responses((status = 201, description = "Usuário de demonstração criado", body = DemoUserResponse))
)]
pub async fn demo_user(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let credenciais = app_state.lead_service.criar_usuario_demo().await?;
    Ok((StatusCode::CREATED, Json(credenciais)))
}

#[utoipa::path(
    post,
    path = "/api/public/leads",
    tag = "Public",
    request_body = NovoLeadPayload,
    responses((status = 201, description = "Lead registrado", body = Lead))
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<NovoLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let lead = app_state.lead_service.registrar_lead(&payload).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

#[utoipa::path(
    post,
    path = "/api/public/reset-password",
    tag = "Public",
    request_body = ResetPayload,
    responses(
        (status = 201, description = "Pedido registrado", body = ResetRequest),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ResetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let request = app_state
        .lead_service
        .solicitar_reset(ResetKind::Password, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    post,
    path = "/api/public/reset-username",
    tag = "Public",
    request_body = ResetPayload,
    responses(
        (status = 201, description = "Pedido registrado", body = ResetRequest),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn reset_username(
    State(app_state): State<AppState>,
    Json(payload): Json<ResetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let request = app_state
        .lead_service
        .solicitar_reset(ResetKind::Username, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

// --- Rotas administrativas ---

#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Public",
    responses((status = 200, description = "Leads capturados", body = [Lead])),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    _gate: RequireRole<AdminOnly>,
) -> Result<Json<Vec<Lead>>, AppError> {
    let leads = app_state.lead_service.listar_leads().await?;
    Ok(Json(leads))
}

#[utoipa::path(
    get,
    path = "/api/admin/pending-users",
    tag = "Public",
    responses((status = 200, description = "Cadastros aguardando aprovação", body = [PendingUser])),
    security(("api_jwt" = []))
)]
pub async fn list_pending_users(
    State(app_state): State<AppState>,
    _gate: RequireRole<AdminOnly>,
) -> Result<Json<Vec<PendingUser>>, AppError> {
    let pendentes = app_state.lead_service.listar_pendentes().await?;
    Ok(Json(pendentes))
}

#[utoipa::path(
    post,
    path = "/api/admin/pending-users/{id}/approve",
    tag = "Public",
    params(("id" = Uuid, Path, description = "ID do cadastro pendente")),
    responses(
        (status = 201, description = "Usuário criado com licença trial", body = User),
        (status = 404, description = "Cadastro pendente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_pending_user(
    State(app_state): State<AppState>,
    _gate: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.lead_service.aprovar_pendente(id).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
