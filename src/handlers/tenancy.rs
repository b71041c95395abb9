// src/handlers/tenancy.rs

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
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, SuperadminOnly},
    },
    models::tenancy::{
        AddTenantUserPayload, CreatePlanPayload, CreateSubscriptionPayload, CreateTenantPayload,
        Plan, Subscription, Tenant, UserTenant,
    },
};

#[utoipa::path(
    post,
    path = "/api/tenants",
    tag = "Tenancy",
    request_body = CreateTenantPayload,
    responses((status = 201, description = "Estabelecimento criado com o dono", body = Tenant)),
    security(("api_jwt" = []))
)]
pub async fn create_tenant(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateTenantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state
        .tenancy_service
        .criar_tenant_com_dono(&payload.name, claims.sub)
        .await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

#[utoipa::path(
    get,
    path = "/api/tenants",
    tag = "Tenancy",
    responses((status = 200, description = "Estabelecimentos do usuário logado", body = [Tenant])),
    security(("api_jwt" = []))
)]
pub async fn list_tenants(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<Json<Vec<Tenant>>, AppError> {
    let tenants = app_state.tenancy_service.listar_do_usuario(claims.sub).await?;
    Ok(Json(tenants))
}

#[utoipa::path(
    post,
    path = "/api/tenants/{id}/users",
    tag = "Tenancy",
    params(("id" = Uuid, Path, description = "ID do estabelecimento")),
    request_body = AddTenantUserPayload,
    responses(
        (status = 201, description = "Usuário vinculado", body = UserTenant),
        (status = 404, description = "Estabelecimento ou usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_tenant_user(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddTenantUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let member = app_state
        .tenancy_service
        .adicionar_usuario(id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    post,
    path = "/api/tenants/{id}/subscriptions",
    tag = "Tenancy",
    params(("id" = Uuid, Path, description = "ID do estabelecimento")),
    request_body = CreateSubscriptionPayload,
    responses((status = 201, description = "Assinatura pendente criada", body = Subscription)),
    security(("api_jwt" = []))
)]
pub async fn create_subscription(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateSubscriptionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let subscription = app_state
        .tenancy_service
        .criar_assinatura(id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

#[utoipa::path(
    post,
    path = "/api/plans",
    tag = "Tenancy",
    request_body = CreatePlanPayload,
    responses((status = 201, description = "Plano criado", body = Plan)),
    security(("api_jwt" = []))
)]
pub async fn create_plan(
    State(app_state): State<AppState>,
    _gate: RequireRole<SuperadminOnly>,
    Json(payload): Json<CreatePlanPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let plan = app_state.tenancy_service.criar_plano(&payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}
