// src/handlers/caixa.rs
//
// Movimento do dia: snapshot único por usuário, validado pelas regras de
// fechamento antes de persistir. O registro de cancelamentos vive dentro
// do mesmo snapshot.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::caixa::{CaixaDia, CaixaResponse, Cancelamento, NovoCancelamentoPayload},
};

#[utoipa::path(
    get,
    path = "/api/caixa",
    tag = "Caixa",
    responses((status = 200, description = "Snapshot do dia com totais derivados", body = CaixaResponse)),
    security(("api_jwt" = []))
)]
pub async fn get_caixa(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<Json<CaixaResponse>, AppError> {
    let resposta = app_state.caixa_service.carregar(claims.sub).await?;
    Ok(Json(resposta))
}

#[utoipa::path(
    put,
    path = "/api/caixa",
    tag = "Caixa",
    request_body = CaixaDia,
    responses(
        (status = 200, description = "Snapshot salvo, totais recalculados", body = CaixaResponse),
        (status = 400, description = "Regra de fechamento violada")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_caixa(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(dia): Json<CaixaDia>,
) -> Result<Json<CaixaResponse>, AppError> {
    let resposta = app_state.caixa_service.salvar(claims.sub, dia).await?;
    Ok(Json(resposta))
}

#[utoipa::path(
    delete,
    path = "/api/caixa",
    tag = "Caixa",
    responses((status = 204, description = "Snapshot do dia descartado")),
    security(("api_jwt" = []))
)]
pub async fn clear_caixa(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<StatusCode, AppError> {
    app_state.caixa_service.limpar(claims.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/caixa/cancelamentos",
    tag = "Caixa",
    request_body = NovoCancelamentoPayload,
    responses(
        (status = 201, description = "Cancelamento registrado", body = Cancelamento),
        (status = 400, description = "Campo obrigatório ausente ou valor inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_cancelamento(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<NovoCancelamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let registro = app_state
        .caixa_service
        .adicionar_cancelamento(claims.sub, &claims.username, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(registro)))
}

// Remoção de id inexistente é no-op proposital (o front pode reenviar).
#[utoipa::path(
    delete,
    path = "/api/caixa/cancelamentos/{id}",
    tag = "Caixa",
    params(("id" = i64, Path, description = "Id do cancelamento")),
    responses((status = 204, description = "Removido (ou já ausente)")),
    security(("api_jwt" = []))
)]
pub async fn remove_cancelamento(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state
        .caixa_service
        .remover_cancelamento(claims.sub, &claims.username, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
