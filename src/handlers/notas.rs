// src/handlers/notas.rs

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
    middleware::auth::AuthenticatedUser,
    models::notas::{CreateNotaPayload, NotaFiscalDetalhe, NotasStats, ParcelaNota},
};

#[utoipa::path(
    get,
    path = "/api/notas",
    tag = "Notas",
    responses((status = 200, description = "Notas do usuário com status derivado", body = [NotaFiscalDetalhe])),
    security(("api_jwt" = []))
)]
pub async fn list_notas(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<Json<Vec<NotaFiscalDetalhe>>, AppError> {
    let notas = app_state.nota_service.listar(claims.sub).await?;
    Ok(Json(notas))
}

#[utoipa::path(
    post,
    path = "/api/notas",
    tag = "Notas",
    request_body = CreateNotaPayload,
    responses((status = 201, description = "Nota criada com as parcelas", body = NotaFiscalDetalhe)),
    security(("api_jwt" = []))
)]
pub async fn create_nota(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateNotaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let nota = app_state.nota_service.criar(claims.sub, &payload).await?;
    Ok((StatusCode::CREATED, Json(nota)))
}

#[utoipa::path(
    get,
    path = "/api/notas/stats",
    tag = "Notas",
    responses((status = 200, description = "Estatísticas recomputadas", body = NotasStats)),
    security(("api_jwt" = []))
)]
pub async fn notas_stats(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<Json<NotasStats>, AppError> {
    let stats = app_state.nota_service.stats(claims.sub).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    post,
    path = "/api/notas/{id}/parcelas/{numero}/pagar",
    tag = "Notas",
    params(
        ("id" = Uuid, Path, description = "ID da nota"),
        ("numero" = i32, Path, description = "Número da parcela")
    ),
    responses(
        (status = 200, description = "Parcela quitada", body = ParcelaNota),
        (status = 404, description = "Nota ou parcela não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn pagar_parcela(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, numero)): Path<(Uuid, i32)>,
) -> Result<Json<ParcelaNota>, AppError> {
    let parcela = app_state
        .nota_service
        .pagar_parcela(claims.sub, id, numero)
        .await?;
    Ok(Json(parcela))
}

#[utoipa::path(
    delete,
    path = "/api/notas/{id}",
    tag = "Notas",
    params(("id" = Uuid, Path, description = "ID da nota")),
    responses((status = 204, description = "Nota removida")),
    security(("api_jwt" = []))
)]
pub async fn delete_nota(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.nota_service.remover(claims.sub, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
