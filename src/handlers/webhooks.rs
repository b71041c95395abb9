// src/handlers/webhooks.rs

use axum::{extract::State, Json};
use serde_json::json;

use crate::{common::error::AppError, config::AppState, models::tenancy::PixWebhookPayload};

// Confirmação de pagamento do provedor PIX. Sempre responde {"ok": true}:
// txid desconhecido é um no-op (o provedor reenvia com semântica
// at-least-once e não há fila de retry do nosso lado).
#[utoipa::path(
    post,
    path = "/webhooks/pix",
    tag = "Webhooks",
    request_body = PixWebhookPayload,
    responses((status = 200, description = "Sempre ok, com ou sem assinatura correspondente"))
)]
pub async fn pix_webhook(
    State(app_state): State<AppState>,
    Json(payload): Json<PixWebhookPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    app_state
        .tenancy_service
        .confirmar_pagamento_pix(&payload.txid)
        .await?;

    Ok(Json(json!({ "ok": true })))
}
