// src/models/leads.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,

    #[schema(example = "João da Silva")]
    pub nome: String,

    #[schema(example = "+5511999990000")]
    pub telefone: String,

    #[schema(example = "instagram")]
    pub origem: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Cadastro público aguardando aprovação de um admin.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingUser {
    pub id: Uuid,
    pub username: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reset_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResetKind {
    Password,
    Username,
}

// Pedido de reset registrado para tratamento manual pelo admin.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    pub id: Uuid,
    pub kind: ResetKind,
    pub username: String,
    pub telefone: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Payloads públicos ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NovoLeadPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    #[validate(length(min = 8, message = "O telefone é obrigatório."))]
    pub telefone: String,

    pub origem: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterPayload {
    #[validate(length(min = 3, message = "O nome de usuário deve ter no mínimo 3 caracteres."))]
    pub username: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPayload {
    #[validate(length(min = 3, message = "O nome de usuário deve ter no mínimo 3 caracteres."))]
    pub username: String,

    pub telefone: Option<String>,
}

// Credenciais geradas para o usuário de demonstração.
#[derive(Debug, Serialize, ToSchema)]
pub struct DemoUserResponse {
    pub username: String,
    pub password: String,
}
