// src/models/licensing.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Transições permitidas:
//   trial -> active  (chave correta)
//   trial -> blocked (trial expirado, checado de forma preguiçosa no "ensure")
//   blocked -> active (chave correta)
//   active -> blocked (bloqueio manual, gera chave nova)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "license_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Trial,
    Active,
    Blocked,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: LicenseStatus,

    pub trial_start: DateTime<Utc>,
    pub trial_days: i32,

    // Segredo exigido para reativar uma licença bloqueada.
    // Visível apenas nas rotas administrativas.
    #[schema(example = "A7K2MQ9XPL4Z")]
    pub activation_key: Option<String>,

    pub activated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivateLicensePayload {
    #[schema(example = "A7K2MQ9XPL4Z")]
    pub key: String,

    // Validade absoluta opcional, em dias a partir da ativação.
    pub validity_days: Option<i64>,
}
