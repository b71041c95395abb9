// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Tenant (o "Estabelecimento")
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,

    #[schema(example = "Loja Centro")]
    pub name: String,

    pub created_at: DateTime<Utc>,
}

// ---
// 2. UserTenant (a "ponte" usuário-estabelecimento)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTenant {
    pub user_id: Uuid,
    pub tenant_id: Uuid,

    // Papel do usuário dentro deste estabelecimento ("dono", "member"...)
    #[schema(example = "dono")]
    pub member_role: String,

    pub created_at: DateTime<Utc>,
}

// ---
// 3. Plan
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,

    #[schema(example = "Mensal PRO")]
    pub name: String,

    #[schema(example = "49.90")]
    pub price: Decimal,

    pub period_days: i32,
    pub created_at: DateTime<Utc>,
}

// ---
// 4. Subscription
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "subscription_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Pending,
    Active,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub plan_id: Uuid,
    pub status: SubscriptionStatus,

    // Id da transação no provedor de pagamento; o webhook PIX casa por ele.
    #[schema(example = "E12345678202508071205abcdef")]
    pub txid: String,

    pub created_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTenantPayload {
    #[validate(length(min = 1, message = "O nome do estabelecimento é obrigatório."))]
    #[schema(example = "Loja Centro")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTenantUserPayload {
    #[validate(length(min = 3, message = "O nome de usuário deve ter no mínimo 3 caracteres."))]
    pub username: String,

    #[schema(example = "member")]
    pub member_role: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionPayload {
    pub plan_id: Uuid,

    #[validate(length(min = 1, message = "O txid da transação é obrigatório."))]
    pub txid: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanPayload {
    #[validate(length(min = 1, message = "O nome do plano é obrigatório."))]
    pub name: String,

    pub price: Decimal,

    #[validate(range(min = 1, message = "O período deve ser de pelo menos 1 dia."))]
    pub period_days: i32,
}

// Corpo do webhook do provedor PIX.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PixWebhookPayload {
    pub txid: String,
}
