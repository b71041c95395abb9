// src/models/cms.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Blob livre de configuração do site; o backend não interpreta o conteúdo.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CmsConfig {
    #[schema(value_type = Object)]
    pub dados: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
