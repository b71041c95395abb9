use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Falhas das regras de fechamento do caixa (soma dos itens x agregado).
    // Sempre uma única mensagem legível, nunca um save parcial.
    #[error("Fechamento de caixa inválido: {0}")]
    CaixaInvalido(String),

    #[error("Cancelamento inválido: {0}")]
    CancelamentoInvalido(String),

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Permissão insuficiente")]
    InsufficientRole,

    #[error("Chave de ativação incorreta")]
    WrongActivationKey,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Licença não encontrada")]
    LicenseNotFound,

    #[error("Estabelecimento não encontrado")]
    TenantNotFound,

    #[error("Plano não encontrado")]
    PlanNotFound,

    #[error("Nota fiscal não encontrada")]
    NotaNotFound,

    #[error("Cadastro pendente não encontrado")]
    PendingUserNotFound,

    #[error("Violação de chave única: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Mensagem única, vinda direto dos validadores do caixa.
            AppError::CaixaInvalido(msg) | AppError::CancelamentoInvalido(msg) => {
                let body = Json(json!({ "error": msg }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::UsernameAlreadyExists => {
                (StatusCode::CONFLICT, "Este nome de usuário já está em uso.")
            }
            AppError::UniqueConstraintViolation(_) => {
                (StatusCode::CONFLICT, "Registro duplicado.")
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos.")
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::InsufficientRole => (
                StatusCode::FORBIDDEN,
                "Você não tem permissão para realizar esta ação.",
            ),
            AppError::WrongActivationKey => {
                (StatusCode::FORBIDDEN, "Chave de ativação incorreta.")
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::LicenseNotFound => (StatusCode::NOT_FOUND, "Licença não encontrada."),
            AppError::TenantNotFound => {
                (StatusCode::NOT_FOUND, "Estabelecimento não encontrado.")
            }
            AppError::PlanNotFound => (StatusCode::NOT_FOUND, "Plano não encontrado."),
            AppError::NotaNotFound => (StatusCode::NOT_FOUND, "Nota fiscal não encontrada."),
            AppError::PendingUserNotFound => {
                (StatusCode::NOT_FOUND, "Cadastro pendente não encontrado.")
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe só o genérico.
            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.",
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
