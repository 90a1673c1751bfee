// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// O tipo de erro único da aplicação, com `thiserror` para a ergonomia das conversões.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // Conta válida, mas sem perfil cadastrado pelo dono
    #[error("Conta aguardando aprovação")]
    AccountPendingApproval,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    // Falha ao consultar o perfil. Diferente de "não encontrado".
    #[error("Falha na busca do perfil: {0}")]
    ProfileLookupFailed(String),

    #[error("Status de pedido inválido: {0}")]
    InvalidOrderStatus(String),

    #[error("Categoria de ração desconhecida: {0}")]
    UnknownFeedCategory(String),

    #[error("Escopo de meta inválido: {0}")]
    InvalidTargetScope(String),

    #[error("Mês inválido: {0}")]
    InvalidMonth(String),

    #[error("Estoque insuficiente para {0}")]
    InsufficientStock(String),

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

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidTargetScope(_)
            | AppError::InvalidMonth(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidOrderStatus(_)
            | AppError::UnknownFeedCategory(_)
            | AppError::InsufficientStock(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AccountPendingApproval | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ProfileLookupFailed(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
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
                return (status, body).into_response();
            }
            AppError::EmailAlreadyExists => "Este e-mail já está em uso.".to_string(),
            AppError::InvalidCredentials => "E-mail ou senha inválidos.".to_string(),
            AppError::InvalidToken => "Token de autenticação inválido ou ausente.".to_string(),
            AppError::AccountPendingApproval => {
                "Sua conta ainda não foi aprovada pelo administrador.".to_string()
            }
            ref e @ (AppError::Forbidden(_)
            | AppError::ResourceNotFound(_)
            | AppError::InvalidOrderStatus(_)
            | AppError::UnknownFeedCategory(_)
            | AppError::InvalidTargetScope(_)
            | AppError::InvalidMonth(_)
            | AppError::InsufficientStock(_)) => e.to_string(),

            // Todo o resto vira 500. O detalhe fica só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
