use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Os controllers nunca engolem erros: tudo desce até aqui e vira o
// envelope JSON padrão { success, error, details }.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Cliente inexistente (violação de chave estrangeira)")]
    CustomerNotFound,

    #[error("Saldo insuficiente: disponível {available}, solicitado {requested}")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Pedido não quitado: faltam {remaining}")]
    OrderNotFullyPaid { remaining: Decimal },

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Conflito de chave única: {0}")]
    Conflict(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut fields = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    fields.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "success": false,
                    "error": "One or more fields are invalid",
                    "details": fields,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CustomerNotFound => (
                StatusCode::BAD_REQUEST,
                "Customer not found. Please select a valid customer".to_string(),
                None,
            ),
            AppError::InsufficientBalance {
                available,
                requested,
            } => (
                StatusCode::BAD_REQUEST,
                "Insufficient balance for this collection".to_string(),
                Some(json!({
                    "available_balance": available,
                    "requested_amount": requested,
                })),
            ),
            AppError::OrderNotFullyPaid { remaining } => (
                StatusCode::BAD_REQUEST,
                "Order cannot be shipped before it is fully paid".to_string(),
                Some(json!({ "remaining_amount": remaining })),
            ),
            AppError::ResourceNotFound(what) => (
                StatusCode::NOT_FOUND,
                format!("{} not found", what),
                None,
            ),
            AppError::Conflict(what) => (StatusCode::CONFLICT, what, None),
            AppError::EmailAlreadyExists => (
                StatusCode::CONFLICT,
                "This email is already in use".to_string(),
                None,
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
                None,
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authentication token".to_string(),
                None,
            ),
            AppError::UserNotFound => (
                StatusCode::NOT_FOUND,
                "User not found".to_string(),
                None,
            ),

            // Todos os outros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        let body = match details {
            Some(details) => Json(json!({
                "success": false,
                "error": error_message,
                "details": details,
            })),
            None => Json(json!({ "success": false, "error": error_message })),
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn saldo_insuficiente_vira_400_com_os_dois_valores() {
        let err = AppError::InsufficientBalance {
            available: dec!(100.00),
            requested: dec!(250.00),
        };
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn recurso_nao_encontrado_vira_404() {
        let err = AppError::ResourceNotFound("Order".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
