// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Erro ao renderizar template: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Erro ao processar senha")]
    PasswordHashingError,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    // Registo inexistente (ex: /academico/alunos/editar/999/)
    #[error("Não encontrado: {0}")]
    NaoEncontrado(String),

    // Identidade autenticada mas sem o papel exigido
    #[error("Acesso proibido")]
    Proibido,

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl AppError {
    /// Violação de UNIQUE (ex: username repetido, aluno já matriculado na turma).
    pub fn is_violacao_unica(&self) -> bool {
        matches!(self, AppError::SqlxError(sqlx::Error::Database(e)) if e.is_unique_violation())
    }

    /// Violação de chave estrangeira (ex: excluir um curso que ainda tem turmas).
    pub fn is_violacao_fk(&self) -> bool {
        matches!(self, AppError::SqlxError(sqlx::Error::Database(e)) if e.is_foreign_key_violation())
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Negações e 404 são esperados; só as falhas de infraestrutura são erros
        match &self {
            AppError::Proibido | AppError::NaoEncontrado(_) => {
                tracing::warn!("Pedido recusado: {}", self)
            }
            _ => tracing::error!("Erro processado: {:?}", self),
        }

        let (status, user_message) = match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.")
            }
            AppError::EnvVarError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.")
            }
            AppError::TemplateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao carregar a página.")
            }
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar credenciais.")
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.")
            }
            AppError::NaoEncontrado(_) => (StatusCode::NOT_FOUND, "Registo não encontrado."),
            AppError::Proibido => (
                StatusCode::FORBIDDEN,
                "Não tem permissão para aceder a esta página.",
            ),
            AppError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Voltar</a></body></html>
         "#, status_code=status.as_u16(), message=user_message))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
