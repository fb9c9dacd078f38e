// src/web/mw_auth.rs
use crate::{
    error::{AppError, AppResult},
    services::{auth_service, authz::Identidade},
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

pub const LOGIN_URL: &str = "/accounts/login/";
pub const SESSION_USER_ID: &str = "user_id";

/// Lê o `user_id` da sessão e carrega a identidade. `None` = anónimo.
pub async fn identidade_da_sessao(session: &Session, state: &AppState) -> AppResult<Option<Identidade>> {
    let user_id = session
        .get::<i64>(SESSION_USER_ID)
        .await
        .map_err(|e| AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let identidade = auth_service::carregar_identidade(&state.db_pool, user_id).await?;
    if identidade.is_none() {
        // Utilizador apagado depois do login: a sessão deixa de valer
        tracing::warn!("Sessão aponta para user_id {} inexistente; limpando sessão.", user_id);
        session
            .flush()
            .await
            .map_err(|e| AppError::SessionError(format!("Falha ao limpar sessão: {}", e)))?;
    }
    Ok(identidade)
}

/// Redireciona para o login guardando o caminho pedido em `?next=`.
pub fn redirecionar_para_login(request: &Request) -> Response {
    let destino = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/home/");
    let url = format!("{}?next={}", LOGIN_URL, urlencoding::encode(destino));
    Redirect::to(&url).into_response()
}

// Middleware que verifica se o utilizador está logado
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match identidade_da_sessao(&session, &state).await? {
        Some(identidade) => {
            tracing::debug!(
                "Autenticação MW: Utilizador {} autenticado. Prosseguindo...",
                identidade.user_id
            );
            // Os handlers protegidos obtêm a identidade via Extension<Identidade>
            request.extensions_mut().insert(identidade);
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!("Autenticação MW: Não autenticado. Redirecionando para {}", LOGIN_URL);
            Ok(redirecionar_para_login(&request))
        }
    }
}
