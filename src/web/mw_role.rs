// src/web/mw_role.rs
use crate::{
    error::AppError,
    services::authz::{self, Decisao, PAPEIS_COORDENACAO},
    state::AppState,
    web::mw_auth,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

/// Middleware das rotas de cadastro/edição/exclusão: aplica o guarda de
/// autorização com os papéis de coordenação. Não depende de `require_auth`.
pub async fn require_coordenador(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identidade = mw_auth::identidade_da_sessao(&session, &state).await?;

    match authz::autorizar(identidade.as_ref(), PAPEIS_COORDENACAO) {
        Decisao::Permitir => {
            if let Some(identidade) = identidade {
                tracing::debug!("Coordenação MW: Acesso concedido para {}", identidade.user_id);
                request.extensions_mut().insert(identidade);
            }
            Ok(next.run(request).await)
        }
        Decisao::RedirecionarLogin => {
            tracing::debug!("Coordenação MW: Anónimo em {}; redirecionando para login.", request.uri());
            Ok(mw_auth::redirecionar_para_login(&request))
        }
        Decisao::Proibir => {
            tracing::warn!(
                "Coordenação MW: Acesso negado a {:?} em {}.",
                identidade.as_ref().map(|i| i.user_id),
                request.uri()
            );
            Err(AppError::Proibido)
        }
    }
}
