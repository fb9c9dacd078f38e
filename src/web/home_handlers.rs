// src/web/home_handlers.rs
use crate::{
    error::AppResult,
    services::authz::Identidade,
    state::AppState,
    templates::{renderizar, HomePage, Layout},
    web::flash,
};
use axum::{
    extract::{Extension, State},
    response::IntoResponse,
};
use tower_cookies::Cookies;

// GET /home/ (protegido por require_auth)
pub async fn home_page_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!("GET /home/: Acesso para {}", identidade.user_id);

    let template = HomePage {
        layout: Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), "home"),
    };
    renderizar(&template)
}
