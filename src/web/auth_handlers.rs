// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    forms::registro::RegistroForm,
    models::user::LoginForm,
    services::{auth_service, user_service},
    state::AppState,
    templates::{renderizar, Layout, LoginPage, RegistroPage},
    web::{
        flash,
        mw_auth::{self, LOGIN_URL, SESSION_USER_ID},
    },
};
use axum::{
    extract::{Form, Query, State},
    http::Uri,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_cookies::Cookies;
use tower_sessions::Session;

const HOME_URL: &str = "/home/";

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: String,
}

/// Só aceita caminhos locais; `//host`, URLs absolutas e caracteres de
/// controlo (que o browser descarta ou que invalidam o `Location`) voltam
/// para a home.
pub fn destino_seguro(next: &str) -> &str {
    let next = next.trim();
    let local = next.starts_with('/')
        && !next.starts_with("//")
        && next.chars().all(|c| c.is_ascii_graphic() && c != '\\')
        && next
            .parse::<Uri>()
            .is_ok_and(|uri| uri.scheme().is_none() && uri.authority().is_none());
    if local {
        next
    } else {
        HOME_URL
    }
}

// GET /accounts/login/
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
    cookies: Cookies,
    Query(query): Query<NextQuery>,
) -> AppResult<impl IntoResponse> {
    // Já logado: não faz sentido mostrar o formulário
    if mw_auth::identidade_da_sessao(&session, &state).await?.is_some() {
        tracing::debug!("GET login: Utilizador já logado, redirecionando.");
        return Ok(Redirect::to(destino_seguro(&query.next)).into_response());
    }

    let template = LoginPage {
        layout: Layout::new(None, flash::consumir(&cookies, &state.cookie_key), "login"),
        error: None,
        username: String::new(),
        next: query.next,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /accounts/login/
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Tentativa de login para: {}", form.username);

    let Some(user) = auth_service::autenticar(&state.db_pool, form.username.trim(), &form.password).await? else {
        tracing::warn!("Credenciais inválidas para: {}", form.username);
        let template = LoginPage {
            layout: Layout::default(),
            error: Some("Nome de utilizador ou senha inválidos.".to_string()),
            username: form.username,
            next: form.next,
        };
        return Ok(renderizar(&template)?.into_response());
    };

    // Gera novo ID de sessão antes de guardar a identidade
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    session
        .insert(SESSION_USER_ID, user.id)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

    tracing::info!("✅ Login bem-sucedido para: {} ({})", user.username, user.id);
    Ok(Redirect::to(destino_seguro(&form.next)).into_response())
}

// GET|POST /accounts/logout/
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id: Option<i64> = session.get(SESSION_USER_ID).await.ok().flatten();

    // Apaga todos os dados da sessão atual
    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    match user_id {
        Some(id) => tracing::info!("🚪 Utilizador {} desligado.", id),
        None => tracing::info!("🚪 Sessão anónima desligada."),
    }
    Ok(Redirect::to(LOGIN_URL))
}

// GET /user_registration/
pub async fn show_registro_form(State(state): State<AppState>, cookies: Cookies) -> AppResult<impl IntoResponse> {
    let template = RegistroPage {
        layout: Layout::new(None, flash::consumir(&cookies, &state.cookie_key), "registro"),
        form: RegistroForm::default(),
        erros: Default::default(),
    };
    renderizar(&template)
}

// POST /user_registration/
pub async fn handle_registro(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RegistroForm>,
) -> AppResult<impl IntoResponse> {
    let novo = match form.validar() {
        Ok(novo) => novo,
        Err(erros) => {
            tracing::warn!("Registo inválido ({} campos com erro).", erros.len());
            let template = RegistroPage {
                layout: Layout::default(),
                form: form.sem_senhas(),
                erros,
            };
            return Ok(renderizar(&template)?.into_response());
        }
    };

    if user_service::username_existe(&state.db_pool, &novo.username).await? {
        tracing::warn!("Registo recusado: username '{}' já existe.", novo.username);
        let mut erros = crate::forms::ErrosFormulario::new();
        erros.add("username", "Já existe um utilizador com este nome.");
        let template = RegistroPage {
            layout: Layout::default(),
            form: form.sem_senhas(),
            erros,
        };
        return Ok(renderizar(&template)?.into_response());
    }

    user_service::criar_usuario(&state.db_pool, &novo, state.bcrypt_cost).await?;
    flash::sucesso(&cookies, &state.cookie_key, "Conta criada com sucesso! Faça login para continuar.");
    Ok(Redirect::to(LOGIN_URL).into_response())
}
