// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        aluno_handlers, auth_handlers, curso_handlers, disciplina_handlers, home_handlers, mw_auth, mw_role,
        periodo_handlers, turma_handlers, voluntario_handlers,
    },
};
use axum::{
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/", get(|| async { Redirect::to(mw_auth::LOGIN_URL) }))
        .route(
            "/accounts/login/",
            get(auth_handlers::show_login_form).post(auth_handlers::handle_login),
        )
        .route(
            "/accounts/logout/",
            get(auth_handlers::handle_logout).post(auth_handlers::handle_logout),
        )
        .route(
            "/user_registration/",
            get(auth_handlers::show_registro_form).post(auth_handlers::handle_registro),
        );

    // --- Rotas de Coordenação ---
    // Cadastro, edição e exclusão: passam pelo guarda de autorização
    let coordenacao_routes = Router::new()
        // Alunos
        .route(
            "/academico/alunos/cadastrar/",
            get(aluno_handlers::show_cadastrar).post(aluno_handlers::handle_cadastrar),
        )
        .route(
            "/academico/alunos/editar/{id}/",
            get(aluno_handlers::show_editar).post(aluno_handlers::handle_editar),
        )
        .route("/academico/alunos/detalhes/{id}/", get(aluno_handlers::show_detalhes))
        // Disciplinas
        .route(
            "/academico/disciplinas/cadastrar/",
            get(disciplina_handlers::show_cadastrar).post(disciplina_handlers::handle_cadastrar),
        )
        .route(
            "/academico/disciplinas/editar/{id}/",
            get(disciplina_handlers::show_editar).post(disciplina_handlers::handle_editar),
        )
        .route("/academico/disciplinas/excluir/", post(disciplina_handlers::handle_excluir_lote))
        .route("/academico/disciplinas/excluir/{id}/", post(disciplina_handlers::handle_excluir))
        // Períodos letivos (inclusive a pesquisa)
        .route("/academico/periodos/pesquisar/", get(periodo_handlers::pesquisar))
        .route(
            "/academico/periodos/cadastrar/",
            get(periodo_handlers::show_cadastrar).post(periodo_handlers::handle_cadastrar),
        )
        .route(
            "/academico/periodos/editar/{id}/",
            get(periodo_handlers::show_editar).post(periodo_handlers::handle_editar),
        )
        // Turmas e vínculos
        .route(
            "/academico/turmas/cadastrar/",
            get(turma_handlers::show_cadastrar).post(turma_handlers::handle_cadastrar),
        )
        .route(
            "/academico/turmas/editar/{id}/",
            get(turma_handlers::show_editar).post(turma_handlers::handle_editar),
        )
        .route("/academico/turmas/detalhes/{id}/", get(turma_handlers::show_detalhes))
        .route("/academico/turmas/{id}/disciplinas/", post(turma_handlers::handle_vincular_disciplina))
        .route("/academico/turmas/{id}/alunos/", post(turma_handlers::handle_matricular_aluno))
        .route("/academico/turmas/{id}/professores/", post(turma_handlers::handle_atribuir_professor))
        .route("/academico/vinculos/{tipo}/{id}/status/", post(turma_handlers::handle_alternar_status))
        // Voluntários
        .route(
            "/academico/voluntarios/cadastrar/",
            get(voluntario_handlers::show_cadastrar).post(voluntario_handlers::handle_cadastrar),
        )
        .route(
            "/academico/voluntarios/editar/{id}/",
            get(voluntario_handlers::show_editar).post(voluntario_handlers::handle_editar),
        )
        // Cursos
        .route(
            "/academico/cursos/cadastrar/",
            get(curso_handlers::show_cadastrar).post(curso_handlers::handle_cadastrar),
        )
        .route(
            "/academico/cursos/editar/{id}/",
            get(curso_handlers::show_editar).post(curso_handlers::handle_editar),
        )
        .route("/academico/cursos/excluir/", post(curso_handlers::handle_excluir_lote))
        .route("/academico/cursos/excluir/{id}/", post(curso_handlers::handle_excluir))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_role::require_coordenador,
        ));

    // --- Rotas Autenticadas ---
    // Pesquisas: exigem apenas login; o escopo por papel é aplicado na consulta
    let authenticated_routes = Router::new()
        .route("/home/", get(home_handlers::home_page_handler))
        .route("/academico/alunos/pesquisar/", get(aluno_handlers::pesquisar))
        .route("/academico/disciplinas/pesquisar/", get(disciplina_handlers::pesquisar))
        .route("/academico/turmas/pesquisar/", get(turma_handlers::pesquisar))
        .route("/academico/voluntarios/pesquisar/", get(voluntario_handlers::pesquisar))
        .route("/academico/cursos/pesquisar/", get(curso_handlers::pesquisar))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    // --- Router Final ---
    Router::new()
        .merge(public_routes)
        .merge(coordenacao_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}

/// Router completo com as camadas de trace, cookies e sessão.
pub fn create_app<S>(app_state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CookieManagerLayer::new())
            .layer(session_layer),
    )
}
