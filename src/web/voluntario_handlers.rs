// src/web/voluntario_handlers.rs
use crate::{
    error::{AppError, AppResult},
    forms::{
        voluntario::{DadosVoluntario, VoluntarioForm},
        ErrosFormulario,
    },
    models::voluntario::{StatusProcesso, TipoVoluntario},
    services::{
        authz::Identidade,
        pesquisa::{Pesquisa, PesquisaParams},
        user_service, voluntario_service,
    },
    state::AppState,
    templates::{renderizar, Layout, VoluntarioFormPage, VoluntariosPesquisaPage},
    web::flash,
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

const MENU: &str = "voluntarios";
const URL_PESQUISA: &str = "/academico/voluntarios/pesquisar/";

// GET /academico/voluntarios/pesquisar/
pub async fn pesquisar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Query(params): Query<PesquisaParams>,
) -> AppResult<impl IntoResponse> {
    let pesquisa = Pesquisa::nova(&params, voluntario_service::CAMPOS_ORDENACAO);
    let voluntarios = voluntario_service::pesquisar(&state.db_pool, &pesquisa).await?;

    let template = VoluntariosPesquisaPage {
        layout: Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        voluntarios,
        pesquisa: pesquisa.view(),
    };
    renderizar(&template)
}

async fn formulario(
    state: &AppState,
    layout: Layout,
    titulo: &str,
    acao: String,
    form: VoluntarioForm,
    erros: ErrosFormulario,
) -> AppResult<Response> {
    let template = VoluntarioFormPage {
        layout,
        titulo: titulo.to_string(),
        acao,
        form,
        erros,
        usuarios: user_service::listar_opcoes(&state.db_pool).await?,
        tipos: TipoVoluntario::TODOS,
        status_opcoes: StatusProcesso::TODOS,
    };
    Ok(renderizar(&template)?.into_response())
}

async fn validar(state: &AppState, form: &VoluntarioForm) -> AppResult<Result<DadosVoluntario, ErrosFormulario>> {
    let dados = match form.validar() {
        Ok(dados) => dados,
        Err(erros) => return Ok(Err(erros)),
    };
    let mut erros = ErrosFormulario::new();
    if user_service::find_user_by_id(&state.db_pool, dados.user_id).await?.is_none() {
        erros.add("user_id", "Utilizador inexistente.");
    }
    Ok(erros.ou(dados))
}

fn ja_voluntario() -> ErrosFormulario {
    let mut erros = ErrosFormulario::new();
    erros.add("user_id", "Este utilizador já está registado como voluntário.");
    erros
}

// GET /academico/voluntarios/cadastrar/
pub async fn show_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<Response> {
    let layout = Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU);
    formulario(
        &state,
        layout,
        "Cadastrar voluntário",
        "/academico/voluntarios/cadastrar/".to_string(),
        VoluntarioForm::default(),
        ErrosFormulario::new(),
    )
    .await
}

// POST /academico/voluntarios/cadastrar/
pub async fn handle_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Form(form): Form<VoluntarioForm>,
) -> AppResult<Response> {
    let acao = "/academico/voluntarios/cadastrar/".to_string();
    let layout = Layout::new(Some(&identidade), None, MENU);

    let dados = match validar(&state, &form).await? {
        Ok(dados) => dados,
        Err(erros) => {
            tracing::warn!("Cadastro de voluntário inválido ({} campos com erro).", erros.len());
            return formulario(&state, layout, "Cadastrar voluntário", acao, form, erros).await;
        }
    };

    match voluntario_service::criar(&state.db_pool, &dados).await {
        Ok(_) => {
            flash::sucesso(&cookies, &state.cookie_key, "Voluntário cadastrado com sucesso!");
            Ok(Redirect::to(URL_PESQUISA).into_response())
        }
        Err(e) if e.is_violacao_unica() => {
            tracing::warn!("Utilizador {} já é voluntário.", dados.user_id);
            formulario(&state, layout, "Cadastrar voluntário", acao, form, ja_voluntario()).await
        }
        Err(e) => Err(e),
    }
}

// GET /academico/voluntarios/editar/{id}/
pub async fn show_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let voluntario = voluntario_service::buscar(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado(format!("voluntário {}", id)))?;

    let layout = Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU);
    formulario(
        &state,
        layout,
        "Editar voluntário",
        format!("/academico/voluntarios/editar/{}/", id),
        VoluntarioForm::from(&voluntario),
        ErrosFormulario::new(),
    )
    .await
}

// POST /academico/voluntarios/editar/{id}/
pub async fn handle_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
    Form(form): Form<VoluntarioForm>,
) -> AppResult<Response> {
    let acao = format!("/academico/voluntarios/editar/{}/", id);
    let layout = Layout::new(Some(&identidade), None, MENU);

    let dados = match validar(&state, &form).await? {
        Ok(dados) => dados,
        Err(erros) => {
            tracing::warn!("Edição do voluntário {} inválida.", id);
            return formulario(&state, layout, "Editar voluntário", acao, form, erros).await;
        }
    };

    match voluntario_service::atualizar(&state.db_pool, id, &dados).await {
        Ok(true) => {
            flash::sucesso(&cookies, &state.cookie_key, "Voluntário atualizado com sucesso!");
            Ok(Redirect::to(URL_PESQUISA).into_response())
        }
        Ok(false) => Err(AppError::NaoEncontrado(format!("voluntário {}", id))),
        Err(e) if e.is_violacao_unica() => {
            formulario(&state, layout, "Editar voluntário", acao, form, ja_voluntario()).await
        }
        Err(e) => Err(e),
    }
}
