// src/web/periodo_handlers.rs
use crate::{
    error::{AppError, AppResult},
    forms::{periodo::PeriodoForm, ErrosFormulario},
    services::{
        authz::Identidade,
        periodo_service,
        pesquisa::{Pesquisa, PesquisaParams},
    },
    state::AppState,
    templates::{renderizar, Layout, PeriodoFormPage, PeriodosPesquisaPage},
    web::flash,
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

const MENU: &str = "periodos";
const URL_PESQUISA: &str = "/academico/periodos/pesquisar/";

// GET /academico/periodos/pesquisar/ (apenas coordenação)
pub async fn pesquisar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Query(params): Query<PesquisaParams>,
) -> AppResult<impl IntoResponse> {
    let pesquisa = Pesquisa::nova(&params, periodo_service::CAMPOS_ORDENACAO);
    let periodos = periodo_service::pesquisar(&state.db_pool, &pesquisa).await?;

    let template = PeriodosPesquisaPage {
        layout: Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        periodos,
        pesquisa: pesquisa.view(),
    };
    renderizar(&template)
}

fn formulario(layout: Layout, titulo: &str, acao: String, form: PeriodoForm, erros: ErrosFormulario) -> AppResult<Response> {
    let template = PeriodoFormPage {
        layout,
        titulo: titulo.to_string(),
        acao,
        form,
        erros,
    };
    Ok(renderizar(&template)?.into_response())
}

// GET /academico/periodos/cadastrar/
pub async fn show_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<Response> {
    formulario(
        Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        "Cadastrar período letivo",
        "/academico/periodos/cadastrar/".to_string(),
        PeriodoForm::default(),
        ErrosFormulario::new(),
    )
}

// POST /academico/periodos/cadastrar/
pub async fn handle_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Form(form): Form<PeriodoForm>,
) -> AppResult<Response> {
    match form.validar() {
        Ok(dados) => {
            periodo_service::criar(&state.db_pool, &dados).await?;
            flash::sucesso(
                &cookies,
                &state.cookie_key,
                format!("Período letivo {} cadastrado com sucesso!", dados.nome),
            );
            Ok(Redirect::to(URL_PESQUISA).into_response())
        }
        Err(erros) => {
            tracing::warn!("Cadastro de período inválido ({} campos com erro).", erros.len());
            formulario(
                Layout::new(Some(&identidade), None, MENU),
                "Cadastrar período letivo",
                "/academico/periodos/cadastrar/".to_string(),
                form,
                erros,
            )
        }
    }
}

// GET /academico/periodos/editar/{id}/
pub async fn show_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let periodo = periodo_service::buscar(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado(format!("período {}", id)))?;

    formulario(
        Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        "Editar período letivo",
        format!("/academico/periodos/editar/{}/", id),
        PeriodoForm::from(&periodo),
        ErrosFormulario::new(),
    )
}

// POST /academico/periodos/editar/{id}/
pub async fn handle_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
    Form(form): Form<PeriodoForm>,
) -> AppResult<Response> {
    let dados = match form.validar() {
        Ok(dados) => dados,
        Err(erros) => {
            tracing::warn!("Edição do período {} inválida.", id);
            return formulario(
                Layout::new(Some(&identidade), None, MENU),
                "Editar período letivo",
                format!("/academico/periodos/editar/{}/", id),
                form,
                erros,
            );
        }
    };

    if !periodo_service::atualizar(&state.db_pool, id, &dados).await? {
        return Err(AppError::NaoEncontrado(format!("período {}", id)));
    }
    flash::sucesso(&cookies, &state.cookie_key, "Período letivo atualizado com sucesso!");
    Ok(Redirect::to(URL_PESQUISA).into_response())
}
