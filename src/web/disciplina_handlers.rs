// src/web/disciplina_handlers.rs
use crate::{
    error::{AppError, AppResult},
    forms::{disciplina::DisciplinaForm, ErrosFormulario, ExclusaoForm},
    services::{
        authz::Identidade,
        disciplina_service,
        pesquisa::{Pesquisa, PesquisaParams},
    },
    state::AppState,
    templates::{renderizar, DisciplinaFormPage, DisciplinasPesquisaPage, Layout},
    web::flash,
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

const MENU: &str = "disciplinas";
const URL_PESQUISA: &str = "/academico/disciplinas/pesquisar/";

// GET /academico/disciplinas/pesquisar/
pub async fn pesquisar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Query(params): Query<PesquisaParams>,
) -> AppResult<impl IntoResponse> {
    let pesquisa = Pesquisa::nova(&params, disciplina_service::CAMPOS_ORDENACAO);
    let disciplinas = disciplina_service::pesquisar(&state.db_pool, identidade.escopo(), &pesquisa).await?;

    let template = DisciplinasPesquisaPage {
        layout: Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        disciplinas,
        pesquisa: pesquisa.view(),
    };
    renderizar(&template)
}

fn formulario(layout: Layout, titulo: &str, acao: String, form: DisciplinaForm, erros: ErrosFormulario) -> AppResult<Response> {
    let template = DisciplinaFormPage {
        layout,
        titulo: titulo.to_string(),
        acao,
        form,
        erros,
    };
    Ok(renderizar(&template)?.into_response())
}

// GET /academico/disciplinas/cadastrar/
pub async fn show_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<Response> {
    formulario(
        Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        "Cadastrar disciplina",
        "/academico/disciplinas/cadastrar/".to_string(),
        DisciplinaForm::default(),
        ErrosFormulario::new(),
    )
}

// POST /academico/disciplinas/cadastrar/
pub async fn handle_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Form(form): Form<DisciplinaForm>,
) -> AppResult<Response> {
    match form.validar() {
        Ok(dados) => {
            disciplina_service::criar(&state.db_pool, &dados).await?;
            flash::sucesso(&cookies, &state.cookie_key, "Disciplina cadastrada com sucesso!");
            Ok(Redirect::to(URL_PESQUISA).into_response())
        }
        Err(erros) => {
            tracing::warn!("Cadastro de disciplina inválido ({} campos com erro).", erros.len());
            formulario(
                Layout::new(Some(&identidade), None, MENU),
                "Cadastrar disciplina",
                "/academico/disciplinas/cadastrar/".to_string(),
                form,
                erros,
            )
        }
    }
}

// GET /academico/disciplinas/editar/{id}/
pub async fn show_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let disciplina = disciplina_service::buscar(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado(format!("disciplina {}", id)))?;

    formulario(
        Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        "Editar disciplina",
        format!("/academico/disciplinas/editar/{}/", id),
        DisciplinaForm::from(&disciplina),
        ErrosFormulario::new(),
    )
}

// POST /academico/disciplinas/editar/{id}/
pub async fn handle_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
    Form(form): Form<DisciplinaForm>,
) -> AppResult<Response> {
    let dados = match form.validar() {
        Ok(dados) => dados,
        Err(erros) => {
            tracing::warn!("Edição da disciplina {} inválida.", id);
            return formulario(
                Layout::new(Some(&identidade), None, MENU),
                "Editar disciplina",
                format!("/academico/disciplinas/editar/{}/", id),
                form,
                erros,
            );
        }
    };

    if !disciplina_service::atualizar(&state.db_pool, id, &dados).await? {
        return Err(AppError::NaoEncontrado(format!("disciplina {}", id)));
    }
    flash::sucesso(&cookies, &state.cookie_key, "Disciplina atualizada com sucesso!");
    Ok(Redirect::to(URL_PESQUISA).into_response())
}

// POST /academico/disciplinas/excluir/  (ids=3,7,9)
pub async fn handle_excluir_lote(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ExclusaoForm>,
) -> AppResult<Redirect> {
    match form.ids() {
        Ok(ids) => excluir(&state, &cookies, &ids).await,
        Err(mensagem) => {
            tracing::warn!("Exclusão de disciplinas recusada: {}", mensagem);
            flash::erro(&cookies, &state.cookie_key, mensagem);
            Ok(Redirect::to(URL_PESQUISA))
        }
    }
}

// POST /academico/disciplinas/excluir/{id}/
pub async fn handle_excluir(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    excluir(&state, &cookies, &[id]).await
}

async fn excluir(state: &AppState, cookies: &Cookies, ids: &[i64]) -> AppResult<Redirect> {
    let removidas = disciplina_service::excluir(&state.db_pool, ids).await?;
    flash::sucesso(
        cookies,
        &state.cookie_key,
        format!("{} disciplina(s) excluída(s) com sucesso.", removidas),
    );
    Ok(Redirect::to(URL_PESQUISA))
}
