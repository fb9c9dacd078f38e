// src/web/curso_handlers.rs
use crate::{
    error::{AppError, AppResult},
    forms::{curso::CursoForm, ErrosFormulario, ExclusaoForm},
    services::{
        authz::Identidade,
        curso_service,
        pesquisa::{Pesquisa, PesquisaParams},
    },
    state::AppState,
    templates::{renderizar, CursoFormPage, CursoPopupCriadoPage, CursosPesquisaPage, Layout},
    web::{flash, popup::AddRelated},
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_cookies::Cookies;

const MENU: &str = "cursos";
const URL_PESQUISA: &str = "/academico/cursos/pesquisar/";

/// `?field_name=curso_interesse_id` quando aberto em popup.
#[derive(Debug, Default, Deserialize)]
pub struct PopupQuery {
    #[serde(default)]
    pub field_name: String,
}

// GET /academico/cursos/pesquisar/
pub async fn pesquisar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Query(params): Query<PesquisaParams>,
) -> AppResult<impl IntoResponse> {
    let pesquisa = Pesquisa::nova(&params, curso_service::CAMPOS_ORDENACAO);
    let cursos = curso_service::pesquisar(&state.db_pool, &pesquisa).await?;

    let template = CursosPesquisaPage {
        layout: Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        cursos,
        pesquisa: pesquisa.view(),
    };
    renderizar(&template)
}

fn formulario(layout: Layout, titulo: &str, acao: String, form: CursoForm, erros: ErrosFormulario) -> AppResult<Response> {
    let template = CursoFormPage {
        layout,
        titulo: titulo.to_string(),
        acao,
        form,
        erros,
    };
    Ok(renderizar(&template)?.into_response())
}

// GET /academico/cursos/cadastrar/[?field_name=X]
pub async fn show_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Query(query): Query<PopupQuery>,
) -> AppResult<Response> {
    let form = CursoForm {
        field_name: query.field_name,
        ..CursoForm::default()
    };
    formulario(
        Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        "Cadastrar curso",
        "/academico/cursos/cadastrar/".to_string(),
        form,
        ErrosFormulario::new(),
    )
}

// POST /academico/cursos/cadastrar/
pub async fn handle_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Query(query): Query<PopupQuery>,
    Form(mut form): Form<CursoForm>,
) -> AppResult<Response> {
    // O field_name pode vir no corpo (campo oculto) ou na query string
    if form.field_name().is_none() {
        form.field_name = query.field_name;
    }

    let nome = match form.validar() {
        Ok(nome) => nome,
        Err(erros) => {
            tracing::warn!("Cadastro de curso inválido.");
            return formulario(
                Layout::new(Some(&identidade), None, MENU),
                "Cadastrar curso",
                "/academico/cursos/cadastrar/".to_string(),
                form,
                erros,
            );
        }
    };

    let curso = curso_service::criar(&state.db_pool, &nome).await?;

    match form.field_name() {
        Some(field_name) => {
            // Popup: avisa a janela de origem em vez de redirecionar
            let mensagem = AddRelated::new(field_name, curso.id, &curso.nome);
            let mensagem_json = mensagem.para_script().map_err(|e| {
                tracing::error!("Falha ao serializar mensagem da popup: {:?}", e);
                AppError::InternalServerError
            })?;
            let template = CursoPopupCriadoPage {
                nome: curso.nome.clone(),
                mensagem_json,
            };
            Ok(renderizar(&template)?.into_response())
        }
        None => {
            flash::sucesso(&cookies, &state.cookie_key, "Curso cadastrado com sucesso!");
            Ok(Redirect::to(URL_PESQUISA).into_response())
        }
    }
}

// GET /academico/cursos/editar/{id}/
pub async fn show_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let curso = curso_service::buscar(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado(format!("curso {}", id)))?;

    let form = CursoForm {
        nome: curso.nome,
        ..CursoForm::default()
    };
    formulario(
        Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        "Editar curso",
        format!("/academico/cursos/editar/{}/", id),
        form,
        ErrosFormulario::new(),
    )
}

// POST /academico/cursos/editar/{id}/
pub async fn handle_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
    Form(form): Form<CursoForm>,
) -> AppResult<Response> {
    let nome = match form.validar() {
        Ok(nome) => nome,
        Err(erros) => {
            return formulario(
                Layout::new(Some(&identidade), None, MENU),
                "Editar curso",
                format!("/academico/cursos/editar/{}/", id),
                form,
                erros,
            );
        }
    };

    if !curso_service::atualizar(&state.db_pool, id, &nome).await? {
        return Err(AppError::NaoEncontrado(format!("curso {}", id)));
    }
    flash::sucesso(&cookies, &state.cookie_key, "Curso atualizado com sucesso!");
    Ok(Redirect::to(URL_PESQUISA).into_response())
}

// POST /academico/cursos/excluir/  (ids=3,7,9)
pub async fn handle_excluir_lote(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ExclusaoForm>,
) -> AppResult<Redirect> {
    match form.ids() {
        Ok(ids) => excluir(&state, &cookies, &ids).await,
        Err(mensagem) => {
            tracing::warn!("Exclusão de cursos recusada: {}", mensagem);
            flash::erro(&cookies, &state.cookie_key, mensagem);
            Ok(Redirect::to(URL_PESQUISA))
        }
    }
}

// POST /academico/cursos/excluir/{id}/
pub async fn handle_excluir(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    excluir(&state, &cookies, &[id]).await
}

async fn excluir(state: &AppState, cookies: &Cookies, ids: &[i64]) -> AppResult<Redirect> {
    match curso_service::excluir(&state.db_pool, ids).await {
        Ok(removidos) => {
            flash::sucesso(
                cookies,
                &state.cookie_key,
                format!("{} curso(s) excluído(s) com sucesso.", removidos),
            );
        }
        // Turmas referenciam o curso (ON DELETE RESTRICT): nada foi removido
        Err(e) if e.is_violacao_fk() => {
            tracing::warn!("Exclusão de cursos {:?} bloqueada por turmas associadas.", ids);
            flash::erro(
                cookies,
                &state.cookie_key,
                "Não é possível excluir: existem turmas associadas ao(s) curso(s).",
            );
        }
        Err(e) => return Err(e),
    }
    Ok(Redirect::to(URL_PESQUISA))
}
