// src/web/aluno_handlers.rs
use crate::{
    error::{AppError, AppResult},
    forms::{
        aluno::{AlunoForm, DadosAluno},
        ErrosFormulario,
    },
    models::aluno::StatusAluno,
    services::{
        aluno_service, authz::Identidade, curso_service, periodo_service,
        pesquisa::{Pesquisa, PesquisaParams},
    },
    state::AppState,
    templates::{renderizar, AlunoFormPage, AlunosPesquisaPage, Layout},
    web::flash,
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

const MENU: &str = "alunos";
const URL_PESQUISA: &str = "/academico/alunos/pesquisar/";

// GET /academico/alunos/pesquisar/
pub async fn pesquisar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Query(params): Query<PesquisaParams>,
) -> AppResult<impl IntoResponse> {
    let pesquisa = Pesquisa::nova(&params, aluno_service::CAMPOS_ORDENACAO);
    let alunos = aluno_service::pesquisar(&state.db_pool, identidade.escopo(), &pesquisa).await?;
    tracing::debug!("Pesquisa de alunos por {}: {} resultados", identidade.user_id, alunos.len());

    let template = AlunosPesquisaPage {
        layout: Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        alunos,
        pesquisa: pesquisa.view(),
    };
    renderizar(&template)
}

/// Estado do formulário a mostrar; as listas dos `<select>` são carregadas aqui.
struct Formulario {
    titulo: &'static str,
    acao: String,
    somente_leitura: bool,
    aluno_id: Option<i64>,
    form: AlunoForm,
    erros: ErrosFormulario,
}

async fn mostrar_formulario(state: &AppState, layout: Layout, f: Formulario) -> AppResult<Response> {
    let template = AlunoFormPage {
        layout,
        titulo: f.titulo.to_string(),
        acao: f.acao,
        somente_leitura: f.somente_leitura,
        aluno_id: f.aluno_id,
        form: f.form,
        erros: f.erros,
        cursos: curso_service::listar_todos(&state.db_pool).await?,
        periodos: periodo_service::listar_todos(&state.db_pool).await?,
        status_opcoes: StatusAluno::TODOS,
    };
    Ok(renderizar(&template)?.into_response())
}

/// Valida o formulário e confirma que o curso/período de interesse existem.
async fn validar(state: &AppState, form: &AlunoForm) -> AppResult<Result<DadosAluno, ErrosFormulario>> {
    let dados = match form.validar() {
        Ok(dados) => dados,
        Err(erros) => return Ok(Err(erros)),
    };

    let mut erros = ErrosFormulario::new();
    if let Some(id) = dados.curso_interesse_id {
        if !curso_service::existe(&state.db_pool, id).await? {
            erros.add("curso_interesse_id", "Curso inexistente.");
        }
    }
    if let Some(id) = dados.periodo_interesse_id {
        if !periodo_service::existe(&state.db_pool, id).await? {
            erros.add("periodo_interesse_id", "Período letivo inexistente.");
        }
    }
    Ok(erros.ou(dados))
}

// GET /academico/alunos/cadastrar/
pub async fn show_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<Response> {
    let layout = Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU);
    mostrar_formulario(
        &state,
        layout,
        Formulario {
            titulo: "Cadastrar aluno",
            acao: "/academico/alunos/cadastrar/".to_string(),
            somente_leitura: false,
            aluno_id: None,
            form: AlunoForm::default(),
            erros: ErrosFormulario::new(),
        },
    )
    .await
}

// POST /academico/alunos/cadastrar/
pub async fn handle_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Form(form): Form<AlunoForm>,
) -> AppResult<Response> {
    let dados = match validar(&state, &form).await? {
        Ok(dados) => dados,
        Err(erros) => {
            tracing::warn!("Cadastro de aluno inválido ({} campos com erro).", erros.len());
            let layout = Layout::new(Some(&identidade), None, MENU);
            return mostrar_formulario(
                &state,
                layout,
                Formulario {
                    titulo: "Cadastrar aluno",
                    acao: "/academico/alunos/cadastrar/".to_string(),
                    somente_leitura: false,
                    aluno_id: None,
                    form,
                    erros,
                },
            )
            .await;
        }
    };

    aluno_service::criar(&state.db_pool, &dados).await?;
    flash::sucesso(&cookies, &state.cookie_key, "Aluno cadastrado com sucesso!");
    Ok(Redirect::to(URL_PESQUISA).into_response())
}

// GET /academico/alunos/editar/{id}/
pub async fn show_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let aluno = aluno_service::buscar(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado(format!("aluno {}", id)))?;

    let layout = Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU);
    mostrar_formulario(
        &state,
        layout,
        Formulario {
            titulo: "Editar aluno",
            acao: format!("/academico/alunos/editar/{}/", id),
            somente_leitura: false,
            aluno_id: Some(id),
            form: AlunoForm::from(&aluno),
            erros: ErrosFormulario::new(),
        },
    )
    .await
}

// POST /academico/alunos/editar/{id}/
pub async fn handle_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
    Form(form): Form<AlunoForm>,
) -> AppResult<Response> {
    let dados = match validar(&state, &form).await? {
        Ok(dados) => dados,
        Err(erros) => {
            tracing::warn!("Edição do aluno {} inválida.", id);
            let layout = Layout::new(Some(&identidade), None, MENU);
            return mostrar_formulario(
                &state,
                layout,
                Formulario {
                    titulo: "Editar aluno",
                    acao: format!("/academico/alunos/editar/{}/", id),
                    somente_leitura: false,
                    aluno_id: Some(id),
                    form,
                    erros,
                },
            )
            .await;
        }
    };

    if !aluno_service::atualizar(&state.db_pool, id, &dados).await? {
        return Err(AppError::NaoEncontrado(format!("aluno {}", id)));
    }
    flash::sucesso(&cookies, &state.cookie_key, "Aluno atualizado com sucesso!");
    Ok(Redirect::to(URL_PESQUISA).into_response())
}

// GET /academico/alunos/detalhes/{id}/
pub async fn show_detalhes(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let aluno = aluno_service::buscar(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado(format!("aluno {}", id)))?;

    let layout = Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU);
    mostrar_formulario(
        &state,
        layout,
        Formulario {
            titulo: "Detalhes do aluno",
            acao: format!("/academico/alunos/editar/{}/", id),
            somente_leitura: true,
            aluno_id: Some(id),
            form: AlunoForm::from(&aluno),
            erros: ErrosFormulario::new(),
        },
    )
    .await
}
