// src/web/turma_handlers.rs
use crate::{
    error::{AppError, AppResult},
    forms::{
        turma::{DadosTurma, TurmaForm},
        vinculo::{AtribuirProfessorForm, MatricularAlunoForm, VincularDisciplinaForm},
        ErrosFormulario,
    },
    models::{vinculo::TipoVinculo, voluntario::TipoVoluntario},
    services::{
        aluno_service,
        authz::Identidade,
        curso_service, disciplina_service, periodo_service,
        pesquisa::{Pesquisa, PesquisaParams},
        turma_service, voluntario_service,
    },
    state::AppState,
    templates::{renderizar, Layout, TurmaDetalhesPage, TurmaFormPage, TurmasPesquisaPage},
    web::flash,
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

const MENU: &str = "turmas";
const URL_PESQUISA: &str = "/academico/turmas/pesquisar/";

fn url_detalhes(turma_id: i64) -> String {
    format!("/academico/turmas/detalhes/{}/", turma_id)
}

// GET /academico/turmas/pesquisar/
pub async fn pesquisar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Query(params): Query<PesquisaParams>,
) -> AppResult<impl IntoResponse> {
    let pesquisa = Pesquisa::nova(&params, turma_service::CAMPOS_ORDENACAO);
    let turmas = turma_service::pesquisar(&state.db_pool, identidade.escopo(), &pesquisa).await?;

    let template = TurmasPesquisaPage {
        layout: Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        turmas,
        pesquisa: pesquisa.view(),
    };
    renderizar(&template)
}

async fn formulario(
    state: &AppState,
    layout: Layout,
    titulo: &str,
    acao: String,
    form: TurmaForm,
    erros: ErrosFormulario,
) -> AppResult<Response> {
    let template = TurmaFormPage {
        layout,
        titulo: titulo.to_string(),
        acao,
        form,
        erros,
        periodos: periodo_service::listar_todos(&state.db_pool).await?,
        cursos: curso_service::listar_todos(&state.db_pool).await?,
    };
    Ok(renderizar(&template)?.into_response())
}

async fn validar(state: &AppState, form: &TurmaForm) -> AppResult<Result<DadosTurma, ErrosFormulario>> {
    let dados = match form.validar() {
        Ok(dados) => dados,
        Err(erros) => return Ok(Err(erros)),
    };
    let mut erros = ErrosFormulario::new();
    if !periodo_service::existe(&state.db_pool, dados.periodo_letivo_id).await? {
        erros.add("periodo_letivo_id", "Período letivo inexistente.");
    }
    if !curso_service::existe(&state.db_pool, dados.curso_id).await? {
        erros.add("curso_id", "Curso inexistente.");
    }
    Ok(erros.ou(dados))
}

// GET /academico/turmas/cadastrar/
pub async fn show_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<Response> {
    let layout = Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU);
    formulario(
        &state,
        layout,
        "Cadastrar turma",
        "/academico/turmas/cadastrar/".to_string(),
        TurmaForm::default(),
        ErrosFormulario::new(),
    )
    .await
}

// POST /academico/turmas/cadastrar/
pub async fn handle_cadastrar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Form(form): Form<TurmaForm>,
) -> AppResult<Response> {
    let dados = match validar(&state, &form).await? {
        Ok(dados) => dados,
        Err(erros) => {
            tracing::warn!("Cadastro de turma inválido ({} campos com erro).", erros.len());
            let layout = Layout::new(Some(&identidade), None, MENU);
            return formulario(
                &state,
                layout,
                "Cadastrar turma",
                "/academico/turmas/cadastrar/".to_string(),
                form,
                erros,
            )
            .await;
        }
    };

    let id = turma_service::criar(&state.db_pool, &dados).await?;
    flash::sucesso(&cookies, &state.cookie_key, "Turma cadastrada com sucesso!");
    Ok(Redirect::to(&url_detalhes(id)).into_response())
}

// GET /academico/turmas/editar/{id}/
pub async fn show_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let turma = turma_service::buscar(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado(format!("turma {}", id)))?;

    let layout = Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU);
    formulario(
        &state,
        layout,
        "Editar turma",
        format!("/academico/turmas/editar/{}/", id),
        TurmaForm::from(&turma),
        ErrosFormulario::new(),
    )
    .await
}

// POST /academico/turmas/editar/{id}/
pub async fn handle_editar(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
    Form(form): Form<TurmaForm>,
) -> AppResult<Response> {
    let dados = match validar(&state, &form).await? {
        Ok(dados) => dados,
        Err(erros) => {
            tracing::warn!("Edição da turma {} inválida.", id);
            let layout = Layout::new(Some(&identidade), None, MENU);
            return formulario(
                &state,
                layout,
                "Editar turma",
                format!("/academico/turmas/editar/{}/", id),
                form,
                erros,
            )
            .await;
        }
    };

    if !turma_service::atualizar(&state.db_pool, id, &dados).await? {
        return Err(AppError::NaoEncontrado(format!("turma {}", id)));
    }
    flash::sucesso(&cookies, &state.cookie_key, "Turma atualizada com sucesso!");
    Ok(Redirect::to(URL_PESQUISA).into_response())
}

// GET /academico/turmas/detalhes/{id}/
pub async fn show_detalhes(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(identidade): Extension<Identidade>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let turma = turma_service::buscar_listagem(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado(format!("turma {}", id)))?;

    let template = TurmaDetalhesPage {
        layout: Layout::new(Some(&identidade), flash::consumir(&cookies, &state.cookie_key), MENU),
        turma,
        disciplinas: turma_service::listar_disciplinas(&state.db_pool, id).await?,
        alunos: turma_service::listar_alunos(&state.db_pool, id).await?,
        atribuicoes: turma_service::listar_atribuicoes(&state.db_pool, id).await?,
        opcoes_disciplinas: disciplina_service::listar_ativas(&state.db_pool).await?,
        opcoes_alunos: aluno_service::listar_ativos(&state.db_pool).await?,
        opcoes_professores: voluntario_service::listar_professores(&state.db_pool).await?,
    };
    renderizar(&template)
}

async fn garantir_turma(state: &AppState, turma_id: i64) -> AppResult<()> {
    turma_service::buscar(&state.db_pool, turma_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NaoEncontrado(format!("turma {}", turma_id)))
}

/// Traduz o resultado de um INSERT num vínculo: repetido vira mensagem, não erro.
fn reportar_vinculo(
    state: &AppState,
    cookies: &Cookies,
    resultado: AppResult<i64>,
    sucesso: &str,
    repetido: &str,
) -> AppResult<()> {
    match resultado {
        Ok(_) => {
            flash::sucesso(cookies, &state.cookie_key, sucesso);
            Ok(())
        }
        Err(e) if e.is_violacao_unica() => {
            tracing::warn!("Vínculo repetido: {}", repetido);
            flash::erro(cookies, &state.cookie_key, repetido);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

// POST /academico/turmas/{id}/disciplinas/
pub async fn handle_vincular_disciplina(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(turma_id): Path<i64>,
    Form(form): Form<VincularDisciplinaForm>,
) -> AppResult<Redirect> {
    garantir_turma(&state, turma_id).await?;

    let disciplina_id = match form.validar() {
        Ok(id) => id,
        Err(_) => {
            flash::erro(&cookies, &state.cookie_key, "Selecione uma disciplina.");
            return Ok(Redirect::to(&url_detalhes(turma_id)));
        }
    };
    if disciplina_service::buscar(&state.db_pool, disciplina_id).await?.is_none() {
        flash::erro(&cookies, &state.cookie_key, "Disciplina inexistente.");
        return Ok(Redirect::to(&url_detalhes(turma_id)));
    }

    let resultado = turma_service::vincular_disciplina(&state.db_pool, turma_id, disciplina_id).await;
    reportar_vinculo(
        &state,
        &cookies,
        resultado,
        "Disciplina vinculada à turma.",
        "Esta disciplina já está vinculada à turma.",
    )?;
    Ok(Redirect::to(&url_detalhes(turma_id)))
}

// POST /academico/turmas/{id}/alunos/
pub async fn handle_matricular_aluno(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(turma_id): Path<i64>,
    Form(form): Form<MatricularAlunoForm>,
) -> AppResult<Redirect> {
    garantir_turma(&state, turma_id).await?;

    let aluno_id = match form.validar() {
        Ok(id) => id,
        Err(_) => {
            flash::erro(&cookies, &state.cookie_key, "Selecione um aluno.");
            return Ok(Redirect::to(&url_detalhes(turma_id)));
        }
    };
    if aluno_service::buscar(&state.db_pool, aluno_id).await?.is_none() {
        flash::erro(&cookies, &state.cookie_key, "Aluno inexistente.");
        return Ok(Redirect::to(&url_detalhes(turma_id)));
    }

    let resultado = turma_service::matricular_aluno(&state.db_pool, turma_id, aluno_id).await;
    reportar_vinculo(
        &state,
        &cookies,
        resultado,
        "Aluno matriculado na turma.",
        "Este aluno já está matriculado na turma.",
    )?;
    Ok(Redirect::to(&url_detalhes(turma_id)))
}

// POST /academico/turmas/{id}/professores/
pub async fn handle_atribuir_professor(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(turma_id): Path<i64>,
    Form(form): Form<AtribuirProfessorForm>,
) -> AppResult<Redirect> {
    garantir_turma(&state, turma_id).await?;
    let destino = url_detalhes(turma_id);

    let (turma_disciplina_id, voluntario_id) = match form.validar() {
        Ok(ids) => ids,
        Err(_) => {
            flash::erro(&cookies, &state.cookie_key, "Selecione a disciplina e o professor.");
            return Ok(Redirect::to(&destino));
        }
    };

    // Só voluntários do tipo PROFESSOR podem lecionar
    let voluntario = voluntario_service::buscar(&state.db_pool, voluntario_id).await?;
    if !voluntario.is_some_and(|v| v.tipo_voluntario == TipoVoluntario::Professor) {
        flash::erro(&cookies, &state.cookie_key, "O voluntário selecionado não é professor.");
        return Ok(Redirect::to(&destino));
    }

    match turma_service::atribuir_professor(&state.db_pool, turma_id, turma_disciplina_id, voluntario_id).await {
        Ok(Some(_)) => flash::sucesso(&cookies, &state.cookie_key, "Professor atribuído à disciplina."),
        Ok(None) => flash::erro(&cookies, &state.cookie_key, "A disciplina não pertence a esta turma."),
        Err(e) if e.is_violacao_unica() => {
            tracing::warn!("Atribuição repetida: voluntário {} na turma-disciplina {}", voluntario_id, turma_disciplina_id);
            flash::erro(&cookies, &state.cookie_key, "Este professor já está atribuído a esta disciplina.");
        }
        Err(e) => return Err(e),
    }
    Ok(Redirect::to(&destino))
}

// POST /academico/vinculos/{tipo}/{id}/status/
pub async fn handle_alternar_status(
    State(state): State<AppState>,
    cookies: Cookies,
    Path((tipo, id)): Path<(TipoVinculo, i64)>,
) -> AppResult<Redirect> {
    let turma_id = turma_service::alternar_status_vinculo(&state.db_pool, tipo, id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado(format!("vínculo {:?} {}", tipo, id)))?;

    flash::sucesso(&cookies, &state.cookie_key, "Status do vínculo atualizado.");
    Ok(Redirect::to(&url_detalhes(turma_id)))
}
