// src/templates.rs
use crate::{
    error::{AppError, AppResult},
    forms::{
        aluno::AlunoForm, curso::CursoForm, disciplina::DisciplinaForm, periodo::PeriodoForm,
        registro::RegistroForm, turma::TurmaForm, voluntario::VoluntarioForm, ErrosFormulario,
    },
    models::{
        aluno::{AlunoListagem, StatusAluno},
        curso::Curso,
        disciplina::Disciplina,
        periodo::PeriodoLetivo,
        turma::TurmaListagem,
        user::UsuarioOpcao,
        vinculo::{AtribuicaoDetalhe, TurmaAlunoDetalhe, TurmaDisciplinaDetalhe},
        voluntario::{StatusProcesso, TipoVoluntario, VoluntarioListagem},
    },
    services::{authz::Identidade, pesquisa::PesquisaView},
    web::flash::Flash,
};
use askama::Template; // Trait necessário para Askama
use axum::response::Html;

/// Renderiza o template; uma falha aqui é erro interno (500).
pub fn renderizar<T: Template>(template: &T) -> AppResult<Html<String>> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Falha ao renderizar template: {}", e);
        AppError::TemplateError(e)
    })
}

/// Dados comuns a todas as páginas (barra de navegação e mensagem flash).
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub usuario: Option<String>,
    pub papel: &'static str,
    pub pode_gerir: bool,
    pub flash: Option<Flash>,
    pub menu_ativo: &'static str,
}

impl Layout {
    pub fn new(identidade: Option<&Identidade>, flash: Option<Flash>, menu_ativo: &'static str) -> Self {
        Self {
            usuario: identidade.map(|i| i.nome.clone()),
            papel: identidade.map(Identidade::papel_rotulo).unwrap_or_default(),
            pode_gerir: identidade.is_some_and(Identidade::pode_gerir),
            flash,
            menu_ativo,
        }
    }
}

// --- Autenticação ---

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub layout: Layout,
    // Campo opcional para passar uma mensagem de erro para o template
    pub error: Option<String>,
    pub username: String,
    pub next: String,
}

#[derive(Template)]
#[template(path = "registro.html")]
pub struct RegistroPage {
    pub layout: Layout,
    pub form: RegistroForm,
    pub erros: ErrosFormulario,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub layout: Layout,
}

// --- Alunos ---

#[derive(Template)]
#[template(path = "alunos/pesquisar.html")]
pub struct AlunosPesquisaPage {
    pub layout: Layout,
    pub alunos: Vec<AlunoListagem>,
    pub pesquisa: PesquisaView,
}

#[derive(Template)]
#[template(path = "alunos/form.html")]
pub struct AlunoFormPage {
    pub layout: Layout,
    pub titulo: String,
    pub acao: String,
    // Página de detalhes: mesmo formulário, campos desativados
    pub somente_leitura: bool,
    pub aluno_id: Option<i64>,
    pub form: AlunoForm,
    pub erros: ErrosFormulario,
    pub cursos: Vec<Curso>,
    pub periodos: Vec<PeriodoLetivo>,
    pub status_opcoes: &'static [StatusAluno],
}

// --- Disciplinas ---

#[derive(Template)]
#[template(path = "disciplinas/pesquisar.html")]
pub struct DisciplinasPesquisaPage {
    pub layout: Layout,
    pub disciplinas: Vec<Disciplina>,
    pub pesquisa: PesquisaView,
}

#[derive(Template)]
#[template(path = "disciplinas/form.html")]
pub struct DisciplinaFormPage {
    pub layout: Layout,
    pub titulo: String,
    pub acao: String,
    pub form: DisciplinaForm,
    pub erros: ErrosFormulario,
}

// --- Períodos letivos ---

#[derive(Template)]
#[template(path = "periodos/pesquisar.html")]
pub struct PeriodosPesquisaPage {
    pub layout: Layout,
    pub periodos: Vec<PeriodoLetivo>,
    pub pesquisa: PesquisaView,
}

#[derive(Template)]
#[template(path = "periodos/form.html")]
pub struct PeriodoFormPage {
    pub layout: Layout,
    pub titulo: String,
    pub acao: String,
    pub form: PeriodoForm,
    pub erros: ErrosFormulario,
}

// --- Turmas ---

#[derive(Template)]
#[template(path = "turmas/pesquisar.html")]
pub struct TurmasPesquisaPage {
    pub layout: Layout,
    pub turmas: Vec<TurmaListagem>,
    pub pesquisa: PesquisaView,
}

#[derive(Template)]
#[template(path = "turmas/form.html")]
pub struct TurmaFormPage {
    pub layout: Layout,
    pub titulo: String,
    pub acao: String,
    pub form: TurmaForm,
    pub erros: ErrosFormulario,
    pub periodos: Vec<PeriodoLetivo>,
    pub cursos: Vec<Curso>,
}

#[derive(Template)]
#[template(path = "turmas/detalhes.html")]
pub struct TurmaDetalhesPage {
    pub layout: Layout,
    pub turma: TurmaListagem,
    pub disciplinas: Vec<TurmaDisciplinaDetalhe>,
    pub alunos: Vec<TurmaAlunoDetalhe>,
    pub atribuicoes: Vec<AtribuicaoDetalhe>,
    // Opções dos formulários de vínculo
    pub opcoes_disciplinas: Vec<Disciplina>,
    pub opcoes_alunos: Vec<(i64, String)>,
    pub opcoes_professores: Vec<VoluntarioListagem>,
}

// --- Voluntários ---

#[derive(Template)]
#[template(path = "voluntarios/pesquisar.html")]
pub struct VoluntariosPesquisaPage {
    pub layout: Layout,
    pub voluntarios: Vec<VoluntarioListagem>,
    pub pesquisa: PesquisaView,
}

#[derive(Template)]
#[template(path = "voluntarios/form.html")]
pub struct VoluntarioFormPage {
    pub layout: Layout,
    pub titulo: String,
    pub acao: String,
    pub form: VoluntarioForm,
    pub erros: ErrosFormulario,
    pub usuarios: Vec<UsuarioOpcao>,
    pub tipos: &'static [TipoVoluntario],
    pub status_opcoes: &'static [StatusProcesso],
}

// --- Cursos ---

#[derive(Template)]
#[template(path = "cursos/pesquisar.html")]
pub struct CursosPesquisaPage {
    pub layout: Layout,
    pub cursos: Vec<Curso>,
    pub pesquisa: PesquisaView,
}

#[derive(Template)]
#[template(path = "cursos/form.html")]
pub struct CursoFormPage {
    pub layout: Layout,
    pub titulo: String,
    pub acao: String,
    pub form: CursoForm,
    pub erros: ErrosFormulario,
}

/// Resposta da popup de "novo curso": avisa a janela de origem e fecha-se.
#[derive(Template)]
#[template(path = "cursos/popup_criado.html")]
pub struct CursoPopupCriadoPage {
    pub nome: String,
    // JSON de `AddRelated`, já escapado para dentro de <script>
    pub mensagem_json: String,
}
