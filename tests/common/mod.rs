// tests/common/mod.rs
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use aprosys::{
    db,
    forms::{
        aluno::AlunoForm, disciplina::DisciplinaForm, periodo::PeriodoForm, registro::NovoUsuario,
        turma::TurmaForm, voluntario::DadosVoluntario,
    },
    models::{
        vinculo::TipoVinculo,
        voluntario::{StatusProcesso, TipoVoluntario},
    },
    services::{aluno_service, curso_service, disciplina_service, periodo_service, turma_service, user_service, voluntario_service},
    state::AppState,
    web::routes,
};
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt; // for oneshot
use tower_cookies::Key;
use tower_sessions_sqlx_store::SqliteStore;

pub const SENHA: &str = "senha-segura-123";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::create_memory_pool().await.expect("pool em memória");

        let store = SqliteStore::new(pool.clone())
            .with_table_name("sessions")
            .expect("nome de tabela válido");
        store.migrate().await.expect("tabela de sessões");

        let state = AppState {
            db_pool: pool.clone(),
            cookie_key: Key::generate(),
            // Custo mínimo do bcrypt para os testes não ficarem lentos
            bcrypt_cost: 4,
        };

        Self {
            router: routes::create_app(state, store),
            pool,
        }
    }

    // --- Pedidos ---

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, uri: &str, corpo: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::from(corpo.to_string())).unwrap())
            .await
            .unwrap()
    }

    /// Faz login e devolve o cabeçalho `Cookie` da sessão.
    pub async fn login(&self, username: &str) -> String {
        let corpo = format!("username={}&password={}", username, SENHA);
        let resp = self.post_form("/accounts/login/", &corpo, None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "login de {username} falhou");
        juntar_cookies("", &resp)
    }

    // --- Dados ---

    pub async fn criar_usuario(&self, username: &str, is_superuser: bool) -> i64 {
        let novo = NovoUsuario {
            username: username.to_string(),
            nome: format!("Utilizador {username}"),
            email: format!("{username}@exemplo.org"),
            contato: String::new(),
            password: SENHA.to_string(),
        };
        let id = user_service::criar_usuario(&self.pool, &novo, 4).await.unwrap();
        if is_superuser {
            sqlx::query("UPDATE users SET is_superuser = 1 WHERE id = ?1")
                .bind(id)
                .execute(&self.pool)
                .await
                .unwrap();
        }
        id
    }

    /// Cria um utilizador com voluntário do tipo dado e devolve `(user_id, voluntario_id)`.
    pub async fn criar_voluntario(&self, username: &str, tipo: TipoVoluntario) -> (i64, i64) {
        let user_id = self.criar_usuario(username, false).await;
        let dados = DadosVoluntario {
            user_id,
            tipo_voluntario: tipo,
            status_processo: StatusProcesso::Aprovado,
        };
        let voluntario_id = voluntario_service::criar(&self.pool, &dados).await.unwrap();
        (user_id, voluntario_id)
    }

    /// Coordenador já autenticado; devolve o cookie.
    pub async fn login_coordenador(&self) -> String {
        self.criar_voluntario("coord", TipoVoluntario::Coordenador).await;
        self.login("coord").await
    }

    pub async fn criar_aluno(&self, nome: &str) -> i64 {
        let form = AlunoForm {
            nome: nome.to_string(),
            ..AlunoForm::default()
        };
        aluno_service::criar(&self.pool, &form.validar().unwrap()).await.unwrap()
    }

    pub async fn criar_disciplina(&self, nome: &str, area: &str) -> i64 {
        let form = DisciplinaForm {
            nome: nome.to_string(),
            area_conhecimento: area.to_string(),
            ..DisciplinaForm::default()
        };
        disciplina_service::criar(&self.pool, &form.validar().unwrap()).await.unwrap()
    }

    pub async fn criar_periodo(&self, ano: i64, semestre: i64) -> i64 {
        let form = PeriodoForm {
            ano: ano.to_string(),
            semestre: semestre.to_string(),
            data_inicio: format!("{ano}-02-01"),
            data_fim: format!("{ano}-06-30"),
            ..PeriodoForm::default()
        };
        periodo_service::criar(&self.pool, &form.validar().unwrap()).await.unwrap()
    }

    pub async fn criar_curso(&self, nome: &str) -> i64 {
        curso_service::criar(&self.pool, nome).await.unwrap().id
    }

    pub async fn criar_turma(&self, nome: &str, periodo_id: i64, curso_id: i64) -> i64 {
        let form = TurmaForm {
            nome: nome.to_string(),
            capacidade: "30".into(),
            data_inicio: "2025-02-01".into(),
            data_fim: "2025-06-30".into(),
            periodo_letivo_id: periodo_id.to_string(),
            curso_id: curso_id.to_string(),
            ..TurmaForm::default()
        };
        turma_service::criar(&self.pool, &form.validar().unwrap()).await.unwrap()
    }

    pub async fn contar(&self, tabela: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {tabela}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

/// Cenário de escopo: professor na turma S1 (Matemática), Ana matriculada em S1,
/// Bruno matriculado em S2 (sem o professor).
pub struct CenarioProfessor {
    pub voluntario_id: i64,
    pub turma_s1: i64,
    pub turma_s2: i64,
    pub turma_disciplina_id: i64,
    pub atribuicao_id: i64,
    pub matricula_ana: i64,
}

pub async fn cenario_professor(app: &TestApp) -> CenarioProfessor {
    let (_, voluntario_id) = app.criar_voluntario("prof", TipoVoluntario::Professor).await;
    let periodo = app.criar_periodo(2025, 1).await;
    let curso = app.criar_curso("Pré-vestibular").await;
    let turma_s1 = app.criar_turma("S1", periodo, curso).await;
    let turma_s2 = app.criar_turma("S2", periodo, curso).await;

    let matematica = app.criar_disciplina("Matemática", "Exatas").await;
    app.criar_disciplina("História", "Humanas").await;

    let td = turma_service::vincular_disciplina(&app.pool, turma_s1, matematica).await.unwrap();
    let atribuicao_id = turma_service::atribuir_professor(&app.pool, turma_s1, td, voluntario_id)
        .await
        .unwrap()
        .expect("turma-disciplina pertence à turma");

    let ana = app.criar_aluno("Ana").await;
    let bruno = app.criar_aluno("Bruno").await;
    let matricula_ana = turma_service::matricular_aluno(&app.pool, turma_s1, ana).await.unwrap();
    turma_service::matricular_aluno(&app.pool, turma_s2, bruno).await.unwrap();

    CenarioProfessor {
        voluntario_id,
        turma_s1,
        turma_s2,
        turma_disciplina_id: td,
        atribuicao_id,
        matricula_ana,
    }
}

/// Passa um vínculo (ativo) para inativo.
pub async fn desativar_vinculo(app: &TestApp, tipo: TipoVinculo, id: i64) {
    turma_service::alternar_status_vinculo(&app.pool, tipo, id)
        .await
        .unwrap()
        .expect("vínculo existe");
}

// --- Respostas ---

pub async fn corpo(resp: Response<Body>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("resposta sem Location")
        .to_str()
        .unwrap()
        .to_string()
}

/// Acrescenta ao cabeçalho `Cookie` anterior os cookies definidos pela resposta.
/// Um cookie com o mesmo nome substitui o anterior.
pub fn juntar_cookies(anterior: &str, resp: &Response<Body>) -> String {
    let mut pares: Vec<(String, String)> = anterior
        .split("; ")
        .filter_map(|p| p.split_once('='))
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();

    for valor in resp.headers().get_all(header::SET_COOKIE) {
        let valor = valor.to_str().unwrap();
        let par = valor.split(';').next().unwrap_or_default();
        if let Some((nome, v)) = par.split_once('=') {
            pares.retain(|(n, _)| n != nome);
            if !v.is_empty() {
                pares.push((nome.to_string(), v.to_string()));
            }
        }
    }

    pares
        .into_iter()
        .map(|(n, v)| format!("{n}={v}"))
        .collect::<Vec<_>>()
        .join("; ")
}
