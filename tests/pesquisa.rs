// tests/pesquisa.rs
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Pesquisas com escopo por papel, filtro de texto e ordenação.

mod common;

use aprosys::{
    models::{vinculo::TipoVinculo, voluntario::TipoVoluntario},
    services::{
        aluno_service, curso_service, disciplina_service, periodo_service,
        pesquisa::{CamposPermitidos, Escopo, Pesquisa, PesquisaParams},
        turma_service, voluntario_service,
    },
};
use axum::http::StatusCode;
use common::{cenario_professor, corpo, desativar_vinculo, TestApp};

fn params(q: &str, order: Option<&str>, dir: Option<&str>) -> PesquisaParams {
    PesquisaParams {
        q: q.to_string(),
        order: order.map(str::to_string),
        dir: dir.map(str::to_string),
    }
}

fn nomes_alunos(alunos: &[aprosys::models::aluno::AlunoListagem]) -> Vec<&str> {
    alunos.iter().map(|a| a.nome.as_str()).collect()
}

#[tokio::test]
async fn professor_so_ve_alunos_das_suas_turmas() {
    let app = TestApp::new().await;
    let cenario = cenario_professor(&app).await;

    let pesquisa = Pesquisa::nova(&params("", None, None), aluno_service::CAMPOS_ORDENACAO);
    let alunos = aluno_service::pesquisar(
        &app.pool,
        Escopo::Professor {
            voluntario_id: cenario.voluntario_id,
        },
        &pesquisa,
    )
    .await
    .unwrap();
    assert_eq!(nomes_alunos(&alunos), vec!["Ana"]);

    // Pela aplicação: o professor autenticado vê Ana e não vê Bruno
    let cookie = app.login("prof").await;
    let resp = app.get("/academico/alunos/pesquisar/", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = corpo(resp).await;
    assert!(html.contains("Ana"));
    assert!(!html.contains("Bruno"));
}

#[tokio::test]
async fn professor_so_ve_disciplinas_e_turmas_atribuidas() {
    let app = TestApp::new().await;
    let cenario = cenario_professor(&app).await;
    let escopo = Escopo::Professor {
        voluntario_id: cenario.voluntario_id,
    };

    let pesquisa = Pesquisa::nova(&params("", None, None), disciplina_service::CAMPOS_ORDENACAO);
    let disciplinas = disciplina_service::pesquisar(&app.pool, escopo, &pesquisa).await.unwrap();
    let nomes: Vec<_> = disciplinas.iter().map(|d| d.nome.as_str()).collect();
    assert_eq!(nomes, vec!["Matemática"]);

    let pesquisa = Pesquisa::nova(&params("", None, None), turma_service::CAMPOS_ORDENACAO);
    let turmas = turma_service::pesquisar(&app.pool, escopo, &pesquisa).await.unwrap();
    let ids: Vec<_> = turmas.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![cenario.turma_s1]);
    assert!(!ids.contains(&cenario.turma_s2));
}

/// O que o professor vê depois de um vínculo da cadeia ficar inativo.
struct Visivel {
    alunos: Vec<String>,
    disciplinas: Vec<String>,
    turmas: Vec<i64>,
}

async fn visivel_para(app: &TestApp, voluntario_id: i64) -> Visivel {
    let escopo = Escopo::Professor { voluntario_id };
    let alunos = aluno_service::pesquisar(
        &app.pool,
        escopo,
        &Pesquisa::nova(&params("", None, None), aluno_service::CAMPOS_ORDENACAO),
    )
    .await
    .unwrap();
    let disciplinas = disciplina_service::pesquisar(
        &app.pool,
        escopo,
        &Pesquisa::nova(&params("", None, None), disciplina_service::CAMPOS_ORDENACAO),
    )
    .await
    .unwrap();
    let turmas = turma_service::pesquisar(
        &app.pool,
        escopo,
        &Pesquisa::nova(&params("", None, None), turma_service::CAMPOS_ORDENACAO),
    )
    .await
    .unwrap();
    Visivel {
        alunos: alunos.into_iter().map(|a| a.nome).collect(),
        disciplinas: disciplinas.into_iter().map(|d| d.nome).collect(),
        turmas: turmas.into_iter().map(|t| t.id).collect(),
    }
}

#[tokio::test]
async fn atribuicao_inativa_retira_o_acesso() {
    let app = TestApp::new().await;
    let cenario = cenario_professor(&app).await;
    desativar_vinculo(&app, TipoVinculo::Professor, cenario.atribuicao_id).await;

    let visivel = visivel_para(&app, cenario.voluntario_id).await;
    assert!(visivel.alunos.is_empty());
    assert!(visivel.disciplinas.is_empty());
    assert!(visivel.turmas.is_empty());
}

#[tokio::test]
async fn matricula_inativa_esconde_so_o_aluno() {
    let app = TestApp::new().await;
    let cenario = cenario_professor(&app).await;
    desativar_vinculo(&app, TipoVinculo::Aluno, cenario.matricula_ana).await;

    let visivel = visivel_para(&app, cenario.voluntario_id).await;
    assert!(visivel.alunos.is_empty());
    // A atribuição continua ativa: disciplina e turma mantêm-se
    assert_eq!(visivel.disciplinas, vec!["Matemática"]);
    assert_eq!(visivel.turmas, vec![cenario.turma_s1]);
}

#[tokio::test]
async fn disciplina_desvinculada_da_turma_retira_o_acesso() {
    let app = TestApp::new().await;
    let cenario = cenario_professor(&app).await;
    desativar_vinculo(&app, TipoVinculo::Disciplina, cenario.turma_disciplina_id).await;

    let visivel = visivel_para(&app, cenario.voluntario_id).await;
    assert!(visivel.alunos.is_empty());
    assert!(visivel.disciplinas.is_empty());
    assert!(visivel.turmas.is_empty());
}

#[tokio::test]
async fn coordenador_e_superutilizador_veem_tudo() {
    let app = TestApp::new().await;
    cenario_professor(&app).await;

    let coordenador = app.login_coordenador().await;
    app.criar_usuario("admin", true).await;
    let admin = app.login("admin").await;

    for cookie in [&coordenador, &admin] {
        let html = corpo(app.get("/academico/alunos/pesquisar/", Some(cookie)).await).await;
        assert!(html.contains("Ana"));
        assert!(html.contains("Bruno"));
    }
}

#[derive(Debug, Clone, Copy)]
enum Entidade {
    Alunos,
    Disciplinas,
    Turmas,
    Periodos,
    Voluntarios,
    Cursos,
}

const ENTIDADES: [Entidade; 6] = [
    Entidade::Alunos,
    Entidade::Disciplinas,
    Entidade::Turmas,
    Entidade::Periodos,
    Entidade::Voluntarios,
    Entidade::Cursos,
];

impl Entidade {
    fn campos(self) -> CamposPermitidos {
        match self {
            Entidade::Alunos => aluno_service::CAMPOS_ORDENACAO,
            Entidade::Disciplinas => disciplina_service::CAMPOS_ORDENACAO,
            Entidade::Turmas => turma_service::CAMPOS_ORDENACAO,
            Entidade::Periodos => periodo_service::CAMPOS_ORDENACAO,
            Entidade::Voluntarios => voluntario_service::CAMPOS_ORDENACAO,
            Entidade::Cursos => curso_service::CAMPOS_ORDENACAO,
        }
    }

    /// Ids devolvidos pela pesquisa sem escopo, pela ordem da consulta.
    async fn ids(self, app: &TestApp, order: Option<&str>, dir: Option<&str>) -> Vec<i64> {
        let pesquisa = Pesquisa::nova(&params("", order, dir), self.campos());
        let pool = &app.pool;
        match self {
            Entidade::Alunos => aluno_service::pesquisar(pool, Escopo::Irrestrito, &pesquisa)
                .await
                .unwrap()
                .iter()
                .map(|a| a.id)
                .collect(),
            Entidade::Disciplinas => disciplina_service::pesquisar(pool, Escopo::Irrestrito, &pesquisa)
                .await
                .unwrap()
                .iter()
                .map(|d| d.id)
                .collect(),
            Entidade::Turmas => turma_service::pesquisar(pool, Escopo::Irrestrito, &pesquisa)
                .await
                .unwrap()
                .iter()
                .map(|t| t.id)
                .collect(),
            Entidade::Periodos => periodo_service::pesquisar(pool, &pesquisa)
                .await
                .unwrap()
                .iter()
                .map(|p| p.id)
                .collect(),
            Entidade::Voluntarios => voluntario_service::pesquisar(pool, &pesquisa)
                .await
                .unwrap()
                .iter()
                .map(|v| v.id)
                .collect(),
            Entidade::Cursos => curso_service::pesquisar(pool, &pesquisa)
                .await
                .unwrap()
                .iter()
                .map(|c| c.id)
                .collect(),
        }
    }
}

/// Várias linhas por entidade, com valores repetidos em quase todas as colunas
/// ordenáveis para o desempate por id entrar em jogo.
async fn popular(app: &TestApp) {
    for nome in ["Carla", "ana", "Bruno", "ana"] {
        app.criar_aluno(nome).await;
    }
    for (nome, area) in [
        ("Física", "Exatas"),
        ("Química", "Exatas"),
        ("Redação", "Linguagens"),
        ("Biologia", "Natureza"),
        ("Matemática", "Exatas"),
    ] {
        app.criar_disciplina(nome, area).await;
    }
    let p2025 = app.criar_periodo(2025, 1).await;
    let p2024 = app.criar_periodo(2024, 2).await;
    app.criar_periodo(2024, 1).await;
    let curso = app.criar_curso("Pré-vestibular").await;
    app.criar_curso("Inglês").await;
    app.criar_curso("Espanhol").await;
    app.criar_turma("A", p2025, curso).await;
    app.criar_turma("B", p2024, curso).await;
    app.criar_turma("C", p2025, curso).await;
    for (username, tipo) in [
        ("caio", TipoVoluntario::Professor),
        ("ana", TipoVoluntario::Monitor),
        ("bia", TipoVoluntario::Professor),
    ] {
        app.criar_voluntario(username, tipo).await;
    }
}

#[tokio::test]
async fn desc_e_o_inverso_exato_de_asc_em_todas_as_entidades() {
    let app = TestApp::new().await;
    popular(&app).await;

    for entidade in ENTIDADES {
        for &(chave, _) in entidade.campos() {
            let asc = entidade.ids(&app, Some(chave), Some("asc")).await;
            let mut desc = entidade.ids(&app, Some(chave), Some("desc")).await;
            desc.reverse();
            assert!(!asc.is_empty(), "{entidade:?} sem linhas");
            assert_eq!(asc, desc, "{entidade:?} order={chave}");
        }
    }
}

#[tokio::test]
async fn ordem_e_direcao_desconhecidas_caem_no_padrao() {
    let app = TestApp::new().await;
    popular(&app).await;

    for entidade in ENTIDADES {
        let padrao = entidade.ids(&app, Some("nome"), Some("asc")).await;
        assert_eq!(entidade.ids(&app, Some("password_hash"), None).await, padrao, "{entidade:?}");
        assert_eq!(entidade.ids(&app, None, None).await, padrao, "{entidade:?}");
        // Só "desc" exato inverte
        for dir in ["DESC", " desc ", "sideways"] {
            assert_eq!(entidade.ids(&app, Some("nome"), Some(dir)).await, padrao, "{entidade:?} dir={dir}");
        }
    }
}

#[tokio::test]
async fn alunos_sem_ordem_ficam_por_nome() {
    let app = TestApp::new().await;
    for nome in ["Carla", "ana", "Bruno"] {
        app.criar_aluno(nome).await;
    }

    let pesquisa = Pesquisa::nova(&params("", Some("xpto"), None), aluno_service::CAMPOS_ORDENACAO);
    let alunos = aluno_service::pesquisar(&app.pool, Escopo::Irrestrito, &pesquisa).await.unwrap();
    assert_eq!(nomes_alunos(&alunos), vec!["ana", "Bruno", "Carla"]);
}

#[tokio::test]
async fn turmas_ordenam_pelo_nome_do_periodo() {
    let app = TestApp::new().await;
    let p2025 = app.criar_periodo(2025, 1).await;
    let p2024 = app.criar_periodo(2024, 2).await;
    let curso = app.criar_curso("Pré-vestibular").await;
    let a = app.criar_turma("A", p2025, curso).await;
    let b = app.criar_turma("B", p2024, curso).await;
    let c = app.criar_turma("C", p2025, curso).await;

    assert_eq!(Entidade::Turmas.ids(&app, Some("nome"), None).await, vec![a, b, c]);
    assert_eq!(Entidade::Turmas.ids(&app, Some("periodo_letivo"), None).await, vec![b, a, c]);
    assert_eq!(
        Entidade::Turmas.ids(&app, Some("periodo_letivo"), Some("desc")).await,
        vec![c, a, b]
    );
}

#[tokio::test]
async fn voluntarios_ordenam_pelo_status_do_processo() {
    let app = TestApp::new().await;
    let mut ids = Vec::new();
    for (username, status) in [("ana", "INSCRITO"), ("bia", "APROVADO"), ("caio", "EM_ANALISE")] {
        let (_, id) = app.criar_voluntario(username, TipoVoluntario::Professor).await;
        sqlx::query("UPDATE voluntarios SET status_processo = ?1 WHERE id = ?2")
            .bind(status)
            .bind(id)
            .execute(&app.pool)
            .await
            .unwrap();
        ids.push(id);
    }
    let (ana, bia, caio) = (ids[0], ids[1], ids[2]);

    assert_eq!(Entidade::Voluntarios.ids(&app, Some("nome"), None).await, vec![ana, bia, caio]);
    assert_eq!(Entidade::Voluntarios.ids(&app, Some("status"), None).await, vec![bia, caio, ana]);
}

#[tokio::test]
async fn filtro_ignora_maiusculas_e_trata_curingas_como_literais() {
    let app = TestApp::new().await;
    app.criar_disciplina("Matemática Básica", "Exatas").await;
    app.criar_disciplina("Física", "exatas").await;
    app.criar_disciplina("100% Redação", "Linguagens").await;

    let buscar = |q: &str| Pesquisa::nova(&params(q, None, None), disciplina_service::CAMPOS_ORDENACAO);

    let exatas = disciplina_service::pesquisar(&app.pool, Escopo::Irrestrito, &buscar("EXATAS"))
        .await
        .unwrap();
    assert_eq!(exatas.len(), 2);

    let percentagem = disciplina_service::pesquisar(&app.pool, Escopo::Irrestrito, &buscar("%"))
        .await
        .unwrap();
    let nomes: Vec<_> = percentagem.iter().map(|d| d.nome.as_str()).collect();
    assert_eq!(nomes, vec!["100% Redação"]);

    // Só espaços: sem filtro
    let todas = disciplina_service::pesquisar(&app.pool, Escopo::Irrestrito, &buscar("   "))
        .await
        .unwrap();
    assert_eq!(todas.len(), 3);
}

#[tokio::test]
async fn pesquisa_sem_resultados_devolve_lista_vazia() {
    let app = TestApp::new().await;
    app.criar_aluno("Ana").await;
    let cookie = app.login_coordenador().await;

    let resp = app
        .get("/academico/alunos/pesquisar/?q=zzz&order=xpto&dir=sideways", Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = corpo(resp).await;
    assert!(html.contains("Nenhum aluno encontrado."));
}

#[tokio::test]
async fn periodos_pesquisam_por_ano_e_semestre() {
    let app = TestApp::new().await;
    app.criar_periodo(2024, 2).await;
    app.criar_periodo(2025, 1).await;
    let cookie = app.login_coordenador().await;

    let html = corpo(app.get("/academico/periodos/pesquisar/?q=2024", Some(&cookie)).await).await;
    assert!(html.contains("2024.2"));
    assert!(!html.contains("2025.1"));
}
