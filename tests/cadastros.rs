// tests/cadastros.rs
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Fluxos de cadastro, edição, exclusão e vínculos pela aplicação.

mod common;

use aprosys::services::{curso_service, periodo_service, turma_service};
use axum::http::StatusCode;
use common::{corpo, juntar_cookies, location, TestApp};

#[tokio::test]
async fn exclusao_em_lote_remove_exatamente_os_ids_e_reporta_o_total() {
    let app = TestApp::new().await;
    for i in 1..=10 {
        let id = app.criar_disciplina(&format!("Disciplina {i:02}"), "Geral").await;
        assert_eq!(id, i);
    }
    let cookie = app.login_coordenador().await;

    let resp = app
        .post_form("/academico/disciplinas/excluir/", "ids=3%2C7%2C9", Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/academico/disciplinas/pesquisar/");
    let cookie = juntar_cookies(&cookie, &resp);

    assert_eq!(app.contar("disciplinas").await, 7);
    let restantes: Vec<i64> = sqlx::query_scalar("SELECT id FROM disciplinas ORDER BY id")
        .fetch_all(&app.pool)
        .await
        .unwrap();
    assert_eq!(restantes, vec![1, 2, 4, 5, 6, 8, 10]);

    // A mensagem flash aparece uma vez na página seguinte
    let resp = app.get("/academico/disciplinas/pesquisar/", Some(&cookie)).await;
    let cookie = juntar_cookies(&cookie, &resp);
    assert!(corpo(resp).await.contains("3 disciplina(s) excluída(s)"));

    let html = corpo(app.get("/academico/disciplinas/pesquisar/", Some(&cookie)).await).await;
    assert!(!html.contains("excluída(s)"));
}

#[tokio::test]
async fn exclusao_em_lote_com_ids_invalidos_nao_remove_nada() {
    let app = TestApp::new().await;
    app.criar_disciplina("Física", "Exatas").await;
    let cookie = app.login_coordenador().await;

    let resp = app
        .post_form("/academico/disciplinas/excluir/", "ids=1%2Cabc", Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.contar("disciplinas").await, 1);
}

#[tokio::test]
async fn excluir_disciplina_remove_os_seus_vinculos() {
    let app = TestApp::new().await;
    let periodo = app.criar_periodo(2025, 1).await;
    let curso = app.criar_curso("Pré-vestibular").await;
    let turma = app.criar_turma("S1", periodo, curso).await;
    let disciplina = app.criar_disciplina("Matemática", "Exatas").await;
    turma_service::vincular_disciplina(&app.pool, turma, disciplina).await.unwrap();
    let cookie = app.login_coordenador().await;

    let resp = app
        .post_form(&format!("/academico/disciplinas/excluir/{disciplina}/"), "", Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.contar("disciplinas").await, 0);
    assert_eq!(app.contar("turma_disciplinas").await, 0);
}

#[tokio::test]
async fn curso_com_turmas_nao_pode_ser_excluido() {
    let app = TestApp::new().await;
    let periodo = app.criar_periodo(2025, 1).await;
    let ocupado = app.criar_curso("Pré-vestibular").await;
    let livre = app.criar_curso("Inglês").await;
    app.criar_turma("S1", periodo, ocupado).await;
    let cookie = app.login_coordenador().await;

    let resp = app
        .post_form(&format!("/academico/cursos/excluir/{ocupado}/"), "", Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = juntar_cookies(&cookie, &resp);
    assert!(curso_service::existe(&app.pool, ocupado).await.unwrap());

    let html = corpo(app.get("/academico/cursos/pesquisar/", Some(&cookie)).await).await;
    assert!(html.contains("existem turmas associadas"));

    let resp = app
        .post_form(&format!("/academico/cursos/excluir/{livre}/"), "", Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(!curso_service::existe(&app.pool, livre).await.unwrap());
}

#[tokio::test]
async fn curso_criado_em_popup_avisa_a_janela_de_origem() {
    let app = TestApp::new().await;
    let cookie = app.login_coordenador().await;

    let resp = app
        .get("/academico/cursos/cadastrar/?field_name=curso_id", Some(&cookie))
        .await;
    assert!(corpo(resp).await.contains(r#"name="field_name" value="curso_id""#));

    let resp = app
        .post_form(
            "/academico/cursos/cadastrar/",
            "nome=%3Cb%3EIngl%C3%AAs%3C%2Fb%3E&field_name=curso_id",
            Some(&cookie),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = corpo(resp).await;
    assert!(html.contains(r#""type":"add_related""#));
    assert!(html.contains(r#""name":"curso_id""#));
    assert!(html.contains(r#""value":"1""#));
    // O nome com HTML não fecha o <script>
    assert!(html.contains(r#""text":"\u003cb\u003eInglês\u003c/b\u003e""#));
    assert!(!html.contains("<b>Inglês</b>"));

    // Sem field_name: fluxo normal com redirecionamento
    let resp = app
        .post_form("/academico/cursos/cadastrar/", "nome=Espanhol", Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.contar("cursos").await, 2);
}

#[tokio::test]
async fn turma_invalida_volta_ao_formulario_sem_gravar() {
    let app = TestApp::new().await;
    let periodo = app.criar_periodo(2025, 1).await;
    let curso = app.criar_curso("Pré-vestibular").await;
    let cookie = app.login_coordenador().await;

    let corpo_form = format!(
        "nome=S1&capacidade=0&data_inicio=2025-06-30&data_fim=2025-02-01&status=1&periodo_letivo_id={periodo}&curso_id={curso}"
    );
    let resp = app
        .post_form("/academico/turmas/cadastrar/", &corpo_form, Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = corpo(resp).await;
    assert!(html.contains("A capacidade deve ser maior que zero."));
    assert!(html.contains("A data de fim deve ser igual ou posterior"));
    assert_eq!(app.contar("turmas").await, 0);

    // Curso inexistente também é erro de validação
    let corpo_form = format!(
        "nome=S1&capacidade=20&data_inicio=2025-02-01&data_fim=2025-06-30&status=1&periodo_letivo_id={periodo}&curso_id=999"
    );
    let resp = app
        .post_form("/academico/turmas/cadastrar/", &corpo_form, Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(corpo(resp).await.contains("Curso inexistente."));
    assert_eq!(app.contar("turmas").await, 0);
}

#[tokio::test]
async fn periodo_sem_nome_recebe_ano_ponto_semestre() {
    let app = TestApp::new().await;
    let cookie = app.login_coordenador().await;

    let resp = app
        .post_form(
            "/academico/periodos/cadastrar/",
            "nome=&ano=2025&semestre=2&data_inicio=2025-08-01&data_fim=2025-12-15&status=1",
            Some(&cookie),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let periodos = periodo_service::listar_todos(&app.pool).await.unwrap();
    assert_eq!(periodos.len(), 1);
    assert_eq!(periodos[0].nome, "2025.2");
}

#[tokio::test]
async fn edicao_de_aluno_pre_preenche_e_grava() {
    let app = TestApp::new().await;
    let id = app.criar_aluno("Ana").await;
    let cookie = app.login_coordenador().await;

    let html = corpo(app.get(&format!("/academico/alunos/editar/{id}/"), Some(&cookie)).await).await;
    assert!(html.contains(r#"value="Ana""#));

    let resp = app
        .post_form(
            &format!("/academico/alunos/editar/{id}/"),
            "nome=Ana+Souza&cidade=Recife&status=2",
            Some(&cookie),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let (nome, cidade, status): (String, String, i64) =
        sqlx::query_as("SELECT nome, cidade, status FROM alunos WHERE id = ?1")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!((nome.as_str(), cidade.as_str(), status), ("Ana Souza", "Recife", 2));
}

#[tokio::test]
async fn detalhes_da_turma_gerem_os_vinculos() {
    let app = TestApp::new().await;
    let periodo = app.criar_periodo(2025, 1).await;
    let curso = app.criar_curso("Pré-vestibular").await;
    let turma = app.criar_turma("S1", periodo, curso).await;
    let disciplina = app.criar_disciplina("Matemática", "Exatas").await;
    let aluno = app.criar_aluno("Ana").await;
    let (_, professor) = app
        .criar_voluntario("prof", aprosys::models::voluntario::TipoVoluntario::Professor)
        .await;
    let cookie = app.login_coordenador().await;

    let resp = app
        .post_form(
            &format!("/academico/turmas/{turma}/disciplinas/"),
            &format!("disciplina_id={disciplina}"),
            Some(&cookie),
        )
        .await;
    assert_eq!(location(&resp), format!("/academico/turmas/detalhes/{turma}/"));

    // Repetir o vínculo não duplica nem falha
    app.post_form(
        &format!("/academico/turmas/{turma}/disciplinas/"),
        &format!("disciplina_id={disciplina}"),
        Some(&cookie),
    )
    .await;
    assert_eq!(app.contar("turma_disciplinas").await, 1);

    app.post_form(
        &format!("/academico/turmas/{turma}/alunos/"),
        &format!("aluno_id={aluno}"),
        Some(&cookie),
    )
    .await;
    assert_eq!(app.contar("turma_alunos").await, 1);

    let td: i64 = sqlx::query_scalar("SELECT id FROM turma_disciplinas")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    app.post_form(
        &format!("/academico/turmas/{turma}/professores/"),
        &format!("turma_disciplina_id={td}&voluntario_id={professor}"),
        Some(&cookie),
    )
    .await;
    assert_eq!(app.contar("turma_disciplina_professores").await, 1);

    let html = corpo(app.get(&format!("/academico/turmas/detalhes/{turma}/"), Some(&cookie)).await).await;
    assert!(html.contains("Matemática"));
    assert!(html.contains("Ana"));
    assert!(html.contains("Utilizador prof"));

    // Alternar o status da matrícula
    let matricula: i64 = sqlx::query_scalar("SELECT id FROM turma_alunos")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    let resp = app
        .post_form(&format!("/academico/vinculos/aluno/{matricula}/status/"), "", Some(&cookie))
        .await;
    assert_eq!(location(&resp), format!("/academico/turmas/detalhes/{turma}/"));
    let status: i64 = sqlx::query_scalar("SELECT status FROM turma_alunos WHERE id = ?1")
        .bind(matricula)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(status, 0);

    let resp = app
        .post_form("/academico/vinculos/aluno/999/status/", "", Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn registo_publico_valida_e_cria_utilizador() {
    let app = TestApp::new().await;

    let resp = app
        .post_form(
            "/user_registration/",
            "username=joana&nome=Joana&email=joana%40exemplo.org&password1=curta&password2=outra",
            None,
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = corpo(resp).await;
    assert!(html.contains("A senha deve ter pelo menos 8 caracteres."));
    assert!(html.contains("As senhas não coincidem."));
    assert_eq!(app.contar("users").await, 0);

    let valido = "username=joana&nome=Joana&email=joana%40exemplo.org&password1=senha-segura-123&password2=senha-segura-123";
    let resp = app.post_form("/user_registration/", valido, None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/accounts/login/");

    // Username repetido (sem diferenciar maiúsculas)
    let repetido = valido.replace("username=joana", "username=JOANA");
    let resp = app.post_form("/user_registration/", &repetido, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(corpo(resp).await.contains("Já existe um utilizador com este nome."));
    assert_eq!(app.contar("users").await, 1);

    let cookie = app.login("joana").await;
    assert_eq!(app.get("/home/", Some(&cookie)).await.status(), StatusCode::OK);
}
