// src/services/aluno_service.rs
use crate::{
    error::AppResult,
    forms::aluno::DadosAluno,
    models::aluno::{Aluno, AlunoListagem},
    services::pesquisa::{CamposPermitidos, Escopo, Pesquisa},
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub const CAMPOS_ORDENACAO: CamposPermitidos = &[
    ("nome", "a.nome"),
    ("email", "a.email"),
    ("cidade", "a.cidade"),
    ("nascimento", "a.nascimento"),
    ("status", "a.status"),
];

const CAMPOS_TEXTO: &[&str] = &["a.nome"];

/// Alunos visíveis para o escopo, filtrados e ordenados.
pub async fn pesquisar(db_pool: &SqlitePool, escopo: Escopo, pesquisa: &Pesquisa) -> AppResult<Vec<AlunoListagem>> {
    tracing::debug!("Pesquisando alunos: {:?} {:?}", escopo, pesquisa);
    let mut qb = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT a.id, a.nome, a.email, a.contato, a.cidade, a.status,
               c.nome AS curso_interesse
        FROM alunos a
        LEFT JOIN cursos c ON c.id = a.curso_interesse_id
        WHERE 1 = 1
        "#,
    );

    if let Escopo::Professor { voluntario_id } = escopo {
        // atribuições ativas -> turmas -> matrículas ativas
        qb.push(
            r#"
            AND a.id IN (
                SELECT ta.aluno_id
                FROM turma_alunos ta
                JOIN turma_disciplinas td ON td.turma_id = ta.turma_id
                JOIN turma_disciplina_professores tdp ON tdp.turma_disciplina_id = td.id
                WHERE ta.status = 1 AND td.status = 1 AND tdp.status = 1
                  AND tdp.voluntario_id = "#,
        )
        .push_bind(voluntario_id)
        .push(")");
    }

    pesquisa.push_filtro(&mut qb, CAMPOS_TEXTO);
    pesquisa.push_ordenacao(&mut qb, "a.id");

    let alunos = qb.build_query_as::<AlunoListagem>().fetch_all(db_pool).await?;
    tracing::debug!("Encontrados {} alunos.", alunos.len());
    Ok(alunos)
}

pub async fn buscar(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Aluno>> {
    let aluno = sqlx::query_as::<_, Aluno>("SELECT * FROM alunos WHERE id = ?1")
        .bind(id)
        .fetch_optional(db_pool)
        .await?;
    Ok(aluno)
}

pub async fn criar(db_pool: &SqlitePool, dados: &DadosAluno) -> AppResult<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO alunos (
            nome, email, contato, nascimento, nacionalidade, naturalidade, estado_civil,
            nome_pai, escolaridade_pai, nome_mae, escolaridade_mae, renda_familiar,
            rua, numero, complemento, bairro, cidade, estado, cep,
            status, curso_interesse_id, periodo_interesse_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)
        "#,
    )
    .bind(&dados.nome)
    .bind(&dados.email)
    .bind(&dados.contato)
    .bind(dados.nascimento)
    .bind(&dados.nacionalidade)
    .bind(&dados.naturalidade)
    .bind(&dados.estado_civil)
    .bind(&dados.nome_pai)
    .bind(&dados.escolaridade_pai)
    .bind(&dados.nome_mae)
    .bind(&dados.escolaridade_mae)
    .bind(&dados.renda_familiar)
    .bind(&dados.rua)
    .bind(&dados.numero)
    .bind(&dados.complemento)
    .bind(&dados.bairro)
    .bind(&dados.cidade)
    .bind(&dados.estado)
    .bind(&dados.cep)
    .bind(dados.status.valor())
    .bind(dados.curso_interesse_id)
    .bind(dados.periodo_interesse_id)
    .execute(db_pool)
    .await?
    .last_insert_rowid();

    tracing::info!("✅ Aluno '{}' matriculado (id {}).", dados.nome, id);
    Ok(id)
}

/// Atualiza o aluno; `false` se o ID não existir.
pub async fn atualizar(db_pool: &SqlitePool, id: i64, dados: &DadosAluno) -> AppResult<bool> {
    let rows_affected = sqlx::query(
        r#"
        UPDATE alunos SET
            nome = ?1, email = ?2, contato = ?3, nascimento = ?4, nacionalidade = ?5,
            naturalidade = ?6, estado_civil = ?7, nome_pai = ?8, escolaridade_pai = ?9,
            nome_mae = ?10, escolaridade_mae = ?11, renda_familiar = ?12, rua = ?13,
            numero = ?14, complemento = ?15, bairro = ?16, cidade = ?17, estado = ?18,
            cep = ?19, status = ?20, curso_interesse_id = ?21, periodo_interesse_id = ?22
        WHERE id = ?23
        "#,
    )
    .bind(&dados.nome)
    .bind(&dados.email)
    .bind(&dados.contato)
    .bind(dados.nascimento)
    .bind(&dados.nacionalidade)
    .bind(&dados.naturalidade)
    .bind(&dados.estado_civil)
    .bind(&dados.nome_pai)
    .bind(&dados.escolaridade_pai)
    .bind(&dados.nome_mae)
    .bind(&dados.escolaridade_mae)
    .bind(&dados.renda_familiar)
    .bind(&dados.rua)
    .bind(&dados.numero)
    .bind(&dados.complemento)
    .bind(&dados.bairro)
    .bind(&dados.cidade)
    .bind(&dados.estado)
    .bind(&dados.cep)
    .bind(dados.status.valor())
    .bind(dados.curso_interesse_id)
    .bind(dados.periodo_interesse_id)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Falha ao atualizar aluno: id {} não encontrado.", id);
        return Ok(false);
    }
    tracing::info!("✅ Aluno {} atualizado.", id);
    Ok(true)
}

/// Alunos ativos para o `<select>` de matrícula.
pub async fn listar_ativos(db_pool: &SqlitePool) -> AppResult<Vec<(i64, String)>> {
    let alunos = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, nome FROM alunos WHERE status = 1 ORDER BY nome COLLATE NOCASE ASC, id ASC",
    )
    .fetch_all(db_pool)
    .await?;
    Ok(alunos)
}
