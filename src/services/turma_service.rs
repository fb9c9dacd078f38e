// src/services/turma_service.rs
use crate::{
    error::AppResult,
    forms::turma::DadosTurma,
    models::{
        turma::{Turma, TurmaListagem},
        vinculo::{AtribuicaoDetalhe, TipoVinculo, TurmaAlunoDetalhe, TurmaDisciplinaDetalhe},
    },
    services::pesquisa::{CamposPermitidos, Escopo, Pesquisa},
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub const CAMPOS_ORDENACAO: CamposPermitidos = &[
    ("nome", "t.nome"),
    ("capacidade", "t.capacidade"),
    ("data_inicio", "t.data_inicio"),
    ("data_fim", "t.data_fim"),
    ("status", "t.status"),
    ("periodo_letivo", "p.nome"),
];

const CAMPOS_TEXTO: &[&str] = &["t.nome", "p.nome"];

const SELECT_LISTAGEM: &str = r#"
    SELECT t.id, t.nome, t.capacidade, t.data_inicio, t.data_fim, t.status,
           p.nome AS periodo_nome, c.nome AS curso_nome
    FROM turmas t
    JOIN periodos_letivos p ON p.id = t.periodo_letivo_id
    JOIN cursos c ON c.id = t.curso_id
"#;

pub async fn pesquisar(db_pool: &SqlitePool, escopo: Escopo, pesquisa: &Pesquisa) -> AppResult<Vec<TurmaListagem>> {
    tracing::debug!("Pesquisando turmas: {:?} {:?}", escopo, pesquisa);
    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_LISTAGEM);
    qb.push(" WHERE 1 = 1");

    if let Escopo::Professor { voluntario_id } = escopo {
        qb.push(
            r#"
            AND t.id IN (
                SELECT td.turma_id
                FROM turma_disciplina_professores tdp
                JOIN turma_disciplinas td ON td.id = tdp.turma_disciplina_id
                WHERE tdp.status = 1 AND td.status = 1
                  AND tdp.voluntario_id = "#,
        )
        .push_bind(voluntario_id)
        .push(")");
    }

    pesquisa.push_filtro(&mut qb, CAMPOS_TEXTO);
    pesquisa.push_ordenacao(&mut qb, "t.id");

    let turmas = qb.build_query_as::<TurmaListagem>().fetch_all(db_pool).await?;
    Ok(turmas)
}

pub async fn buscar(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Turma>> {
    let turma = sqlx::query_as::<_, Turma>(
        r#"
        SELECT id, nome, capacidade, data_inicio, data_fim, status, periodo_letivo_id, curso_id
        FROM turmas WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?;
    Ok(turma)
}

pub async fn buscar_listagem(db_pool: &SqlitePool, id: i64) -> AppResult<Option<TurmaListagem>> {
    let turma = sqlx::query_as::<_, TurmaListagem>(&format!("{} WHERE t.id = ?1", SELECT_LISTAGEM))
        .bind(id)
        .fetch_optional(db_pool)
        .await?;
    Ok(turma)
}

pub async fn criar(db_pool: &SqlitePool, dados: &DadosTurma) -> AppResult<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO turmas (nome, capacidade, data_inicio, data_fim, status, periodo_letivo_id, curso_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&dados.nome)
    .bind(dados.capacidade)
    .bind(dados.data_inicio)
    .bind(dados.data_fim)
    .bind(dados.status)
    .bind(dados.periodo_letivo_id)
    .bind(dados.curso_id)
    .execute(db_pool)
    .await?
    .last_insert_rowid();
    tracing::info!("✅ Turma '{}' criada (id {}).", dados.nome, id);
    Ok(id)
}

pub async fn atualizar(db_pool: &SqlitePool, id: i64, dados: &DadosTurma) -> AppResult<bool> {
    let rows = sqlx::query(
        r#"
        UPDATE turmas
        SET nome = ?1, capacidade = ?2, data_inicio = ?3, data_fim = ?4, status = ?5,
            periodo_letivo_id = ?6, curso_id = ?7
        WHERE id = ?8
        "#,
    )
    .bind(&dados.nome)
    .bind(dados.capacidade)
    .bind(dados.data_inicio)
    .bind(dados.data_fim)
    .bind(dados.status)
    .bind(dados.periodo_letivo_id)
    .bind(dados.curso_id)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();
    Ok(rows > 0)
}

// --- Vínculos da turma ---

pub async fn listar_disciplinas(db_pool: &SqlitePool, turma_id: i64) -> AppResult<Vec<TurmaDisciplinaDetalhe>> {
    let linhas = sqlx::query_as::<_, TurmaDisciplinaDetalhe>(
        r#"
        SELECT td.id, td.disciplina_id, d.nome AS disciplina_nome, td.status
        FROM turma_disciplinas td
        JOIN disciplinas d ON d.id = td.disciplina_id
        WHERE td.turma_id = ?1
        ORDER BY d.nome COLLATE NOCASE ASC, td.id ASC
        "#,
    )
    .bind(turma_id)
    .fetch_all(db_pool)
    .await?;
    Ok(linhas)
}

pub async fn listar_alunos(db_pool: &SqlitePool, turma_id: i64) -> AppResult<Vec<TurmaAlunoDetalhe>> {
    let linhas = sqlx::query_as::<_, TurmaAlunoDetalhe>(
        r#"
        SELECT ta.id, ta.aluno_id, a.nome AS aluno_nome, ta.status
        FROM turma_alunos ta
        JOIN alunos a ON a.id = ta.aluno_id
        WHERE ta.turma_id = ?1
        ORDER BY a.nome COLLATE NOCASE ASC, ta.id ASC
        "#,
    )
    .bind(turma_id)
    .fetch_all(db_pool)
    .await?;
    Ok(linhas)
}

pub async fn listar_atribuicoes(db_pool: &SqlitePool, turma_id: i64) -> AppResult<Vec<AtribuicaoDetalhe>> {
    let linhas = sqlx::query_as::<_, AtribuicaoDetalhe>(
        r#"
        SELECT tdp.id, tdp.turma_disciplina_id, d.nome AS disciplina_nome,
               tdp.voluntario_id, u.nome AS professor_nome, tdp.status
        FROM turma_disciplina_professores tdp
        JOIN turma_disciplinas td ON td.id = tdp.turma_disciplina_id
        JOIN disciplinas d ON d.id = td.disciplina_id
        JOIN voluntarios v ON v.id = tdp.voluntario_id
        JOIN users u ON u.id = v.user_id
        WHERE td.turma_id = ?1
        ORDER BY d.nome COLLATE NOCASE ASC, u.nome COLLATE NOCASE ASC, tdp.id ASC
        "#,
    )
    .bind(turma_id)
    .fetch_all(db_pool)
    .await?;
    Ok(linhas)
}

pub async fn vincular_disciplina(db_pool: &SqlitePool, turma_id: i64, disciplina_id: i64) -> AppResult<i64> {
    let id = sqlx::query("INSERT INTO turma_disciplinas (turma_id, disciplina_id) VALUES (?1, ?2)")
        .bind(turma_id)
        .bind(disciplina_id)
        .execute(db_pool)
        .await?
        .last_insert_rowid();
    tracing::info!("🔗 Disciplina {} vinculada à turma {}.", disciplina_id, turma_id);
    Ok(id)
}

pub async fn matricular_aluno(db_pool: &SqlitePool, turma_id: i64, aluno_id: i64) -> AppResult<i64> {
    let id = sqlx::query("INSERT INTO turma_alunos (turma_id, aluno_id) VALUES (?1, ?2)")
        .bind(turma_id)
        .bind(aluno_id)
        .execute(db_pool)
        .await?
        .last_insert_rowid();
    tracing::info!("🔗 Aluno {} matriculado na turma {}.", aluno_id, turma_id);
    Ok(id)
}

/// Atribui um professor a uma disciplina da turma. `None` se a turma-disciplina
/// não pertencer a esta turma.
pub async fn atribuir_professor(
    db_pool: &SqlitePool,
    turma_id: i64,
    turma_disciplina_id: i64,
    voluntario_id: i64,
) -> AppResult<Option<i64>> {
    let pertence: Option<i64> =
        sqlx::query_scalar("SELECT id FROM turma_disciplinas WHERE id = ?1 AND turma_id = ?2")
            .bind(turma_disciplina_id)
            .bind(turma_id)
            .fetch_optional(db_pool)
            .await?;
    if pertence.is_none() {
        tracing::warn!(
            "Turma-disciplina {} não pertence à turma {}.",
            turma_disciplina_id,
            turma_id
        );
        return Ok(None);
    }

    let id = sqlx::query(
        "INSERT INTO turma_disciplina_professores (turma_disciplina_id, voluntario_id) VALUES (?1, ?2)",
    )
    .bind(turma_disciplina_id)
    .bind(voluntario_id)
    .execute(db_pool)
    .await?
    .last_insert_rowid();
    tracing::info!(
        "🔗 Voluntário {} atribuído à turma-disciplina {}.",
        voluntario_id,
        turma_disciplina_id
    );
    Ok(Some(id))
}

/// Inverte o status (ativo/inativo) de um vínculo e devolve a turma a que pertence.
pub async fn alternar_status_vinculo(db_pool: &SqlitePool, tipo: TipoVinculo, id: i64) -> AppResult<Option<i64>> {
    let sql_turma = match tipo {
        TipoVinculo::Disciplina => "SELECT turma_id FROM turma_disciplinas WHERE id = ?1",
        TipoVinculo::Aluno => "SELECT turma_id FROM turma_alunos WHERE id = ?1",
        TipoVinculo::Professor => {
            r#"
            SELECT td.turma_id
            FROM turma_disciplina_professores tdp
            JOIN turma_disciplinas td ON td.id = tdp.turma_disciplina_id
            WHERE tdp.id = ?1
            "#
        }
    };
    let turma_id: Option<i64> = sqlx::query_scalar(sql_turma)
        .bind(id)
        .fetch_optional(db_pool)
        .await?;
    let Some(turma_id) = turma_id else {
        return Ok(None);
    };

    // `tipo.tabela()` vem de um enum fechado, não do pedido
    let sql = format!(
        "UPDATE {} SET status = CASE WHEN status = 1 THEN 0 ELSE 1 END WHERE id = ?1",
        tipo.tabela()
    );
    sqlx::query(&sql).bind(id).execute(db_pool).await?;
    tracing::info!("🔁 Status do vínculo {:?} {} alternado.", tipo, id);
    Ok(Some(turma_id))
}
