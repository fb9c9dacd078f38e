// src/services/disciplina_service.rs
use crate::{
    error::AppResult,
    forms::disciplina::DadosDisciplina,
    models::disciplina::Disciplina,
    services::pesquisa::{CamposPermitidos, Escopo, Pesquisa},
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub const CAMPOS_ORDENACAO: CamposPermitidos = &[
    ("nome", "d.nome"),
    ("area_conhecimento", "d.area_conhecimento"),
    ("status", "d.status"),
];

const CAMPOS_TEXTO: &[&str] = &["d.nome", "d.area_conhecimento"];

pub async fn pesquisar(db_pool: &SqlitePool, escopo: Escopo, pesquisa: &Pesquisa) -> AppResult<Vec<Disciplina>> {
    tracing::debug!("Pesquisando disciplinas: {:?} {:?}", escopo, pesquisa);
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT d.id, d.nome, d.area_conhecimento, d.ementa, d.status FROM disciplinas d WHERE 1 = 1",
    );

    if let Escopo::Professor { voluntario_id } = escopo {
        qb.push(
            r#"
            AND d.id IN (
                SELECT td.disciplina_id
                FROM turma_disciplina_professores tdp
                JOIN turma_disciplinas td ON td.id = tdp.turma_disciplina_id
                WHERE tdp.status = 1 AND td.status = 1
                  AND tdp.voluntario_id = "#,
        )
        .push_bind(voluntario_id)
        .push(")");
    }

    pesquisa.push_filtro(&mut qb, CAMPOS_TEXTO);
    pesquisa.push_ordenacao(&mut qb, "d.id");

    let disciplinas = qb.build_query_as::<Disciplina>().fetch_all(db_pool).await?;
    Ok(disciplinas)
}

pub async fn buscar(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Disciplina>> {
    let disciplina = sqlx::query_as::<_, Disciplina>(
        "SELECT id, nome, area_conhecimento, ementa, status FROM disciplinas WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?;
    Ok(disciplina)
}

pub async fn listar_ativas(db_pool: &SqlitePool) -> AppResult<Vec<Disciplina>> {
    let disciplinas = sqlx::query_as::<_, Disciplina>(
        "SELECT id, nome, area_conhecimento, ementa, status FROM disciplinas WHERE status = 1 ORDER BY nome COLLATE NOCASE ASC, id ASC",
    )
    .fetch_all(db_pool)
    .await?;
    Ok(disciplinas)
}

pub async fn criar(db_pool: &SqlitePool, dados: &DadosDisciplina) -> AppResult<i64> {
    let id = sqlx::query(
        "INSERT INTO disciplinas (nome, area_conhecimento, ementa, status) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&dados.nome)
    .bind(&dados.area_conhecimento)
    .bind(&dados.ementa)
    .bind(dados.status)
    .execute(db_pool)
    .await?
    .last_insert_rowid();
    tracing::info!("✅ Disciplina '{}' criada (id {}).", dados.nome, id);
    Ok(id)
}

pub async fn atualizar(db_pool: &SqlitePool, id: i64, dados: &DadosDisciplina) -> AppResult<bool> {
    let rows = sqlx::query(
        "UPDATE disciplinas SET nome = ?1, area_conhecimento = ?2, ementa = ?3, status = ?4 WHERE id = ?5",
    )
    .bind(&dados.nome)
    .bind(&dados.area_conhecimento)
    .bind(&dados.ementa)
    .bind(dados.status)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();
    Ok(rows > 0)
}

/// Exclusão definitiva (os vínculos com turmas caem por ON DELETE CASCADE).
pub async fn excluir(db_pool: &SqlitePool, ids: &[i64]) -> AppResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let mut qb = QueryBuilder::<Sqlite>::new("DELETE FROM disciplinas WHERE id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let removidas = qb.build().execute(db_pool).await?.rows_affected();
    tracing::info!("🗑️ {} disciplina(s) excluída(s): {:?}", removidas, ids);
    Ok(removidas)
}
