// src/services/curso_service.rs
use crate::{
    error::AppResult,
    models::curso::Curso,
    services::pesquisa::{CamposPermitidos, Pesquisa},
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub const CAMPOS_ORDENACAO: CamposPermitidos = &[("nome", "c.nome")];

pub async fn pesquisar(db_pool: &SqlitePool, pesquisa: &Pesquisa) -> AppResult<Vec<Curso>> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT c.id, c.nome FROM cursos c WHERE 1 = 1");
    pesquisa.push_filtro(&mut qb, &["c.nome"]);
    pesquisa.push_ordenacao(&mut qb, "c.id");
    let cursos = qb.build_query_as::<Curso>().fetch_all(db_pool).await?;
    Ok(cursos)
}

pub async fn listar_todos(db_pool: &SqlitePool) -> AppResult<Vec<Curso>> {
    let cursos = sqlx::query_as::<_, Curso>("SELECT id, nome FROM cursos ORDER BY nome COLLATE NOCASE ASC, id ASC")
        .fetch_all(db_pool)
        .await?;
    Ok(cursos)
}

pub async fn buscar(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Curso>> {
    let curso = sqlx::query_as::<_, Curso>("SELECT id, nome FROM cursos WHERE id = ?1")
        .bind(id)
        .fetch_optional(db_pool)
        .await?;
    Ok(curso)
}

pub async fn existe(db_pool: &SqlitePool, id: i64) -> AppResult<bool> {
    Ok(buscar(db_pool, id).await?.is_some())
}

pub async fn criar(db_pool: &SqlitePool, nome: &str) -> AppResult<Curso> {
    let id = sqlx::query("INSERT INTO cursos (nome) VALUES (?1)")
        .bind(nome)
        .execute(db_pool)
        .await?
        .last_insert_rowid();
    tracing::info!("✅ Curso '{}' criado (id {}).", nome, id);
    Ok(Curso {
        id,
        nome: nome.to_string(),
    })
}

pub async fn atualizar(db_pool: &SqlitePool, id: i64, nome: &str) -> AppResult<bool> {
    let rows = sqlx::query("UPDATE cursos SET nome = ?1 WHERE id = ?2")
        .bind(nome)
        .bind(id)
        .execute(db_pool)
        .await?
        .rows_affected();
    Ok(rows > 0)
}

/// Exclusão definitiva num único DELETE. Devolve o número de linhas removidas.
pub async fn excluir(db_pool: &SqlitePool, ids: &[i64]) -> AppResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let mut qb = QueryBuilder::<Sqlite>::new("DELETE FROM cursos WHERE id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let removidos = qb.build().execute(db_pool).await?.rows_affected();
    tracing::info!("🗑️ {} curso(s) excluído(s): {:?}", removidos, ids);
    Ok(removidos)
}
