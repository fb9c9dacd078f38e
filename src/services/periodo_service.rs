// src/services/periodo_service.rs
use crate::{
    error::AppResult,
    forms::periodo::DadosPeriodo,
    models::periodo::PeriodoLetivo,
    services::pesquisa::{CamposPermitidos, Pesquisa},
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub const CAMPOS_ORDENACAO: CamposPermitidos = &[
    ("nome", "p.nome"),
    ("ano", "p.ano"),
    ("semestre", "p.semestre"),
    ("data_inicio", "p.data_inicio"),
    ("data_fim", "p.data_fim"),
    ("status", "p.status"),
];

// ano e semestre são inteiros: a pesquisa compara o texto
const CAMPOS_TEXTO: &[&str] = &["p.nome", "CAST(p.ano AS TEXT)", "CAST(p.semestre AS TEXT)"];

const COLUNAS: &str = "p.id, p.nome, p.data_inicio, p.data_fim, p.ano, p.semestre, p.status";

pub async fn pesquisar(db_pool: &SqlitePool, pesquisa: &Pesquisa) -> AppResult<Vec<PeriodoLetivo>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM periodos_letivos p WHERE 1 = 1", COLUNAS));
    pesquisa.push_filtro(&mut qb, CAMPOS_TEXTO);
    pesquisa.push_ordenacao(&mut qb, "p.id");
    let periodos = qb.build_query_as::<PeriodoLetivo>().fetch_all(db_pool).await?;
    Ok(periodos)
}

pub async fn listar_todos(db_pool: &SqlitePool) -> AppResult<Vec<PeriodoLetivo>> {
    let periodos = sqlx::query_as::<_, PeriodoLetivo>(&format!(
        "SELECT {} FROM periodos_letivos p ORDER BY p.ano DESC, p.semestre DESC, p.id DESC",
        COLUNAS
    ))
    .fetch_all(db_pool)
    .await?;
    Ok(periodos)
}

pub async fn buscar(db_pool: &SqlitePool, id: i64) -> AppResult<Option<PeriodoLetivo>> {
    let periodo = sqlx::query_as::<_, PeriodoLetivo>(&format!(
        "SELECT {} FROM periodos_letivos p WHERE p.id = ?1",
        COLUNAS
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?;
    Ok(periodo)
}

pub async fn existe(db_pool: &SqlitePool, id: i64) -> AppResult<bool> {
    Ok(buscar(db_pool, id).await?.is_some())
}

pub async fn criar(db_pool: &SqlitePool, dados: &DadosPeriodo) -> AppResult<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO periodos_letivos (nome, data_inicio, data_fim, ano, semestre, status)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&dados.nome)
    .bind(dados.data_inicio)
    .bind(dados.data_fim)
    .bind(dados.ano)
    .bind(dados.semestre)
    .bind(dados.status)
    .execute(db_pool)
    .await?
    .last_insert_rowid();
    tracing::info!("✅ Período letivo '{}' criado (id {}).", dados.nome, id);
    Ok(id)
}

pub async fn atualizar(db_pool: &SqlitePool, id: i64, dados: &DadosPeriodo) -> AppResult<bool> {
    let rows = sqlx::query(
        r#"
        UPDATE periodos_letivos
        SET nome = ?1, data_inicio = ?2, data_fim = ?3, ano = ?4, semestre = ?5, status = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&dados.nome)
    .bind(dados.data_inicio)
    .bind(dados.data_fim)
    .bind(dados.ano)
    .bind(dados.semestre)
    .bind(dados.status)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();
    Ok(rows > 0)
}
