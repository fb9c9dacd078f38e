// src/services/voluntario_service.rs
use crate::{
    error::AppResult,
    forms::voluntario::DadosVoluntario,
    models::voluntario::{Voluntario, VoluntarioListagem},
    services::pesquisa::{CamposPermitidos, Pesquisa},
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub const CAMPOS_ORDENACAO: CamposPermitidos = &[
    ("nome", "u.nome"),
    ("email", "u.email"),
    ("tipo_voluntario", "v.tipo_voluntario"),
    ("status", "v.status_processo"),
];

const CAMPOS_TEXTO: &[&str] = &["u.nome", "u.email"];

const SELECT_LISTAGEM: &str = r#"
    SELECT v.id, v.user_id, u.nome, u.email, v.tipo_voluntario, v.status_processo
    FROM voluntarios v
    JOIN users u ON u.id = v.user_id
"#;

pub async fn pesquisar(db_pool: &SqlitePool, pesquisa: &Pesquisa) -> AppResult<Vec<VoluntarioListagem>> {
    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_LISTAGEM);
    qb.push(" WHERE 1 = 1");
    pesquisa.push_filtro(&mut qb, CAMPOS_TEXTO);
    pesquisa.push_ordenacao(&mut qb, "v.id");
    let voluntarios = qb.build_query_as::<VoluntarioListagem>().fetch_all(db_pool).await?;
    Ok(voluntarios)
}

/// Voluntários do tipo PROFESSOR (para o `<select>` de atribuição docente).
pub async fn listar_professores(db_pool: &SqlitePool) -> AppResult<Vec<VoluntarioListagem>> {
    let professores = sqlx::query_as::<_, VoluntarioListagem>(&format!(
        "{} WHERE v.tipo_voluntario = 'PROFESSOR' ORDER BY u.nome COLLATE NOCASE ASC, v.id ASC",
        SELECT_LISTAGEM
    ))
    .fetch_all(db_pool)
    .await?;
    Ok(professores)
}

pub async fn buscar(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Voluntario>> {
    let voluntario = sqlx::query_as::<_, Voluntario>(
        "SELECT id, user_id, tipo_voluntario, status_processo FROM voluntarios WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?;
    Ok(voluntario)
}

pub async fn criar(db_pool: &SqlitePool, dados: &DadosVoluntario) -> AppResult<i64> {
    let id = sqlx::query(
        "INSERT INTO voluntarios (user_id, tipo_voluntario, status_processo) VALUES (?1, ?2, ?3)",
    )
    .bind(dados.user_id)
    .bind(dados.tipo_voluntario)
    .bind(dados.status_processo)
    .execute(db_pool)
    .await?
    .last_insert_rowid();
    tracing::info!(
        "✅ Voluntário criado (id {}) para o utilizador {} como {}.",
        id,
        dados.user_id,
        dados.tipo_voluntario.as_str()
    );
    Ok(id)
}

pub async fn atualizar(db_pool: &SqlitePool, id: i64, dados: &DadosVoluntario) -> AppResult<bool> {
    let rows = sqlx::query(
        "UPDATE voluntarios SET user_id = ?1, tipo_voluntario = ?2, status_processo = ?3 WHERE id = ?4",
    )
    .bind(dados.user_id)
    .bind(dados.tipo_voluntario)
    .bind(dados.status_processo)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();
    Ok(rows > 0)
}
