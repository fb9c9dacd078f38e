// src/services/user_service.rs
use crate::{
    error::AppResult,
    forms::registro::NovoUsuario,
    models::user::{User, UsuarioOpcao},
    services::auth_service,
};
use sqlx::SqlitePool;

const COLUNAS_USER: &str =
    "id, username, password_hash, nome, email, contato, is_superuser, created_at";

/// Busca um utilizador pelo username (login).
pub async fn find_user_by_username(db_pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por username: {}", username);
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = ?1",
        COLUNAS_USER
    ))
    .bind(username)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: i64) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por ID: {}", user_id);
    let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?1", COLUNAS_USER))
        .bind(user_id)
        .fetch_optional(db_pool)
        .await?;
    Ok(user)
}

pub async fn username_existe(db_pool: &SqlitePool, username: &str) -> AppResult<bool> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?1")
        .bind(username)
        .fetch_one(db_pool)
        .await?;
    Ok(total > 0)
}

/// Cria um utilizador comum (sem superuser) e devolve o seu ID.
pub async fn criar_usuario(db_pool: &SqlitePool, novo: &NovoUsuario, bcrypt_cost: u32) -> AppResult<i64> {
    tracing::info!("Tentando criar utilizador: {}", novo.username);
    let password_hash = auth_service::hash_password(&novo.password, bcrypt_cost).await?;

    let id = sqlx::query(
        r#"
        INSERT INTO users (username, password_hash, nome, email, contato)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&novo.username)
    .bind(&password_hash)
    .bind(&novo.nome)
    .bind(&novo.email)
    .bind(&novo.contato)
    .execute(db_pool)
    .await?
    .last_insert_rowid();

    tracing::info!("✅ Utilizador '{}' criado com sucesso (id {}).", novo.username, id);
    Ok(id)
}

/// Garante que existe um superutilizador com este username (arranque).
/// Se já existir, só marca `is_superuser`; a senha não é alterada.
pub async fn garantir_superusuario(
    db_pool: &SqlitePool,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> AppResult<i64> {
    if let Some(user) = find_user_by_username(db_pool, username).await? {
        if !user.is_superuser {
            sqlx::query("UPDATE users SET is_superuser = 1 WHERE id = ?1")
                .bind(user.id)
                .execute(db_pool)
                .await?;
            tracing::info!("🔑 Utilizador '{}' promovido a superutilizador.", username);
        }
        return Ok(user.id);
    }

    let password_hash = auth_service::hash_password(password, bcrypt_cost).await?;
    let id = sqlx::query(
        "INSERT INTO users (username, password_hash, nome, is_superuser) VALUES (?1, ?2, ?3, 1)",
    )
    .bind(username)
    .bind(&password_hash)
    .bind(username)
    .execute(db_pool)
    .await?
    .last_insert_rowid();
    tracing::info!("🔑 Superutilizador '{}' criado.", username);
    Ok(id)
}

/// Utilizadores para o `<select>` do formulário de voluntário.
pub async fn listar_opcoes(db_pool: &SqlitePool) -> AppResult<Vec<UsuarioOpcao>> {
    let users = sqlx::query_as::<_, UsuarioOpcao>(
        "SELECT id, username, nome FROM users ORDER BY nome COLLATE NOCASE ASC, id ASC",
    )
    .fetch_all(db_pool)
    .await?;
    Ok(users)
}
