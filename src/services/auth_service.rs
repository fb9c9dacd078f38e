// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{user::User, voluntario::TipoVoluntario},
    services::{
        authz::{Identidade, PapelVoluntario},
        user_service,
    },
};
use sqlx::{FromRow, SqlitePool};

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt (custo {})...", cost);
        bcrypt::hash(&password, cost)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Devolve o utilizador se username e senha estiverem corretos.
pub async fn autenticar(db_pool: &SqlitePool, username: &str, password: &str) -> AppResult<Option<User>> {
    let Some(user) = user_service::find_user_by_username(db_pool, username.trim()).await? else {
        tracing::warn!("Utilizador não encontrado: {}", username);
        return Ok(None);
    };
    if verify_password(password, &user.password_hash).await? {
        Ok(Some(user))
    } else {
        tracing::warn!("Senha incorreta para: {}", username);
        Ok(None)
    }
}

#[derive(FromRow)]
struct LinhaIdentidade {
    id: i64,
    nome: String,
    is_superuser: bool,
    voluntario_id: Option<i64>,
    tipo_voluntario: Option<TipoVoluntario>,
}

/// Carrega a identidade (utilizador + voluntário, se existir) para o guarda de autorização.
pub async fn carregar_identidade(db_pool: &SqlitePool, user_id: i64) -> AppResult<Option<Identidade>> {
    let linha = sqlx::query_as::<_, LinhaIdentidade>(
        r#"
        SELECT u.id, u.nome, u.is_superuser,
               v.id AS voluntario_id, v.tipo_voluntario
        FROM users u
        LEFT JOIN voluntarios v ON v.user_id = u.id
        WHERE u.id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;

    Ok(linha.map(|l| Identidade {
        user_id: l.id,
        nome: l.nome,
        is_superuser: l.is_superuser,
        voluntario: match (l.voluntario_id, l.tipo_voluntario) {
            (Some(voluntario_id), Some(tipo)) => Some(PapelVoluntario { voluntario_id, tipo }),
            _ => None,
        },
    }))
}
