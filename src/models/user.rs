// src/models/user.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

// Representa um utilizador lido da tabela 'users'
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub nome: String,
    pub email: String,
    pub contato: String,
    pub is_superuser: bool,
    pub created_at: NaiveDateTime,
}

// Struct para dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    // Destino após login (preenchido pelo redirecionamento do middleware)
    #[serde(default)]
    pub next: String,
}

/// Linha reduzida para preencher o `<select>` de utilizadores no formulário de voluntário.
#[derive(Debug, Clone, FromRow)]
pub struct UsuarioOpcao {
    pub id: i64,
    pub username: String,
    pub nome: String,
}
