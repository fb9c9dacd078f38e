// src/models/curso.rs
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Curso {
    pub id: i64,
    pub nome: String,
}
