// src/models/turma.rs
use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Turma {
    pub id: i64,
    pub nome: String,
    pub capacidade: i64,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub status: i64,
    pub periodo_letivo_id: i64,
    pub curso_id: i64,
}

/// Turma com os nomes do período letivo e do curso já resolvidos.
#[derive(Debug, Clone, FromRow)]
pub struct TurmaListagem {
    pub id: i64,
    pub nome: String,
    pub capacidade: i64,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub status: i64,
    pub periodo_nome: String,
    pub curso_nome: String,
}

impl TurmaListagem {
    pub fn status_rotulo(&self) -> &'static str {
        super::rotulo_status(self.status)
    }
}
