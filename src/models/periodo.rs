// src/models/periodo.rs
use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PeriodoLetivo {
    pub id: i64,
    pub nome: String,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub ano: i64,
    pub semestre: i64,
    pub status: i64,
}

impl PeriodoLetivo {
    pub fn status_rotulo(&self) -> &'static str {
        super::rotulo_status(self.status)
    }
}

/// Nome usado quando o formulário deixa o campo em branco (ex: "2025.1").
pub fn nome_padrao(ano: i64, semestre: i64) -> String {
    format!("{}.{}", ano, semestre)
}
