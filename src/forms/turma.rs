// src/forms/turma.rs
use super::{data_obrigatoria, inteiro_obrigatorio, obrigatorio, status_binario, ErrosFormulario};
use crate::models::turma::Turma;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TurmaForm {
    pub nome: String,
    pub capacidade: String,
    pub data_inicio: String,
    pub data_fim: String,
    pub status: String,
    pub periodo_letivo_id: String,
    pub curso_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DadosTurma {
    pub nome: String,
    pub capacidade: i64,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub status: i64,
    pub periodo_letivo_id: i64,
    pub curso_id: i64,
}

impl TurmaForm {
    pub fn validar(&self) -> Result<DadosTurma, ErrosFormulario> {
        let mut erros = ErrosFormulario::new();

        let nome = obrigatorio(&mut erros, "nome", &self.nome);
        let capacidade = inteiro_obrigatorio(&mut erros, "capacidade", &self.capacidade);
        if matches!(capacidade, Some(c) if c <= 0) {
            erros.add("capacidade", "A capacidade deve ser maior que zero.");
        }
        let data_inicio = data_obrigatoria(&mut erros, "data_inicio", &self.data_inicio);
        let data_fim = data_obrigatoria(&mut erros, "data_fim", &self.data_fim);
        if let (Some(inicio), Some(fim)) = (data_inicio, data_fim) {
            if fim < inicio {
                erros.add("data_fim", "A data de fim deve ser igual ou posterior à de início.");
            }
        }
        let status = status_binario(&mut erros, "status", &self.status);
        let periodo_letivo_id = inteiro_obrigatorio(&mut erros, "periodo_letivo_id", &self.periodo_letivo_id);
        let curso_id = inteiro_obrigatorio(&mut erros, "curso_id", &self.curso_id);

        match (capacidade, data_inicio, data_fim, periodo_letivo_id, curso_id) {
            (Some(capacidade), Some(data_inicio), Some(data_fim), Some(periodo_letivo_id), Some(curso_id))
                if erros.is_empty() =>
            {
                Ok(DadosTurma {
                    nome,
                    capacidade,
                    data_inicio,
                    data_fim,
                    status,
                    periodo_letivo_id,
                    curso_id,
                })
            }
            _ => Err(erros),
        }
    }
}

impl From<&Turma> for TurmaForm {
    fn from(t: &Turma) -> Self {
        Self {
            nome: t.nome.clone(),
            capacidade: t.capacidade.to_string(),
            data_inicio: t.data_inicio.to_string(),
            data_fim: t.data_fim.to_string(),
            status: t.status.to_string(),
            periodo_letivo_id: t.periodo_letivo_id.to_string(),
            curso_id: t.curso_id.to_string(),
        }
    }
}
