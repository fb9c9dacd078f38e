// src/forms/periodo.rs
use super::{data_obrigatoria, inteiro_obrigatorio, opcional, status_binario, ErrosFormulario};
use crate::models::periodo::{nome_padrao, PeriodoLetivo};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PeriodoForm {
    // Campo oculto no formulário; em branco passa a "ano.semestre"
    pub nome: String,
    pub data_inicio: String,
    pub data_fim: String,
    pub ano: String,
    pub semestre: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DadosPeriodo {
    pub nome: String,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub ano: i64,
    pub semestre: i64,
    pub status: i64,
}

impl PeriodoForm {
    pub fn validar(&self) -> Result<DadosPeriodo, ErrosFormulario> {
        let mut erros = ErrosFormulario::new();

        let data_inicio = data_obrigatoria(&mut erros, "data_inicio", &self.data_inicio);
        let data_fim = data_obrigatoria(&mut erros, "data_fim", &self.data_fim);
        if let (Some(inicio), Some(fim)) = (data_inicio, data_fim) {
            if fim < inicio {
                erros.add("data_fim", "A data de fim deve ser igual ou posterior à de início.");
            }
        }

        let ano = inteiro_obrigatorio(&mut erros, "ano", &self.ano);
        if let Some(a) = ano {
            if !(1900..=2100).contains(&a) {
                erros.add("ano", "Ano fora do intervalo permitido.");
            }
        }
        let semestre = inteiro_obrigatorio(&mut erros, "semestre", &self.semestre);
        if let Some(s) = semestre {
            if s != 1 && s != 2 {
                erros.add("semestre", "O semestre deve ser 1 ou 2.");
            }
        }
        let status = status_binario(&mut erros, "status", &self.status);

        match (data_inicio, data_fim, ano, semestre) {
            (Some(data_inicio), Some(data_fim), Some(ano), Some(semestre)) if erros.is_empty() => {
                let nome = match opcional(&self.nome) {
                    n if n.is_empty() => nome_padrao(ano, semestre),
                    n => n,
                };
                Ok(DadosPeriodo {
                    nome,
                    data_inicio,
                    data_fim,
                    ano,
                    semestre,
                    status,
                })
            }
            _ => Err(erros),
        }
    }
}

impl From<&PeriodoLetivo> for PeriodoForm {
    fn from(p: &PeriodoLetivo) -> Self {
        Self {
            nome: p.nome.clone(),
            data_inicio: p.data_inicio.to_string(),
            data_fim: p.data_fim.to_string(),
            ano: p.ano.to_string(),
            semestre: p.semestre.to_string(),
            status: p.status.to_string(),
        }
    }
}
