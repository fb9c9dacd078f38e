// src/forms/disciplina.rs
use super::{obrigatorio, opcional, status_binario, ErrosFormulario};
use crate::models::disciplina::Disciplina;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DisciplinaForm {
    pub nome: String,
    pub area_conhecimento: String,
    pub ementa: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DadosDisciplina {
    pub nome: String,
    pub area_conhecimento: String,
    pub ementa: String,
    pub status: i64,
}

impl DisciplinaForm {
    pub fn validar(&self) -> Result<DadosDisciplina, ErrosFormulario> {
        let mut erros = ErrosFormulario::new();
        let dados = DadosDisciplina {
            nome: obrigatorio(&mut erros, "nome", &self.nome),
            area_conhecimento: obrigatorio(&mut erros, "area_conhecimento", &self.area_conhecimento),
            ementa: opcional(&self.ementa),
            status: status_binario(&mut erros, "status", &self.status),
        };
        erros.ou(dados)
    }
}

impl From<&Disciplina> for DisciplinaForm {
    fn from(d: &Disciplina) -> Self {
        Self {
            nome: d.nome.clone(),
            area_conhecimento: d.area_conhecimento.clone(),
            ementa: d.ementa.clone(),
            status: d.status.to_string(),
        }
    }
}
