// src/forms/voluntario.rs
use super::{inteiro_obrigatorio, ErrosFormulario};
use crate::models::voluntario::{StatusProcesso, TipoVoluntario, Voluntario};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoluntarioForm {
    pub user_id: String,
    pub tipo_voluntario: String,
    pub status_processo: String,
}

impl Default for VoluntarioForm {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            tipo_voluntario: String::new(),
            status_processo: StatusProcesso::EmAnalise.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DadosVoluntario {
    pub user_id: i64,
    pub tipo_voluntario: TipoVoluntario,
    pub status_processo: StatusProcesso,
}

impl VoluntarioForm {
    pub fn validar(&self) -> Result<DadosVoluntario, ErrosFormulario> {
        let mut erros = ErrosFormulario::new();

        let user_id = inteiro_obrigatorio(&mut erros, "user_id", &self.user_id);
        let tipo = self.tipo_voluntario.parse::<TipoVoluntario>().ok();
        if tipo.is_none() {
            erros.add("tipo_voluntario", "Selecione o tipo de voluntário.");
        }
        let status = self.status_processo.parse::<StatusProcesso>().ok();
        if status.is_none() {
            erros.add("status_processo", "Status inválido.");
        }

        match (user_id, tipo, status) {
            (Some(user_id), Some(tipo_voluntario), Some(status_processo)) if erros.is_empty() => {
                Ok(DadosVoluntario {
                    user_id,
                    tipo_voluntario,
                    status_processo,
                })
            }
            _ => Err(erros),
        }
    }
}

impl From<&Voluntario> for VoluntarioForm {
    fn from(v: &Voluntario) -> Self {
        Self {
            user_id: v.user_id.to_string(),
            tipo_voluntario: v.tipo_voluntario.as_str().to_string(),
            status_processo: v.status_processo.as_str().to_string(),
        }
    }
}
