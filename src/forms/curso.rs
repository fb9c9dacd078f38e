// src/forms/curso.rs
use super::{obrigatorio, ErrosFormulario};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CursoForm {
    pub nome: String,
    // Presente quando o formulário foi aberto em popup a partir de outro formulário
    pub field_name: String,
}

impl CursoForm {
    pub fn validar(&self) -> Result<String, ErrosFormulario> {
        let mut erros = ErrosFormulario::new();
        let nome = obrigatorio(&mut erros, "nome", &self.nome);
        erros.ou(nome)
    }

    pub fn field_name(&self) -> Option<&str> {
        Some(self.field_name.trim()).filter(|f| !f.is_empty())
    }
}
