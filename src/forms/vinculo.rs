// src/forms/vinculo.rs
//
// Formulários do ecrã de detalhes da turma (vincular disciplina, matricular, atribuir professor).
use super::{inteiro_obrigatorio, ErrosFormulario};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VincularDisciplinaForm {
    pub disciplina_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MatricularAlunoForm {
    pub aluno_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AtribuirProfessorForm {
    pub turma_disciplina_id: String,
    pub voluntario_id: String,
}

impl VincularDisciplinaForm {
    pub fn validar(&self) -> Result<i64, ErrosFormulario> {
        let mut erros = ErrosFormulario::new();
        let id = inteiro_obrigatorio(&mut erros, "disciplina_id", &self.disciplina_id);
        id.ok_or(erros)
    }
}

impl MatricularAlunoForm {
    pub fn validar(&self) -> Result<i64, ErrosFormulario> {
        let mut erros = ErrosFormulario::new();
        let id = inteiro_obrigatorio(&mut erros, "aluno_id", &self.aluno_id);
        id.ok_or(erros)
    }
}

impl AtribuirProfessorForm {
    /// `(turma_disciplina_id, voluntario_id)`
    pub fn validar(&self) -> Result<(i64, i64), ErrosFormulario> {
        let mut erros = ErrosFormulario::new();
        let td = inteiro_obrigatorio(&mut erros, "turma_disciplina_id", &self.turma_disciplina_id);
        let vol = inteiro_obrigatorio(&mut erros, "voluntario_id", &self.voluntario_id);
        match (td, vol) {
            (Some(td), Some(vol)) => Ok((td, vol)),
            _ => Err(erros),
        }
    }
}
