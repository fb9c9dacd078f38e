// src/forms/aluno.rs
use super::{data_opcional, id_opcional, obrigatorio, opcional, ErrosFormulario};
use crate::models::aluno::{Aluno, StatusAluno};
use chrono::NaiveDate;
use serde::Deserialize;

/// Campos do formulário de matrícula/edição de aluno, tal como enviados pelo browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlunoForm {
    pub nome: String,
    pub email: String,
    pub contato: String,
    pub nascimento: String,
    pub nacionalidade: String,
    pub naturalidade: String,
    pub estado_civil: String,
    pub nome_pai: String,
    pub escolaridade_pai: String,
    pub nome_mae: String,
    pub escolaridade_mae: String,
    pub renda_familiar: String,
    pub rua: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub status: String,
    pub curso_interesse_id: String,
    pub periodo_interesse_id: String,
}

impl Default for AlunoForm {
    // Um aluno novo começa "Ativo"
    fn default() -> Self {
        Self {
            nome: String::new(),
            email: String::new(),
            contato: String::new(),
            nascimento: String::new(),
            nacionalidade: String::new(),
            naturalidade: String::new(),
            estado_civil: String::new(),
            nome_pai: String::new(),
            escolaridade_pai: String::new(),
            nome_mae: String::new(),
            escolaridade_mae: String::new(),
            renda_familiar: String::new(),
            rua: String::new(),
            numero: String::new(),
            complemento: String::new(),
            bairro: String::new(),
            cidade: String::new(),
            estado: String::new(),
            cep: String::new(),
            status: StatusAluno::default().valor().to_string(),
            curso_interesse_id: String::new(),
            periodo_interesse_id: String::new(),
        }
    }
}

/// Dados validados, prontos para INSERT/UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct DadosAluno {
    pub nome: String,
    pub email: String,
    pub contato: String,
    pub nascimento: Option<NaiveDate>,
    pub nacionalidade: String,
    pub naturalidade: String,
    pub estado_civil: String,
    pub nome_pai: String,
    pub escolaridade_pai: String,
    pub nome_mae: String,
    pub escolaridade_mae: String,
    pub renda_familiar: String,
    pub rua: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub status: StatusAluno,
    pub curso_interesse_id: Option<i64>,
    pub periodo_interesse_id: Option<i64>,
}

impl AlunoForm {
    pub fn validar(&self) -> Result<DadosAluno, ErrosFormulario> {
        let mut erros = ErrosFormulario::new();

        let nome = obrigatorio(&mut erros, "nome", &self.nome);
        let email = opcional(&self.email);
        if !email.is_empty() && !email.contains('@') {
            erros.add("email", "Informe um email válido.");
        }
        let nascimento = data_opcional(&mut erros, "nascimento", &self.nascimento);

        let status = match self.status.trim() {
            "" => StatusAluno::default(),
            s => match s.parse::<i64>().ok().and_then(StatusAluno::from_i64) {
                Some(st) => st,
                None => {
                    erros.add("status", "Status inválido.");
                    StatusAluno::default()
                }
            },
        };

        let curso_interesse_id = id_opcional(&mut erros, "curso_interesse_id", &self.curso_interesse_id);
        let periodo_interesse_id =
            id_opcional(&mut erros, "periodo_interesse_id", &self.periodo_interesse_id);

        let dados = DadosAluno {
            nome,
            email,
            contato: opcional(&self.contato),
            nascimento,
            nacionalidade: opcional(&self.nacionalidade),
            naturalidade: opcional(&self.naturalidade),
            estado_civil: opcional(&self.estado_civil),
            nome_pai: opcional(&self.nome_pai),
            escolaridade_pai: opcional(&self.escolaridade_pai),
            nome_mae: opcional(&self.nome_mae),
            escolaridade_mae: opcional(&self.escolaridade_mae),
            renda_familiar: opcional(&self.renda_familiar),
            rua: opcional(&self.rua),
            numero: opcional(&self.numero),
            complemento: opcional(&self.complemento),
            bairro: opcional(&self.bairro),
            cidade: opcional(&self.cidade),
            estado: opcional(&self.estado),
            cep: opcional(&self.cep),
            status,
            curso_interesse_id,
            periodo_interesse_id,
        };
        erros.ou(dados)
    }
}

impl From<&Aluno> for AlunoForm {
    fn from(a: &Aluno) -> Self {
        Self {
            nome: a.nome.clone(),
            email: a.email.clone(),
            contato: a.contato.clone(),
            nascimento: a.nascimento.map(|d| d.to_string()).unwrap_or_default(),
            nacionalidade: a.nacionalidade.clone(),
            naturalidade: a.naturalidade.clone(),
            estado_civil: a.estado_civil.clone(),
            nome_pai: a.nome_pai.clone(),
            escolaridade_pai: a.escolaridade_pai.clone(),
            nome_mae: a.nome_mae.clone(),
            escolaridade_mae: a.escolaridade_mae.clone(),
            renda_familiar: a.renda_familiar.clone(),
            rua: a.rua.clone(),
            numero: a.numero.clone(),
            complemento: a.complemento.clone(),
            bairro: a.bairro.clone(),
            cidade: a.cidade.clone(),
            estado: a.estado.clone(),
            cep: a.cep.clone(),
            status: a.status.to_string(),
            curso_interesse_id: a.curso_interesse_id.map(|id| id.to_string()).unwrap_or_default(),
            periodo_interesse_id: a
                .periodo_interesse_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}
