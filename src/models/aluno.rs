// src/models/aluno.rs
use chrono::NaiveDate;
use sqlx::FromRow;

/// Situação do aluno (guardada como INTEGER).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusAluno {
    Inativo = 0,
    #[default]
    Ativo = 1,
    Trancado = 2,
    Concluido = 3,
}

impl StatusAluno {
    pub const TODOS: &'static [StatusAluno] = &[
        StatusAluno::Ativo,
        StatusAluno::Trancado,
        StatusAluno::Concluido,
        StatusAluno::Inativo,
    ];

    pub fn from_i64(valor: i64) -> Option<Self> {
        StatusAluno::TODOS.iter().copied().find(|s| s.valor() == valor)
    }

    pub fn valor(&self) -> i64 {
        *self as i64
    }

    pub fn rotulo(&self) -> &'static str {
        match self {
            StatusAluno::Inativo => "Inativo",
            StatusAluno::Ativo => "Ativo",
            StatusAluno::Trancado => "Trancado",
            StatusAluno::Concluido => "Concluído",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Aluno {
    pub id: i64,
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
    pub status: i64,
    pub curso_interesse_id: Option<i64>,
    pub periodo_interesse_id: Option<i64>,
}

/// Colunas mostradas na pesquisa de alunos.
#[derive(Debug, Clone, FromRow)]
pub struct AlunoListagem {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub contato: String,
    pub cidade: String,
    pub status: i64,
    pub curso_interesse: Option<String>,
}

impl AlunoListagem {
    pub fn status_rotulo(&self) -> &'static str {
        StatusAluno::from_i64(self.status)
            .map(|s| s.rotulo())
            .unwrap_or("Desconhecido")
    }
}
