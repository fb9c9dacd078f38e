// src/models/vinculo.rs
//
// Tabelas de junção: turma-disciplina, turma-aluno e turma-disciplina-professor.
use serde::Deserialize;
use sqlx::FromRow;

/// Tipo de vínculo, tal como aparece na URL `/academico/vinculos/{tipo}/{id}/status/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoVinculo {
    Disciplina,
    Aluno,
    Professor,
}

impl TipoVinculo {
    /// Tabela onde o vínculo está guardado.
    pub fn tabela(&self) -> &'static str {
        match self {
            TipoVinculo::Disciplina => "turma_disciplinas",
            TipoVinculo::Aluno => "turma_alunos",
            TipoVinculo::Professor => "turma_disciplina_professores",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TurmaDisciplinaDetalhe {
    pub id: i64,
    pub disciplina_id: i64,
    pub disciplina_nome: String,
    pub status: i64,
}

impl TurmaDisciplinaDetalhe {
    pub fn status_rotulo(&self) -> &'static str {
        super::rotulo_status(self.status)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TurmaAlunoDetalhe {
    pub id: i64,
    pub aluno_id: i64,
    pub aluno_nome: String,
    pub status: i64,
}

impl TurmaAlunoDetalhe {
    pub fn status_rotulo(&self) -> &'static str {
        super::rotulo_status(self.status)
    }
}

/// Atribuição docente (professor ↔ turma-disciplina).
#[derive(Debug, Clone, FromRow)]
pub struct AtribuicaoDetalhe {
    pub id: i64,
    pub turma_disciplina_id: i64,
    pub disciplina_nome: String,
    pub voluntario_id: i64,
    pub professor_nome: String,
    pub status: i64,
}

impl AtribuicaoDetalhe {
    pub fn status_rotulo(&self) -> &'static str {
        super::rotulo_status(self.status)
    }
}
