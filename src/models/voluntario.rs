// src/models/voluntario.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

/// Papel do voluntário. É o que o guarda de autorização compara.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoVoluntario {
    Coordenador,
    Professor,
    Monitor,
    Apoio,
}

impl TipoVoluntario {
    pub const TODOS: &'static [TipoVoluntario] = &[
        TipoVoluntario::Coordenador,
        TipoVoluntario::Professor,
        TipoVoluntario::Monitor,
        TipoVoluntario::Apoio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoVoluntario::Coordenador => "COORDENADOR",
            TipoVoluntario::Professor => "PROFESSOR",
            TipoVoluntario::Monitor => "MONITOR",
            TipoVoluntario::Apoio => "APOIO",
        }
    }

    pub fn rotulo(&self) -> &'static str {
        match self {
            TipoVoluntario::Coordenador => "Coordenador(a)",
            TipoVoluntario::Professor => "Professor(a)",
            TipoVoluntario::Monitor => "Monitor(a)",
            TipoVoluntario::Apoio => "Apoio",
        }
    }
}

impl FromStr for TipoVoluntario {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TipoVoluntario::TODOS
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Situação do processo de voluntariado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusProcesso {
    Inscrito,
    EmAnalise,
    Aprovado,
    Desligado,
}

impl StatusProcesso {
    pub const TODOS: &'static [StatusProcesso] = &[
        StatusProcesso::Inscrito,
        StatusProcesso::EmAnalise,
        StatusProcesso::Aprovado,
        StatusProcesso::Desligado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusProcesso::Inscrito => "INSCRITO",
            StatusProcesso::EmAnalise => "EM_ANALISE",
            StatusProcesso::Aprovado => "APROVADO",
            StatusProcesso::Desligado => "DESLIGADO",
        }
    }

    pub fn rotulo(&self) -> &'static str {
        match self {
            StatusProcesso::Inscrito => "Inscrito",
            StatusProcesso::EmAnalise => "Em análise",
            StatusProcesso::Aprovado => "Aprovado",
            StatusProcesso::Desligado => "Desligado",
        }
    }
}

impl FromStr for StatusProcesso {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusProcesso::TODOS
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Voluntario {
    pub id: i64,
    pub user_id: i64,
    pub tipo_voluntario: TipoVoluntario,
    pub status_processo: StatusProcesso,
}

/// Voluntário com nome e email do utilizador associado (listagens e selects).
#[derive(Debug, Clone, FromRow)]
pub struct VoluntarioListagem {
    pub id: i64,
    pub user_id: i64,
    pub nome: String,
    pub email: String,
    pub tipo_voluntario: TipoVoluntario,
    pub status_processo: StatusProcesso,
}
