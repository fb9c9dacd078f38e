// src/forms/mod.rs
//
// Camada de validação: cada formulário chega com todos os campos como texto
// (tal como o browser os envia) e é convertido num payload tipado, ou num
// conjunto de mensagens por campo para voltar a mostrar o formulário.
pub mod aluno;
pub mod curso;
pub mod disciplina;
pub mod periodo;
pub mod registro;
pub mod turma;
pub mod vinculo;
pub mod voluntario;

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Mensagens de erro indexadas pelo nome do campo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrosFormulario(BTreeMap<&'static str, String>);

impl ErrosFormulario {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regista um erro; o primeiro erro de cada campo prevalece.
    pub fn add(&mut self, campo: &'static str, mensagem: impl Into<String>) {
        self.0.entry(campo).or_insert_with(|| mensagem.into());
    }

    pub fn get(&self, campo: &str) -> Option<&str> {
        self.0.get(campo).map(String::as_str)
    }

    pub fn contains(&self, campo: &str) -> bool {
        self.0.contains_key(campo)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(valor)` se não houver erros acumulados.
    pub fn ou<T>(self, valor: T) -> Result<T, ErrosFormulario> {
        if self.is_empty() {
            Ok(valor)
        } else {
            Err(self)
        }
    }
}

const CAMPO_OBRIGATORIO: &str = "Este campo é obrigatório.";

/// Texto obrigatório (aparado).
pub(crate) fn obrigatorio(erros: &mut ErrosFormulario, campo: &'static str, valor: &str) -> String {
    let valor = valor.trim();
    if valor.is_empty() {
        erros.add(campo, CAMPO_OBRIGATORIO);
    }
    valor.to_string()
}

pub(crate) fn opcional(valor: &str) -> String {
    valor.trim().to_string()
}

/// Data no formato do `<input type="date">` (AAAA-MM-DD).
pub(crate) fn data_obrigatoria(
    erros: &mut ErrosFormulario,
    campo: &'static str,
    valor: &str,
) -> Option<NaiveDate> {
    match data_opcional(erros, campo, valor) {
        Some(d) => Some(d),
        None => {
            erros.add(campo, CAMPO_OBRIGATORIO);
            None
        }
    }
}

pub(crate) fn data_opcional(
    erros: &mut ErrosFormulario,
    campo: &'static str,
    valor: &str,
) -> Option<NaiveDate> {
    let valor = valor.trim();
    if valor.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(valor, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            erros.add(campo, "Informe uma data válida (AAAA-MM-DD).");
            None
        }
    }
}

pub(crate) fn inteiro_obrigatorio(
    erros: &mut ErrosFormulario,
    campo: &'static str,
    valor: &str,
) -> Option<i64> {
    let valor = valor.trim();
    if valor.is_empty() {
        erros.add(campo, CAMPO_OBRIGATORIO);
        return None;
    }
    match valor.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            erros.add(campo, "Informe um número inteiro.");
            None
        }
    }
}

/// Chave estrangeira opcional vinda de um `<select>` (valor vazio = nenhum).
pub(crate) fn id_opcional(erros: &mut ErrosFormulario, campo: &'static str, valor: &str) -> Option<i64> {
    let valor = valor.trim();
    if valor.is_empty() {
        return None;
    }
    match valor.parse::<i64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            erros.add(campo, "Selecione uma opção válida.");
            None
        }
    }
}

/// Status binário (1 = ativo, 0 = inativo); vazio assume ativo.
pub(crate) fn status_binario(erros: &mut ErrosFormulario, campo: &'static str, valor: &str) -> i64 {
    match valor.trim() {
        "" | "1" => crate::models::STATUS_ATIVO,
        "0" => crate::models::STATUS_INATIVO,
        _ => {
            erros.add(campo, "Status inválido.");
            crate::models::STATUS_ATIVO
        }
    }
}

/// Formulário de exclusão em lote: `ids=3,7,9`.
#[derive(Debug, Default, Deserialize)]
pub struct ExclusaoForm {
    #[serde(default)]
    pub ids: String,
}

impl ExclusaoForm {
    /// Ids distintos, pela ordem em que aparecem. Vazio ou id inválido é erro.
    pub fn ids(&self) -> Result<Vec<i64>, String> {
        let mut ids = Vec::new();
        for parte in self.ids.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = parte
                .parse::<i64>()
                .map_err(|_| format!("Identificador inválido: '{}'.", parte))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Err("Nenhum registo selecionado.".to_string());
        }
        Ok(ids)
    }
}
