// src/forms/registro.rs
use super::{obrigatorio, opcional, ErrosFormulario};
use serde::Deserialize;

pub const SENHA_MIN: usize = 8;

/// Formulário público de criação de utilizador.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistroForm {
    pub username: String,
    pub nome: String,
    pub email: String,
    pub contato: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovoUsuario {
    pub username: String,
    pub nome: String,
    pub email: String,
    pub contato: String,
    pub password: String,
}

impl RegistroForm {
    pub fn validar(&self) -> Result<NovoUsuario, ErrosFormulario> {
        let mut erros = ErrosFormulario::new();

        let username = obrigatorio(&mut erros, "username", &self.username);
        if username.chars().any(char::is_whitespace) {
            erros.add("username", "O nome de utilizador não pode conter espaços.");
        }
        let nome = obrigatorio(&mut erros, "nome", &self.nome);
        let email = obrigatorio(&mut erros, "email", &self.email);
        if !email.is_empty() && !email.contains('@') {
            erros.add("email", "Informe um email válido.");
        }
        if self.password1.chars().count() < SENHA_MIN {
            erros.add("password1", format!("A senha deve ter pelo menos {} caracteres.", SENHA_MIN));
        }
        if self.password1 != self.password2 {
            erros.add("password2", "As senhas não coincidem.");
        }

        erros.ou(NovoUsuario {
            username,
            nome,
            email,
            contato: opcional(&self.contato),
            password: self.password1.clone(),
        })
    }

    /// Cópia sem as senhas, para voltar a mostrar o formulário.
    pub fn sem_senhas(&self) -> Self {
        Self {
            password1: String::new(),
            password2: String::new(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn senhas_diferentes_sao_recusadas() {
        let form = RegistroForm {
            username: "ana".into(),
            nome: "Ana".into(),
            email: "ana@exemplo.org".into(),
            password1: "segredo123".into(),
            password2: "segredo124".into(),
            ..RegistroForm::default()
        };
        let erros = form.validar().unwrap_err();
        assert!(erros.contains("password2"));
        assert!(!erros.contains("password1"));
    }

    #[test]
    fn senha_curta_e_recusada() {
        let form = RegistroForm {
            username: "ana".into(),
            nome: "Ana".into(),
            email: "ana@exemplo.org".into(),
            password1: "curta".into(),
            password2: "curta".into(),
            ..RegistroForm::default()
        };
        assert!(form.validar().unwrap_err().contains("password1"));
    }
}
