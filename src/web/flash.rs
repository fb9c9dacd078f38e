// src/web/flash.rs
//
// Mensagens de uma só leitura ("Aluno atualizado com sucesso!") guardadas num
// cookie assinado; lidas e apagadas na página seguinte.
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies, Key};

const COOKIE_FLASH: &str = "aprosys_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nivel {
    Sucesso,
    Erro,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub nivel: Nivel,
    pub mensagem: String,
}

impl Flash {
    pub fn classe_css(&self) -> &'static str {
        match self.nivel {
            Nivel::Sucesso => "flash-sucesso",
            Nivel::Erro => "flash-erro",
        }
    }
}

pub fn sucesso(cookies: &Cookies, key: &Key, mensagem: impl Into<String>) {
    definir(cookies, key, Nivel::Sucesso, mensagem.into());
}

pub fn erro(cookies: &Cookies, key: &Key, mensagem: impl Into<String>) {
    definir(cookies, key, Nivel::Erro, mensagem.into());
}

fn definir(cookies: &Cookies, key: &Key, nivel: Nivel, mensagem: String) {
    let flash = Flash { nivel, mensagem };
    match serde_json::to_string(&flash) {
        Ok(json) => {
            // urlencode: o valor de um cookie não pode ter espaços, aspas nem ';'
            let mut cookie = Cookie::new(COOKIE_FLASH, urlencoding::encode(&json).into_owned());
            cookie.set_path("/");
            cookie.set_http_only(true);
            cookies.signed(key).add(cookie);
        }
        Err(e) => tracing::error!("Falha ao serializar mensagem flash: {:?}", e),
    }
}

/// Lê e remove a mensagem pendente, se houver (e se a assinatura for válida).
pub fn consumir(cookies: &Cookies, key: &Key) -> Option<Flash> {
    let signed = cookies.signed(key);
    let cookie = signed.get(COOKIE_FLASH)?;

    let mut remocao = Cookie::from(COOKIE_FLASH);
    remocao.set_path("/");
    signed.remove(remocao);

    let json = urlencoding::decode(cookie.value()).ok()?;
    serde_json::from_str(&json)
        .map_err(|e| tracing::warn!("Mensagem flash ilegível: {:?}", e))
        .ok()
}
