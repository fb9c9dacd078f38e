// src/config.rs
use crate::error::AppResult;
use std::{env, net::SocketAddr};
use tower_cookies::Key;

const BIND_ADDR_PADRAO: &str = "0.0.0.0:3000";

/// Configuração lida das variáveis de ambiente (e do `.env`, via dotenvy).
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Chave para assinar o cookie das mensagens flash.
    pub cookie_key: Key,
    pub bcrypt_cost: u32,
    /// Superutilizador criado no arranque, se ambos estiverem definidos.
    pub admin: Option<(String, String)>,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| BIND_ADDR_PADRAO.to_string())
            .parse()
            .unwrap_or_else(|e| {
                tracing::warn!("⚠️ BIND_ADDR inválido ({}), usando {}", e, BIND_ADDR_PADRAO);
                SocketAddr::from(([0, 0, 0, 0], 3000))
            });

        let secret = env::var("SESSION_SECRET")?;
        let cookie_key = chave_de_segredo(&secret);

        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(u), Ok(p)) if !u.trim().is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        };

        Ok(Self {
            database_url,
            bind_addr,
            cookie_key,
            bcrypt_cost,
            admin,
        })
    }
}

/// `Key::from` exige pelo menos 64 bytes; abaixo disso usa-se uma chave aleatória.
pub fn chave_de_segredo(secret: &str) -> Key {
    if secret.len() >= 64 {
        Key::from(secret.as_bytes())
    } else {
        tracing::warn!(
            "⚠️ SESSION_SECRET tem menos de 64 bytes; usando chave aleatória (mensagens flash não sobrevivem a reinícios)."
        );
        Key::generate()
    }
}
