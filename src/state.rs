// src/state.rs
use sqlx::SqlitePool;
use tower_cookies::Key;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Assina o cookie das mensagens flash
    pub cookie_key: Key,
    pub bcrypt_cost: u32,
}

