// src/models/disciplina.rs
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Disciplina {
    pub id: i64,
    pub nome: String,
    pub area_conhecimento: String,
    // Referência curricular (ementa)
    pub ementa: String,
    pub status: i64,
}

impl Disciplina {
    pub fn status_rotulo(&self) -> &'static str {
        super::rotulo_status(self.status)
    }
}
