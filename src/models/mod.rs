// src/models/mod.rs
pub mod aluno;
pub mod curso;
pub mod disciplina;
pub mod periodo;
pub mod turma;
pub mod user;
pub mod vinculo;
pub mod voluntario;

/// Valor de `status` para registos ativos (o resto é tratado como desativado).
pub const STATUS_ATIVO: i64 = 1;
pub const STATUS_INATIVO: i64 = 0;

/// Rótulo para as colunas `status` binárias (períodos, turmas, disciplinas, vínculos).
pub fn rotulo_status(status: i64) -> &'static str {
    if status == STATUS_ATIVO {
        "Ativo"
    } else {
        "Inativo"
    }
}
