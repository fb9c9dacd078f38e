// src/services/mod.rs
pub mod aluno_service;
pub mod auth_service;
pub mod authz;
pub mod curso_service;
pub mod disciplina_service;
pub mod periodo_service;
pub mod pesquisa;
pub mod turma_service;
pub mod user_service;
pub mod voluntario_service;
