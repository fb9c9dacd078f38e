// src/web/mod.rs
pub mod aluno_handlers;
pub mod auth_handlers;
pub mod curso_handlers;
pub mod disciplina_handlers;
pub mod flash;
pub mod home_handlers;
pub mod mw_auth;
pub mod mw_role;
pub mod periodo_handlers;
pub mod popup;
pub mod routes;
pub mod turma_handlers;
pub mod voluntario_handlers;
