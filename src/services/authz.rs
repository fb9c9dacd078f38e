// src/services/authz.rs
//
// Guarda de autorização: função pura (identidade, papéis exigidos) -> decisão.
// Não conhece axum nem a sessão; o middleware `mw_role` é que a aplica.
use crate::models::voluntario::TipoVoluntario;
use crate::services::pesquisa::Escopo;

/// Papéis que podem criar, editar e excluir registos.
pub const PAPEIS_COORDENACAO: &[TipoVoluntario] = &[TipoVoluntario::Coordenador];

/// Voluntário associado ao utilizador autenticado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PapelVoluntario {
    pub voluntario_id: i64,
    pub tipo: TipoVoluntario,
}

/// Quem está a fazer o pedido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identidade {
    pub user_id: i64,
    pub nome: String,
    pub is_superuser: bool,
    pub voluntario: Option<PapelVoluntario>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decisao {
    Permitir,
    RedirecionarLogin,
    Proibir,
}

/// Decide se a identidade (`None` = anónimo) pode executar uma operação
/// que exige um dos `papeis_exigidos`.
pub fn autorizar(identidade: Option<&Identidade>, papeis_exigidos: &[TipoVoluntario]) -> Decisao {
    let Some(identidade) = identidade else {
        return Decisao::RedirecionarLogin;
    };
    if identidade.is_superuser {
        return Decisao::Permitir;
    }
    match identidade.voluntario {
        None => Decisao::Proibir,
        Some(papel) if papeis_exigidos.contains(&papel.tipo) => Decisao::Permitir,
        Some(_) => Decisao::Proibir,
    }
}

impl Identidade {
    pub fn tem_papel(&self, tipo: TipoVoluntario) -> bool {
        self.voluntario.is_some_and(|v| v.tipo == tipo)
    }

    /// Pode gerir cadastros (usado para mostrar/esconder ligações nas páginas).
    pub fn pode_gerir(&self) -> bool {
        autorizar(Some(self), PAPEIS_COORDENACAO) == Decisao::Permitir
    }

    /// Restrição de linhas aplicada às pesquisas de alunos, disciplinas e turmas.
    pub fn escopo(&self) -> Escopo {
        match self.voluntario {
            Some(papel) if !self.is_superuser && papel.tipo == TipoVoluntario::Professor => {
                Escopo::Professor {
                    voluntario_id: papel.voluntario_id,
                }
            }
            _ => Escopo::Irrestrito,
        }
    }

    pub fn papel_rotulo(&self) -> &'static str {
        match (self.is_superuser, self.voluntario) {
            (true, _) => "Administrador",
            (false, Some(papel)) => papel.tipo.rotulo(),
            (false, None) => "Sem papel atribuído",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identidade(is_superuser: bool, tipo: Option<TipoVoluntario>) -> Identidade {
        Identidade {
            user_id: 1,
            nome: "Teste".into(),
            is_superuser,
            voluntario: tipo.map(|tipo| PapelVoluntario {
                voluntario_id: 10,
                tipo,
            }),
        }
    }

    #[test]
    fn superuser_passa_sempre() {
        let admin = identidade(true, None);
        assert_eq!(autorizar(Some(&admin), PAPEIS_COORDENACAO), Decisao::Permitir);
        assert_eq!(autorizar(Some(&admin), &[]), Decisao::Permitir);
    }

    #[test]
    fn anonimo_vai_para_o_login() {
        assert_eq!(autorizar(None, PAPEIS_COORDENACAO), Decisao::RedirecionarLogin);
    }

    #[test]
    fn sem_voluntario_e_proibido() {
        let user = identidade(false, None);
        assert_eq!(autorizar(Some(&user), PAPEIS_COORDENACAO), Decisao::Proibir);
    }

    #[test]
    fn papel_fora_do_conjunto_e_proibido() {
        for tipo in [TipoVoluntario::Professor, TipoVoluntario::Monitor, TipoVoluntario::Apoio] {
            let user = identidade(false, Some(tipo));
            assert_eq!(autorizar(Some(&user), PAPEIS_COORDENACAO), Decisao::Proibir);
        }
        let coord = identidade(false, Some(TipoVoluntario::Coordenador));
        assert_eq!(autorizar(Some(&coord), PAPEIS_COORDENACAO), Decisao::Permitir);
    }

    #[test]
    fn conjunto_com_varios_papeis() {
        let exigidos = &[TipoVoluntario::Coordenador, TipoVoluntario::Professor];
        let prof = identidade(false, Some(TipoVoluntario::Professor));
        assert_eq!(autorizar(Some(&prof), exigidos), Decisao::Permitir);
    }

    #[test]
    fn so_professor_tem_escopo_restrito() {
        let prof = identidade(false, Some(TipoVoluntario::Professor));
        assert_eq!(prof.escopo(), Escopo::Professor { voluntario_id: 10 });

        let coord = identidade(false, Some(TipoVoluntario::Coordenador));
        assert_eq!(coord.escopo(), Escopo::Irrestrito);

        // Superuser com registo de professor continua a ver tudo
        let admin_prof = identidade(true, Some(TipoVoluntario::Professor));
        assert_eq!(admin_prof.escopo(), Escopo::Irrestrito);
    }
}
