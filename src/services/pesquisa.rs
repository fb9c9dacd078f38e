// src/services/pesquisa.rs
//
// Construtor de consultas das páginas "pesquisar": escopo por identidade,
// filtro de texto livre e ordenação por lista de campos permitidos.
use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};

/// Chave de ordenação usada quando `order` falta ou não é permitido.
pub const ORDEM_PADRAO: &str = "nome";

/// Parâmetros da query string: `?q=...&order=...&dir=asc|desc`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PesquisaParams {
    #[serde(default)]
    pub q: String,
    pub order: Option<String>,
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direcao {
    Asc,
    Desc,
}

impl Direcao {
    /// Só "desc" inverte a ordem; qualquer outro valor é ascendente.
    pub fn from_param(dir: Option<&str>) -> Self {
        match dir {
            Some("desc") => Direcao::Desc,
            _ => Direcao::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direcao::Asc => "asc",
            Direcao::Desc => "desc",
        }
    }

    fn sql(&self) -> &'static str {
        match self {
            Direcao::Asc => "ASC",
            Direcao::Desc => "DESC",
        }
    }

    pub fn inversa(&self) -> Self {
        match self {
            Direcao::Asc => Direcao::Desc,
            Direcao::Desc => Direcao::Asc,
        }
    }
}

/// Pares `(chave na URL, expressão SQL)`. A primeira entrada com a chave
/// `nome` é o padrão.
pub type CamposPermitidos = &'static [(&'static str, &'static str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordenacao {
    pub chave: &'static str,
    coluna: &'static str,
    pub direcao: Direcao,
}

impl Ordenacao {
    /// Valida `order` contra a lista permitida. Chaves desconhecidas caem
    /// silenciosamente no padrão: nunca há interpolação de texto do cliente.
    pub fn resolver(order: Option<&str>, dir: Option<&str>, permitidos: CamposPermitidos) -> Self {
        let pedido = order.map(str::trim).unwrap_or(ORDEM_PADRAO);
        let (chave, coluna) = permitidos
            .iter()
            .find(|(chave, _)| *chave == pedido)
            .or_else(|| permitidos.iter().find(|(chave, _)| *chave == ORDEM_PADRAO))
            .or_else(|| permitidos.first())
            .copied()
            .unwrap_or((ORDEM_PADRAO, ORDEM_PADRAO));
        Self {
            chave,
            coluna,
            direcao: Direcao::from_param(dir),
        }
    }

    pub fn coluna(&self) -> &'static str {
        self.coluna
    }
}

/// Linhas visíveis antes do filtro de texto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escopo {
    Irrestrito,
    /// Só o que é alcançável pelas atribuições ativas deste voluntário.
    Professor { voluntario_id: i64 },
}

/// Pesquisa já validada para uma entidade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pesquisa {
    /// Texto aparado; `None` quando vazio.
    pub texto: Option<String>,
    pub ordenacao: Ordenacao,
}

impl Pesquisa {
    pub fn nova(params: &PesquisaParams, permitidos: CamposPermitidos) -> Self {
        let texto = Some(params.q.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string);
        Self {
            texto,
            ordenacao: Ordenacao::resolver(params.order.as_deref(), params.dir.as_deref(), permitidos),
        }
    }

    /// Acrescenta `AND (c1 LIKE ? OR c2 LIKE ? ...)` se houver texto.
    pub fn push_filtro(&self, qb: &mut QueryBuilder<'_, Sqlite>, colunas: &[&str]) {
        let Some(texto) = &self.texto else {
            return;
        };
        if colunas.is_empty() {
            return;
        }
        let padrao = padrao_like(texto);
        qb.push(" AND (");
        for (i, coluna) in colunas.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(*coluna)
                .push(" LIKE ")
                .push_bind(padrao.clone())
                .push(" ESCAPE '\\'");
        }
        qb.push(")");
    }

    /// Acrescenta `ORDER BY`, desempatando pela chave primária na mesma
    /// direção para que `desc` seja exatamente o inverso de `asc`.
    pub fn push_ordenacao(&self, qb: &mut QueryBuilder<'_, Sqlite>, chave_primaria: &str) {
        let dir = self.ordenacao.direcao.sql();
        qb.push(" ORDER BY ")
            .push(self.ordenacao.coluna)
            .push(" COLLATE NOCASE ")
            .push(dir)
            .push(", ")
            .push(chave_primaria)
            .push(" ")
            .push(dir);
    }

    pub fn view(&self) -> PesquisaView {
        PesquisaView {
            q: self.texto.clone().unwrap_or_default(),
            order: self.ordenacao.chave.to_string(),
            dir: self.ordenacao.direcao,
        }
    }
}

/// `LIKE` do SQLite já ignora maiúsculas (ASCII); `%`, `_` e `\` do
/// utilizador são escapados para serem literais.
pub fn padrao_like(texto: &str) -> String {
    let mut padrao = String::with_capacity(texto.len() + 2);
    padrao.push('%');
    for c in texto.chars() {
        if matches!(c, '%' | '_' | '\\') {
            padrao.push('\\');
        }
        padrao.push(c);
    }
    padrao.push('%');
    padrao
}

/// Estado da pesquisa devolvido ao template (cabeçalhos clicáveis).
#[derive(Debug, Clone)]
pub struct PesquisaView {
    pub q: String,
    pub order: String,
    pub dir: Direcao,
}

impl PesquisaView {
    /// Link de um cabeçalho: clicar na coluna atual inverte a direção.
    pub fn url_ordenar(&self, campo: &str) -> String {
        let dir = if self.order == campo {
            self.dir.inversa()
        } else {
            Direcao::Asc
        };
        format!(
            "?q={}&order={}&dir={}",
            urlencoding::encode(&self.q),
            urlencoding::encode(campo),
            dir.as_str()
        )
    }

    pub fn seta(&self, campo: &str) -> &'static str {
        match (self.order == campo, self.dir) {
            (false, _) => "",
            (true, Direcao::Asc) => "▲",
            (true, Direcao::Desc) => "▼",
        }
    }

    pub fn dir_str(&self) -> &'static str {
        self.dir.as_str()
    }
}
