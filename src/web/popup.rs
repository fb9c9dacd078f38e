// src/web/popup.rs
//
// Contrato entre a janela popup de "novo curso" e a janela que a abriu:
// `window.opener.postMessage({type: 'add_related', name, value, text})`.
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddRelated<'a> {
    #[serde(rename = "type")]
    pub tipo: &'static str,
    /// Nome do campo `<select>` a atualizar na janela de origem.
    pub name: &'a str,
    pub value: String,
    pub text: &'a str,
}

impl<'a> AddRelated<'a> {
    pub fn new(field_name: &'a str, id: i64, texto: &'a str) -> Self {
        Self {
            tipo: "add_related",
            name: field_name,
            value: id.to_string(),
            text: texto,
        }
    }

    /// JSON pronto a ser embutido dentro de `<script>`.
    pub fn para_script(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(escapar_para_script(&json))
    }
}

/// Escapa os caracteres que poderiam fechar o `<script>` ou quebrar o JS.
fn escapar_para_script(json: &str) -> String {
    let mut saida = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => saida.push_str("\\u003c"),
            '>' => saida.push_str("\\u003e"),
            '&' => saida.push_str("\\u0026"),
            '\u{2028}' => saida.push_str("\\u2028"),
            '\u{2029}' => saida.push_str("\\u2029"),
            c => saida.push(c),
        }
    }
    saida
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mensagem_tem_os_quatro_campos() {
        let msg = AddRelated::new("curso_interesse_id", 7, "Informática");
        let json: serde_json::Value = serde_json::from_str(&msg.para_script().unwrap()).unwrap();
        assert_eq!(json["type"], "add_related");
        assert_eq!(json["name"], "curso_interesse_id");
        assert_eq!(json["value"], "7");
        assert_eq!(json["text"], "Informática");
    }

    #[test]
    fn nomes_com_aspas_e_tags_nao_escapam_do_script() {
        let msg = AddRelated::new("curso", 1, "D'Artagnan </script><script>alert(1)</script>");
        let script = msg.para_script().unwrap();
        assert!(!script.contains("</script>"));
        assert!(!script.contains('<'));

        // Continua a ser JSON válido com o texto original
        let json: serde_json::Value = serde_json::from_str(&script).unwrap();
        assert_eq!(json["text"], "D'Artagnan </script><script>alert(1)</script>");
    }
}
