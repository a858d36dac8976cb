// ==========================================
// Gerador de Relatórios - Resolução de colunas
// ==========================================
// Responsabilidade: conceito -> coluna real da tabela normalizada
// Duas camadas: igualdade exata de slug, depois substring
// ==========================================

use crate::domain::{Concept, DataTable};
use crate::pipeline::normalize::normalize_header;

/// Comprimento mínimo do slug de apelido para participar da camada de
/// substring. Apelidos curtos ("uf", "dt") casam apenas por igualdade
/// exata, senão "uf" acharia qualquer coluna que contenha essas letras.
const SUBSTRING_MIN_LEN: usize = 3;

/// Resolve um conceito contra as colunas de uma tabela normalizada.
///
/// Ordem de tentativa, primeira vitória encerra:
/// 1. slug de apelido igual a alguma coluna, na ordem dos apelidos;
/// 2. coluna que contém o slug de apelido como substring, na ordem dos
///    apelidos e depois na ordem original das colunas.
///
/// Apelido que normaliza para vazio nunca casa. Conceito sem coluna
/// devolve `None`; decidir se a ausência é fatal é papel do chamador.
pub fn resolve_column(table: &DataTable, concept: &Concept) -> Option<String> {
    let alias_slugs: Vec<String> = concept
        .aliases()
        .iter()
        .map(|a| normalize_header(a))
        .filter(|s| !s.is_empty())
        .collect();

    // camada 1: igualdade exata
    for alias in &alias_slugs {
        if table.has_column(alias) {
            return Some(alias.clone());
        }
    }

    // camada 2: substring
    for alias in &alias_slugs {
        if alias.len() < SUBSTRING_MIN_LEN {
            continue;
        }
        for column in table.columns() {
            if column.contains(alias.as_str()) {
                return Some(column.clone());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(columns: &[&str]) -> DataTable {
        DataTable::new(columns.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_exact_match_wins() {
        let table = table_with(&["filial", "fornecedor", "uf"]);
        let concept = Concept::new("fornecedor", &["fornecedor", "laboratorio"]);
        assert_eq!(resolve_column(&table, &concept), Some("fornecedor".into()));
    }

    #[test]
    fn test_alias_order_decides() {
        // ambos os apelidos existem como coluna: vence o listado primeiro
        let table = table_with(&["laboratorio", "fornecedor"]);
        let concept = Concept::new("fornecedor", &["fornecedor", "laboratorio"]);
        assert_eq!(resolve_column(&table, &concept), Some("fornecedor".into()));

        let invertido = Concept::new("fornecedor", &["laboratorio", "fornecedor"]);
        assert_eq!(
            resolve_column(&table, &invertido),
            Some("laboratorio".into())
        );
    }

    #[test]
    fn test_substring_fallback() {
        let table = table_with(&["nome_do_fornecedor", "uf"]);
        let concept = Concept::new("fornecedor", &["fornecedor"]);
        assert_eq!(
            resolve_column(&table, &concept),
            Some("nome_do_fornecedor".into())
        );
    }

    #[test]
    fn test_exact_beats_substring() {
        let table = table_with(&["nome_do_fornecedor", "fornecedor"]);
        let concept = Concept::new("fornecedor", &["fornecedor"]);
        assert_eq!(resolve_column(&table, &concept), Some("fornecedor".into()));
    }

    #[test]
    fn test_short_alias_never_substring_matches() {
        // "uf" dentro de "manufatura" não pode casar
        let table = table_with(&["manufatura"]);
        let concept = Concept::new("uf", &["uf"]);
        assert_eq!(resolve_column(&table, &concept), None);

        // mas casa por igualdade exata
        let table = table_with(&["manufatura", "uf"]);
        assert_eq!(resolve_column(&table, &concept), Some("uf".into()));
    }

    #[test]
    fn test_empty_alias_never_matches() {
        let table = table_with(&["qualquer_coluna"]);
        let concept = Concept::new("vazio", &["  ", "!!!"]);
        assert_eq!(resolve_column(&table, &concept), None);
    }

    #[test]
    fn test_unresolved_returns_none() {
        let table = table_with(&["uf", "cnpj_cli"]);
        let concept = Concept::new("fornecedor", &["fornecedor", "laboratorio"]);
        assert_eq!(resolve_column(&table, &concept), None);
    }
}
