// ==========================================
// Gerador de Relatórios - Normalização de cabeçalhos
// ==========================================
// Responsabilidade: cabeçalho cru -> slug canônico
// O mesmo slug é aplicado a cabeçalhos e apelidos; qualquer
// comparação fora dessa forma quebra o casamento de colunas
// ==========================================

use crate::domain::{CellValue, DataTable, Row};

/// Remove o acento de um caractere latino; demais passam direto
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        _ => c,
    }
}

/// Normaliza um cabeçalho cru para slug: minúsculas ASCII, acentos
/// removidos, sequências de espaço viram um único underscore, o resto
/// fora de [a-z0-9_] é descartado.
///
/// Função pura e total: entrada vazia produz slug vazio. Idempotente:
/// `normalize_header(normalize_header(s)) == normalize_header(s)`.
pub fn normalize_header(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_sep = false;

    for c in raw.trim().chars() {
        if c.is_whitespace() {
            pending_sep = !slug.is_empty();
            continue;
        }
        let c = fold_accent(c).to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_sep {
                slug.push('_');
                pending_sep = false;
            }
            slug.push(c);
        }
    }

    slug
}

/// Normaliza os cabeçalhos de uma tabela.
///
/// Política de colisão (determinística): quando dois cabeçalhos crus
/// produzem o mesmo slug, o slug fica na posição da PRIMEIRA ocorrência
/// na lista de colunas e o valor vem do ÚLTIMO cabeçalho cru que o
/// produziu (last-writer-wins na ordem dos cabeçalhos).
///
/// Idempotente: normalizar uma tabela já normalizada devolve os mesmos
/// slugs e valores.
pub fn normalize_table(table: &DataTable) -> DataTable {
    // (cabeçalho cru, slug) na ordem original
    let mapping: Vec<(String, String)> = table
        .columns()
        .iter()
        .map(|raw| (raw.clone(), normalize_header(raw)))
        .collect();

    let mut columns: Vec<String> = Vec::with_capacity(mapping.len());
    for (_, slug) in &mapping {
        if !slug.is_empty() && !columns.contains(slug) {
            columns.push(slug.clone());
        }
    }

    let mut normalized = DataTable::new(columns);
    for row in table.rows() {
        let mut out: Row = Row::with_capacity(mapping.len());
        for (raw, slug) in &mapping {
            if slug.is_empty() {
                continue;
            }
            let value = row.get(raw).cloned().unwrap_or(CellValue::Empty);
            // inserção em ordem de cabeçalho: o último sobrescreve
            out.insert(slug.clone(), value);
        }
        normalized.push_row(out);
    }
    normalized
}
