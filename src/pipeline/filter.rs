// ==========================================
// Gerador de Relatórios - Motor de filtros
// ==========================================
// Responsabilidade: aplicar o FilterSpec sobre a tabela normalizada
// Predicados combinam por E lógico; resultado vazio é erro explícito
// ==========================================

use crate::domain::{CellValue, DataTable, FilterSpec, Row};
use crate::pipeline::dates::{COL_ANO, COL_DIA, COL_MES};
use crate::pipeline::error::{ReportError, ReportResult};
use tracing::debug;

/// Colunas já resolvidas para os conceitos textuais do filtro.
/// `None` significa que o conceito não foi encontrado na tabela; uma
/// restrição não vazia sobre conceito ausente não casa linha nenhuma.
#[derive(Debug, Clone, Default)]
pub struct FilterBindings {
    pub fornecedor: Option<String>,
    pub filial: Option<String>,
}

/// Restrição textual: igualdade exata após stringificação, sem dobrar
/// caixa. Divergência de caixa é problema de qualidade do dado de
/// origem e não deve ser mascarada aqui.
fn matches_text(row: &Row, column: Option<&String>, accepted: &[String]) -> bool {
    if accepted.is_empty() {
        return true;
    }
    let Some(column) = column else {
        return false;
    };
    match row.get(column) {
        Some(value) if !value.is_empty() => {
            let text = value.as_text();
            accepted.iter().any(|a| a == &text)
        }
        _ => false,
    }
}

/// Restrição inteira sobre parte de data derivada. Linha com a parte
/// ausente nunca casa uma restrição não vazia.
fn matches_int(row: &Row, column: &str, accepted: &[i64]) -> bool {
    if accepted.is_empty() {
        return true;
    }
    match row.get(column).and_then(CellValue::as_int) {
        Some(v) => accepted.contains(&v),
        None => false,
    }
}

/// Aplica o conjunto de filtros; uma linha sobrevive apenas se casar
/// toda lista de inclusão não vazia do spec.
///
/// Operação de estreitamento pura: spec sem restrição devolve a tabela
/// inalterada. Zero sobreviventes é `EmptyResult` — exportação vazia e
/// silenciosa é modo de falha pior que erro explícito.
pub fn apply_filters(
    table: DataTable,
    spec: &FilterSpec,
    bindings: &FilterBindings,
) -> ReportResult<DataTable> {
    if spec.is_unconstrained() {
        return Ok(table);
    }

    let filtered = table.filter_rows(|row| {
        matches_text(row, bindings.fornecedor.as_ref(), &spec.fornecedor)
            && matches_text(row, bindings.filial.as_ref(), &spec.filial)
            && matches_int(row, COL_ANO, &spec.ano)
            && matches_int(row, COL_MES, &spec.mes)
            && matches_int(row, COL_DIA, &spec.dia)
    });

    debug!(
        antes = table.len(),
        depois = filtered.len(),
        "filtros aplicados"
    );

    if filtered.is_empty() {
        return Err(ReportError::EmptyResult);
    }
    Ok(filtered)
}
