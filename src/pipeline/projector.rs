// ==========================================
// Gerador de Relatórios - Projeção de templates
// ==========================================
// Responsabilidade: tabela filtrada -> layout de saída do template
// Projeção é tudo-ou-nada: falha parcial não produz exportação
// ==========================================

use crate::domain::{
    AliasRegistry, CellValue, ColumnSource, DataTable, Row, Template, TemplateLayout,
};
use crate::pipeline::error::{ReportError, ReportResult};
use crate::pipeline::resolver::resolve_column;
use tracing::debug;

/// Origem já resolvida de uma coluna de saída
enum BoundSource {
    Column(String),
    Literal(String),
}

/// Resolve um conceito com cadeia de fallback: primário primeiro,
/// depois o secundário, se declarado. Conceito fora do registro conta
/// como não resolvido.
fn bind_concept(
    table: &DataTable,
    registry: &AliasRegistry,
    primary: &str,
    fallback: Option<&str>,
) -> Option<String> {
    let try_one = |name: &str| {
        registry
            .get(name)
            .and_then(|concept| resolve_column(table, concept))
    };
    try_one(primary).or_else(|| fallback.and_then(try_one))
}

/// Projeta a tabela no layout do template.
///
/// Template identidade devolve a tabela inalterada. Para template
/// nomeado, TODOS os conceitos requeridos são resolvidos antes de
/// qualquer saída; os não resolvidos são reportados juntos em um único
/// `UnresolvedConcept`, para o chamador corrigir registro e template em
/// uma passada só.
pub fn project(
    table: DataTable,
    template: &Template,
    registry: &AliasRegistry,
) -> ReportResult<DataTable> {
    let columns = match &template.layout {
        TemplateLayout::Identity => return Ok(table),
        TemplateLayout::Columns(columns) => columns,
    };

    let mut bound: Vec<(String, BoundSource)> = Vec::with_capacity(columns.len());
    let mut missing: Vec<String> = Vec::new();

    for column in columns {
        match &column.source {
            ColumnSource::Literal(value) => {
                bound.push((column.output.clone(), BoundSource::Literal(value.clone())));
            }
            ColumnSource::Concept { primary, fallback } => {
                match bind_concept(&table, registry, primary, fallback.as_deref()) {
                    Some(source) => {
                        bound.push((column.output.clone(), BoundSource::Column(source)));
                    }
                    None => missing.push(primary.clone()),
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(ReportError::UnresolvedConcept { concepts: missing });
    }

    debug!(
        template = %template.name,
        colunas = bound.len(),
        linhas = table.len(),
        "projeção resolvida"
    );

    let mut output = DataTable::new(bound.iter().map(|(out, _)| out.clone()).collect());
    for row in table.rows() {
        let mut out_row = Row::with_capacity(bound.len());
        for (out_name, source) in &bound {
            let value = match source {
                BoundSource::Column(column) => {
                    row.get(column).cloned().unwrap_or(CellValue::Empty)
                }
                BoundSource::Literal(text) => CellValue::Text(text.clone()),
            };
            out_row.insert(out_name.clone(), value);
        }
        output.push_row(out_row);
    }
    Ok(output)
}
