// ==========================================
// Gerador de Relatórios - Seleção de aba
// ==========================================
// Responsabilidade: escolher a aba com mais conceitos conhecidos
// A seleção nunca falha em pasta não vazia: sem cobertura nenhuma,
// vale a primeira aba (o chamador pode querer só o passthrough)
// ==========================================

use crate::domain::AliasRegistry;
use crate::ingest::workbook::Workbook;
use crate::pipeline::error::{ReportError, ReportResult};
use crate::pipeline::normalize::normalize_table;
use crate::pipeline::resolver::resolve_column;
use tracing::{debug, warn};

/// Linhas lidas por aba durante a pontuação. Os cabeçalhos bastam como
/// sinal; ler a aba inteira só para pontuar seria desperdício.
pub const SAMPLE_ROWS: usize = 50;

/// Peso da cobertura de conceitos na pontuação. Grande o bastante para
/// a cobertura dominar; a contagem de colunas só desempata abas de
/// cobertura igual.
const COVERAGE_WEIGHT: usize = 1000;

/// Escolhe a aba mais plausível da pasta de trabalho.
///
/// Pontuação por aba: conceitos com coluna resolvível × peso + número
/// de colunas cruas. Empate fica com a primeira aba na ordem da pasta.
pub fn select_sheet(
    workbook: &mut dyn Workbook,
    registry: &AliasRegistry,
) -> ReportResult<String> {
    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(ReportError::UnreadableSource(
            "pasta de trabalho sem abas".to_string(),
        ));
    }

    let mut best: Option<(usize, usize, String)> = None; // (score, hits, nome)

    for name in &names {
        let sample = match workbook.read_sheet(name, Some(SAMPLE_ROWS)) {
            Ok(table) => table,
            Err(e) => {
                warn!(aba = %name, erro = %e, "aba ignorada na seleção");
                continue;
            }
        };

        let normalized = normalize_table(&sample);
        let hits = registry
            .concepts()
            .iter()
            .filter(|c| resolve_column(&normalized, c).is_some())
            .count();
        let score = hits * COVERAGE_WEIGHT + sample.columns().len();

        debug!(aba = %name, conceitos = hits, score = score, "aba pontuada");

        let better = match &best {
            Some((best_score, _, _)) => score > *best_score,
            None => true,
        };
        if better {
            best = Some((score, hits, name.clone()));
        }
    }

    match best {
        // piso: nenhuma aba com conceito algum -> primeira aba
        Some((_, hits, name)) if hits > 0 => Ok(name),
        _ => Ok(names[0].clone()),
    }
}
