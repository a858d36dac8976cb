// ==========================================
// Gerador de Relatórios - Camada de ingestão
// ==========================================
// Responsabilidade: abrir uploads e escolher a aba de trabalho
// ==========================================

pub mod sheet_selector;
pub mod workbook;

pub use sheet_selector::{select_sheet, SAMPLE_ROWS};
pub use workbook::{CsvWorkbook, ExcelWorkbook, UniversalWorkbook, Workbook};
