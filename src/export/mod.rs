// ==========================================
// Gerador de Relatórios - Exportação tabular
// ==========================================
// Responsabilidade: escrever a tabela projetada para download
// ==========================================

use crate::domain::DataTable;
use crate::pipeline::error::{ReportError, ReportResult};
use std::io::Write;

// ==========================================
// TableExporter Trait
// ==========================================
pub trait TableExporter: Send + Sync {
    /// Serializa a tabela no formato do exportador
    fn export(&self, table: &DataTable, writer: &mut dyn Write) -> ReportResult<()>;

    /// Extensão de arquivo do formato
    fn extension(&self) -> &'static str;
}

// ==========================================
// CsvExporter - saída CSV
// ==========================================
pub struct CsvExporter;

impl TableExporter for CsvExporter {
    fn export(&self, table: &DataTable, writer: &mut dyn Write) -> ReportResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(table.columns())
            .map_err(|e| ReportError::ExportFailed(e.to_string()))?;

        for row in table.rows() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|column| table.cell(row, column).as_text())
                .collect();
            csv_writer
                .write_record(&record)
                .map_err(|e| ReportError::ExportFailed(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ReportError::ExportFailed(e.to_string()))?;
        Ok(())
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}
