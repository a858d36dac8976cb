// ==========================================
// Gerador de Relatórios - Leitura de planilhas
// ==========================================
// Responsabilidade: bytes do upload -> DataTable por aba
// Suporte: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::domain::{CellValue, DataTable, Row};
use crate::pipeline::dates::excel_serial_to_date;
use crate::pipeline::error::{ReportError, ReportResult};
use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::io::Cursor;

/// Nome da aba única de arquivos CSV
const CSV_SHEET_NAME: &str = "dados";

// ==========================================
// Workbook - abstração de pasta de trabalho
// ==========================================
// Expõe os nomes das abas e a leitura de uma aba nomeada, com limite
// opcional de linhas (a seleção de aba lê só uma amostra).
pub trait Workbook: Send {
    fn sheet_names(&self) -> Vec<String>;

    fn read_sheet(&mut self, name: &str, limit: Option<usize>) -> ReportResult<DataTable>;
}

// ==========================================
// CsvWorkbook - CSV como pasta de aba única
// ==========================================
pub struct CsvWorkbook {
    bytes: Vec<u8>,
}

impl CsvWorkbook {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl Workbook for CsvWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        vec![CSV_SHEET_NAME.to_string()]
    }

    fn read_sheet(&mut self, _name: &str, limit: Option<usize>) -> ReportResult<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolera linhas de comprimento diferente
            .from_reader(self.bytes.as_slice());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut table = DataTable::new(headers.clone());
        for result in reader.records() {
            if let Some(cap) = limit {
                if table.len() >= cap {
                    break;
                }
            }
            let record = result?;
            let mut row = Row::with_capacity(headers.len());
            for (idx, header) in headers.iter().enumerate() {
                let value = record.get(idx).map(str::trim).unwrap_or("");
                let cell = if value.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(value.to_string())
                };
                row.insert(header.clone(), cell);
            }
            // pula linha totalmente em branco
            if row.values().all(CellValue::is_empty) {
                continue;
            }
            table.push_row(row);
        }
        Ok(table)
    }
}

// ==========================================
// ExcelWorkbook - xlsx/xls via calamine
// ==========================================
enum ExcelReader {
    Xlsx(Xlsx<Cursor<Vec<u8>>>),
    Xls(Xls<Cursor<Vec<u8>>>),
}

pub struct ExcelWorkbook {
    inner: ExcelReader,
}

impl ExcelWorkbook {
    pub fn from_xlsx(bytes: Vec<u8>) -> ReportResult<Self> {
        let workbook = Xlsx::new(Cursor::new(bytes))?;
        Ok(Self {
            inner: ExcelReader::Xlsx(workbook),
        })
    }

    pub fn from_xls(bytes: Vec<u8>) -> ReportResult<Self> {
        let workbook = Xls::new(Cursor::new(bytes))?;
        Ok(Self {
            inner: ExcelReader::Xls(workbook),
        })
    }

    fn range(&mut self, name: &str) -> ReportResult<Range<Data>> {
        match &mut self.inner {
            ExcelReader::Xlsx(wb) => Ok(wb.worksheet_range(name)?),
            ExcelReader::Xls(wb) => Ok(wb.worksheet_range(name)?),
        }
    }
}

/// Converte uma célula do calamine para o modelo interno
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => match excel_serial_to_date(dt.as_f64()) {
            Some(date) => CellValue::Date(date),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

impl Workbook for ExcelWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        match &self.inner {
            ExcelReader::Xlsx(wb) => wb.sheet_names().to_vec(),
            ExcelReader::Xls(wb) => wb.sheet_names().to_vec(),
        }
    }

    fn read_sheet(&mut self, name: &str, limit: Option<usize>) -> ReportResult<DataTable> {
        let range = self.range(name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ReportError::UnreadableSource(format!("aba sem linhas: {}", name)))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut table = DataTable::new(headers.clone());
        for data_row in rows {
            if let Some(cap) = limit {
                if table.len() >= cap {
                    break;
                }
            }
            let mut row = Row::with_capacity(headers.len());
            for (idx, header) in headers.iter().enumerate() {
                let cell = data_row.get(idx).map(convert_cell).unwrap_or(CellValue::Empty);
                row.insert(header.clone(), cell);
            }
            if row.values().all(CellValue::is_empty) {
                continue;
            }
            table.push_row(row);
        }
        Ok(table)
    }
}

// ==========================================
// UniversalWorkbook - despacho por extensão
// ==========================================
pub struct UniversalWorkbook;

impl UniversalWorkbook {
    /// Abre os bytes do upload de acordo com a extensão declarada
    pub fn open(bytes: Vec<u8>, extension: &str) -> ReportResult<Box<dyn Workbook>> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Ok(Box::new(CsvWorkbook::new(bytes))),
            "xlsx" => Ok(Box::new(ExcelWorkbook::from_xlsx(bytes)?)),
            "xls" => Ok(Box::new(ExcelWorkbook::from_xls(bytes)?)),
            other => Err(ReportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Fornecedor,UF,Qtd_CX\nCAMBER,SP,10\nTEUTO,RJ,5\n";

    #[test]
    fn test_csv_read_all() {
        let mut wb = CsvWorkbook::new(CSV.as_bytes().to_vec());
        assert_eq!(wb.sheet_names(), vec![CSV_SHEET_NAME.to_string()]);

        let table = wb.read_sheet(CSV_SHEET_NAME, None).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), &["Fornecedor", "UF", "Qtd_CX"]);
        assert_eq!(
            table.rows()[0]["Fornecedor"],
            CellValue::Text("CAMBER".into())
        );
    }

    #[test]
    fn test_csv_read_with_limit() {
        let mut wb = CsvWorkbook::new(CSV.as_bytes().to_vec());
        let table = wb.read_sheet(CSV_SHEET_NAME, Some(1)).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_csv_skips_blank_rows() {
        let csv = "A,B\n1,2\n,\n3,4\n";
        let mut wb = CsvWorkbook::new(csv.as_bytes().to_vec());
        let table = wb.read_sheet(CSV_SHEET_NAME, None).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = UniversalWorkbook::open(vec![], "pdf");
        assert!(matches!(result, Err(ReportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_garbage_xlsx_is_unreadable() {
        let result = UniversalWorkbook::open(b"nao sou um zip".to_vec(), "xlsx");
        assert!(matches!(result, Err(ReportError::UnreadableSource(_))));
    }
}
