// ==========================================
// Gerador de Relatórios - Decomposição de datas
// ==========================================
// Responsabilidade: coluna de data -> colunas derivadas ano/mes/dia
// Convenção de localidade: dia antes do mês quando ambíguo
// ==========================================

use crate::domain::{CellValue, DataTable};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Nomes das colunas derivadas
pub const COL_ANO: &str = "ano";
pub const COL_MES: &str = "mes";
pub const COL_DIA: &str = "dia";

/// Epoch das datas seriais do Excel (sistema 1900, com o ajuste do
/// bug histórico do ano bissexto de 1900)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Maior serial aceito (31/12/9999)
const EXCEL_SERIAL_MAX: f64 = 2_958_465.0;

/// Formatos textuais aceitos, tentados em ordem. Dia-primeiro vem
/// antes para resolver ambiguidade; ISO é inambíguo e também aceito.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d/%m/%y", "%d-%m-%Y", "%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Converte um serial Excel em data de calendário
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=EXCEL_SERIAL_MAX).contains(&serial) {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d).map(|epoch| epoch + Duration::days(serial as i64))
}

/// Interpreta uma string de data, dia-primeiro quando ambíguo
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Interpreta uma célula como data; `None` para valor ausente ou ilegível
fn parse_cell_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => parse_date_text(s),
        CellValue::Number(n) => excel_serial_to_date(*n),
        CellValue::Int(i) => excel_serial_to_date(*i as f64),
        CellValue::Empty => None,
    }
}

/// Anexa as colunas derivadas ano/mes/dia a partir da coluna de data.
///
/// Valores ilegíveis viram células vazias nas três colunas, nunca erro:
/// a linha segue na tabela, apenas não participa de filtros de data nem
/// das listas de opções.
///
/// Idempotente: se as três colunas derivadas já existem, a tabela volta
/// inalterada em vez de recomputar. Isso evita trabalho duplicado em
/// chamadas repetidas e sobrescrita inconsistente quando a mesma tabela
/// é reaproveitada dentro do processo.
pub fn decompose_dates(table: DataTable, date_column: &str) -> DataTable {
    use chrono::Datelike;

    if table.has_column(COL_ANO) && table.has_column(COL_MES) && table.has_column(COL_DIA) {
        return table;
    }

    let mut anos = Vec::with_capacity(table.len());
    let mut meses = Vec::with_capacity(table.len());
    let mut dias = Vec::with_capacity(table.len());

    for row in table.rows() {
        match row.get(date_column).and_then(parse_cell_date) {
            Some(date) => {
                anos.push(CellValue::Int(i64::from(date.year())));
                meses.push(CellValue::Int(i64::from(date.month())));
                dias.push(CellValue::Int(i64::from(date.day())));
            }
            None => {
                anos.push(CellValue::Empty);
                meses.push(CellValue::Empty);
                dias.push(CellValue::Empty);
            }
        }
    }

    let mut table = table;
    table.push_column(COL_ANO, anos);
    table.push_column(COL_MES, meses);
    table.push_column(COL_DIA, dias);
    table
}
