// ==========================================
// Gerador de Relatórios - Modelo tabular
// ==========================================
// Responsabilidade: valores de célula + tabela em memória
// Uma tabela carrega cabeçalhos ordenados e linhas como mapas
// ==========================================

use chrono::NaiveDate;
use std::collections::HashMap;

/// Valor de uma célula da planilha
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Int(i64),
    Date(NaiveDate),
    Empty,
}

impl CellValue {
    /// Representação textual do valor (total, nunca falha)
    ///
    /// Números inteiros são formatados sem casa decimal ("10", não "10.0"),
    /// datas em ISO (YYYY-MM-DD). Célula vazia vira string vazia.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Int(i) => i.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Valor como inteiro, se a célula for numérica
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(*n as i64),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Uma linha: mapa coluna -> valor
pub type Row = HashMap<String, CellValue>;

// ==========================================
// DataTable - tabela em memória
// ==========================================
// Cobre tanto a tabela crua (cabeçalhos originais) quanto a
// normalizada (slugs). A ordem das colunas é preservada.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl DataTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Acrescenta uma linha; chaves fora da lista de colunas são ignoradas
    /// na leitura, então o chamador deve manter linha e colunas coerentes.
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Acrescenta uma coluna derivada; valores na ordem das linhas.
    /// Se a coluna já existe, os valores são sobrescritos.
    pub fn push_column(&mut self, name: &str, values: Vec<CellValue>) {
        debug_assert_eq!(values.len(), self.rows.len());
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(name.to_string(), value);
        }
    }

    /// Nova tabela com as mesmas colunas e apenas as linhas que passam no predicado
    pub fn filter_rows<F>(&self, mut pred: F) -> DataTable
    where
        F: FnMut(&Row) -> bool,
    {
        DataTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| pred(r)).cloned().collect(),
        }
    }

    /// Valor de uma célula (Empty se a coluna não existe na linha)
    pub fn cell<'a>(&self, row: &'a Row, column: &str) -> &'a CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        row.get(column).unwrap_or(&EMPTY)
    }

    /// Valores distintos de uma coluna como texto, ordenados, sem vazios
    pub fn distinct_text(&self, column: &str) -> Vec<String> {
        let mut values: Vec<String> = self
            .rows
            .iter()
            .filter_map(|r| r.get(column))
            .filter(|v| !v.is_empty())
            .map(|v| v.as_text())
            .collect();
        values.sort();
        values.dedup();
        values
    }

    /// Valores distintos de uma coluna como inteiros, ordenados
    pub fn distinct_ints(&self, column: &str) -> Vec<i64> {
        let mut values: Vec<i64> = self
            .rows
            .iter()
            .filter_map(|r| r.get(column))
            .filter_map(|v| v.as_int())
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }
}
