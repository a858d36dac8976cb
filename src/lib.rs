// ==========================================
// Gerador de Relatórios - Biblioteca principal
// ==========================================
// Pipeline adaptativo de esquema: planilha de layout desconhecido ->
// resolução de conceitos -> filtros -> projeção em template
// ==========================================

// Camada de domínio - tipos de valor
pub mod domain;

// Camada de ingestão - leitura de planilhas e seleção de aba
pub mod ingest;

// Núcleo do pipeline - normalização, resolução, filtros, projeção
pub mod pipeline;

// Armazenamento de uploads
pub mod store;

// Exportação tabular
pub mod export;

// API de relatórios
pub mod api;

// Sistema de logs
pub mod logging;

// ==========================================
// Reexportação dos tipos centrais
// ==========================================

pub use api::{ReportApi, ReportOptions};
pub use domain::{
    AliasRegistry, CellValue, Concept, DataTable, FilterSpec, Row, Template, TemplateRegistry,
};
pub use export::{CsvExporter, TableExporter};
pub use pipeline::{ReportError, ReportResult};
pub use store::{MemoryUploadStore, Upload, UploadStore};

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Gerador de Relatórios";
