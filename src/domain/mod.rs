// ==========================================
// Gerador de Relatórios - Camada de domínio
// ==========================================
// Responsabilidade: tipos de valor do pipeline
// ==========================================

pub mod concept;
pub mod filter;
pub mod table;
pub mod template;

pub use concept::{AliasRegistry, Concept, CONCEPT_DATA, CONCEPT_FILIAL, CONCEPT_FORNECEDOR};
pub use filter::FilterSpec;
pub use table::{CellValue, DataTable, Row};
pub use template::{
    ColumnSource, Template, TemplateColumn, TemplateLayout, TemplateRegistry, TEMPLATE_FATURAMENTO,
    TEMPLATE_IDENTITY,
};
