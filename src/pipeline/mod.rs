// ==========================================
// Gerador de Relatórios - Pipeline de transformação
// ==========================================
// Responsabilidade: núcleo adaptativo de esquema
// Fluxo: normalização -> resolução -> datas -> filtros -> projeção
// ==========================================

pub mod dates;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod projector;
pub mod resolver;

pub use dates::{decompose_dates, COL_ANO, COL_DIA, COL_MES};
pub use error::{ReportError, ReportResult};
pub use filter::{apply_filters, FilterBindings};
pub use normalize::{normalize_header, normalize_table};
pub use projector::project;
pub use resolver::resolve_column;
