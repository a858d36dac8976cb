// ==========================================
// Gerador de Relatórios - Erros do pipeline
// ==========================================
// Ferramenta: macro derive do thiserror
// Nenhum erro aqui é transiente: tudo é divergência de dados ou de
// configuração, então a propagação é imediata, sem retry
// ==========================================

use thiserror::Error;

/// Erros do pipeline de geração de relatórios
#[derive(Error, Debug)]
pub enum ReportError {
    // ===== Erros de fonte =====
    #[error("arquivo ilegível: {0}")]
    UnreadableSource(String),

    #[error("formato não suportado: {0} (aceitos: .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("upload não encontrado: {0}")]
    UploadNotFound(String),

    // ===== Erros de resolução =====
    #[error("conceito(s) sem coluna correspondente: {}", concepts.join(", "))]
    UnresolvedConcept { concepts: Vec<String> },

    #[error("template desconhecido: {name} (registrados: {})", known.join(", "))]
    UnknownTemplate { name: String, known: Vec<String> },

    // ===== Erros de resultado =====
    #[error("nenhuma linha sobreviveu aos filtros informados")]
    EmptyResult,

    // ===== Erros de exportação =====
    #[error("falha ao exportar: {0}")]
    ExportFailed(String),

    // ===== Erros gerais =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReportError {
    /// Erro de resolução para um único conceito
    pub fn unresolved(concept: &str) -> Self {
        ReportError::UnresolvedConcept {
            concepts: vec![concept.to_string()],
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::UnreadableSource(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::UnreadableSource(err.to_string())
    }
}

impl From<calamine::XlsxError> for ReportError {
    fn from(err: calamine::XlsxError) -> Self {
        ReportError::UnreadableSource(err.to_string())
    }
}

impl From<calamine::XlsError> for ReportError {
    fn from(err: calamine::XlsError) -> Self {
        ReportError::UnreadableSource(err.to_string())
    }
}

/// Alias de Result do pipeline
pub type ReportResult<T> = Result<T, ReportError>;
