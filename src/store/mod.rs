// ==========================================
// Gerador de Relatórios - Armazenamento de uploads
// ==========================================
// Responsabilidade: guardar bytes de upload por identificador opaco
// Ciclo de vida: criado na ingestão, lido quantas vezes for preciso;
// retenção/expurgo ficam com política externa
// ==========================================

use crate::pipeline::error::{ReportError, ReportResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;
use uuid::Uuid;

/// Planilha enviada: bytes crus + extensão declarada
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub extension: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Monta um upload extraindo a extensão do nome do arquivo
    pub fn from_filename(filename: &str, bytes: Vec<u8>) -> Self {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        Self {
            filename: filename.to_string(),
            extension,
            bytes,
        }
    }
}

// ==========================================
// UploadStore Trait
// ==========================================
// Colaborador externo do pipeline: o núcleo só lê bytes+extensão por
// id. Nenhum estado derivado volta a ser escrito no upload, então
// leituras concorrentes do mesmo id são seguras.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Guarda o upload e devolve o identificador gerado
    async fn put(&self, upload: Upload) -> ReportResult<String>;

    /// Recupera um upload pelo identificador
    async fn get(&self, upload_id: &str) -> ReportResult<Arc<Upload>>;
}

// ==========================================
// MemoryUploadStore - armazenamento em memória
// ==========================================
// Vida útil de um processo, sem persistência.
#[derive(Default)]
pub struct MemoryUploadStore {
    uploads: RwLock<HashMap<String, Arc<Upload>>>,
}

impl MemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn put(&self, upload: Upload) -> ReportResult<String> {
        let upload_id = Uuid::new_v4().to_string();
        info!(
            upload_id = %upload_id,
            filename = %upload.filename,
            bytes = upload.bytes.len(),
            "upload armazenado"
        );
        let mut uploads = self
            .uploads
            .write()
            .map_err(|e| ReportError::Other(anyhow::anyhow!("lock envenenado: {}", e)))?;
        uploads.insert(upload_id.clone(), Arc::new(upload));
        Ok(upload_id)
    }

    async fn get(&self, upload_id: &str) -> ReportResult<Arc<Upload>> {
        let uploads = self
            .uploads
            .read()
            .map_err(|e| ReportError::Other(anyhow::anyhow!("lock envenenado: {}", e)))?;
        uploads
            .get(upload_id)
            .cloned()
            .ok_or_else(|| ReportError::UploadNotFound(upload_id.to_string()))
    }
}
