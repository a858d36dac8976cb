// ==========================================
// Gerador de Relatórios - API de relatórios
// ==========================================
// Responsabilidade: orquestrar o pipeline por upload_id
// Fluxo: carregar -> selecionar aba -> normalizar -> datas ->
//        filtrar -> projetar
// ==========================================

use crate::domain::{
    AliasRegistry, DataTable, FilterSpec, TemplateRegistry, CONCEPT_DATA, CONCEPT_FILIAL,
    CONCEPT_FORNECEDOR,
};
use crate::ingest::{select_sheet, UniversalWorkbook};
use crate::pipeline::{
    apply_filters, decompose_dates, normalize_table, project, resolve_column, FilterBindings,
    ReportError, ReportResult, COL_ANO, COL_DIA, COL_MES,
};
use crate::store::UploadStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Valores distintos disponíveis para montar filtros.
///
/// Conceito sem coluna na planilha aparece como lista vazia: para a
/// listagem, ausência não é fatal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportOptions {
    pub fornecedor: Vec<String>,
    pub filial: Vec<String>,
    pub ano: Vec<i64>,
    pub mes: Vec<i64>,
    pub dia: Vec<i64>,
}

// ==========================================
// ReportApi - fachada do pipeline
// ==========================================
pub struct ReportApi<S: UploadStore> {
    store: Arc<S>,
    registry: AliasRegistry,
    templates: TemplateRegistry,
}

impl<S: UploadStore> ReportApi<S> {
    /// API com os registros padrão de conceitos e templates
    pub fn new(store: Arc<S>) -> Self {
        Self::with_registries(store, AliasRegistry::builtin(), TemplateRegistry::builtin())
    }

    pub fn with_registries(
        store: Arc<S>,
        registry: AliasRegistry,
        templates: TemplateRegistry,
    ) -> Self {
        Self {
            store,
            registry,
            templates,
        }
    }

    /// Metade comum do pipeline: carrega o upload, escolhe a aba,
    /// normaliza cabeçalhos e anexa partes de data se houver coluna
    /// de data resolvível.
    async fn load_table(&self, upload_id: &str) -> ReportResult<DataTable> {
        let upload = self.store.get(upload_id).await?;
        let mut workbook = UniversalWorkbook::open(upload.bytes.clone(), &upload.extension)?;

        let sheet = select_sheet(workbook.as_mut(), &self.registry)?;
        debug!(upload_id = %upload_id, aba = %sheet, "aba selecionada");

        let raw = workbook.read_sheet(&sheet, None)?;
        let table = normalize_table(&raw);

        let table = match self
            .registry
            .get(CONCEPT_DATA)
            .and_then(|concept| resolve_column(&table, concept))
        {
            Some(date_column) => decompose_dates(table, &date_column),
            // sem coluna de data: segue sem partes derivadas
            None => table,
        };
        Ok(table)
    }

    fn bindings(&self, table: &DataTable) -> FilterBindings {
        let resolve = |name: &str| {
            self.registry
                .get(name)
                .and_then(|concept| resolve_column(table, concept))
        };
        FilterBindings {
            fornecedor: resolve(CONCEPT_FORNECEDOR),
            filial: resolve(CONCEPT_FILIAL),
        }
    }

    /// Lista os valores distintos filtráveis de um upload
    #[instrument(skip(self))]
    pub async fn list_options(&self, upload_id: &str) -> ReportResult<ReportOptions> {
        let table = self.load_table(upload_id).await?;
        let bindings = self.bindings(&table);

        let options = ReportOptions {
            fornecedor: bindings
                .fornecedor
                .as_deref()
                .map(|c| table.distinct_text(c))
                .unwrap_or_default(),
            filial: bindings
                .filial
                .as_deref()
                .map(|c| table.distinct_text(c))
                .unwrap_or_default(),
            ano: table.distinct_ints(COL_ANO),
            mes: table.distinct_ints(COL_MES),
            dia: table.distinct_ints(COL_DIA),
        };

        info!(
            upload_id = %upload_id,
            fornecedores = options.fornecedor.len(),
            filiais = options.filial.len(),
            anos = options.ano.len(),
            "opções listadas"
        );
        Ok(options)
    }

    /// Gera o relatório: filtra a tabela e projeta no template pedido.
    /// A tabela resultante segue para o exportador escolhido pelo
    /// chamador.
    #[instrument(skip(self, spec))]
    pub async fn generate_report(
        &self,
        upload_id: &str,
        template_name: &str,
        spec: &FilterSpec,
    ) -> ReportResult<DataTable> {
        // valida o template antes de qualquer leitura
        let template = self.templates.get(template_name).ok_or_else(|| {
            ReportError::UnknownTemplate {
                name: template_name.to_string(),
                known: self.templates.names(),
            }
        })?;

        let table = self.load_table(upload_id).await?;
        let bindings = self.bindings(&table);

        let filtered = apply_filters(table, spec, &bindings)?;
        let output = project(filtered, template, &self.registry)?;

        info!(
            upload_id = %upload_id,
            template = %template_name,
            linhas = output.len(),
            "relatório gerado"
        );
        Ok(output)
    }
}
