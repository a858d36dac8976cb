// ==========================================
// Gerador de Relatórios - Teste de ponta a ponta da API
// ==========================================
// Upload em memória -> opções -> geração -> exportação CSV
// ==========================================

use gerador_relatorios::{
    logging, CsvExporter, FilterSpec, MemoryUploadStore, ReportApi, ReportError, TableExporter,
    Upload, UploadStore,
};
use std::sync::Arc;

const NOTAS_CSV: &str = "\
Fornecedor,Emissão,UF,CNPJ_Cli,Razão Social,Descrição,Qtd_CX,Vlr_Caixa
CAMBER,05/03/2024,SP,123,Acme,Widget,10,100
TEUTO,01/04/2024,RJ,456,Beta,Gadget,5,50
CAMBER,20/12/2023,MG,789,Gama,Widget,2,20
";

async fn setup_api_with_upload(
    filename: &str,
    content: &[u8],
) -> (ReportApi<MemoryUploadStore>, String) {
    logging::init_test();
    let store = Arc::new(MemoryUploadStore::new());
    let upload_id = store
        .put(Upload::from_filename(filename, content.to_vec()))
        .await
        .expect("falha ao armazenar upload");
    (ReportApi::new(store), upload_id)
}

#[tokio::test]
async fn test_list_options() {
    let (api, upload_id) = setup_api_with_upload("notas.csv", NOTAS_CSV.as_bytes()).await;

    let options = api.list_options(&upload_id).await.unwrap();
    assert_eq!(options.fornecedor, vec!["CAMBER", "TEUTO"]);
    assert_eq!(options.ano, vec![2023, 2024]);
    assert_eq!(options.mes, vec![3, 4, 12]);
    assert_eq!(options.dia, vec![1, 5, 20]);
    // planilha sem coluna de filial: lista vazia, sem erro
    assert!(options.filial.is_empty());
}

#[tokio::test]
async fn test_generate_report_filtered() {
    let (api, upload_id) = setup_api_with_upload("notas.csv", NOTAS_CSV.as_bytes()).await;

    let spec = FilterSpec {
        fornecedor: vec!["CAMBER".into()],
        ano: vec![2024],
        ..Default::default()
    };
    let table = api
        .generate_report(&upload_id, "faturamento", &spec)
        .await
        .unwrap();

    let mut buffer: Vec<u8> = Vec::new();
    CsvExporter.export(&table, &mut buffer).unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "uf,cnpj_cli,razao_social,descricao,qtd_cx,vlr_caixa\nSP,123,Acme,Widget,10,100\n"
    );
}

#[tokio::test]
async fn test_generate_report_exported_to_disk() {
    let (api, upload_id) = setup_api_with_upload("notas.csv", NOTAS_CSV.as_bytes()).await;

    let spec = FilterSpec {
        fornecedor: vec!["CAMBER".into()],
        ano: vec![2024],
        ..Default::default()
    };
    let table = api
        .generate_report(&upload_id, "faturamento", &spec)
        .await
        .unwrap();

    // exporta para arquivo temporário e relê do disco
    let temp_file = tempfile::NamedTempFile::new().expect("falha ao criar arquivo temporário");
    {
        let mut file = temp_file.reopen().unwrap();
        CsvExporter.export(&table, &mut file).unwrap();
    }

    let written = std::fs::read_to_string(temp_file.path()).unwrap();
    assert_eq!(
        written,
        "uf,cnpj_cli,razao_social,descricao,qtd_cx,vlr_caixa\nSP,123,Acme,Widget,10,100\n"
    );
}

#[tokio::test]
async fn test_generate_report_identity_template() {
    let (api, upload_id) = setup_api_with_upload("notas.csv", NOTAS_CSV.as_bytes()).await;

    let table = api
        .generate_report(&upload_id, "identidade", &FilterSpec::default())
        .await
        .unwrap();
    // identidade: todas as linhas, com as partes de data derivadas
    assert_eq!(table.len(), 3);
    assert!(table.has_column("ano"));
    assert!(table.has_column("emissao"));
}

#[tokio::test]
async fn test_unknown_template_reports_valid_set() {
    let (api, upload_id) = setup_api_with_upload("notas.csv", NOTAS_CSV.as_bytes()).await;

    let result = api
        .generate_report(&upload_id, "inexistente", &FilterSpec::default())
        .await;
    match result {
        Err(ReportError::UnknownTemplate { name, known }) => {
            assert_eq!(name, "inexistente");
            assert!(known.contains(&"faturamento".to_string()));
            assert!(known.contains(&"identidade".to_string()));
        }
        other => panic!("esperava UnknownTemplate, veio {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_filters_that_eliminate_everything() {
    let (api, upload_id) = setup_api_with_upload("notas.csv", NOTAS_CSV.as_bytes()).await;

    let spec = FilterSpec {
        fornecedor: vec!["ZYDUS".into()],
        ..Default::default()
    };
    let result = api.generate_report(&upload_id, "faturamento", &spec).await;
    assert!(matches!(result, Err(ReportError::EmptyResult)));
}

#[tokio::test]
async fn test_unknown_upload_id() {
    let (api, _) = setup_api_with_upload("notas.csv", NOTAS_CSV.as_bytes()).await;

    let result = api.list_options("id-que-nao-existe").await;
    assert!(matches!(result, Err(ReportError::UploadNotFound(_))));
}

#[tokio::test]
async fn test_unsupported_extension() {
    let (api, upload_id) = setup_api_with_upload("dados.pdf", b"%PDF-1.4").await;

    let result = api.list_options(&upload_id).await;
    assert!(matches!(result, Err(ReportError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_unreadable_xlsx() {
    let (api, upload_id) = setup_api_with_upload("quebrado.xlsx", b"nao sou um xlsx").await;

    let result = api.list_options(&upload_id).await;
    assert!(matches!(result, Err(ReportError::UnreadableSource(_))));
}

#[tokio::test]
async fn test_unparsable_dates_do_not_fail_listing() {
    let csv = "\
Fornecedor,Emissão,UF
CAMBER,05/03/2024,SP
TEUTO,sem data,RJ
";
    let (api, upload_id) = setup_api_with_upload("notas.csv", csv.as_bytes()).await;

    let options = api.list_options(&upload_id).await.unwrap();
    // a linha ilegível fica fora das opções de data, mas não derruba nada
    assert_eq!(options.ano, vec![2024]);
    assert_eq!(options.fornecedor, vec!["CAMBER", "TEUTO"]);
}
