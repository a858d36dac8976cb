// ==========================================
// Gerador de Relatórios - Teste integrado do pipeline
// ==========================================
// Cenário de referência: planilha de faturamento com cabeçalhos
// acentuados, filtro por fornecedor/ano e projeção no template
// ==========================================

use gerador_relatorios::domain::{
    AliasRegistry, CellValue, DataTable, FilterSpec, Row, TemplateRegistry, TEMPLATE_FATURAMENTO,
    TEMPLATE_IDENTITY,
};
use gerador_relatorios::pipeline::{
    apply_filters, decompose_dates, normalize_table, project, resolve_column, FilterBindings,
    ReportError, COL_ANO,
};

// ==========================================
// Fixture: tabela crua do cenário CAMBER/TEUTO
// ==========================================
fn raw_table() -> DataTable {
    let headers = [
        "Fornecedor",
        "Emissão",
        "UF",
        "CNPJ_Cli",
        "Razão Social",
        "Descrição",
        "Qtd_CX",
        "Vlr_Caixa",
    ];
    let mut table = DataTable::new(headers.iter().map(|h| h.to_string()).collect());

    for cells in [
        [
            "CAMBER", "2024-03-05", "SP", "123", "Acme", "Widget", "10", "100",
        ],
        [
            "TEUTO", "2024-04-01", "RJ", "456", "Beta", "Gadget", "5", "50",
        ],
    ] {
        let mut row = Row::new();
        for (header, value) in headers.iter().zip(cells) {
            row.insert(header.to_string(), CellValue::Text(value.to_string()));
        }
        table.push_row(row);
    }
    table
}

fn prepared_table() -> DataTable {
    let table = normalize_table(&raw_table());
    decompose_dates(table, "emissao")
}

fn bindings(table: &DataTable) -> FilterBindings {
    let registry = AliasRegistry::builtin();
    let resolve = |name: &str| {
        registry
            .get(name)
            .and_then(|concept| resolve_column(table, concept))
    };
    FilterBindings {
        fornecedor: resolve("fornecedor"),
        filial: resolve("filial"),
    }
}

#[test]
fn test_normalized_headers_resolve_concepts() {
    let table = prepared_table();
    let registry = AliasRegistry::builtin();

    // "Emissão" resolve o conceito de data via apelido "emissao"
    let data = registry.get("data").unwrap();
    assert_eq!(resolve_column(&table, data), Some("emissao".to_string()));

    let uf = registry.get("uf").unwrap();
    assert_eq!(resolve_column(&table, uf), Some("uf".to_string()));
}

#[test]
fn test_filter_camber_2024_keeps_first_row() {
    let table = prepared_table();
    let spec = FilterSpec {
        fornecedor: vec!["CAMBER".into()],
        ano: vec![2024],
        ..Default::default()
    };

    let result = apply_filters(table.clone(), &spec, &bindings(&table)).unwrap();
    assert_eq!(result.len(), 1);
    let row = &result.rows()[0];
    assert_eq!(row["fornecedor"], CellValue::Text("CAMBER".into()));
    assert_eq!(row[COL_ANO], CellValue::Int(2024));
}

#[test]
fn test_projection_after_filter_matches_scenario() {
    let table = prepared_table();
    let spec = FilterSpec {
        fornecedor: vec!["CAMBER".into()],
        ano: vec![2024],
        ..Default::default()
    };
    let filtered = apply_filters(table.clone(), &spec, &bindings(&table)).unwrap();

    let registry = AliasRegistry::builtin();
    let templates = TemplateRegistry::builtin();
    let template = templates.get(TEMPLATE_FATURAMENTO).unwrap();
    let output = project(filtered, template, &registry).unwrap();

    assert_eq!(
        output.columns(),
        &[
            "uf".to_string(),
            "cnpj_cli".to_string(),
            "razao_social".to_string(),
            "descricao".to_string(),
            "qtd_cx".to_string(),
            "vlr_caixa".to_string(),
        ]
    );
    assert_eq!(output.len(), 1);
    let row = &output.rows()[0];
    let values: Vec<String> = output
        .columns()
        .iter()
        .map(|c| output.cell(row, c).as_text())
        .collect();
    assert_eq!(values, vec!["SP", "123", "Acme", "Widget", "10", "100"]);
}

#[test]
fn test_empty_intersection_is_empty_result() {
    let table = prepared_table();
    let spec = FilterSpec {
        fornecedor: vec!["ZYDUS".into()],
        ..Default::default()
    };
    let result = apply_filters(table.clone(), &spec, &bindings(&table));
    assert!(matches!(result, Err(ReportError::EmptyResult)));
}

#[test]
fn test_identity_template_preserves_filtered_table() {
    let table = prepared_table();
    let registry = AliasRegistry::builtin();
    let templates = TemplateRegistry::builtin();
    let identity = templates.get(TEMPLATE_IDENTITY).unwrap();

    let output = project(table.clone(), identity, &registry).unwrap();
    assert_eq!(output, table);
}

#[test]
fn test_projection_without_required_column_fails_loudly() {
    // tabela sem UF: a projeção nomeia o conceito faltante e não
    // devolve saída parcial
    let mut raw = raw_table();
    let columns: Vec<String> = raw
        .columns()
        .iter()
        .filter(|c| c.as_str() != "UF")
        .cloned()
        .collect();
    let mut stripped = DataTable::new(columns.clone());
    for row in raw.rows() {
        let mut out = Row::new();
        for c in &columns {
            out.insert(c.clone(), raw.cell(row, c).clone());
        }
        stripped.push_row(out);
    }
    raw = stripped;

    let table = normalize_table(&raw);
    let registry = AliasRegistry::builtin();
    let templates = TemplateRegistry::builtin();
    let template = templates.get(TEMPLATE_FATURAMENTO).unwrap();

    match project(table, template, &registry) {
        Err(ReportError::UnresolvedConcept { concepts }) => {
            assert_eq!(concepts, vec!["uf".to_string()]);
        }
        other => panic!("esperava UnresolvedConcept, veio {:?}", other.map(|_| ())),
    }
}
