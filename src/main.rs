// ==========================================
// Gerador de Relatórios - Entrada de linha de comando
// ==========================================
// Uso:
//   gerador-relatorios <arquivo>                 lista as opções (JSON)
//   gerador-relatorios <arquivo> --template T    gera o relatório CSV
// Filtros: --fornecedor V --filial V --ano N --mes N --dia N
// Saída:   --saida caminho.csv (padrão: relatorio.csv)
// ==========================================

use anyhow::{bail, Context, Result};
use gerador_relatorios::{
    logging, CsvExporter, FilterSpec, MemoryUploadStore, ReportApi, TableExporter, Upload,
    UploadStore, APP_NAME, VERSION,
};
use std::fs::File;
use std::sync::Arc;

struct CliArgs {
    input: String,
    template: Option<String>,
    output: String,
    spec: FilterSpec,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let input = args.next().context("informe o arquivo da planilha")?;
    let mut cli = CliArgs {
        input,
        template: None,
        output: "relatorio.csv".to_string(),
        spec: FilterSpec::default(),
    };

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .with_context(|| format!("faltou o valor de {}", flag))
        };
        match flag.as_str() {
            "--template" => cli.template = Some(value()?),
            "--saida" => cli.output = value()?,
            "--fornecedor" => cli.spec.fornecedor.push(value()?),
            "--filial" => cli.spec.filial.push(value()?),
            "--ano" => cli.spec.ano.push(value()?.parse().context("--ano inválido")?),
            "--mes" => cli.spec.mes.push(value()?.parse().context("--mes inválido")?),
            "--dia" => cli.spec.dia.push(value()?.parse().context("--dia inválido")?),
            other => bail!("argumento desconhecido: {}", other),
        }
    }
    Ok(cli)
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    tracing::info!("{} v{}", APP_NAME, VERSION);

    let cli = parse_args(std::env::args().skip(1))?;

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("não foi possível ler {}", cli.input))?;
    let upload = Upload::from_filename(&cli.input, bytes);

    let store = Arc::new(MemoryUploadStore::new());
    let upload_id = store.put(upload).await?;
    let api = ReportApi::new(store);

    match cli.template {
        None => {
            let options = api.list_options(&upload_id).await?;
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        Some(template) => {
            let table = api.generate_report(&upload_id, &template, &cli.spec).await?;
            let mut file = File::create(&cli.output)
                .with_context(|| format!("não foi possível criar {}", cli.output))?;
            CsvExporter.export(&table, &mut file)?;
            tracing::info!(linhas = table.len(), saida = %cli.output, "relatório escrito");
        }
    }
    Ok(())
}
