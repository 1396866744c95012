use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use resto_cli::pipeline::{RunResult, run_pipeline};
use resto_ingest::DirectoryLoader;
use resto_model::Dataset;
use resto_output::{DirectoryWriter, OutputFormat, Writer};

use crate::cli::{OutputFormatArg, RunArgs};
use crate::summary::apply_table_style;

/// Result of `resto run`, with the directory outputs went to.
#[derive(Debug)]
pub struct RunReport {
    pub data_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub result: RunResult,
}

pub fn run_datasets() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Dataset", "Layer", "Inputs"]);
    apply_table_style(&mut table);
    for dataset in Dataset::ALL {
        let inputs = dataset
            .inputs()
            .iter()
            .copied()
            .map(Dataset::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            dataset.as_str().to_string(),
            dataset.layer().to_string(),
            if inputs.is_empty() {
                "-".to_string()
            } else {
                inputs
            },
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run(args: &RunArgs) -> Result<RunReport> {
    let span = info_span!("run", data_dir = %args.data_dir.display());
    let _guard = span.enter();

    let mut loader = DirectoryLoader::open(&args.data_dir)
        .with_context(|| format!("open data directory {}", args.data_dir.display()))?;
    for (dataset, file) in [
        (Dataset::Customers, &args.customers),
        (Dataset::Orders, &args.orders),
        (Dataset::TicketsJsonl, &args.tickets),
    ] {
        if let Some(file) = file {
            loader = loader.with_file(dataset, file.clone());
        }
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.data_dir.join("output"));
    let writer = DirectoryWriter::new(&output_dir, output_format(args.format));
    let writer: Option<&dyn Writer> = if args.dry_run { None } else { Some(&writer) };

    let result = run_pipeline(&loader, writer)?;
    Ok(RunReport {
        data_dir: args.data_dir.clone(),
        output_dir: (!args.dry_run).then_some(output_dir),
        result,
    })
}

fn output_format(format: OutputFormatArg) -> OutputFormat {
    match format {
        OutputFormatArg::Parquet => OutputFormat::Parquet,
        OutputFormatArg::Csv => OutputFormat::Csv,
    }
}
