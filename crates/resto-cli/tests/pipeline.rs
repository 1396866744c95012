//! Integration tests for the pipeline module.

use std::fs;
use std::path::Path;

use polars::prelude::DataType;
use resto_cli::pipeline::{RawInputs, analyze, normalize, run_pipeline};
use resto_ingest::DirectoryLoader;
use resto_model::{Dataset, Layer, RawTable};
use resto_output::{DirectoryWriter, OutputFormat};
use tempfile::TempDir;

fn write_fixtures(dir: &Path) {
    fs::write(
        dir.join("customers.csv"),
        "id,name,email\n\
         1,Alice,a@test.com\n\
         2,Bob,b@test.com\n\
         1,Alice,a@test.com\n\
         3,,c@test.com\n",
    )
    .unwrap();
    fs::write(
        dir.join("orders.csv"),
        "id,customer,ordered_at,subtotal,tax_paid,order_total\n\
         ORD-001,1,2024-01-01,100.0,10.0,110.0\n\
         ORD-002,2,2024-01-02 18:30:00,150.0,15.0,165.0\n\
         ORD-001,1,2024-01-01,100.0,10.0,110.0\n\
         ORD-003,3,2024-01-03,200.0,,220.0\n",
    )
    .unwrap();
    fs::write(
        dir.join("tickets.jsonl"),
        "{\"ticket_id\":\"TCK-001\",\"order_id\":\"ORD-001\",\"status\":\"resolved\",\"tags\":[\"order\",\"delivery\"]}\n\
         {\"ticket_id\":\"TCK-002\",\"order_id\":\"ORD-001\",\"status\":\"open\",\"tags\":{\"category\":\"billing\",\"urgent\":true}}\n\
         {\"ticket_id\":\"TCK-003\",\"order_id\":\"ORD-002\",\"status\":\"open\",\"tags\":{\"urgent\":true,\"category\":\"billing\"}}\n\
         \n\
         {\"ticket_id\":\"TCK-001\",\"order_id\":\"ORD-001\",\"status\":\"resolved\",\"tags\":[\"order\",\"delivery\"]}\n\
         {\"ticket_id\":\"TCK-004\",\"order_id\":\"ORD-003\",\"status\":null,\"tags\":[\"refund\"]}\n",
    )
    .unwrap();
}

fn scalar(df: &polars::prelude::DataFrame, column: &str) -> f64 {
    df.column(column).unwrap().f64().unwrap().get(0).unwrap()
}

#[test]
fn full_run_writes_silver_and_gold() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_fixtures(data.path());

    let loader = DirectoryLoader::open(data.path()).unwrap();
    let writer = DirectoryWriter::new(out.path(), OutputFormat::Csv);
    let result = run_pipeline(&loader, Some(&writer)).unwrap();

    assert_eq!(result.cleaned.customers.height(), 2);
    assert_eq!(result.cleaned.orders.height(), 2);
    assert_eq!(result.cleaned.tickets.height(), 3);
    assert_eq!(
        result.cleaned.orders.column("ordered_at").unwrap().dtype(),
        &DataType::Datetime(polars::prelude::TimeUnit::Microseconds, None)
    );
    assert_eq!(scalar(&result.gold.average_order_value, "average_order_value"), 125.0);
    assert_eq!(scalar(&result.gold.total_revenue, "total_revenue"), 250.0);

    let counts = &result.gold.tickets_per_order;
    let ids: Vec<&str> = counts
        .column("order_id")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(ids, ["ORD-001", "ORD-002"]);

    assert_eq!(result.datasets.len(), Dataset::ALL.len());
    for summary in &result.datasets {
        match summary.dataset.layer() {
            Layer::Bronze => {
                assert!(summary.output.is_none());
                assert!(summary.rows_in.is_none());
            }
            Layer::Silver | Layer::Gold => {
                let path = summary.output.as_ref().unwrap();
                assert!(path.exists(), "{} missing", path.display());
                assert!(path.starts_with(out.path().join(summary.dataset.layer().as_str())));
            }
        }
    }
    let tickets = result
        .datasets
        .iter()
        .find(|s| s.dataset == Dataset::CleanedTickets)
        .unwrap();
    assert_eq!(tickets.rows_in, Some(5));
    assert_eq!(tickets.rows_out, 3);
}

#[test]
fn dry_run_writes_nothing() {
    let data = TempDir::new().unwrap();
    write_fixtures(data.path());

    let loader = DirectoryLoader::open(data.path()).unwrap();
    let result = run_pipeline(&loader, None).unwrap();

    assert!(result.datasets.iter().all(|s| s.output.is_none()));
    assert!(!data.path().join("output").exists());
}

#[test]
fn missing_source_fails_the_run() {
    let data = TempDir::new().unwrap();
    write_fixtures(data.path());
    fs::remove_file(data.path().join("tickets.jsonl")).unwrap();

    let loader = DirectoryLoader::open(data.path()).unwrap();
    let error = run_pipeline(&loader, None).unwrap_err();
    assert!(format!("{error:#}").contains("load tickets"));
}

#[test]
fn stages_compose_in_memory() {
    let raw = RawInputs {
        customers: polars::df! { "id" => [1i64] }.unwrap(),
        orders: polars::df! {
            "id" => ["ORD-001"],
            "ordered_at" => ["2024-01-01T08:00:00Z"],
            "subtotal" => [42.0],
        }
        .unwrap(),
        tickets: RawTable::with_columns(["ticket_id", "order_id"]),
    };
    let cleaned = normalize(&raw).unwrap();
    let gold = analyze(&cleaned).unwrap();

    assert_eq!(cleaned.tickets.height(), 0);
    assert_eq!(gold.tickets_per_order.height(), 0);
    assert_eq!(scalar(&gold.total_revenue, "total_revenue"), 42.0);
}
