//! Integration tests for directory loading.

use std::fs;

use polars::prelude::DataType;
use resto_ingest::{DirectoryLoader, IngestError, Loader};
use resto_model::{Dataset, Value};
use tempfile::TempDir;

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("orders.csv"),
        "id,customer,ordered_at,subtotal,tax_paid,order_total\n\
         ORD-001,1,2024-01-01,100.0,10.0,110.0\n\
         ORD-002,2,2024-01-02,150.0,,165.0\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("tickets.jsonl"),
        "{\"ticket_id\":\"TCK-001\",\"order_id\":\"ORD-001\",\"tags\":{\"b\":1,\"a\":2}}\n\
         {\"ticket_id\":\"TCK-002\",\"order_id\":\"ORD-002\",\"tags\":[\"refund\"]}\n",
    )
    .unwrap();
    dir
}

#[test]
fn loads_csv_frame() {
    let dir = data_dir();
    let loader = DirectoryLoader::open(dir.path()).unwrap();
    let orders = loader.load_frame(Dataset::Orders).unwrap();

    assert_eq!(orders.height(), 2);
    assert_eq!(orders.column("subtotal").unwrap().dtype(), &DataType::Float64);
    assert_eq!(orders.column("tax_paid").unwrap().null_count(), 1);
    assert_eq!(orders.column("ordered_at").unwrap().dtype(), &DataType::String);
}

#[test]
fn loads_ticket_records_with_source_key_order() {
    let dir = data_dir();
    let loader = DirectoryLoader::new(dir.path());
    let tickets = loader.load_records(Dataset::TicketsJsonl).unwrap();

    assert_eq!(tickets.columns(), ["ticket_id", "order_id", "tags"]);
    assert_eq!(
        tickets.rows()[0][2],
        Value::object([("b", Value::Int(1)), ("a", Value::Int(2))])
    );
}

#[test]
fn csv_dataset_loads_as_records() {
    let dir = data_dir();
    let loader = DirectoryLoader::new(dir.path());
    let orders = loader.load_records(Dataset::Orders).unwrap();

    assert_eq!(orders.height(), 2);
    assert_eq!(orders.rows()[1][4], Value::Null);
}

#[test]
fn bad_json_line_is_located() {
    let dir = data_dir();
    fs::write(
        dir.path().join("broken.jsonl"),
        "{\"ticket_id\":\"TCK-001\"}\n{not json}\n",
    )
    .unwrap();
    let loader = DirectoryLoader::new(dir.path()).with_file(Dataset::TicketsJsonl, "broken.jsonl");

    match loader.load_records(Dataset::TicketsJsonl) {
        Err(IngestError::JsonLine { path, line, .. }) => {
            assert_eq!(line, 2);
            assert!(path.ends_with("broken.jsonl"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_source_file_is_reported() {
    let dir = data_dir();
    let loader = DirectoryLoader::new(dir.path());
    assert!(matches!(
        loader.load_frame(Dataset::Customers),
        Err(IngestError::FileNotFound { .. })
    ));
}
