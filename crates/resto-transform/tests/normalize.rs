//! Tests for silver-layer cleaning.

use polars::df;
use polars::prelude::{DataFrame, DataType, TimeUnit};
use resto_common::{count_distinct_rows, count_rows_with_missing, frame_to_raw_table};
use resto_model::RawTable;
use resto_transform::{clean_customers, clean_orders, clean_tickets};
use serde_json::json;

fn sample_customers() -> DataFrame {
    df! {
        "id" => [1i64, 2, 1, 3],
        "name" => [Some("Alice"), Some("Bob"), Some("Alice"), None],
        "email" => ["a@test.com", "b@test.com", "a@test.com", "c@test.com"],
    }
    .unwrap()
}

fn sample_orders() -> DataFrame {
    df! {
        "id" => ["ORD-001", "ORD-002", "ORD-001", "ORD-003"],
        "customer" => [Some(1i64), Some(2), Some(1), None],
        "ordered_at" => ["2024-01-01", "2024-01-02", "2024-01-01", "2024-01-03"],
        "subtotal" => [100.0, 150.0, 100.0, 200.0],
        "tax_paid" => [Some(10.0), Some(15.0), Some(10.0), None],
        "order_total" => [110.0, 165.0, 110.0, 220.0],
    }
    .unwrap()
}

fn sample_tickets() -> RawTable {
    RawTable::from_json_records(vec![
        json!({
            "ticket_id": "TCK-001", "order_id": "ORD-001", "customer_external_id": 1,
            "channel": "email", "priority": "normal", "status": "resolved",
            "tags": ["order", "delivery"], "subject": "Delivery Status", "sentiment": "neutral"
        }),
        json!({
            "ticket_id": "TCK-002", "order_id": "ORD-002", "customer_external_id": 2,
            "channel": "chat", "priority": "high", "status": "open",
            "tags": {"category": "billing"}, "subject": "Billing Issue", "sentiment": "negative"
        }),
        json!({
            "ticket_id": "TCK-001", "order_id": "ORD-001", "customer_external_id": 1,
            "channel": "email", "priority": "normal", "status": "resolved",
            "tags": ["order", "delivery"], "subject": "Delivery Status", "sentiment": "neutral"
        }),
        json!({
            "ticket_id": "TCK-003", "order_id": "ORD-003", "customer_external_id": null,
            "channel": "phone", "priority": "low", "status": null,
            "tags": ["refund"], "subject": null, "sentiment": "positive"
        }),
    ])
    .unwrap()
}

fn strings(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

fn assert_clean(df: &DataFrame) {
    assert_eq!(count_distinct_rows(df).unwrap(), df.height());
    assert_eq!(count_rows_with_missing(df).unwrap(), 0);
}

#[test]
fn customers_are_deduplicated_and_complete() {
    let cleaned = clean_customers(&sample_customers()).unwrap();
    assert_clean(&cleaned);
    assert_eq!(cleaned.height(), 2);
    assert_eq!(strings(&cleaned, "email"), ["a@test.com", "b@test.com"]);
}

#[test]
fn orders_keep_first_duplicate_and_drop_null_tax() {
    let cleaned = clean_orders(&sample_orders()).unwrap();
    assert_clean(&cleaned);
    assert!(cleaned.column("id").is_err());
    assert_eq!(strings(&cleaned, "order_id"), ["ORD-001", "ORD-002"]);
    assert_eq!(
        cleaned.column("ordered_at").unwrap().dtype(),
        &DataType::Datetime(TimeUnit::Microseconds, None)
    );
    assert_eq!(cleaned.column("subtotal").unwrap().dtype(), &DataType::Float64);
    let subtotal = cleaned.column("subtotal").unwrap().f64().unwrap();
    assert_eq!(subtotal.get(1), Some(150.0));
}

#[test]
fn tickets_encode_nested_values() {
    let cleaned = clean_tickets(&sample_tickets()).unwrap();
    assert_clean(&cleaned);
    assert_eq!(strings(&cleaned, "ticket_id"), ["TCK-001", "TCK-002"]);
    assert_eq!(
        strings(&cleaned, "tags"),
        [r#"["order", "delivery"]"#, r#"{"category": "billing"}"#]
    );
    assert_eq!(
        cleaned.column("customer_external_id").unwrap().dtype(),
        &DataType::Int64
    );
}

#[test]
fn encoded_tags_decode_to_source_structure() {
    let cleaned = clean_tickets(&sample_tickets()).unwrap();
    let decoded: Vec<serde_json::Value> = strings(&cleaned, "tags")
        .iter()
        .map(|tag| serde_json::from_str(tag).unwrap())
        .collect();
    assert_eq!(decoded[0], json!(["order", "delivery"]));
    assert_eq!(decoded[1], json!({"category": "billing"}));
}

#[test]
fn structurally_equal_tags_collapse() {
    let raw = RawTable::from_json_records(vec![
        json!({"ticket_id": "TCK-9", "tags": {"category": "billing", "urgent": true}}),
        json!({"ticket_id": "TCK-9", "tags": {"urgent": true, "category": "billing"}}),
    ])
    .unwrap();
    let cleaned = clean_tickets(&raw).unwrap();
    assert_eq!(cleaned.height(), 1);
    assert_eq!(
        strings(&cleaned, "tags"),
        [r#"{"category": "billing", "urgent": true}"#]
    );
}

#[test]
fn nested_values_outside_tags_are_encoded() {
    let raw = RawTable::from_json_records(vec![json!({
        "ticket_id": "TCK-1",
        "meta": {"source": "app", "ids": [3, 1]},
        "tags": "plain"
    })])
    .unwrap();
    let cleaned = clean_tickets(&raw).unwrap();
    assert_eq!(strings(&cleaned, "meta"), [r#"{"ids": [3, 1], "source": "app"}"#]);
    assert_eq!(strings(&cleaned, "tags"), ["plain"]);
}

#[test]
fn ticket_ids_of_different_kinds_stay_separate() {
    let raw = RawTable::from_json_records(vec![
        json!({"ticket_id": 7, "tags": ["a"]}),
        json!({"ticket_id": "7", "tags": ["a"]}),
        json!({"ticket_id": 7, "tags": ["a"]}),
    ])
    .unwrap();
    let cleaned = clean_tickets(&raw).unwrap();
    assert_eq!(cleaned.height(), 2);
}

#[test]
fn tickets_without_tags_are_kept() {
    let raw = RawTable::from_json_records(vec![
        json!({"ticket_id": "TCK-1", "tags": null}),
        json!({"ticket_id": "TCK-2"}),
        json!({"ticket_id": "TCK-3", "tags": ["refund"]}),
    ])
    .unwrap();
    let cleaned = clean_tickets(&raw).unwrap();
    assert_eq!(strings(&cleaned, "ticket_id"), ["TCK-1", "TCK-2", "TCK-3"]);
    assert_eq!(strings(&cleaned, "tags"), ["None", "None", r#"["refund"]"#]);
}

#[test]
fn cleaning_is_idempotent() {
    let customers = clean_customers(&sample_customers()).unwrap();
    assert!(clean_customers(&customers).unwrap().equals(&customers));

    let orders = clean_orders(&sample_orders()).unwrap();
    assert!(clean_orders(&orders).unwrap().equals(&orders));

    let tickets = clean_tickets(&sample_tickets()).unwrap();
    let again = clean_tickets(&frame_to_raw_table(&tickets).unwrap()).unwrap();
    assert!(again.equals(&tickets));
}

#[test]
fn empty_inputs_stay_empty() {
    let tickets = clean_tickets(&RawTable::new()).unwrap();
    assert_eq!(tickets.shape(), (0, 0));

    let orders = df! {
        "id" => Vec::<String>::new(),
        "ordered_at" => Vec::<String>::new(),
    }
    .unwrap();
    let cleaned = clean_orders(&orders).unwrap();
    assert_eq!(cleaned.height(), 0);
    assert!(cleaned.column("order_id").is_ok());
}
