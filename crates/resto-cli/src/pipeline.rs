//! Batch pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: read the raw customers, orders and ticket sources
//! 2. **Normalize**: clean each source into its silver table
//! 3. **Analyze**: derive the gold metrics from silver tables
//! 4. **Output**: persist silver and gold tables (skipped on dry runs)
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use resto_ingest::Loader;
use resto_model::{Dataset, Layer, RawTable};
use resto_output::Writer;
use resto_report::{average_order_value, tickets_per_order, total_revenue};
use resto_transform::{clean_customers, clean_orders, clean_tickets};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Raw sources as loaded.
#[derive(Debug, Clone)]
pub struct RawInputs {
    pub customers: DataFrame,
    pub orders: DataFrame,
    pub tickets: RawTable,
}

impl RawInputs {
    /// Row count of a raw dataset.
    pub fn rows(&self, dataset: Dataset) -> Option<usize> {
        match dataset {
            Dataset::Customers => Some(self.customers.height()),
            Dataset::Orders => Some(self.orders.height()),
            Dataset::TicketsJsonl => Some(self.tickets.height()),
            _ => None,
        }
    }
}

/// Load every raw source.
pub fn ingest(loader: &dyn Loader) -> Result<RawInputs> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let start = Instant::now();

    let customers = loader
        .load_frame(Dataset::Customers)
        .context("load customers")?;
    let orders = loader.load_frame(Dataset::Orders).context("load orders")?;
    let tickets = loader
        .load_records(Dataset::TicketsJsonl)
        .context("load tickets")?;

    info!(
        customers = customers.height(),
        orders = orders.height(),
        tickets = tickets.height(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(RawInputs {
        customers,
        orders,
        tickets,
    })
}

// ============================================================================
// Stage 2: Normalize
// ============================================================================

/// Silver tables.
#[derive(Debug, Clone)]
pub struct CleanedTables {
    pub customers: DataFrame,
    pub orders: DataFrame,
    pub tickets: DataFrame,
}

impl CleanedTables {
    pub fn get(&self, dataset: Dataset) -> Option<&DataFrame> {
        match dataset {
            Dataset::CleanedCustomers => Some(&self.customers),
            Dataset::CleanedOrders => Some(&self.orders),
            Dataset::CleanedTickets => Some(&self.tickets),
            _ => None,
        }
    }
}

/// Clean every raw source.
pub fn normalize(raw: &RawInputs) -> Result<CleanedTables> {
    let span = info_span!("normalize");
    let _guard = span.enter();
    let start = Instant::now();

    let customers = clean_customers(&raw.customers).context("clean customers")?;
    let orders = clean_orders(&raw.orders).context("clean orders")?;
    let tickets = clean_tickets(&raw.tickets).context("clean tickets")?;

    info!(
        customers = customers.height(),
        orders = orders.height(),
        tickets = tickets.height(),
        duration_ms = start.elapsed().as_millis(),
        "normalize complete"
    );
    Ok(CleanedTables {
        customers,
        orders,
        tickets,
    })
}

// ============================================================================
// Stage 3: Analyze
// ============================================================================

/// Gold tables.
#[derive(Debug, Clone)]
pub struct GoldTables {
    pub average_order_value: DataFrame,
    pub tickets_per_order: DataFrame,
    pub total_revenue: DataFrame,
}

impl GoldTables {
    pub fn get(&self, dataset: Dataset) -> Option<&DataFrame> {
        match dataset {
            Dataset::AverageOrderValue => Some(&self.average_order_value),
            Dataset::TicketsPerOrder => Some(&self.tickets_per_order),
            Dataset::TotalRevenue => Some(&self.total_revenue),
            _ => None,
        }
    }
}

/// Derive the gold metrics.
pub fn analyze(cleaned: &CleanedTables) -> Result<GoldTables> {
    let span = info_span!("analyze");
    let _guard = span.enter();
    let start = Instant::now();

    let average_order_value =
        average_order_value(&cleaned.orders).context("compute average order value")?;
    let tickets_per_order = tickets_per_order(&cleaned.orders, &cleaned.tickets)
        .context("compute tickets per order")?;
    let total_revenue = total_revenue(&cleaned.orders).context("compute total revenue")?;

    info!(
        orders_with_tickets = tickets_per_order.height(),
        duration_ms = start.elapsed().as_millis(),
        "analyze complete"
    );
    Ok(GoldTables {
        average_order_value,
        tickets_per_order,
        total_revenue,
    })
}

// ============================================================================
// Stage 4: Output
// ============================================================================

/// Persist every silver and gold table, in catalog order.
pub fn output(
    writer: &dyn Writer,
    cleaned: &CleanedTables,
    gold: &GoldTables,
) -> Result<BTreeMap<Dataset, PathBuf>> {
    let span = info_span!("output");
    let _guard = span.enter();
    let start = Instant::now();

    let mut written = BTreeMap::new();
    for dataset in Dataset::in_layer(Layer::Silver).chain(Dataset::in_layer(Layer::Gold)) {
        let Some(df) = cleaned.get(dataset).or_else(|| gold.get(dataset)) else {
            continue;
        };
        let path = writer
            .save(dataset, df)
            .with_context(|| format!("save {dataset}"))?;
        written.insert(dataset, path);
    }

    info!(
        files = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(written)
}

// ============================================================================
// Full run
// ============================================================================

/// One catalog entry of a finished run.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub dataset: Dataset,
    /// Rows across the dataset's inputs; `None` for raw sources.
    pub rows_in: Option<usize>,
    pub rows_out: usize,
    /// Written file, when outputs were produced.
    pub output: Option<PathBuf>,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub cleaned: CleanedTables,
    pub gold: GoldTables,
    /// All datasets in catalog order.
    pub datasets: Vec<DatasetSummary>,
}

fn summarize(
    raw: &RawInputs,
    cleaned: &CleanedTables,
    gold: &GoldTables,
    written: &BTreeMap<Dataset, PathBuf>,
) -> Vec<DatasetSummary> {
    let rows = |dataset: Dataset| -> usize {
        raw.rows(dataset)
            .or_else(|| cleaned.get(dataset).map(DataFrame::height))
            .or_else(|| gold.get(dataset).map(DataFrame::height))
            .unwrap_or(0)
    };
    Dataset::ALL
        .into_iter()
        .map(|dataset| {
            let inputs = dataset.inputs();
            DatasetSummary {
                dataset,
                rows_in: (!inputs.is_empty()).then(|| inputs.iter().copied().map(&rows).sum()),
                rows_out: rows(dataset),
                output: written.get(&dataset).cloned(),
            }
        })
        .collect()
}

/// Run every stage; outputs are written only when a writer is given.
pub fn run_pipeline(loader: &dyn Loader, writer: Option<&dyn Writer>) -> Result<RunResult> {
    let span = info_span!("pipeline", dry_run = writer.is_none());
    let _guard = span.enter();
    let start = Instant::now();

    let raw = ingest(loader)?;
    let cleaned = normalize(&raw)?;
    let gold = analyze(&cleaned)?;
    let written = match writer {
        Some(writer) => output(writer, &cleaned, &gold)?,
        None => BTreeMap::new(),
    };
    let datasets = summarize(&raw, &cleaned, &gold, &written);

    info!(
        datasets = datasets.len(),
        files = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "pipeline complete"
    );
    Ok(RunResult {
        cleaned,
        gold,
        datasets,
    })
}
