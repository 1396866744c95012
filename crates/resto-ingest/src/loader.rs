//! Raw dataset loading.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use resto_common::frame_to_raw_table;
use resto_model::{Dataset, RawTable};
use tracing::info;

use crate::csv::read_csv;
use crate::error::{IngestError, Result};
use crate::jsonl::read_json_lines;

/// Default file name of the customers export.
pub const CUSTOMERS_FILE: &str = "customers.csv";
/// Default file name of the orders export.
pub const ORDERS_FILE: &str = "orders.csv";
/// Default file name of the ticket export.
pub const TICKETS_FILE: &str = "tickets.jsonl";

/// Source of raw datasets.
pub trait Loader {
    /// Load a tabular raw dataset.
    fn load_frame(&self, dataset: Dataset) -> Result<DataFrame>;

    /// Load a raw dataset as semi-structured records.
    fn load_records(&self, dataset: Dataset) -> Result<RawTable>;
}

/// Reads raw datasets from files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    data_dir: PathBuf,
    customers: String,
    orders: String,
    tickets: String,
}

impl DirectoryLoader {
    /// Loader over `data_dir` with the default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            customers: CUSTOMERS_FILE.to_string(),
            orders: ORDERS_FILE.to_string(),
            tickets: TICKETS_FILE.to_string(),
        }
    }

    /// Like [`DirectoryLoader::new`], but fails when the directory is absent.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let loader = Self::new(data_dir);
        if !loader.data_dir.is_dir() {
            return Err(IngestError::DirectoryNotFound {
                path: loader.data_dir,
            });
        }
        Ok(loader)
    }

    /// Override the file name used for a raw dataset.
    ///
    /// Non-raw datasets are ignored.
    pub fn with_file(mut self, dataset: Dataset, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        match dataset {
            Dataset::Customers => self.customers = file_name,
            Dataset::Orders => self.orders = file_name,
            Dataset::TicketsJsonl => self.tickets = file_name,
            _ => {}
        }
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path a raw dataset is read from.
    pub fn path_for(&self, dataset: Dataset) -> Result<PathBuf> {
        let file_name = match dataset {
            Dataset::Customers => &self.customers,
            Dataset::Orders => &self.orders,
            Dataset::TicketsJsonl => &self.tickets,
            _ => {
                return Err(IngestError::UnsupportedDataset {
                    dataset,
                    form: "a raw source",
                });
            }
        };
        Ok(self.data_dir.join(file_name))
    }
}

impl Loader for DirectoryLoader {
    fn load_frame(&self, dataset: Dataset) -> Result<DataFrame> {
        if dataset == Dataset::TicketsJsonl {
            return Err(IngestError::UnsupportedDataset {
                dataset,
                form: "a table",
            });
        }
        let path = self.path_for(dataset)?;
        let df = read_csv(&path)?;
        info!(
            dataset = %dataset,
            path = %path.display(),
            rows = df.height(),
            "loaded dataset"
        );
        Ok(df)
    }

    fn load_records(&self, dataset: Dataset) -> Result<RawTable> {
        let path = self.path_for(dataset)?;
        let table = if dataset == Dataset::TicketsJsonl {
            read_json_lines(&path)?
        } else {
            frame_to_raw_table(&read_csv(&path)?)?
        };
        info!(
            dataset = %dataset,
            path = %path.display(),
            rows = table.height(),
            "loaded dataset"
        );
        Ok(table)
    }
}
