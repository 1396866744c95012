//! Table persistence.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use resto_model::{Dataset, Layer};
use tracing::info;

use crate::error::{OutputError, Result};
use crate::format::OutputFormat;

/// Destination for cleaned and derived tables.
pub trait Writer {
    /// Persist a table and return where it was written.
    fn save(&self, dataset: Dataset, df: &DataFrame) -> Result<PathBuf>;
}

/// Writes tables under `<output_dir>/<layer>/<dataset>.<ext>`.
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl DirectoryWriter {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Target path for a dataset; bronze datasets have none.
    pub fn path_for(&self, dataset: Dataset) -> Result<PathBuf> {
        if dataset.layer() == Layer::Bronze {
            return Err(OutputError::RawDataset(dataset));
        }
        Ok(self
            .output_dir
            .join(dataset.layer().as_str())
            .join(format!("{}.{}", dataset.as_str(), self.format.extension())))
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn encode_error(path: &Path, err: &polars::prelude::PolarsError) -> OutputError {
    OutputError::Encode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

impl Writer for DirectoryWriter {
    fn save(&self, dataset: Dataset, df: &DataFrame) -> Result<PathBuf> {
        let path = self.path_for(dataset)?;
        ensure_parent_dir(&path)?;
        let mut file = File::create(&path).map_err(|source| OutputError::FileWrite {
            path: path.clone(),
            source,
        })?;
        let mut data = df.clone();
        match self.format {
            OutputFormat::Parquet => {
                ParquetWriter::new(&mut file)
                    .finish(&mut data)
                    .map_err(|e| encode_error(&path, &e))?;
            }
            OutputFormat::Csv => {
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(&mut data)
                    .map_err(|e| encode_error(&path, &e))?;
            }
        }
        info!(
            dataset = %dataset,
            path = %path.display(),
            rows = df.height(),
            format = %self.format,
            "saved dataset"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_layers() {
        let writer = DirectoryWriter::new("/out", OutputFormat::Csv);
        assert_eq!(
            writer.path_for(Dataset::CleanedOrders).unwrap(),
            PathBuf::from("/out/silver/cleaned_orders.csv")
        );
        assert_eq!(
            writer.path_for(Dataset::TotalRevenue).unwrap(),
            PathBuf::from("/out/gold/total_revenue.csv")
        );
    }

    #[test]
    fn test_bronze_rejected() {
        let writer = DirectoryWriter::new("/out", OutputFormat::Parquet);
        assert!(matches!(
            writer.save(Dataset::Orders, &DataFrame::empty()),
            Err(OutputError::RawDataset(Dataset::Orders))
        ));
    }
}
