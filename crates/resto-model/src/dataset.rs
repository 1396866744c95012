//! Logical dataset catalog.
//!
//! Every table the pipeline reads or writes has a fixed name and a layer.
//! The dependency graph between them is static and lives here so the
//! orchestrator and the summary output agree on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Medallion layer of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Unprocessed source data as ingested.
    Bronze,
    /// Deduplicated, null-free, typed data.
    Silver,
    /// Aggregate analytics.
    Gold,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Bronze => "bronze",
            Layer::Silver => "silver",
            Layer::Gold => "gold",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Customers,
    Orders,
    TicketsJsonl,
    CleanedCustomers,
    CleanedOrders,
    CleanedTickets,
    AverageOrderValue,
    TicketsPerOrder,
    TotalRevenue,
}

impl Dataset {
    /// All datasets in dependency order.
    pub const ALL: [Dataset; 9] = [
        Dataset::Customers,
        Dataset::Orders,
        Dataset::TicketsJsonl,
        Dataset::CleanedCustomers,
        Dataset::CleanedOrders,
        Dataset::CleanedTickets,
        Dataset::AverageOrderValue,
        Dataset::TicketsPerOrder,
        Dataset::TotalRevenue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Customers => "customers",
            Dataset::Orders => "orders",
            Dataset::TicketsJsonl => "tickets_jsonl",
            Dataset::CleanedCustomers => "cleaned_customers",
            Dataset::CleanedOrders => "cleaned_orders",
            Dataset::CleanedTickets => "cleaned_tickets",
            Dataset::AverageOrderValue => "average_order_value",
            Dataset::TicketsPerOrder => "tickets_per_order",
            Dataset::TotalRevenue => "total_revenue",
        }
    }

    pub fn layer(self) -> Layer {
        match self {
            Dataset::Customers | Dataset::Orders | Dataset::TicketsJsonl => Layer::Bronze,
            Dataset::CleanedCustomers | Dataset::CleanedOrders | Dataset::CleanedTickets => {
                Layer::Silver
            }
            Dataset::AverageOrderValue | Dataset::TicketsPerOrder | Dataset::TotalRevenue => {
                Layer::Gold
            }
        }
    }

    /// Datasets this one is derived from. Empty for raw sources.
    pub fn inputs(self) -> &'static [Dataset] {
        match self {
            Dataset::Customers | Dataset::Orders | Dataset::TicketsJsonl => &[],
            Dataset::CleanedCustomers => &[Dataset::Customers],
            Dataset::CleanedOrders => &[Dataset::Orders],
            Dataset::CleanedTickets => &[Dataset::TicketsJsonl],
            Dataset::AverageOrderValue | Dataset::TotalRevenue => &[Dataset::CleanedOrders],
            Dataset::TicketsPerOrder => &[Dataset::CleanedOrders, Dataset::CleanedTickets],
        }
    }

    /// Datasets of one layer, in catalog order.
    pub fn in_layer(layer: Layer) -> impl Iterator<Item = Dataset> {
        Self::ALL.into_iter().filter(move |dataset| dataset.layer() == layer)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|dataset| dataset.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ModelError::UnknownDataset(s.to_string()))
    }
}
