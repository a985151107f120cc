//! Order and out-of-sample range files.
//!
//! Orders are read from CSV (default) or JSON (`.json` extension). CSV columns:
//! `open_time,close_time,side,profit_loss,percent_profit_loss[,symbol]` with
//! RFC 3339 timestamps. Out-of-sample ranges are a JSON array of
//! `{"date_from": ..., "date_to": ...}` objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use stratscore_core::{OrderSide, OutOfSampleRanges, TradeOrder};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: order {index} closes before it opens")]
    ClosedBeforeOpen { path: PathBuf, index: usize },
}

/// One CSV row. Column order is the file's column order.
#[derive(Debug, Serialize, Deserialize)]
struct OrderRow {
    open_time: DateTime<Utc>,
    close_time: DateTime<Utc>,
    side: OrderSide,
    profit_loss: f64,
    percent_profit_loss: f64,
    #[serde(default)]
    symbol: Option<String>,
}

impl From<OrderRow> for TradeOrder {
    fn from(row: OrderRow) -> Self {
        let order = TradeOrder::new(
            row.side,
            row.open_time,
            row.close_time,
            row.profit_loss,
            row.percent_profit_loss,
        );
        match row.symbol {
            Some(symbol) if !symbol.is_empty() => order.with_symbol(symbol),
            _ => order,
        }
    }
}

impl From<&TradeOrder> for OrderRow {
    fn from(order: &TradeOrder) -> Self {
        Self {
            open_time: order.open_time,
            close_time: order.close_time,
            side: order.side,
            profit_loss: order.profit_loss,
            percent_profit_loss: order.percent_profit_loss,
            symbol: order.symbol.clone(),
        }
    }
}

/// Load an order file and sort it by close time.
pub fn load_orders(path: &Path) -> Result<Vec<TradeOrder>, LoadError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let mut orders = if is_json {
        read_orders_json(path)?
    } else {
        read_orders_csv(path)?
    };

    if let Some(index) = orders.iter().position(|o| o.close_time < o.open_time) {
        return Err(LoadError::ClosedBeforeOpen {
            path: path.to_path_buf(),
            index,
        });
    }

    orders.sort_by_key(|o| o.close_time);
    tracing::debug!(path = %path.display(), count = orders.len(), "loaded orders");
    Ok(orders)
}

fn read_orders_csv(path: &Path) -> Result<Vec<TradeOrder>, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    reader
        .deserialize::<OrderRow>()
        .map(|row| row.map(TradeOrder::from).map_err(csv_err))
        .collect()
}

fn read_orders_json(path: &Path) -> Result<Vec<TradeOrder>, LoadError> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate out-of-sample ranges. Overlapping or inverted ranges are
/// rejected as a JSON error.
pub fn load_oos(path: &Path) -> Result<OutOfSampleRanges, LoadError> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write orders as CSV with the same columns [`load_orders`] reads.
pub fn write_orders_csv(path: &Path, orders: &[TradeOrder]) -> Result<(), LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for order in orders {
        writer.serialize(OrderRow::from(order)).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
