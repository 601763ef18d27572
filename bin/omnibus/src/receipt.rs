//! Transaction receipts.

use alloy_primitives::Log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The part of an `eth_getTransactionReceipt` response the checker reads.
///
/// Any other receipt or log field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// The logs emitted by the transaction, in emission order.
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Reads a JSON receipt.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read receipt {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse receipt {}", path.display()))
    }
}
