//! Domain models for the conversion pipelines.
//!
//! - [`TxType`] - transaction types found in Mintscan exports
//! - [`Flow`] - direction/label classification of a transaction type
//! - [`SourceRow`] - one row of a source export, everything kept as strings
//! - [`LedgerRow`] - one row of the Koinly universal CSV (12 fixed columns)

use serde::{Deserialize, Serialize};

// =============================================================================
// Transaction Type
// =============================================================================

/// Transaction type as exported by the chain explorer.
///
/// Types the converter does not know about are kept verbatim in
/// [`TxType::Other`]; they classify as [`Flow::Unclassified`] and end up
/// filtered out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxType {
    /// Stake delegation to a validator.
    Delegate,
    /// Outgoing transfer.
    Send,
    /// Incoming transfer.
    Receive,
    /// Outgoing IBC (cross-chain) transfer.
    IbcSend,
    /// Incoming IBC (cross-chain) transfer.
    IbcReceive,
    /// Staking reward withdrawal.
    GetReward,
    /// Anything else the export may contain.
    Other(String),
}

impl TxType {
    /// Parse a type from the raw `type` column value.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "Delegate" => Self::Delegate,
            "Send" => Self::Send,
            "Receive" => Self::Receive,
            "IBCSend" => Self::IbcSend,
            "IBCReceive" => Self::IbcReceive,
            "GetReward" => Self::GetReward,
            other => Self::Other(other.to_string()),
        }
    }

    /// The explorer's spelling of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Delegate => "Delegate",
            Self::Send => "Send",
            Self::Receive => "Receive",
            Self::IbcSend => "IBCSend",
            Self::IbcReceive => "IBCReceive",
            Self::GetReward => "GetReward",
            Self::Other(s) => s,
        }
    }

    /// Classify this type into an output shape.
    ///
    /// Total over all types; the table is the single source of truth for the
    /// per-row converter:
    ///
    /// | type       | flow         | label  |
    /// |------------|--------------|--------|
    /// | Delegate   | outgoing     | stake  |
    /// | Send       | outgoing     | -      |
    /// | IBCSend    | outgoing     | -      |
    /// | Receive    | incoming     | -      |
    /// | GetReward  | incoming     | reward |
    /// | other      | unclassified | -      |
    ///
    /// Note: `IBCReceive` is deliberately NOT incoming here. The per-row
    /// converter never classified it, so it stays unclassified and is dropped;
    /// only the aggregate pipeline folds it into `Receive`.
    pub fn flow(&self) -> Flow {
        match self {
            Self::Delegate => Flow::Outgoing {
                label: Some(Label::Stake),
            },
            Self::Send | Self::IbcSend => Flow::Outgoing { label: None },
            Self::Receive => Flow::Incoming { label: None },
            Self::GetReward => Flow::Incoming {
                label: Some(Label::Reward),
            },
            Self::IbcReceive | Self::Other(_) => Flow::Unclassified,
        }
    }
}

/// Direction a classified transaction takes, with its optional Koinly label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Funds leave the wallet: populate the Sent columns.
    Outgoing { label: Option<Label> },
    /// Funds enter the wallet: populate the Received columns.
    Incoming { label: Option<Label> },
    /// Unknown shape: amount columns stay empty and the row is dropped.
    Unclassified,
}

/// Koinly tag attached to a classified row.
///
/// The display strings are configurable per run, so the classification only
/// names which label applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Stake,
    Reward,
}

// =============================================================================
// Source Row
// =============================================================================

/// One row of a Mintscan export, read as-is.
///
/// Every field stays a string: explorer exports mix formats freely and the
/// pipelines decide per field how (and whether) to interpret a value. Columns
/// not listed here are ignored; listed columns that are missing from a
/// particular export default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRow {
    /// Transaction type (e.g. `Delegate`, `Send`, `GetReward`).
    #[serde(rename = "type", default)]
    pub tx_type: String,
    /// Sender address, when the export carries one.
    #[serde(default)]
    pub from: String,
    /// Recipient address, when the export carries one.
    #[serde(default)]
    pub to: String,
    /// Transaction hash.
    #[serde(default)]
    pub txhash: String,
    /// Amount as written in the export (micro-units, `.` thousands separators).
    #[serde(default)]
    pub amount: String,
    /// Timestamp as written in the export.
    #[serde(default)]
    pub timestamp: String,
    /// Currency symbol; only present in aggregator-shaped exports.
    #[serde(default)]
    pub token: String,
}

impl SourceRow {
    /// Parsed transaction type of this row.
    pub fn kind(&self) -> TxType {
        TxType::from_raw(&self.tx_type)
    }
}

// =============================================================================
// Ledger Row (Koinly universal format)
// =============================================================================

/// One row of the Koinly universal CSV.
///
/// Fixed 12-column schema; the serde renames define the exact header names
/// Koinly expects. All fields are strings so that empty columns serialize as
/// empty cells, never as `0`. Fee and Net Worth columns are always empty in
/// both pipelines (the source has no fee or pricing data).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Sent Amount")]
    pub sent_amount: String,
    #[serde(rename = "Sent Currency")]
    pub sent_currency: String,
    #[serde(rename = "Received Amount")]
    pub received_amount: String,
    #[serde(rename = "Received Currency")]
    pub received_currency: String,
    #[serde(rename = "Fee Amount")]
    pub fee_amount: String,
    #[serde(rename = "Fee Currency")]
    pub fee_currency: String,
    #[serde(rename = "Net Worth Amount")]
    pub net_worth_amount: String,
    #[serde(rename = "Net Worth Currency")]
    pub net_worth_currency: String,
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "TxHash")]
    pub txhash: String,
}

impl LedgerRow {
    /// True when neither amount column is populated.
    ///
    /// Such rows violate the output invariant and are filtered before writing.
    pub fn is_empty_movement(&self) -> bool {
        self.sent_amount.is_empty() && self.received_amount.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_type_from_raw() {
        assert_eq!(TxType::from_raw("Delegate"), TxType::Delegate);
        assert_eq!(TxType::from_raw(" Send "), TxType::Send);
        assert_eq!(TxType::from_raw("IBCSend"), TxType::IbcSend);
        assert_eq!(
            TxType::from_raw("Undelegate"),
            TxType::Other("Undelegate".into())
        );
    }

    #[test]
    fn test_tx_type_roundtrip() {
        for raw in ["Delegate", "Send", "Receive", "IBCSend", "IBCReceive", "GetReward"] {
            assert_eq!(TxType::from_raw(raw).as_str(), raw);
        }
    }

    #[test]
    fn test_flow_table() {
        assert_eq!(
            TxType::Delegate.flow(),
            Flow::Outgoing {
                label: Some(Label::Stake)
            }
        );
        assert_eq!(TxType::Send.flow(), Flow::Outgoing { label: None });
        assert_eq!(TxType::IbcSend.flow(), Flow::Outgoing { label: None });
        assert_eq!(TxType::Receive.flow(), Flow::Incoming { label: None });
        assert_eq!(
            TxType::GetReward.flow(),
            Flow::Incoming {
                label: Some(Label::Reward)
            }
        );
        assert_eq!(TxType::IbcReceive.flow(), Flow::Unclassified);
        assert_eq!(TxType::Other("Vote".into()).flow(), Flow::Unclassified);
    }

    #[test]
    fn test_ledger_row_default_is_empty_movement() {
        let row = LedgerRow::default();
        assert!(row.is_empty_movement());

        let sent = LedgerRow {
            sent_amount: "1.5".into(),
            ..Default::default()
        };
        assert!(!sent.is_empty_movement());
    }

    #[test]
    fn test_ledger_row_header_names() {
        let row = LedgerRow::default();
        let json = serde_json::to_value(&row).unwrap();
        for header in [
            "Date",
            "Sent Amount",
            "Sent Currency",
            "Received Amount",
            "Received Currency",
            "Fee Amount",
            "Fee Currency",
            "Net Worth Amount",
            "Net Worth Currency",
            "Label",
            "Description",
            "TxHash",
        ] {
            assert!(json.get(header).is_some(), "missing column {header}");
        }
    }
}
