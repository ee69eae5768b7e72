//! Per-row converter: one export row in, zero or one ledger row out.
//!
//! Each source row is handled independently, in input order:
//!
//! ```text
//! Mintscan export row           →  Koinly universal row
//! ┌─────────────────────────┐      ┌──────────────────────────────┐
//! │ type: GetReward         │      │ Date: 2024-01-01 00:00:00    │
//! │ amount: "1.500.000"     │  →   │ Received: 1.5 SAGA           │
//! │ timestamp: 2024-01-01…  │      │ Label: reward                │
//! └─────────────────────────┘      └──────────────────────────────┘
//! ```
//!
//! Rows with an empty or literal `"0"` amount are dropped before conversion;
//! rows whose type does not classify are dropped after it. Surviving rows keep
//! their input order.

use chrono_tz::Tz;

use crate::models::{Flow, Label, LedgerRow, SourceRow};
use crate::transform::amount::{format_amount, parse_micro_amount};
use crate::transform::timestamp::to_utc_string;

/// Process-wide configuration for the per-row converter.
///
/// Fixed before a run and never mutated.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Currency symbol used for every amount column.
    pub token: String,

    /// Micro-denomination scale factor (1 usaga = 1e-6 SAGA).
    pub micro_factor: f64,

    /// Timezone assumed for timestamps that carry none. `None` reads naive
    /// timestamps as already UTC.
    pub assumed_timezone: Option<Tz>,

    /// Koinly label for delegate transactions.
    pub stake_label: String,

    /// Koinly label for staking rewards.
    pub reward_label: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            token: "SAGA".to_string(),
            micro_factor: 1e-6,
            assumed_timezone: None,
            stake_label: "stake".to_string(),
            reward_label: "reward".to_string(),
        }
    }
}

impl ConvertOptions {
    fn label_text(&self, label: Option<Label>) -> String {
        match label {
            Some(Label::Stake) => self.stake_label.clone(),
            Some(Label::Reward) => self.reward_label.clone(),
            None => String::new(),
        }
    }
}

/// Convert export rows to ledger rows, one at a time.
///
/// Pure transform: a single pass, no whole-sequence state, output order equals
/// input order among survivors.
pub fn convert_rows(rows: &[SourceRow], options: &ConvertOptions) -> Vec<LedgerRow> {
    rows.iter()
        .filter_map(|row| convert_row(row, options))
        .collect()
}

/// Convert one export row; `None` means the row is dropped.
fn convert_row(row: &SourceRow, options: &ConvertOptions) -> Option<LedgerRow> {
    let mut out = LedgerRow {
        date: to_utc_string(&row.timestamp, options.assumed_timezone),
        txhash: row.txhash.clone(),
        description: format!("{} from {} to {}", row.tx_type.trim(), row.from, row.to),
        ..Default::default()
    };

    // Empty and literal-zero amounts are dropped before unit conversion.
    let raw_amount = row.amount.trim();
    if raw_amount.is_empty() || raw_amount == "0" {
        return None;
    }

    let amount = parse_micro_amount(raw_amount, options.micro_factor);

    match row.kind().flow() {
        Flow::Outgoing { label } => {
            out.sent_amount = format_amount(amount);
            out.sent_currency = options.token.clone();
            out.label = options.label_text(label);
        }
        Flow::Incoming { label } => {
            out.received_amount = format_amount(amount);
            out.received_currency = options.token.clone();
            out.label = options.label_text(label);
        }
        Flow::Unclassified => {}
    }

    if out.is_empty_movement() {
        return None;
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tx_type: &str, amount: &str) -> SourceRow {
        SourceRow {
            tx_type: tx_type.to_string(),
            from: "saga1sender".to_string(),
            to: "saga1receiver".to_string(),
            txhash: "HASH".to_string(),
            amount: amount.to_string(),
            timestamp: "2024-12-26 19:36:19".to_string(),
            token: String::new(),
        }
    }

    #[test]
    fn test_reward_row() {
        let mut reward = row("GetReward", "1.500.000");
        reward.txhash = "H1".to_string();
        reward.timestamp = "2024-01-01 00:00:00".to_string();

        let out = convert_rows(&[reward], &ConvertOptions::default());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, "2024-01-01 00:00:00");
        assert_eq!(out[0].received_amount, "1.5");
        assert_eq!(out[0].received_currency, "SAGA");
        assert_eq!(out[0].label, "reward");
        assert_eq!(out[0].txhash, "H1");
        assert_eq!(out[0].sent_amount, "");
    }

    #[test]
    fn test_outgoing_never_populates_received() {
        for tx_type in ["Send", "IBCSend", "Delegate"] {
            let out = convert_rows(&[row(tx_type, "22.000.000")], &ConvertOptions::default());
            assert_eq!(out.len(), 1, "{tx_type}");
            assert_eq!(out[0].sent_amount, "22");
            assert_eq!(out[0].received_amount, "", "{tx_type}");
            assert_eq!(out[0].received_currency, "", "{tx_type}");
        }
    }

    #[test]
    fn test_incoming_never_populates_sent() {
        for tx_type in ["Receive", "GetReward"] {
            let out = convert_rows(&[row(tx_type, "1.000.000")], &ConvertOptions::default());
            assert_eq!(out.len(), 1, "{tx_type}");
            assert_eq!(out[0].received_amount, "1");
            assert_eq!(out[0].sent_amount, "", "{tx_type}");
        }
    }

    #[test]
    fn test_delegate_gets_stake_label() {
        let out = convert_rows(&[row("Delegate", "1.000.000")], &ConvertOptions::default());
        assert_eq!(out[0].label, "stake");
    }

    #[test]
    fn test_empty_and_zero_amounts_dropped() {
        let out = convert_rows(
            &[row("Send", ""), row("Send", "0")],
            &ConvertOptions::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_unclassified_types_dropped() {
        let out = convert_rows(
            &[row("Vote", "1.000.000"), row("IBCReceive", "1.000.000")],
            &ConvertOptions::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_amount_kept_as_zero() {
        // The parse failure degrades to 0; the row still classifies and is kept.
        let out = convert_rows(&[row("Send", "12,5")], &ConvertOptions::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].sent_amount, "0");
    }

    #[test]
    fn test_input_order_preserved() {
        let rows = vec![
            row("Send", "1.000.000"),
            row("Vote", "1.000.000"),
            row("Receive", "2.000.000"),
        ];
        let out = convert_rows(&rows, &ConvertOptions::default());

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].sent_amount, "1");
        assert_eq!(out[1].received_amount, "2");
    }

    #[test]
    fn test_description_synthesized() {
        let out = convert_rows(&[row("Send", "1.000.000")], &ConvertOptions::default());
        assert_eq!(out[0].description, "Send from saga1sender to saga1receiver");
    }

    #[test]
    fn test_fee_and_net_worth_always_empty() {
        let out = convert_rows(&[row("Send", "1.000.000")], &ConvertOptions::default());
        assert_eq!(out[0].fee_amount, "");
        assert_eq!(out[0].fee_currency, "");
        assert_eq!(out[0].net_worth_amount, "");
        assert_eq!(out[0].net_worth_currency, "");
    }

    #[test]
    fn test_custom_labels_and_token() {
        let options = ConvertOptions {
            token: "ATOM".to_string(),
            reward_label: "staking reward".to_string(),
            ..Default::default()
        };
        let out = convert_rows(&[row("GetReward", "1.000.000")], &options);
        assert_eq!(out[0].received_currency, "ATOM");
        assert_eq!(out[0].label, "staking reward");
    }
}
