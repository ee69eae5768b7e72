//! Grouped converter: collapse multiple export rows into one ledger row per
//! (txhash, type) group.
//!
//! ```text
//! Export rows                         →  Grouped output
//! ┌───────────────────────────────┐      ┌───────────────────────────┐
//! │ ABC  Send     5  SAGA         │      │ ABC  Send       8  SAGA   │
//! │ ABC  IBCSend  3  SAGA         │  →   ├───────────────────────────┤
//! │ DEF  GetReward  1.2  SAGA     │      │ DEF  GetReward  1.2 SAGA  │
//! └───────────────────────────────┘      └───────────────────────────┘
//! ```
//!
//! Only {Send, Receive, IBCSend, IBCReceive, GetReward} survive the filter;
//! IBC variants collapse into their plain counterparts before grouping, so
//! mixed IBCSend+Send rows under one hash merge into a single Send group.
//! `Delegate` is excluded here even though the per-row converter accepts it;
//! the two pipelines diverge on purpose.
//!
//! Output rows are sorted by (txhash, type), not input order. Amounts pass
//! through in whatever denomination the source uses; no unit conversion.

use std::collections::BTreeMap;

use crate::models::{LedgerRow, SourceRow, TxType};
use crate::transform::amount::{format_amount, parse_plain_amount};
use crate::transform::timestamp::reformat;

/// Koinly label attached to reward groups.
const REWARD_LABEL: &str = "reward";

/// Normalized transaction type used as the second half of the group key.
///
/// Variants are declared in alphabetical order of their canonical name so the
/// derived `Ord` sorts groups the documented way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum GroupKind {
    GetReward,
    Receive,
    Send,
}

impl GroupKind {
    /// Map a source type into the allowed set, collapsing IBC synonyms.
    /// `None` filters the row out.
    fn from_tx(tx: &TxType) -> Option<Self> {
        match tx {
            TxType::Send | TxType::IbcSend => Some(Self::Send),
            TxType::Receive | TxType::IbcReceive => Some(Self::Receive),
            TxType::GetReward => Some(Self::GetReward),
            TxType::Delegate | TxType::Other(_) => None,
        }
    }
}

/// Accumulator for one (txhash, type) group.
///
/// Timestamp and token come from the first member in input order; later
/// members are trusted to carry the same token.
struct Group {
    amount: f64,
    timestamp: String,
    token: String,
}

/// Collapse export rows into one ledger row per (txhash, normalized type).
pub fn aggregate_rows(rows: &[SourceRow]) -> Vec<LedgerRow> {
    let mut groups: BTreeMap<(String, GroupKind), Group> = BTreeMap::new();

    for row in rows {
        let Some(kind) = GroupKind::from_tx(&row.kind()) else {
            continue;
        };

        let group = groups
            .entry((row.txhash.clone(), kind))
            .or_insert_with(|| Group {
                amount: 0.0,
                timestamp: row.timestamp.clone(),
                token: row.token.clone(),
            });
        group.amount += parse_plain_amount(&row.amount);
    }

    groups
        .into_iter()
        .map(|((txhash, kind), group)| emit(txhash, kind, group))
        .collect()
}

/// Build the ledger row for one finished group.
fn emit(txhash: String, kind: GroupKind, group: Group) -> LedgerRow {
    let mut out = LedgerRow {
        date: reformat(&group.timestamp),
        txhash,
        ..Default::default()
    };

    let amount = format_amount(group.amount);
    match kind {
        GroupKind::Send => {
            out.sent_amount = amount;
            out.sent_currency = group.token;
        }
        GroupKind::Receive => {
            out.received_amount = amount;
            out.received_currency = group.token;
        }
        GroupKind::GetReward => {
            out.received_amount = amount;
            out.received_currency = group.token;
            out.label = REWARD_LABEL.to_string();
        }
    }

    out
}
