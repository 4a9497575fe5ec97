use std::collections::BTreeMap;
use std::fmt;

use encimera_types::{sequence_indices, ConnectionType, Piece};
use serde::{Deserialize, Serialize};

/// A departure from the expected `0..N` wall sequence.
///
/// Layout still proceeds; these are reported so the catalog or the caller
/// can be fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SequenceIssue {
    /// Several pieces claim the same `order`.
    DuplicateOrder { order: u32, pieces: Vec<usize> },
    /// No piece has this `order` although a higher one exists.
    MissingOrder { order: u32 },
    /// Some pieces carry layout metadata and others do not.
    MixedLayout { without_layout: Vec<usize> },
    /// The first piece in sequence claims to connect to a previous one.
    LeadingConnection { piece: usize },
}

impl fmt::Display for SequenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceIssue::DuplicateOrder { order, pieces } => {
                write!(f, "order {} used by pieces {:?}", order, pieces)
            }
            SequenceIssue::MissingOrder { order } => write!(f, "order {} is missing", order),
            SequenceIssue::MixedLayout { without_layout } => {
                write!(f, "pieces {:?} have no layout", without_layout)
            }
            SequenceIssue::LeadingConnection { piece } => {
                write!(f, "first piece {} is connected to a previous piece", piece)
            }
        }
    }
}

/// Check the ordering metadata of `pieces`.
pub fn sequence_issues(pieces: &[Piece]) -> Vec<SequenceIssue> {
    let mut issues = Vec::new();

    let without_layout: Vec<usize> = pieces
        .iter()
        .enumerate()
        .filter(|(_, p)| p.layout.is_none())
        .map(|(i, _)| i)
        .collect();
    if without_layout.len() == pieces.len() {
        return issues;
    }
    if !without_layout.is_empty() {
        issues.push(SequenceIssue::MixedLayout { without_layout });
    }

    let mut by_order: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, piece) in pieces.iter().enumerate() {
        if let Some(layout) = piece.layout {
            by_order.entry(layout.order).or_default().push(i);
        }
    }
    for (&order, holders) in &by_order {
        if holders.len() > 1 {
            issues.push(SequenceIssue::DuplicateOrder {
                order,
                pieces: holders.clone(),
            });
        }
    }
    if let Some(&max) = by_order.keys().next_back() {
        for order in 0..max {
            if !by_order.contains_key(&order) {
                issues.push(SequenceIssue::MissingOrder { order });
            }
        }
    }

    if let Some(&first) = sequence_indices(pieces).first() {
        let connection = pieces[first].layout_or_default().connection_type;
        if connection != ConnectionType::None {
            issues.push(SequenceIssue::LeadingConnection { piece: first });
        }
    }
    issues
}
