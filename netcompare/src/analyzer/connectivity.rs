//! Pin-level Connectivity Comparator
//!
//! Flattens each netlist into a `(ref, pin) -> net` index and walks board A's
//! index looking every pin up on board B. Pins whose net names agree are
//! matches; anything else is a mismatch. In legacy mode pins that only exist
//! on board B are never reported.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::parser::netlist::NetList;

/// Placeholder for a side that has no data for a pin.
pub const NOT_AVAILABLE: &str = "N/A";

/// Index key: one physical pin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinKey {
    pub reference: String,
    pub pin: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinEntry {
    pub net_name: String,
    pub pinfunction: String,
}

/// Flattened pin -> net lookup for one board.
#[derive(Debug, Clone, Default)]
pub struct PinIndex {
    entries: BTreeMap<PinKey, PinEntry>,
}

impl PinIndex {
    /// Build the index in net order. A pin listed on several nets keeps the
    /// last one.
    pub fn build(nets: &NetList) -> Self {
        let mut entries = BTreeMap::new();
        for net in nets {
            for node in &net.nodes {
                let key = PinKey {
                    reference: node.reference.clone(),
                    pin: node.pin.clone(),
                };
                let entry = PinEntry {
                    net_name: net.name.clone(),
                    pinfunction: node.pinfunction.clone(),
                };
                entries.insert(key, entry);
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &PinKey) -> Option<&PinEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PinKey, &PinEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchClass {
    Match,
    Mismatch,
    /// Pin present on board B only. Emitted in symmetric mode.
    OnlyInB,
}

impl MatchClass {
    fn rank(self) -> u8 {
        match self {
            MatchClass::Mismatch => 0,
            MatchClass::OnlyInB => 1,
            MatchClass::Match => 2,
        }
    }
}

/// Which pins get reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiffMode {
    /// Only pins present on board A.
    #[default]
    Legacy,
    /// Board A pins plus `OnlyInB` rows for pins missing from board A.
    Symmetric,
}

/// One reported pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub pin1: String,
    pub pinfunction1: String,
    pub ref1: String,
    pub net1_name: String,
    pub pin2: String,
    pub pinfunction2: String,
    pub ref2: String,
    pub net2_name: String,
    pub class: MatchClass,
}

impl DiffRow {
    fn from_a(key: &PinKey, a: &PinEntry, b: Option<&PinEntry>) -> Self {
        let (pinfunction2, net2_name, class) = match b {
            Some(b) if b.net_name == a.net_name => {
                (b.pinfunction.clone(), b.net_name.clone(), MatchClass::Match)
            }
            Some(b) => (b.pinfunction.clone(), b.net_name.clone(), MatchClass::Mismatch),
            None => (
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
                MatchClass::Mismatch,
            ),
        };
        Self {
            pin1: key.pin.clone(),
            pinfunction1: a.pinfunction.clone(),
            ref1: key.reference.clone(),
            net1_name: a.net_name.clone(),
            pin2: key.pin.clone(),
            pinfunction2,
            ref2: key.reference.clone(),
            net2_name,
            class,
        }
    }

    fn only_in_b(key: &PinKey, b: &PinEntry) -> Self {
        Self {
            pin1: key.pin.clone(),
            pinfunction1: NOT_AVAILABLE.to_string(),
            ref1: key.reference.clone(),
            net1_name: NOT_AVAILABLE.to_string(),
            pin2: key.pin.clone(),
            pinfunction2: b.pinfunction.clone(),
            ref2: key.reference.clone(),
            net2_name: b.net_name.clone(),
            class: MatchClass::OnlyInB,
        }
    }

    pub fn is_match(&self) -> bool {
        self.class == MatchClass::Match
    }
}

/// Ordered rows plus per-class totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub rows: Vec<DiffRow>,
    pub total_matched: usize,
    pub total_mismatched: usize,
    pub total_only_in_b: usize,
}

impl Comparison {
    fn from_rows(mut rows: Vec<DiffRow>) -> Self {
        // stable: equal refs keep index (pin) order
        rows.sort_by(|x, y| {
            x.class
                .rank()
                .cmp(&y.class.rank())
                .then_with(|| x.ref1.cmp(&y.ref1))
        });

        let mut comparison = Comparison {
            rows: Vec::new(),
            total_matched: 0,
            total_mismatched: 0,
            total_only_in_b: 0,
        };
        for row in &rows {
            match row.class {
                MatchClass::Match => comparison.total_matched += 1,
                MatchClass::Mismatch => comparison.total_mismatched += 1,
                MatchClass::OnlyInB => comparison.total_only_in_b += 1,
            }
        }
        comparison.rows = rows;
        comparison
    }

    pub fn matches(&self) -> impl Iterator<Item = &DiffRow> {
        self.rows.iter().filter(|r| r.class == MatchClass::Match)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &DiffRow> {
        self.rows.iter().filter(|r| r.class == MatchClass::Mismatch)
    }

    /// True when no row is anything but a match.
    pub fn is_identical(&self) -> bool {
        self.total_mismatched == 0 && self.total_only_in_b == 0
    }
}

/// Compare two boards pin by pin, driven by board A only.
pub fn compare(a: &NetList, b: &NetList) -> Comparison {
    compare_with_mode(a, b, DiffMode::Legacy)
}

pub fn compare_with_mode(a: &NetList, b: &NetList, mode: DiffMode) -> Comparison {
    let index_a = PinIndex::build(a);
    let index_b = PinIndex::build(b);

    let mut rows: Vec<DiffRow> = index_a
        .iter()
        .map(|(key, entry)| DiffRow::from_a(key, entry, index_b.get(key)))
        .collect();

    if mode == DiffMode::Symmetric {
        rows.extend(
            index_b
                .iter()
                .filter(|(key, _)| index_a.get(key).is_none())
                .map(|(key, entry)| DiffRow::only_in_b(key, entry)),
        );
    }

    let comparison = Comparison::from_rows(rows);
    debug!(
        "Compared {} pins against {}: {} matched, {} mismatched, {} only in B",
        index_a.len(),
        index_b.len(),
        comparison.total_matched,
        comparison.total_mismatched,
        comparison.total_only_in_b
    );
    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::netlist::NodeRef;

    fn netlist(nets: &[(&str, &[(&str, &str, &str)])]) -> NetList {
        let mut list = NetList::new();
        for (name, nodes) in nets {
            list.declare(name);
            for (reference, pin, function) in nodes.iter() {
                list.push_node(name, NodeRef::new(reference, pin, function));
            }
        }
        list
    }

    fn refs(comparison: &Comparison) -> Vec<&str> {
        comparison.rows.iter().map(|r| r.ref1.as_str()).collect()
    }

    #[test]
    fn test_single_pin_match_then_mismatch() {
        let a = netlist(&[("GND", &[("C1", "1", "")])]);
        let b = netlist(&[("GND", &[("C1", "1", "")])]);

        let result = compare(&a, &b);
        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        assert_eq!(row.class, MatchClass::Match);
        assert_eq!((row.ref1.as_str(), row.ref2.as_str()), ("C1", "C1"));
        assert_eq!((row.pin1.as_str(), row.pin2.as_str()), ("1", "1"));
        assert_eq!((row.net1_name.as_str(), row.net2_name.as_str()), ("GND", "GND"));
        assert_eq!(result.total_matched, 1);

        let b = netlist(&[("VCC", &[("C1", "1", "")])]);
        let result = compare(&a, &b);
        assert_eq!(result.rows[0].class, MatchClass::Mismatch);
        assert_eq!(result.rows[0].net2_name, "VCC");
        assert_eq!(result.total_mismatched, 1);
        assert_eq!(result.total_matched, 0);
    }

    #[test]
    fn test_missing_in_b_uses_placeholder() {
        let a = netlist(&[("SDA", &[("U1", "5", "PB7")])]);
        let b = NetList::new();

        let result = compare(&a, &b);
        let row = &result.rows[0];
        assert_eq!(row.class, MatchClass::Mismatch);
        assert_eq!(row.net2_name, NOT_AVAILABLE);
        assert_eq!(row.pinfunction2, NOT_AVAILABLE);
        assert_eq!(row.pinfunction1, "PB7");
        assert_eq!(row.ref2, "U1");
        assert_eq!(row.pin2, "5");
    }

    #[test]
    fn test_each_side_keeps_its_own_pinfunction() {
        let a = netlist(&[("SCL", &[("U1", "4", "PB6")])]);
        let b = netlist(&[("SCL", &[("U1", "4", "I2C1_SCL")])]);

        let row = &compare(&a, &b).rows[0];
        assert_eq!(row.class, MatchClass::Match);
        assert_eq!(row.pinfunction1, "PB6");
        assert_eq!(row.pinfunction2, "I2C1_SCL");
    }

    #[test]
    fn test_mismatches_first_each_sorted_by_ref() {
        let a = netlist(&[
            ("N1", &[("U1", "1", ""), ("R5", "1", "")]),
            ("N2", &[("J3", "1", ""), ("C2", "1", "")]),
        ]);
        let b = netlist(&[
            ("N1", &[("U1", "1", ""), ("C2", "1", "")]),
            ("N2", &[("J3", "1", ""), ("R5", "1", "")]),
        ]);

        let result = compare(&a, &b);
        assert_eq!(refs(&result), vec!["C2", "R5", "J3", "U1"]);
        assert_eq!(result.total_mismatched, 2);
        assert_eq!(result.total_matched, 2);
    }

    #[test]
    fn test_only_in_b_hidden_in_legacy_mode() {
        let a = netlist(&[("GND", &[("C1", "2", "")])]);
        let b = netlist(&[("GND", &[("C1", "2", ""), ("C9", "2", "")])]);

        let legacy = compare(&a, &b);
        assert_eq!(refs(&legacy), vec!["C1"]);
        assert!(legacy.is_identical());

        let symmetric = compare_with_mode(&a, &b, DiffMode::Symmetric);
        assert_eq!(refs(&symmetric), vec!["C9", "C1"]);
        assert_eq!(symmetric.rows[0].class, MatchClass::OnlyInB);
        assert_eq!(symmetric.rows[0].net1_name, NOT_AVAILABLE);
        assert_eq!(symmetric.rows[0].net2_name, "GND");
        assert_eq!(symmetric.total_only_in_b, 1);
        assert!(!symmetric.is_identical());
    }

    #[test]
    fn test_duplicate_pin_last_net_wins() {
        let a = netlist(&[("A", &[("R1", "1", "")]), ("B", &[("R1", "1", "")])]);

        let index = PinIndex::build(&a);
        assert_eq!(index.len(), 1);
        let key = PinKey {
            reference: "R1".to_string(),
            pin: "1".to_string(),
        };
        assert_eq!(index.get(&key).unwrap().net_name, "B");

        let result = compare(&a, &a);
        assert_eq!(result.rows.len(), 1);
        assert!(result.is_identical());
    }

    #[test]
    fn test_same_ref_keeps_pin_order() {
        let a = netlist(&[("A", &[("U1", "2", ""), ("U1", "1", "")])]);
        let b = netlist(&[("B", &[("U1", "2", ""), ("U1", "1", "")])]);

        let pins: Vec<_> = compare(&a, &b).rows.iter().map(|r| r.pin1.clone()).collect();
        assert_eq!(pins, vec!["1", "2"]);
    }

    #[test]
    fn test_pin_key_includes_reference() {
        // same pin number on different parts must not collide
        let a = netlist(&[("A", &[("R1", "1", "")]), ("B", &[("R2", "1", "")])]);
        let result = compare(&a, &a);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.total_matched, 2);
    }
}
