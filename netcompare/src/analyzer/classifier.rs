//! Component Category Classifier
//!
//! Buckets reference designators into functional categories by prefix.
//! Prefixes overlap (`TP` vs `T`, `MH` vs `H`, `FID` vs `FET`), so the rules
//! form a single ordered table where the first matching prefix wins.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::parser::netlist::ComponentSet;

/// Functional bucket derived from a reference designator prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    #[serde(rename = "capacitors")]
    Capacitor,
    #[serde(rename = "resistors")]
    Resistor,
    #[serde(rename = "ics")]
    IC,
    #[serde(rename = "fets")]
    FET,
    #[serde(rename = "connectors")]
    Connector,
    #[serde(rename = "inductors")]
    Inductor,
    #[serde(rename = "mounting_holes")]
    MountingHole,
    #[serde(rename = "testpads")]
    TestPad,
    #[serde(rename = "fiducials")]
    Fiducial,
    #[serde(rename = "diodes_leds")]
    DiodeLED,
    #[serde(rename = "crystals")]
    Crystal,
    #[serde(rename = "others")]
    Other,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 12] = [
        Category::Capacitor,
        Category::Resistor,
        Category::IC,
        Category::FET,
        Category::Connector,
        Category::Inductor,
        Category::MountingHole,
        Category::TestPad,
        Category::Fiducial,
        Category::DiodeLED,
        Category::Crystal,
        Category::Other,
    ];

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Capacitor => "Capacitors",
            Category::Resistor => "Resistors",
            Category::IC => "ICs",
            Category::FET => "FETs",
            Category::Connector => "Connectors",
            Category::Inductor => "Inductors",
            Category::MountingHole => "Mounting Holes",
            Category::TestPad => "TestPads",
            Category::Fiducial => "Fiducials",
            Category::DiodeLED => "Diodes/LEDs",
            Category::Crystal => "Crystals",
            Category::Other => "Others",
        }
    }

    /// Stable identifier renderers bind to.
    pub fn key(self) -> &'static str {
        match self {
            Category::Capacitor => "capacitors",
            Category::Resistor => "resistors",
            Category::IC => "ics",
            Category::FET => "fets",
            Category::Connector => "connectors",
            Category::Inductor => "inductors",
            Category::MountingHole => "mounting_holes",
            Category::TestPad => "testpads",
            Category::Fiducial => "fiducials",
            Category::DiodeLED => "diodes_leds",
            Category::Crystal => "crystals",
            Category::Other => "others",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered prefix rules. First match wins; anything unmatched is `Other`.
pub const PREFIX_RULES: &[(&str, Category)] = &[
    ("TP", Category::TestPad),
    ("FID", Category::Fiducial),
    ("MH", Category::MountingHole),
    ("H", Category::MountingHole),
    ("IC", Category::IC),
    ("U", Category::IC),
    ("GPIO", Category::Connector),
    ("J", Category::Connector),
    ("C", Category::Capacitor),
    ("R", Category::Resistor),
    ("Q", Category::FET),
    ("T", Category::FET),
    ("FET", Category::FET),
    ("L", Category::Inductor),
    ("D", Category::DiodeLED),
    ("X", Category::Crystal),
];

/// Classify a reference designator. Prefix tests are case-sensitive.
pub fn classify(reference: &str) -> Category {
    PREFIX_RULES
        .iter()
        .find(|(prefix, _)| reference.starts_with(*prefix))
        .map_or(Category::Other, |&(_, category)| category)
}

/// Count and member list for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    pub category: Category,
    pub label: &'static str,
    pub count: usize,
    /// References in encounter order.
    pub refs: Vec<String>,
}

impl CategoryBucket {
    fn empty(category: Category) -> Self {
        Self {
            category,
            label: category.label(),
            count: 0,
            refs: Vec::new(),
        }
    }
}

/// Per-category counts and detail lists for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentStats {
    buckets: Vec<CategoryBucket>,
    total_refs: usize,
}

impl Default for ComponentStats {
    fn default() -> Self {
        Self {
            buckets: Category::ALL.iter().map(|&c| CategoryBucket::empty(c)).collect(),
            total_refs: 0,
        }
    }
}

impl ComponentStats {
    fn push(&mut self, reference: &str) {
        let bucket = &mut self.buckets[classify(reference).index()];
        bucket.count += 1;
        bucket.refs.push(reference.to_string());
        self.total_refs += 1;
    }

    pub fn count(&self, category: Category) -> usize {
        self.buckets[category.index()].count
    }

    pub fn refs(&self, category: Category) -> &[String] {
        &self.buckets[category.index()].refs
    }

    /// One bucket per category, in `Category::ALL` order.
    pub fn buckets(&self) -> &[CategoryBucket] {
        &self.buckets
    }

    /// Number of unique references classified.
    pub fn total_refs(&self) -> usize {
        self.total_refs
    }
}

/// Classify every component of a board.
pub fn classify_set(components: &ComponentSet) -> ComponentStats {
    classify_refs(components.references())
}

/// Classify arbitrary references, skipping repeats while keeping encounter
/// order.
pub fn classify_refs<'a, I>(references: I) -> ComponentStats
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stats = ComponentStats::default();
    let mut seen = HashSet::new();
    for reference in references {
        if seen.insert(reference) {
            stats.push(reference);
        }
    }
    stats
}
