//! KiCad Netlist Parser
//!
//! Line-oriented reader for KiCad `.net` exports. Only the records needed for
//! pin-level comparison are recognized: the `components` and `nets` section
//! markers, `comp`/`value`/`description` inside components and `net`/`node`
//! inside nets. Everything else is ignored without error.
//!
//! The grammar trusts section markers rather than parenthesis depth: the last
//! marker seen decides how subsequent lines are interpreted.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::NetCompareError;

const NETS_MARKER: &str = "(nets";
const COMPONENTS_MARKER: &str = "(components";

static NET_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\(net \(code "\d+"\) \(name "(.*?)"\)"#).unwrap());
static NODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\(node \(ref "(.*?)"\) \(pin "(.*?)"\)( \(pinfunction "(.*?)"\))?"#).unwrap()
});
static COMPONENT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\(comp \(ref "(.*?)"\)"#).unwrap());
static VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^\(value "(.*?)"\)"#).unwrap());
static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\(description "(.*?)"\)"#).unwrap());

/// One pin's membership in a net.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NodeRef {
    pub pin: String,
    /// Logical pin label, empty when the netlist does not provide one.
    pub pinfunction: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

impl NodeRef {
    pub fn new(reference: &str, pin: &str, pinfunction: &str) -> Self {
        Self {
            pin: pin.to_string(),
            pinfunction: pinfunction.to_string(),
            reference: reference.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Net {
    pub name: String,
    pub nodes: Vec<NodeRef>,
}

/// Nets keyed by name, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct NetList {
    nets: Vec<Net>,
    by_name: HashMap<String, usize>,
}

impl NetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a net. A name that already exists is reset to an empty node
    /// list and keeps its original position.
    pub fn declare(&mut self, name: &str) {
        match self.by_name.get(name) {
            Some(&idx) => self.nets[idx].nodes.clear(),
            None => {
                self.by_name.insert(name.to_string(), self.nets.len());
                self.nets.push(Net {
                    name: name.to_string(),
                    nodes: Vec::new(),
                });
            }
        }
    }

    /// Append a node to the named net, declaring the net if needed.
    pub fn push_node(&mut self, net_name: &str, node: NodeRef) {
        let idx = match self.by_name.get(net_name) {
            Some(&idx) => idx,
            None => {
                self.declare(net_name);
                self.nets.len() - 1
            }
        };
        self.nets[idx].nodes.push(node);
    }

    pub fn get(&self, name: &str) -> Option<&Net> {
        self.by_name.get(name).map(|&idx| &self.nets[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Net> {
        self.nets.iter()
    }

    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    /// Total number of nodes across all nets.
    pub fn node_count(&self) -> usize {
        self.nets.iter().map(|n| n.nodes.len()).sum()
    }
}

impl<'a> IntoIterator for &'a NetList {
    type Item = &'a Net;
    type IntoIter = std::slice::Iter<'a, Net>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentAttributes {
    pub value: Option<String>,
    pub description: Option<String>,
}

/// Components keyed by reference designator, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ComponentSet {
    entries: Vec<(String, ComponentAttributes)>,
    by_ref: HashMap<String, usize>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a component with empty attributes. Re-declaring a reference
    /// clears its attributes but keeps its position.
    pub fn declare(&mut self, reference: &str) {
        match self.by_ref.get(reference) {
            Some(&idx) => self.entries[idx].1 = ComponentAttributes::default(),
            None => {
                self.by_ref.insert(reference.to_string(), self.entries.len());
                self.entries
                    .push((reference.to_string(), ComponentAttributes::default()));
            }
        }
    }

    fn attributes_mut(&mut self, reference: &str) -> Option<&mut ComponentAttributes> {
        let idx = *self.by_ref.get(reference)?;
        Some(&mut self.entries[idx].1)
    }

    pub fn set_value(&mut self, reference: &str, value: &str) {
        if let Some(attrs) = self.attributes_mut(reference) {
            attrs.value = Some(value.to_string());
        }
    }

    pub fn set_description(&mut self, reference: &str, description: &str) {
        if let Some(attrs) = self.attributes_mut(reference) {
            attrs.description = Some(description.to_string());
        }
    }

    pub fn get(&self, reference: &str) -> Option<&ComponentAttributes> {
        self.by_ref.get(reference).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.by_ref.contains_key(reference)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentAttributes)> {
        self.entries.iter().map(|(r, a)| (r.as_str(), a))
    }

    /// Reference designators in declaration order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(r, _)| r.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every reference designator seen on a node, across all nets.
pub type RefSet = BTreeSet<String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub lines: usize,
    /// Lines inside an active section that matched no record pattern.
    pub ignored_lines: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedNetlist {
    pub nets: NetList,
    pub components: ComponentSet,
    pub refs: RefSet,
    pub stats: ParseStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Outside,
    Nets,
    Components,
}

/// Parse cursor threaded through every line.
#[derive(Debug, Default)]
struct ParserState {
    section: Section,
    current_net: Option<String>,
    current_ref: Option<String>,
}

impl ParserState {
    /// Feed one line. Returns `false` when a line inside an active section
    /// was not recognized.
    fn feed(&mut self, raw: &str, out: &mut ParsedNetlist) -> bool {
        let line = raw.trim();

        if line.starts_with(NETS_MARKER) {
            self.section = Section::Nets;
            return true;
        }
        if line.starts_with(COMPONENTS_MARKER) {
            self.section = Section::Components;
            return true;
        }

        match self.section {
            Section::Outside => true,
            Section::Nets => self.feed_nets(line, out),
            Section::Components => self.feed_components(line, out),
        }
    }

    fn feed_nets(&mut self, line: &str, out: &mut ParsedNetlist) -> bool {
        if let Some(caps) = NET_START.captures(line) {
            let name = &caps[1];
            out.nets.declare(name);
            self.current_net = Some(name.to_string());
            return true;
        }

        if let Some(caps) = NODE.captures(line) {
            let Some(net) = self.current_net.as_deref() else {
                trace!("node before any net: {}", line);
                return true;
            };
            let reference = &caps[1];
            let pin = &caps[2];
            let pinfunction = caps.get(4).map_or("", |m| m.as_str());
            out.nets
                .push_node(net, NodeRef::new(reference, pin, pinfunction));
            out.refs.insert(reference.to_string());
            return true;
        }

        false
    }

    fn feed_components(&mut self, line: &str, out: &mut ParsedNetlist) -> bool {
        if let Some(caps) = COMPONENT_START.captures(line) {
            let reference = &caps[1];
            out.components.declare(reference);
            self.current_ref = Some(reference.to_string());
            return true;
        }

        if let Some(caps) = VALUE.captures(line) {
            if let Some(reference) = self.current_ref.as_deref() {
                out.components.set_value(reference, &caps[1]);
            }
            return true;
        }

        if let Some(caps) = DESCRIPTION.captures(line) {
            if let Some(reference) = self.current_ref.as_deref() {
                out.components.set_description(reference, &caps[1]);
            }
            return true;
        }

        false
    }
}

/// KiCad netlist reader.
pub struct NetlistParser;

impl NetlistParser {
    /// Read and parse a netlist file. Only I/O failure is an error; malformed
    /// content is skipped.
    pub fn parse_file(path: &Path) -> Result<ParsedNetlist, NetCompareError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| NetCompareError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
        let parsed = Self::parse_str(&content);
        debug!(
            "Parsed {}: {} nets, {} nodes, {} components ({} lines ignored)",
            path.display(),
            parsed.nets.len(),
            parsed.nets.node_count(),
            parsed.components.len(),
            parsed.stats.ignored_lines
        );
        Ok(parsed)
    }

    pub fn parse_str(text: &str) -> ParsedNetlist {
        Self::parse_lines(text.lines())
    }

    pub fn parse_lines<I, S>(lines: I) -> ParsedNetlist
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParserState::default();
        let mut out = ParsedNetlist::default();

        for line in lines {
            let line = line.as_ref();
            out.stats.lines += 1;
            if !state.feed(line, &mut out) {
                out.stats.ignored_lines += 1;
                trace!("ignored line {}: {}", out.stats.lines, line.trim());
            }
        }

        out
    }
}
