pub mod netlist;

// Re-export for convenience
pub use netlist::{
    ComponentAttributes, ComponentSet, Net, NetList, NetlistParser, NodeRef, ParseStats,
    ParsedNetlist, RefSet, Section,
};
