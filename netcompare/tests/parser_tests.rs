//! Tests for KiCad netlist parsing

use netcompare::parser::netlist::NodeRef;
use netcompare::{parse_netlist, NetCompareError};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_parse_board() {
    let parsed = parse_netlist(&fixture_path("board_rev_a.net")).expect("Should parse");

    assert_eq!(parsed.nets.len(), 8);
    assert_eq!(parsed.nets.node_count(), 23);
    assert_eq!(parsed.components.len(), 13);

    let names: Vec<_> = parsed.nets.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["GND", "+3V3", "+5V", "/LED", "/LED_K", "/CTRL", "/XTAL_IN", "/XTAL_OUT"]
    );
}

#[test]
fn test_parse_nodes_with_pinfunction() {
    let parsed = parse_netlist(&fixture_path("board_rev_a.net")).expect("Should parse");

    let ctrl = parsed.nets.get("/CTRL").expect("Should have /CTRL net");
    assert_eq!(
        ctrl.nodes,
        vec![
            NodeRef::new("Q1", "1", "G"),
            NodeRef::new("TP1", "1", "1"),
            NodeRef::new("U1", "3", "PB4"),
        ]
    );

    let gnd = parsed.nets.get("GND").expect("Should have GND net");
    assert_eq!(gnd.nodes[0], NodeRef::new("C1", "2", ""));
}

#[test]
fn test_parse_component_attributes() {
    let parsed = parse_netlist(&fixture_path("board_rev_a.net")).expect("Should parse");

    let u1 = parsed.components.get("U1").expect("Should have U1");
    assert_eq!(u1.value.as_deref(), Some("ATtiny85-20S"));
    assert_eq!(u1.description.as_deref(), Some("8-bit AVR microcontroller"));

    // declared but never wired
    assert!(parsed.components.contains("MH1"));
    assert!(!parsed.refs.contains("MH1"));
    assert!(parsed.refs.contains("TP1"));
    assert_eq!(parsed.refs.len(), 10);
}

#[test]
fn test_parse_malformed_file() {
    let parsed = parse_netlist(&fixture_path("malformed.net")).expect("Malformed content is not an error");

    let refs: Vec<_> = parsed.components.references().collect();
    assert_eq!(refs, vec!["R1", "R2"]);
    assert_eq!(parsed.components.get("R1").unwrap().value.as_deref(), Some("10k"));
    assert_eq!(
        parsed.components.get("R2").unwrap().description.as_deref(),
        Some("Resistor")
    );

    // a net line with a non-numeric code does not move the cursor
    let vin = parsed.nets.get("VIN").expect("Should have VIN");
    assert_eq!(
        vin.nodes,
        vec![NodeRef::new("R1", "1", ""), NodeRef::new("R2", "2", "")]
    );
    assert!(parsed.nets.get("BROKEN").is_none());
    assert_eq!(parsed.nets.get("GND").unwrap().nodes.len(), 1);

    assert!(!parsed.refs.contains("R99"));
    assert_eq!(parsed.stats.ignored_lines, 5);
}

#[test]
fn test_parse_nonexistent_file() {
    let result = parse_netlist(&PathBuf::from("not_a_real_file.net"));
    match result {
        Err(NetCompareError::FileAccess { path, .. }) => {
            assert_eq!(path, PathBuf::from("not_a_real_file.net"));
        }
        other => panic!("Expected FileAccess error, got {:?}", other.map(|p| p.nets.len())),
    }
}

#[test]
fn test_parse_non_utf8_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.net");
    std::fs::write(&path, [0x28, 0x6e, 0x65, 0x74, 0x73, 0xff, 0xfe]).unwrap();

    let result = parse_netlist(&path);
    assert!(matches!(result, Err(NetCompareError::FileAccess { .. })));
}
