//! Graphviz rendering of each party's timer hierarchy.

use crate::parser::schema::Party;
use crate::utils::config::{DOT_EXTENSION, MAIN_IDENTITY};

/// Render one party's parent/child graph
pub fn party_graph(measures: &Party) -> String {
    let mut out = String::from("digraph\n{\n  graph[ranksep=3.5];\n");

    for measure in measures.values() {
        out.push_str(&format!(
            "  ff{}[label=\"{}\"];\n",
            measure.identity,
            measure.name.replace('"', "\\\"")
        ));
        if measure.identity != MAIN_IDENTITY {
            out.push_str(&format!(
                "  ff{} -> ff{};\n",
                measure.parent, measure.identity
            ));
        }
    }

    out.push_str("}\n");
    out
}

/// File name for a party's graph; characters unsafe in paths become '_'
pub fn dot_file_name(party: &str) -> String {
    let safe: String = party
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.{}", safe, DOT_EXTENSION)
}
