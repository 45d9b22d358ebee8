//! Output rendering for allocation results

use std::fmt::Write;

use serde_json::json;

use crate::args::EmitTarget;
use crate::regalloc::{AllocationResult, InterferenceGraph};

pub fn render(target: EmitTarget, igraph: &InterferenceGraph, result: &AllocationResult) -> String {
  match target {
    EmitTarget::Text => render_text(result),
    EmitTarget::Json => render_json(result),
    EmitTarget::Dot => render_dot(igraph, Some(result)),
  }
}

/// `value -> register` per line, or the spill report.
pub fn render_text(result: &AllocationResult) -> String {
  let mut out = String::new();
  match result {
    AllocationResult::Allocated(allocation) => {
      out.push_str("Register Allocation:\n");
      for (value, reg) in allocation.iter() {
        let _ = writeln!(out, "{} -> {}", value, reg);
      }
    }
    AllocationResult::Spilled(report) => {
      let _ = write!(out, "{}", report);
    }
  }
  out
}

pub fn render_json(result: &AllocationResult) -> String {
  let doc = match result {
    AllocationResult::Allocated(allocation) => json!({
      "status": "allocated",
      "allocation": allocation,
    }),
    AllocationResult::Spilled(report) => {
      let mut doc = json!(report);
      if let Some(fields) = doc.as_object_mut() {
        fields.insert("status".to_string(), json!("spill"));
        fields.insert("spilled".to_string(), json!(report.spilled()));
      }
      doc
    }
  };
  doc.to_string()
}

/// The interference graph in Graphviz format. Allocated values are labelled
/// with their register, spilled values are filled red.
pub fn render_dot(igraph: &InterferenceGraph, result: Option<&AllocationResult>) -> String {
  let mut out = String::from("graph interference {\n  node [shape=circle];\n");

  for value in igraph.values() {
    let attrs = match result {
      Some(AllocationResult::Allocated(allocation)) => allocation
        .get(value)
        .map(|reg| {
          format!(
            " [label=\"{}\\n{}\"]",
            dot_escape(value.name()),
            dot_escape(reg.name())
          )
        })
        .unwrap_or_default(),
      Some(AllocationResult::Spilled(report)) if report.contains(value) => {
        " [style=filled, fillcolor=red]".to_string()
      }
      _ => String::new(),
    };
    let _ = writeln!(out, "  \"{}\"{};", dot_escape(value.name()), attrs);
  }

  for (u, v) in igraph.edges() {
    let _ = writeln!(
      out,
      "  \"{}\" -- \"{}\";",
      dot_escape(u.name()),
      dot_escape(v.name())
    );
  }

  out.push_str("}\n");
  out
}

/// Quoted Graphviz IDs only need `"` and `\` escaped.
fn dot_escape(name: &str) -> String {
  let mut escaped = String::with_capacity(name.len());
  for c in name.chars() {
    if c == '"' || c == '\\' {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

/// Adjacency listing, one value per line.
pub fn dump_graph(igraph: &InterferenceGraph) -> String {
  let mut out = String::from("Interference Graph:\n");
  for (value, neighbors) in igraph.adjacency() {
    let neighbors = neighbors.iter().map(|n| n.name()).collect::<Vec<_>>();
    let _ = writeln!(out, "{}: {{{}}}", value, neighbors.join(", "));
  }
  out
}
