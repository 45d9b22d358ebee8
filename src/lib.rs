//! Graph coloring register allocation
//!
//! Liveness per basic block -> interference graph -> simplify/select coloring
//! over a fixed register palette. The result is either a register for every
//! value or the set of values left over when simplify got stuck.

pub mod args;
pub mod emit;
pub mod regalloc;
pub mod registers;
mod utils;

use anyhow::Result;
use wasm_bindgen::prelude::*;

use crate::regalloc::{allocate_blocks, LivenessInput, TieBreak};
use crate::registers::Palette;

pub use regalloc::{Allocation, AllocationResult, InterferenceGraph, RegAllocError, SpillReport};

/// Allocate the JSON liveness input with registers `R1..Rk`, returning the
/// JSON rendering of the result, or the error message.
#[wasm_bindgen]
pub fn allocate_json(blocks_json: &str, num_registers: u32) -> String {
  match allocate_json_inner(blocks_json, num_registers) {
    Ok(json) => json,
    Err(e) => e.to_string(),
  }
}

fn allocate_json_inner(blocks_json: &str, num_registers: u32) -> Result<String> {
  let input = LivenessInput::from_json(blocks_json)?;
  let palette = Palette::with_size(num_registers as usize)?;
  let (_, result) = allocate_blocks(&input.blocks, &palette, TieBreak::default())?;
  Ok(emit::render_json(&result))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_allocate_json() {
    let out = allocate_json(r#"[{"id": 1, "instructions": ["x"], "live_out": ["x"]}]"#, 4);
    assert_eq!(out, r#"{"allocation":{"x":"R1"},"status":"allocated"}"#);
  }

  #[test]
  fn test_allocate_json_errors() {
    assert!(allocate_json("not json", 4).contains("malformed liveness input"));
    assert!(allocate_json("[]", 0).contains("invalid palette"));
  }
}
