pub(crate) mod consts;

use std::collections::BTreeSet;
use std::fmt;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::regalloc::RegAllocError;
use consts::{DEFAULT_REGISTERS, GENERATED_REG_PREFIX};

lazy_static! {
  /// The target's register file, shared by every allocation attempt.
  pub static ref DEFAULT_PALETTE: Palette =
    Palette::from_names(DEFAULT_REGISTERS).expect("default palette is well formed");
}

/// A physical register identifier.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Register(String);

impl Register {
  pub fn new(name: impl Into<String>) -> Self {
    Register(name.into())
  }

  pub fn name(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Register {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// The ordered set of k registers handed out by the allocator.
/// The position of a register in the palette is its color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
  registers: Vec<Register>,
}

impl Palette {
  /// Build a palette, rejecting an empty register list or duplicate names.
  pub fn new(registers: Vec<Register>) -> Result<Self, RegAllocError> {
    if registers.is_empty() {
      return Err(RegAllocError::InvalidPalette(
        "palette must contain at least one register".to_string(),
      ));
    }

    let mut seen = BTreeSet::new();
    for reg in &registers {
      if !seen.insert(reg) {
        return Err(RegAllocError::InvalidPalette(format!(
          "register {} appears more than once",
          reg
        )));
      }
    }

    Ok(Palette { registers })
  }

  pub fn from_names<I, S>(names: I) -> Result<Self, RegAllocError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::new(names.into_iter().map(Register::new).collect())
  }

  /// `R1, R2, ..., Rk`
  pub fn with_size(k: usize) -> Result<Self, RegAllocError> {
    Self::from_names((1..=k).map(|i| format!("{}{}", GENERATED_REG_PREFIX, i)))
  }

  /// Number of colors, i.e. k
  pub fn len(&self) -> usize {
    self.registers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registers.is_empty()
  }

  pub fn reg_from_color(&self, color: usize) -> Option<&Register> {
    self.registers.get(color)
  }

  pub fn color_from_reg(&self, reg: &Register) -> Option<usize> {
    self.registers.iter().position(|r| r == reg)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Register> {
    self.registers.iter()
  }
}

impl Default for Palette {
  fn default() -> Self {
    DEFAULT_PALETTE.clone()
  }
}

impl fmt::Display for Palette {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let names = self.registers.iter().map(Register::name).collect::<Vec<_>>();
    write!(f, "[{}]", names.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::registers::consts::NUM_REGISTERS;

  #[test]
  fn test_reg_index_order() {
    let palette = Palette::default();
    assert_eq!(palette.len(), NUM_REGISTERS);
    for i in 0..NUM_REGISTERS {
      let reg = palette.reg_from_color(i).unwrap();
      assert_eq!(palette.color_from_reg(reg), Some(i));
    }
    assert_eq!(palette.reg_from_color(0), Some(&Register::new("R1")));
    assert_eq!(palette.reg_from_color(NUM_REGISTERS), None);
  }

  #[test]
  fn test_generated_palette() {
    let palette = Palette::with_size(3).unwrap();
    assert_eq!(palette.to_string(), "[R1, R2, R3]");
  }

  #[test]
  fn empty_palette_is_rejected() {
    assert!(matches!(
      Palette::with_size(0),
      Err(RegAllocError::InvalidPalette(_))
    ));
  }

  #[test]
  fn duplicate_register_is_rejected() {
    assert!(matches!(
      Palette::from_names(["rax", "rbx", "rax"]),
      Err(RegAllocError::InvalidPalette(_))
    ));
  }
}
