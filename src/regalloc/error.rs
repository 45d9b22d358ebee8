use thiserror::Error;

use super::Value;

/// Faults raised by the allocator. Every variant is a caller or builder bug;
/// running out of registers is reported as a `SpillReport`, not as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegAllocError {
  #[error("value {0} is not in the interference graph")]
  UnknownValue(Value),
  #[error("value {0} cannot interfere with itself")]
  InvalidValue(Value),
  #[error("no free register for {value} among {num_registers} colors")]
  AllocationExhausted { value: Value, num_registers: usize },
  #[error("invalid palette: {0}")]
  InvalidPalette(String),
}
