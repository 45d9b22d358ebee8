// IMPORTANT: the palette order is the color order. Select hands out the
// lowest free index first, so R1 is always preferred.
pub const NUM_REGISTERS: usize = 4;
pub const DEFAULT_REGISTERS: [&str; NUM_REGISTERS] = ["R1", "R2", "R3", "R4"];

/// Prefix used when a palette is generated from a register count
pub const GENERATED_REG_PREFIX: &str = "R";
