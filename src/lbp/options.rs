use crate::error::{LgbphsError, Result};
use serde::{Deserialize, Serialize};

/// Largest supported neighbourhood (lookup tables hold `2^P` entries).
pub const MAX_NEIGHBORS: usize = 16;

/// Parameters of the local binary pattern operator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LbpOptions {
    pub radius: f64,
    pub neighbor_count: usize,
    /// Collapse non-uniform patterns (more than two 0/1 transitions) into one label.
    pub uniform: bool,
    /// Sample neighbours on a circle (bilinear) instead of a square.
    pub circular: bool,
    pub rotation_invariant: bool,
    /// Compare neighbours to the neighbourhood mean instead of the centre.
    pub compare_to_average: bool,
    /// Append a bit comparing the centre to the mean. Needs `compare_to_average`.
    pub add_average_bit: bool,
}

impl Default for LbpOptions {
    fn default() -> Self {
        Self {
            radius: 2.0,
            neighbor_count: 8,
            uniform: true,
            circular: true,
            rotation_invariant: false,
            compare_to_average: false,
            add_average_bit: false,
        }
    }
}

impl LbpOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(LgbphsError::config(format!(
                "LBP radius must be positive (got {})",
                self.radius
            )));
        }
        if self.neighbor_count == 0 || self.neighbor_count > MAX_NEIGHBORS {
            return Err(LgbphsError::config(format!(
                "LBP neighbor_count must be in 1..={MAX_NEIGHBORS} (got {})",
                self.neighbor_count
            )));
        }
        if !self.circular && !matches!(self.neighbor_count, 4 | 8) {
            return Err(LgbphsError::config(format!(
                "square LBP sampling supports 4 or 8 neighbours (got {})",
                self.neighbor_count
            )));
        }
        if !self.circular && self.radius.round() < 1.0 {
            return Err(LgbphsError::config(format!(
                "square LBP sampling needs an integral radius >= 1 (got {})",
                self.radius
            )));
        }
        Ok(())
    }

    /// Whether the average bit takes part in the code.
    pub fn uses_average_bit(&self) -> bool {
        self.add_average_bit && self.compare_to_average
    }
}
