/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Typed configuration for the LabelRank drivers, and the typed error
//! reporting rejected options.

use thiserror::Error;

/// Options controlling a LabelRank run.
///
/// `Default` matches the reference defaults: `repeat = 5`, `max_iterations =
/// 10`, `inflation = 1.5`, `conditional_update = 0.5`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRankOptions {
    /// Number of timed runs; the returned result is from the last run, the
    /// reported time is averaged over all of them. Must be at least 1.
    pub repeat: usize,
    /// Number of outer iterations performed after initialization.
    pub max_iterations: usize,
    /// Exponent applied by the inflation operator. Must be strictly positive.
    pub inflation: f64,
    /// Stability threshold `q` in `[0, 1]`.
    pub conditional_update: f64,
}

impl Default for LabelRankOptions {
    fn default() -> Self {
        Self {
            repeat: 5,
            max_iterations: 10,
            inflation: 1.5,
            conditional_update: 0.5,
        }
    }
}

impl LabelRankOptions {
    /// Validates the fields against the constraints in the error taxonomy
    /// below. Must be called (and must succeed) before any state is
    /// allocated for a run.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.repeat < 1 {
            return Err(OptionsError::NonPositiveRepeat { repeat: self.repeat });
        }
        if !(self.inflation > 0.0) {
            return Err(OptionsError::NonPositiveInflation {
                inflation: self.inflation,
            });
        }
        if !(0.0..=1.0).contains(&self.conditional_update) {
            return Err(OptionsError::ConditionalUpdateOutOfRange {
                conditional_update: self.conditional_update,
            });
        }
        Ok(())
    }
}

/// Errors rejecting an invalid [`LabelRankOptions`] value, one variant per
/// defined failure kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// `repeat` was zero (negative values are unrepresentable in `usize` and
    /// are caught at the type level instead).
    #[error("repeat must be at least 1, got {repeat}")]
    NonPositiveRepeat { repeat: usize },

    /// `inflation` was not strictly positive, or was NaN.
    #[error("inflation must be > 0, got {inflation}")]
    NonPositiveInflation { inflation: f64 },

    /// `conditional_update` fell outside `[0, 1]`, or was NaN.
    #[error("conditional_update must be in [0, 1], got {conditional_update}")]
    ConditionalUpdateOutOfRange { conditional_update: f64 },
}
