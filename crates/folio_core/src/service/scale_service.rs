//! Size controller: bounded grow/shrink of the scale tokens.
//!
//! # Invariants
//! - Every key moves by its own step and is clamped into its bounds.
//! - All five keys are recomputed and committed together.
//! - `grow` at the ceiling and `shrink` at the floor return the input.

use crate::model::scale::{ScaleKey, ScaleTokens};
use log::debug;

/// Direction of one size controller press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDirection {
    Grow,
    Shrink,
}

impl ScaleDirection {
    fn sign(self) -> i32 {
        match self {
            Self::Grow => 1,
            Self::Shrink => -1,
        }
    }
}

/// Applies one step in `direction` to every token and clamps.
pub fn step(current: ScaleTokens, direction: ScaleDirection) -> ScaleTokens {
    let next = ScaleTokens::from_fn(|key: ScaleKey| {
        current
            .get(key)
            .saturating_add(direction.sign() * key.bounds().step)
    });
    debug!(
        "event=scale_step module=scale status=ok direction={:?} changed={}",
        direction,
        next != current
    );
    next
}

pub fn grow(current: ScaleTokens) -> ScaleTokens {
    step(current, ScaleDirection::Grow)
}

pub fn shrink(current: ScaleTokens) -> ScaleTokens {
    step(current, ScaleDirection::Shrink)
}
