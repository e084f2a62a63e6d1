//! Vertical profiles of characteristic scales.
//!
//! Every level of a [`FieldStack`] up to `z_max` is handled independently.
//! With the `parallel` feature the levels run on the rayon pool; results are
//! returned in level order either way.

use crate::error::CumulantError;
use crate::field::{FieldStack, GridField, Mask};
use crate::scales::{characteristic_scales, CharacteristicScales, ScaleParams};
use log::debug;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default upper height of a profile in metres.
pub const DEFAULT_Z_MAX: f64 = 700.0;

/// Masks applied to the levels of a stack.
#[derive(Clone, Debug)]
pub enum MaskSource {
    /// One horizontal mask used at every level.
    Shared(Mask),
    /// One mask per level, in the stack's level order.
    PerLevel(Vec<Mask>),
}

impl MaskSource {
    fn for_level(&self, level: usize) -> Option<&Mask> {
        match self {
            MaskSource::Shared(mask) => Some(mask),
            MaskSource::PerLevel(masks) => masks.get(level),
        }
    }
}

/// Characteristic scales of the cumulant of `stack1` and `stack2` at every
/// level with `z <= z_max`. Levels without a height are always included.
pub fn height_profile(
    stack1: &FieldStack,
    stack2: Option<&FieldStack>,
    mask: Option<&MaskSource>,
    params: &ScaleParams,
    z_max: f64,
) -> Result<Vec<CharacteristicScales>, CumulantError> {
    if let Some(stack2) = stack2 {
        check_levels(stack1, stack2)?;
    }
    if let Some(MaskSource::PerLevel(masks)) = mask {
        if masks.len() != stack1.len() {
            return Err(CumulantError::LevelMismatch {
                left: stack1.len(),
                right: masks.len(),
            });
        }
    }

    let levels: Vec<usize> = (0..stack1.len())
        .filter(|&i| stack1.levels()[i].meta.z.map_or(true, |z| z <= z_max))
        .collect();
    debug!(
        "height_profile: {} levels of {} below z_max={z_max}",
        levels.len(),
        stack1.len()
    );

    let run = |level: usize| -> Result<CharacteristicScales, CumulantError> {
        let field1: &GridField = &stack1.levels()[level];
        let field2 = stack2.map(|s| &s.levels()[level]);
        let level_mask = mask.and_then(|m| m.for_level(level));
        characteristic_scales(field1, field2, level_mask, params)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Result<CharacteristicScales, CumulantError>> =
        levels.par_iter().map(|&level| run(level)).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<CharacteristicScales, CumulantError>> =
        levels.iter().map(|&level| run(level)).collect();

    results.into_iter().collect()
}

fn check_levels(stack1: &FieldStack, stack2: &FieldStack) -> Result<(), CumulantError> {
    if stack1.len() != stack2.len() {
        return Err(CumulantError::LevelMismatch {
            left: stack1.len(),
            right: stack2.len(),
        });
    }
    for (level, (a, b)) in stack1.heights().into_iter().zip(stack2.heights()).enumerate() {
        if a != b {
            return Err(CumulantError::HeightMismatch {
                level,
                left: a,
                right: b,
            });
        }
    }
    Ok(())
}

/// A requested cumulant given by the names of its two variables.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CumulantPair {
    pub first: String,
    pub second: String,
}

impl CumulantPair {
    pub fn is_auto(&self) -> bool {
        self.first == self.second
    }
}

impl fmt::Display for CumulantPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C({},{})", self.first, self.second)
    }
}

/// Parse `"v1:v2,v3:v4,..."`, dropping repeated pairs while keeping the
/// order of first appearance.
pub fn parse_cumulant_pairs(spec: &str) -> Result<Vec<CumulantPair>, String> {
    let mut pairs: Vec<CumulantPair> = Vec::new();
    for entry in spec.split(',') {
        let entry = entry.trim();
        let (first, second) = entry
            .split_once(':')
            .ok_or_else(|| format!("Cumulant `{entry}` is not of the form v1:v2"))?;
        let (first, second) = (first.trim(), second.trim());
        if first.is_empty() || second.is_empty() || second.contains(':') {
            return Err(format!("Cumulant `{entry}` is not of the form v1:v2"));
        }
        let pair = CumulantPair {
            first: first.to_string(),
            second: second.to_string(),
        };
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }
    Ok(pairs)
}
