//! Stacked stat modifiers
//!
//! Modifiers never touch the base block. Effective stats are recomputed from
//! base + stack whenever combat needs them: all additive terms first, then
//! all multipliers, floored at zero.

use serde::{Deserialize, Serialize};

use crate::stats::block::{StatBlock, StatKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ModifierOp {
    Add(f32),
    Multiply(f32),
}

/// When a modifier stops applying
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Expiry {
    /// Lasts until the unit is cleaned up
    Permanent,
    /// Counts down with battle time
    AfterMs(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub source: String,
    pub stat: StatKind,
    pub op: ModifierOp,
    pub expiry: Expiry,
}

impl StatModifier {
    pub fn new(source: impl Into<String>, stat: StatKind, op: ModifierOp, expiry: Expiry) -> Self {
        Self {
            source: source.into(),
            stat,
            op,
            expiry,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.expiry, Expiry::AfterMs(remaining) if remaining <= 0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierStack {
    entries: Vec<StatModifier>,
}

impl ModifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, modifier: StatModifier) {
        self.entries.push(modifier);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.entries.iter().any(|m| m.source == source)
    }

    pub fn remove_source(&mut self, source: &str) {
        self.entries.retain(|m| m.source != source);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatModifier> {
        self.entries.iter()
    }

    /// Advance timed modifiers and drop the ones that ran out
    pub fn tick(&mut self, delta_ms: f32) {
        for modifier in &mut self.entries {
            if let Expiry::AfterMs(remaining) = &mut modifier.expiry {
                *remaining -= delta_ms;
            }
        }
        self.entries.retain(|m| !m.is_expired());
    }

    /// Effective stats for this stack on top of `base`
    pub fn apply(&self, base: &StatBlock) -> StatBlock {
        let mut out = *base;
        for kind in [StatKind::Attack, StatKind::Defense, StatKind::Speed] {
            let mut add = 0.0;
            let mut mult = 1.0;
            for modifier in self.entries.iter().filter(|m| m.stat == kind) {
                match modifier.op {
                    ModifierOp::Add(v) => add += v,
                    ModifierOp::Multiply(v) => mult *= v,
                }
            }
            let value = out.get_mut(kind);
            *value = ((*value + add) * mult).max(0.0);
        }
        out
    }
}
