//! Ability modifiers and the two damage-shaping stages.
//!
//! Attacker abilities multiply damage in two stages: every active
//! base-stage factor folds into one product, and subtotal-stage factors
//! apply to that combined result afterwards. Toggling order therefore
//! never changes the outcome. Defender abilities scale the already-buffed
//! damage in configured order.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default location of the on-disk modifier override file.
pub const DEFAULT_ABILITIES_PATH: &str = "data/abilities.json";

/// When an attacker multiplier joins the damage product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityStage {
    /// Combined multiplicatively with the other base-stage factors.
    #[default]
    Base,
    /// Applied to the combined subtotal, after every base-stage factor.
    Subtotal,
}

/// A damage buff the attacker can have active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackerAbility {
    pub id: String,
    pub label: String,
    pub multiplier: f64,
    #[serde(default)]
    pub stage: AbilityStage,
}

impl AttackerAbility {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        multiplier: f64,
        stage: AbilityStage,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            multiplier,
            stage,
        }
    }
}

/// A damage reduction the defender can have active. The factor is the
/// fraction of incoming damage that still lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenderAbility {
    pub id: String,
    pub label: String,
    pub damage_reduction: f64,
}

impl DefenderAbility {
    pub fn new(id: impl Into<String>, label: impl Into<String>, damage_reduction: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            damage_reduction,
        }
    }
}

/// Ordered attacker and defender modifier sets, fixed for the life of the
/// process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityConfig {
    #[serde(default)]
    pub attacker: Vec<AttackerAbility>,
    #[serde(default)]
    pub defender: Vec<DefenderAbility>,
}

impl AbilityConfig {
    /// The stock modifier set shipped with the hero table.
    pub fn builtin() -> Self {
        Self {
            attacker: vec![
                AttackerAbility::new("nano", "Nano Boost", 1.5, AbilityStage::Base),
                AttackerAbility::new("amp", "Amplification Matrix", 2.0, AbilityStage::Base),
                AttackerAbility::new("ray", "Orbital Ray", 1.3, AbilityStage::Base),
                AttackerAbility::new("caduceus", "Caduceus Staff", 1.3, AbilityStage::Base),
                AttackerAbility::new("discord", "Orb of Discord", 1.25, AbilityStage::Subtotal),
            ],
            defender: vec![DefenderAbility::new("nano_def", "Nano Boost", 0.5)],
        }
    }

    /// Load an override set from `path`. A missing, unreadable, or
    /// malformed file falls back to [`AbilityConfig::builtin`]; entries
    /// with out-of-range factors are dropped from a parsed override.
    pub fn load(path: &str) -> Self {
        if !Path::new(path).exists() {
            return Self::builtin();
        }
        let raw = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::builtin(),
        };
        match serde_json::from_str::<Self>(&raw) {
            Ok(config) => config.sanitized(),
            Err(_) => Self::builtin(),
        }
    }

    fn sanitized(mut self) -> Self {
        self.attacker
            .retain(|ability| ability.multiplier.is_finite() && ability.multiplier > 0.0);
        self.defender.retain(|ability| {
            ability.damage_reduction > 0.0 && ability.damage_reduction <= 1.0
        });
        self
    }
}

/// Apply the active attacker buffs to a base per-bullet damage value.
pub fn apply_attacker_abilities(
    base_damage: f64,
    abilities: &[AttackerAbility],
    active: &HashSet<String>,
) -> f64 {
    let base_product: f64 = abilities
        .iter()
        .filter(|ability| ability.stage == AbilityStage::Base && active.contains(&ability.id))
        .map(|ability| ability.multiplier)
        .product();
    abilities
        .iter()
        .filter(|ability| ability.stage == AbilityStage::Subtotal && active.contains(&ability.id))
        .fold(base_damage * base_product, |damage, ability| {
            damage * ability.multiplier
        })
}

/// Apply the active defender reductions to an attacker-adjusted damage
/// value.
pub fn apply_defender_abilities(
    damage: f64,
    abilities: &[DefenderAbility],
    active: &HashSet<String>,
) -> f64 {
    abilities
        .iter()
        .filter(|ability| active.contains(&ability.id))
        .fold(damage, |damage, ability| damage * ability.damage_reduction)
}
