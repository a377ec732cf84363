//! Duel math: per-bullet damage shaping and time-to-kill derivation.
//!
//! Every function here is pure and total over real-valued inputs. Zeroed
//! weapon stats are legitimate degenerate input (the table defaults missing
//! cells to zero) and surface as an unreachable result, never as an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::combat::abilities::{apply_attacker_abilities, apply_defender_abilities, AbilityConfig};

/// Flat damage absorbed per bullet by armor for hits at or above
/// [`ARMOR_CHIP_THRESHOLD`].
pub const ARMOR_FLAT_ABSORB: f64 = 7.0;

/// Hits below this damage are scaled by [`ARMOR_CHIP_FACTOR`] instead of
/// losing the flat amount.
pub const ARMOR_CHIP_THRESHOLD: f64 = 14.0;

/// Fraction of a sub-threshold hit that counts against an armored pool.
pub const ARMOR_CHIP_FACTOR: f64 = 0.5;

/// Diagnostic carried by results that can never complete.
pub const UNREACHABLE_NOTE: &str = "Missing or zeroed weapon stats.";

/// Magazine size with an explicit no-limit case, so unbounded ammo never
/// reaches the reload arithmetic as a pseudo-numeric value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum AmmoCapacity {
    #[default]
    Unbounded,
    Rounds(f64),
}

impl AmmoCapacity {
    /// Build from a raw table cell. Empty, unparsable, and non-positive
    /// capacities all collapse to [`AmmoCapacity::Unbounded`]: a magazine
    /// of zero rounds never forces a reload, so the cases are equivalent.
    pub fn from_field(raw: &str) -> Self {
        Self::from(raw.trim().parse::<f64>().ok())
    }

    pub fn rounds(&self) -> Option<f64> {
        match self {
            Self::Unbounded => None,
            Self::Rounds(capacity) => Some(*capacity),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl From<Option<f64>> for AmmoCapacity {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(capacity) if capacity.is_finite() && capacity > 0.0 => Self::Rounds(capacity),
            _ => Self::Unbounded,
        }
    }
}

impl From<AmmoCapacity> for Option<f64> {
    fn from(value: AmmoCapacity) -> Self {
        value.rounds()
    }
}

/// Weapon-side inputs to a duel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackerStats {
    pub damage_per_bullet: f64,
    pub bullets_per_shot: f64,
    pub fire_rate: f64,
    pub reload_time: f64,
    pub ammo: AmmoCapacity,
    pub armor_piercing: bool,
}

/// Survivability-side inputs to a duel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenderStats {
    pub health: f64,
    pub shields: f64,
    pub armor: f64,
}

impl DefenderStats {
    /// Health and shields deplete as one pool; armor is handled separately.
    pub fn pool(&self) -> f64 {
        self.health + self.shields
    }
}

/// Outcome of one duel computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TtkResult {
    Kill {
        seconds: f64,
        bullets: u64,
        reloads: u32,
    },
    Unreachable {
        reloads: u32,
        note: &'static str,
    },
}

impl TtkResult {
    fn unreachable() -> Self {
        Self::Unreachable {
            reloads: 0,
            note: UNREACHABLE_NOTE,
        }
    }

    pub fn is_kill(&self) -> bool {
        matches!(self, Self::Kill { .. })
    }

    pub fn seconds(&self) -> Option<f64> {
        match self {
            Self::Kill { seconds, .. } => Some(*seconds),
            Self::Unreachable { .. } => None,
        }
    }

    pub fn bullets(&self) -> Option<u64> {
        match self {
            Self::Kill { bullets, .. } => Some(*bullets),
            Self::Unreachable { .. } => None,
        }
    }

    pub fn reloads(&self) -> u32 {
        match self {
            Self::Kill { reloads, .. } | Self::Unreachable { reloads, .. } => *reloads,
        }
    }

    pub fn note(&self) -> Option<&'static str> {
        match self {
            Self::Kill { .. } => None,
            Self::Unreachable { note, .. } => Some(note),
        }
    }
}

/// Per-bullet damage actually counted against an armored pool.
///
/// Armor-piercing shots pass through untouched. Otherwise hits under
/// [`ARMOR_CHIP_THRESHOLD`] are halved and larger hits lose a flat
/// [`ARMOR_FLAT_ABSORB`].
pub fn armor_mitigation_per_bullet(damage: f64, armor_piercing: bool) -> f64 {
    if armor_piercing {
        return damage;
    }
    if damage < ARMOR_CHIP_THRESHOLD {
        damage * ARMOR_CHIP_FACTOR
    } else {
        damage - ARMOR_FLAT_ABSORB
    }
}

/// Derive the full time-to-kill estimate for one attacker/defender pairing.
///
/// The armor term is a bullets-equivalent approximation
/// (`armor / per-bullet mitigated damage`) folded in before rounding up;
/// it does not model bullet-by-bullet depletion order across shields,
/// health, and armor.
pub fn compute_time_to_kill(
    attacker: &AttackerStats,
    defender: &DefenderStats,
    config: &AbilityConfig,
    active_attacker: &HashSet<String>,
    active_defender: &HashSet<String>,
) -> TtkResult {
    let damage = apply_defender_abilities(
        apply_attacker_abilities(attacker.damage_per_bullet, &config.attacker, active_attacker),
        &config.defender,
        active_defender,
    );
    if damage <= 0.0 || attacker.bullets_per_shot <= 0.0 || attacker.fire_rate <= 0.0 {
        return TtkResult::unreachable();
    }

    // Piercing rounds nullify armor outright, so no bullets-equivalent
    // penalty applies to them.
    let armor_protection = if attacker.armor_piercing {
        0.0
    } else {
        let mitigation = armor_mitigation_per_bullet(damage, false);
        if mitigation > 0.0 {
            defender.armor / mitigation
        } else {
            0.0
        }
    };
    let bullets_til_death = (defender.pool() / damage + armor_protection).ceil();

    let reloads = match attacker.ammo {
        AmmoCapacity::Rounds(capacity) if capacity > 0.0 => {
            let mut reloads = (bullets_til_death / capacity).floor();
            // A kill landing on the last round of a magazine pays for no
            // trailing reload.
            if bullets_til_death % capacity == 0.0 {
                reloads -= 1.0;
            }
            reloads.max(0.0)
        }
        _ => 0.0,
    };

    let reload_time_taken = reloads * attacker.reload_time;
    let shots_til_death = (bullets_til_death / attacker.bullets_per_shot).ceil();
    let seconds_til_death = shots_til_death / attacker.fire_rate + reload_time_taken;

    TtkResult::Kill {
        seconds: seconds_til_death,
        bullets: bullets_til_death as u64,
        reloads: reloads as u32,
    }
}
