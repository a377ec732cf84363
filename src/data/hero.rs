//! Hero records: one row of the hero table, with weapon and survivability
//! stats split out for the duel math.

use serde::{Deserialize, Serialize};

use crate::combat::{AmmoCapacity, AttackerStats, DefenderStats};

/// One row of the canonical hero table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroRecord {
    pub role: String,
    pub name: String,
    pub damage_per_bullet: f64,
    pub bullets_per_shot: f64,
    pub fire_rate: f64,
    pub reload_time: f64,
    pub ammo: AmmoCapacity,
    pub armor_piercing: bool,
    pub health: f64,
    pub shields: f64,
    pub armor: f64,
}

impl HeroRecord {
    /// Weapon-side view used when this hero attacks.
    pub fn to_attacker_stats(&self) -> AttackerStats {
        AttackerStats {
            damage_per_bullet: self.damage_per_bullet,
            bullets_per_shot: self.bullets_per_shot,
            fire_rate: self.fire_rate,
            reload_time: self.reload_time,
            ammo: self.ammo,
            armor_piercing: self.armor_piercing,
        }
    }

    /// Survivability-side view used when this hero defends.
    pub fn to_defender_stats(&self) -> DefenderStats {
        DefenderStats {
            health: self.health,
            shields: self.shields,
            armor: self.armor,
        }
    }

    /// Health, shields, and armor summed, as shown on the hero cards.
    pub fn durability(&self) -> f64 {
        self.health + self.shields + self.armor
    }
}

/// Parse a numeric cell. Empty and unparsable cells take `default`; parsed
/// negatives clamp to zero so no stat goes negative downstream.
pub fn parse_stat(raw: &str, default: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value.max(0.0),
        _ => default,
    }
}

/// The armor-piercing column compares case-insensitively against the
/// literal `true`; anything else, including an empty cell, is false.
pub fn parse_piercing(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stat_defaults_empty_and_garbage() {
        assert_eq!(parse_stat("", 0.0), 0.0);
        assert_eq!(parse_stat("  ", 1.0), 1.0);
        assert_eq!(parse_stat("n/a", 0.0), 0.0);
        assert_eq!(parse_stat("6.67", 0.0), 6.67);
    }

    #[test]
    fn parse_stat_clamps_negatives_but_keeps_explicit_zero() {
        assert_eq!(parse_stat("-3", 1.0), 0.0);
        assert_eq!(parse_stat("0", 1.0), 0.0);
    }

    #[test]
    fn parse_stat_defaults_non_finite_values() {
        assert_eq!(parse_stat("inf", 1.0), 1.0);
        assert_eq!(parse_stat("-inf", 2.0), 2.0);
        assert_eq!(parse_stat("nan", 0.5), 0.5);
    }

    #[test]
    fn parse_piercing_matches_literal_true_only() {
        assert!(parse_piercing("true"));
        assert!(parse_piercing("TRUE"));
        assert!(parse_piercing(" True "));
        assert!(!parse_piercing("yes"));
        assert!(!parse_piercing("1"));
        assert!(!parse_piercing(""));
    }
}
