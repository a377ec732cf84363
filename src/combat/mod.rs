pub mod abilities;
pub mod engine;
pub mod matrix;

pub use abilities::{
    apply_attacker_abilities, apply_defender_abilities, AbilityConfig, AbilityStage,
    AttackerAbility, DefenderAbility, DEFAULT_ABILITIES_PATH,
};
pub use engine::{
    armor_mitigation_per_bullet, compute_time_to_kill, AmmoCapacity, AttackerStats, DefenderStats,
    TtkResult, ARMOR_CHIP_FACTOR, ARMOR_CHIP_THRESHOLD, ARMOR_FLAT_ABSORB, UNREACHABLE_NOTE,
};
pub use matrix::{compute_matchup_matrix, fastest_kills, write_matrix_csv, MatchupRow};
