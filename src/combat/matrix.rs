//! All-pairs matchup sweep over a roster.
//!
//! The sweep is embarrassingly parallel: each pairing is an independent
//! pure computation, so rows are produced with a rayon parallel map and
//! come back attacker-major in roster order.

use std::collections::HashSet;
use std::io::Write;

use rayon::prelude::*;
use serde::Serialize;

use crate::combat::abilities::AbilityConfig;
use crate::combat::engine::{compute_time_to_kill, TtkResult};
use crate::data::roster::Roster;

/// One attacker/defender pairing with its computed outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupRow {
    pub attacker: String,
    pub defender: String,
    pub result: TtkResult,
}

/// Compute every attacker x defender pairing, self-pairs included, with no
/// abilities active.
pub fn compute_matchup_matrix(roster: &Roster, config: &AbilityConfig) -> Vec<MatchupRow> {
    let no_abilities = HashSet::new();
    let pairs: Vec<(usize, usize)> = (0..roster.heroes.len())
        .flat_map(|attacker| (0..roster.heroes.len()).map(move |defender| (attacker, defender)))
        .collect();

    pairs
        .par_iter()
        .map(|&(attacker_index, defender_index)| {
            let attacker = &roster.heroes[attacker_index];
            let defender = &roster.heroes[defender_index];
            MatchupRow {
                attacker: attacker.name.clone(),
                defender: defender.name.clone(),
                result: compute_time_to_kill(
                    &attacker.to_attacker_stats(),
                    &defender.to_defender_stats(),
                    config,
                    &no_abilities,
                    &no_abilities,
                ),
            }
        })
        .collect()
}

/// Write rows as CSV with the columns
/// `attacker,defender,outcome,seconds,bullets,reloads`. Seconds carry
/// three decimals; unreachable rows leave seconds and bullets blank.
pub fn write_matrix_csv<W: Write>(rows: &[MatchupRow], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["attacker", "defender", "outcome", "seconds", "bullets", "reloads"])?;
    for row in rows {
        match row.result {
            TtkResult::Kill {
                seconds,
                bullets,
                reloads,
            } => {
                let seconds = format!("{seconds:.3}");
                let bullets = bullets.to_string();
                let reloads = reloads.to_string();
                out.write_record([
                    row.attacker.as_str(),
                    row.defender.as_str(),
                    "kill",
                    seconds.as_str(),
                    bullets.as_str(),
                    reloads.as_str(),
                ])?;
            }
            TtkResult::Unreachable { reloads, .. } => {
                let reloads = reloads.to_string();
                out.write_record([
                    row.attacker.as_str(),
                    row.defender.as_str(),
                    "unreachable",
                    "",
                    "",
                    reloads.as_str(),
                ])?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// The quickest kill rows, ascending by seconds. Name order breaks ties so
/// the ranking is stable across runs.
pub fn fastest_kills(rows: &[MatchupRow], limit: usize) -> Vec<&MatchupRow> {
    let mut kills: Vec<&MatchupRow> = rows.iter().filter(|row| row.result.is_kill()).collect();
    kills.sort_by(|a, b| {
        let left = a.result.seconds().unwrap_or(f64::INFINITY);
        let right = b.result.seconds().unwrap_or(f64::INFINITY);
        left.total_cmp(&right)
            .then_with(|| a.attacker.cmp(&b.attacker))
            .then_with(|| a.defender.cmp(&b.defender))
    });
    kills.truncate(limit);
    kills
}
