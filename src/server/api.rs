use std::collections::HashSet;
use std::fmt;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::combat::{
    compute_matchup_matrix, compute_time_to_kill, AbilityConfig, TtkResult, DEFAULT_ABILITIES_PATH,
};
use crate::data::hero::HeroRecord;
use crate::data::roster::{load_roster, DEFAULT_ROSTER_META_PATH, DEFAULT_ROSTER_PATH};

#[derive(Debug, Clone, Deserialize)]
pub struct DuelRequest {
    pub attacker: String,
    pub defender: String,
    #[serde(default)]
    pub attacker_abilities: Vec<String>,
    #[serde(default)]
    pub defender_abilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuelResponse {
    pub status: &'static str,
    pub attacker: HeroRecord,
    pub defender: HeroRecord,
    pub result: TtkResult,
}

#[derive(Debug)]
pub enum DuelError {
    Parse(serde_json::Error),
    Validation(String),
}

impl fmt::Display for DuelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for DuelError {}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "highnoon-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Crate version plus whatever metadata sidecar the roster importer left
/// behind; `roster` is null when no sidecar exists.
pub fn version_payload() -> Result<String, serde_json::Error> {
    let roster_meta: Option<serde_json::Value> = fs::read_to_string(DEFAULT_ROSTER_META_PATH)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok());
    serde_json::to_string_pretty(&serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "roster": roster_meta,
    }))
}

pub fn roster_payload() -> Result<String, serde_json::Error> {
    let roster = load_roster(DEFAULT_ROSTER_PATH);
    serde_json::to_string_pretty(&serde_json::json!({ "heroes": roster.heroes }))
}

pub fn abilities_payload() -> Result<String, serde_json::Error> {
    let config = AbilityConfig::load(DEFAULT_ABILITIES_PATH);
    serde_json::to_string_pretty(&config)
}

pub fn duel_payload(body: &str) -> Result<String, DuelError> {
    let request: DuelRequest = serde_json::from_str(body).map_err(DuelError::Parse)?;
    if request.attacker.trim().is_empty() || request.defender.trim().is_empty() {
        return Err(DuelError::Validation(
            "attacker and defender must both be named".to_string(),
        ));
    }

    let roster = load_roster(DEFAULT_ROSTER_PATH);
    let attacker = roster
        .find(&request.attacker)
        .ok_or_else(|| DuelError::Validation(format!("unknown attacker '{}'", request.attacker)))?
        .clone();
    let defender = roster
        .find(&request.defender)
        .ok_or_else(|| DuelError::Validation(format!("unknown defender '{}'", request.defender)))?
        .clone();

    let config = AbilityConfig::load(DEFAULT_ABILITIES_PATH);
    let active_attacker: HashSet<String> = request.attacker_abilities.iter().cloned().collect();
    let active_defender: HashSet<String> = request.defender_abilities.iter().cloned().collect();
    let result = compute_time_to_kill(
        &attacker.to_attacker_stats(),
        &defender.to_defender_stats(),
        &config,
        &active_attacker,
        &active_defender,
    );

    let response = DuelResponse {
        status: "ok",
        attacker,
        defender,
        result,
    };
    serde_json::to_string_pretty(&response).map_err(DuelError::Parse)
}

pub fn matrix_payload() -> Result<String, serde_json::Error> {
    let roster = load_roster(DEFAULT_ROSTER_PATH);
    let config = AbilityConfig::load(DEFAULT_ABILITIES_PATH);
    let rows = compute_matchup_matrix(&roster, &config);
    serde_json::to_string_pretty(&serde_json::json!({ "matchups": rows }))
}
