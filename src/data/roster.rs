//! Roster loading: the canonical hero table from disk with a compiled-in
//! fallback copy, plus normalized name lookup. Loading never fails; a
//! missing or unreadable file falls back to the embedded table so the
//! calculator always has heroes to offer.

use std::fs;

use crate::combat::AmmoCapacity;
use crate::data::hero::{parse_piercing, parse_stat, HeroRecord};

/// Canonical on-disk location of the hero table.
pub const DEFAULT_ROSTER_PATH: &str = "data/hero-details.csv";

/// Metadata sidecar written by the `build_roster` importer.
pub const DEFAULT_ROSTER_META_PATH: &str = "data/roster-meta.json";

/// Compiled-in copy of the hero table, used when the file cannot be read.
pub const EMBEDDED_ROSTER_CSV: &str = include_str!("../../data/hero-details.csv");

/// Canonical column set of the hero table, in order.
pub const EXPECTED_HEADER: [&str; 11] = [
    "role",
    "name",
    "damage_per_bullet",
    "bullets_per_shot",
    "fire_rate",
    "reload_time",
    "ammo",
    "armor_piercing",
    "health",
    "shields",
    "armor",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub heroes: Vec<HeroRecord>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    /// Resolve a hero by name, tolerant of case and spacing differences.
    pub fn find(&self, name: &str) -> Option<&HeroRecord> {
        let wanted = normalize_lookup(name);
        self.heroes
            .iter()
            .find(|hero| normalize_lookup(&hero.name) == wanted)
    }
}

/// Normalize a name for lookup: lowercase with runs of whitespace and
/// underscores collapsed to single underscores.
pub fn normalize_lookup(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Read the roster from `path`, falling back to the embedded table when the
/// file is missing, unreadable, or blank.
pub fn load_roster(path: &str) -> Roster {
    match fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => parse_roster(&text),
        _ => parse_roster(EMBEDDED_ROSTER_CSV),
    }
}

/// Column positions resolved from a header row, so column order and casing
/// in the file do not matter.
#[derive(Debug, Clone, Copy, Default)]
struct RosterColumns {
    role: Option<usize>,
    name: Option<usize>,
    damage_per_bullet: Option<usize>,
    bullets_per_shot: Option<usize>,
    fire_rate: Option<usize>,
    reload_time: Option<usize>,
    ammo: Option<usize>,
    armor_piercing: Option<usize>,
    health: Option<usize>,
    shields: Option<usize>,
    armor: Option<usize>,
}

impl RosterColumns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(wanted))
        };
        Self {
            role: find("role"),
            name: find("name"),
            damage_per_bullet: find("damage_per_bullet"),
            bullets_per_shot: find("bullets_per_shot"),
            fire_rate: find("fire_rate"),
            reload_time: find("reload_time"),
            ammo: find("ammo"),
            armor_piercing: find("armor_piercing"),
            health: find("health"),
            shields: find("shields"),
            armor: find("armor"),
        }
    }
}

/// Parse roster CSV text. Per-cell problems never fail the parse: numeric
/// cells fall to their defaults (1 for bullets_per_shot, 0 otherwise) and
/// the piercing flag falls to false. Rows without a name are skipped.
pub fn parse_roster(text: &str) -> Roster {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => RosterColumns::from_headers(headers),
        Err(_) => return Roster::default(),
    };

    let mut heroes = Vec::new();
    for record in reader.records().flatten() {
        let cell =
            |index: Option<usize>| -> &str { index.and_then(|i| record.get(i)).unwrap_or("") };

        let name = cell(columns.name).trim().to_string();
        if name.is_empty() {
            continue;
        }
        heroes.push(HeroRecord {
            role: cell(columns.role).trim().to_string(),
            name,
            damage_per_bullet: parse_stat(cell(columns.damage_per_bullet), 0.0),
            bullets_per_shot: parse_stat(cell(columns.bullets_per_shot), 1.0),
            fire_rate: parse_stat(cell(columns.fire_rate), 0.0),
            reload_time: parse_stat(cell(columns.reload_time), 0.0),
            ammo: AmmoCapacity::from_field(cell(columns.ammo)),
            armor_piercing: parse_piercing(cell(columns.armor_piercing)),
            health: parse_stat(cell(columns.health), 0.0),
            shields: parse_stat(cell(columns.shields), 0.0),
            armor: parse_stat(cell(columns.armor), 0.0),
        });
    }
    Roster { heroes }
}
