//! Roster dataset checks with severity-tagged diagnostics.
//!
//! The loader itself never rejects a file (bad cells fall to defaults),
//! so this module is where silent defaulting becomes visible: it reports
//! the cells that will be coerced, plus roster-level problems such as
//! duplicate names.

use std::collections::HashSet;
use std::fmt;
use std::fs;

use crate::combat::{compute_time_to_kill, AbilityConfig, AmmoCapacity, DefenderStats};
use crate::data::roster::{normalize_lookup, parse_roster, Roster, EXPECTED_HEADER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Columns whose cells must parse as non-negative numbers to be taken
/// at face value.
const NUMERIC_COLUMNS: [&str; 7] = [
    "damage_per_bullet",
    "bullets_per_shot",
    "fire_rate",
    "reload_time",
    "health",
    "shields",
    "armor",
];

/// Validate a roster file on disk. The outer error covers an unreadable
/// file; everything else lands in the report.
pub fn validate_roster_file(path: &str) -> Result<ValidationReport, String> {
    let raw = fs::read_to_string(path).map_err(|err| format!("unable to read '{path}': {err}"))?;
    Ok(validate_roster_text(&raw))
}

/// Validate raw roster CSV text: header shape, per-cell coercions, then
/// whole-roster checks on the parsed result.
pub fn validate_roster_text(text: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(|h| h.trim().to_lowercase()).collect(),
        Err(err) => {
            report.push(
                ValidationSeverity::Error,
                "header",
                format!("unreadable header row: {err}"),
            );
            return report;
        }
    };

    for expected in EXPECTED_HEADER {
        if !headers.iter().any(|header| header == expected) {
            report.push(
                ValidationSeverity::Error,
                "header",
                format!("missing column '{expected}'"),
            );
        }
    }
    for header in &headers {
        if !EXPECTED_HEADER.contains(&header.as_str()) {
            report.push(
                ValidationSeverity::Warning,
                "header",
                format!("unrecognized column '{header}'"),
            );
        }
    }

    let column = |name: &str| headers.iter().position(|header| header == name);
    let numeric_columns: Vec<(&str, Option<usize>)> = NUMERIC_COLUMNS
        .iter()
        .map(|&name| (name, column(name)))
        .collect();
    let name_column = column("name");
    let ammo_column = column("ammo");
    let piercing_column = column("armor_piercing");

    for (row_index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                report.push(
                    ValidationSeverity::Warning,
                    format!("row[{row_index}]"),
                    format!("unreadable row: {err}"),
                );
                continue;
            }
        };

        let row_name = name_column
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim();
        if row_name.is_empty() {
            report.push(
                ValidationSeverity::Warning,
                format!("row[{row_index}]"),
                "missing hero name, row is skipped",
            );
            continue;
        }
        let context = format!("row[{row_index}] '{row_name}'");

        for (column_name, index) in &numeric_columns {
            let raw = index.and_then(|i| record.get(i)).unwrap_or("").trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<f64>() {
                // Non-finite before negative: parsing defaults `-inf`
                // rather than clamping it.
                Ok(value) if !value.is_finite() => report.push(
                    ValidationSeverity::Warning,
                    context.clone(),
                    format!("non-finite {column_name} '{raw}' falls back to its default"),
                ),
                Ok(value) if value < 0.0 => report.push(
                    ValidationSeverity::Warning,
                    context.clone(),
                    format!("negative {column_name} '{raw}' clamps to 0"),
                ),
                Ok(_) => {}
                Err(_) => report.push(
                    ValidationSeverity::Warning,
                    context.clone(),
                    format!("unparsable {column_name} '{raw}' falls back to its default"),
                ),
            }
        }

        let ammo = ammo_column.and_then(|i| record.get(i)).unwrap_or("").trim();
        if !ammo.is_empty() && AmmoCapacity::from_field(ammo).is_unbounded() {
            report.push(
                ValidationSeverity::Info,
                context.clone(),
                format!("ammo '{ammo}' is treated as unbounded"),
            );
        }

        let piercing = piercing_column
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim();
        if !piercing.is_empty()
            && !piercing.eq_ignore_ascii_case("true")
            && !piercing.eq_ignore_ascii_case("false")
        {
            report.push(
                ValidationSeverity::Warning,
                context,
                format!("armor_piercing '{piercing}' is not 'true' or 'false', treated as false"),
            );
        }
    }

    validate_roster(&parse_roster(text), &mut report);
    report
}

/// Checks on a parsed roster as a whole.
pub fn validate_roster(roster: &Roster, report: &mut ValidationReport) {
    if roster.is_empty() {
        report.push(ValidationSeverity::Error, "roster", "no heroes parsed");
        return;
    }

    let mut seen = HashSet::new();
    for hero in &roster.heroes {
        if !seen.insert(normalize_lookup(&hero.name)) {
            report.push(
                ValidationSeverity::Error,
                format!("hero '{}'", hero.name),
                "duplicate name after normalization",
            );
        }
    }

    // Probe each hero's weapon against a token defender so degenerate
    // stats are judged by the same rules the duel math applies.
    let config = AbilityConfig::default();
    let no_abilities = HashSet::new();
    let probe = DefenderStats {
        health: 1.0,
        shields: 0.0,
        armor: 0.0,
    };
    for hero in &roster.heroes {
        let result = compute_time_to_kill(
            &hero.to_attacker_stats(),
            &probe,
            &config,
            &no_abilities,
            &no_abilities,
        );
        if !result.is_kill() {
            report.push(
                ValidationSeverity::Warning,
                format!("hero '{}'", hero.name),
                "weapon cannot complete a kill (zero damage, bullets per shot, or fire rate)",
            );
        }
        if hero.durability() <= 0.0 {
            report.push(
                ValidationSeverity::Info,
                format!("hero '{}'", hero.name),
                "zero durability, falls in zero bullets",
            );
        }
    }
}
