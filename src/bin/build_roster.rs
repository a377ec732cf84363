//! Assemble the canonical hero table from normalized part files.
//! Reads data/import/hero-health.csv (role, name, health, armor),
//! data/import/hero-shields.csv (name, shields), and
//! data/import/hero-weapons.csv (name, damage_per_bullet, bullets_per_shot,
//! fire_rate, reload_time, ammo, armor_piercing), then writes
//! data/hero-details.csv plus a data/roster-meta.json sidecar.
//! Heroes without a weapons row are skipped; shields default to 0.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use highnoon::data::roster::{normalize_lookup, EXPECTED_HEADER};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let import_dir = Path::new(&manifest_dir).join("data/import");
    let output_path = Path::new(&manifest_dir).join("data/hero-details.csv");
    let meta_path = Path::new(&manifest_dir).join("data/roster-meta.json");

    let health_rows = read_rows(&import_dir.join("hero-health.csv"))?;
    let shield_rows = read_rows(&import_dir.join("hero-shields.csv"))?;
    let weapon_rows = read_rows(&import_dir.join("hero-weapons.csv"))?;

    let shields_by_hero: HashMap<String, f64> = shield_rows
        .iter()
        .filter_map(|row| {
            let name = row.get("name")?;
            Some((normalize_lookup(name), parse_cell(row.get("shields")?)?))
        })
        .collect();
    let weapons_by_hero: HashMap<String, &HashMap<String, String>> = weapon_rows
        .iter()
        .filter_map(|row| Some((normalize_lookup(row.get("name")?), row)))
        .collect();

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record(EXPECTED_HEADER)?;

    let mut hero_count = 0_usize;
    let mut skipped = 0_usize;
    for row in &health_rows {
        let name = row.get("name").map(String::as_str).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let Some(weapon) = weapons_by_hero.get(&normalize_lookup(name)) else {
            skipped += 1;
            continue;
        };

        let cell = |source: &HashMap<String, String>, column: &str| -> String {
            source.get(column).cloned().unwrap_or_default()
        };
        let numeric = |source: &HashMap<String, String>, column: &str| -> String {
            parse_cell(&cell(source, column))
                .map(format_stat)
                .unwrap_or_default()
        };
        let piercing = cell(weapon, "armor_piercing");
        let shields = shields_by_hero
            .get(&normalize_lookup(name))
            .copied()
            .unwrap_or(0.0);

        writer.write_record([
            cell(row, "role"),
            name.to_string(),
            numeric(weapon, "damage_per_bullet"),
            numeric(weapon, "bullets_per_shot"),
            numeric(weapon, "fire_rate"),
            numeric(weapon, "reload_time"),
            numeric(weapon, "ammo"),
            if piercing.trim().eq_ignore_ascii_case("true") {
                "True".to_string()
            } else {
                "False".to_string()
            },
            numeric(row, "health"),
            format_stat(shields),
            numeric(row, "armor"),
        ])?;
        hero_count += 1;
    }

    writer.flush()?;

    let meta = serde_json::json!({
        "generated_at": chrono::Utc::now().format("%Y-%m-%d").to_string(),
        "hero_count": hero_count,
        "sources": ["hero-health.csv", "hero-shields.csv", "hero-weapons.csv"],
    });
    fs::write(&meta_path, serde_json::to_string_pretty(&meta)?)?;

    println!(
        "Wrote {} heroes to {} ({} skipped without weapon data)",
        hero_count,
        output_path.display(),
        skipped
    );
    Ok(())
}

/// Read a part file into header-keyed rows. Headers are lowercased so the
/// part files can use any casing.
fn read_rows(path: &Path) -> Result<Vec<HashMap<String, String>>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path).map_err(|e| {
        format!(
            "Read {}: {}. Create data/import/ with hero-health.csv, hero-shields.csv, and hero-weapons.csv",
            path.display(),
            e
        )
    })?;

    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            row.insert(
                header.clone(),
                record.get(index).unwrap_or("").trim().to_string(),
            );
        }
        rows.push(row);
    }
    Ok(rows)
}

fn parse_cell(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Format a stat the way the table is kept by hand: integers without a
/// decimal point, everything else trimmed to at most three decimals.
fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.3}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
