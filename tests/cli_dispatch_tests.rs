use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_highnoon")
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("highnoon-{name}-{stamp}.{extension}"))
}

#[test]
fn no_arguments_print_usage() {
    let output = Command::new(bin()).output().expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: highnoon"));
}

#[test]
fn unknown_command_prints_usage() {
    let output = Command::new(bin())
        .arg("frobnicate")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: highnoon"));
}

#[test]
fn duel_command_dispatches_and_emits_json() {
    let output = Command::new(bin())
        .args(["duel", "reinhardt", "reinhardt"])
        .output()
        .expect("duel should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("duel should emit json");
    assert_eq!(payload["attacker"], "Reinhardt");
    assert_eq!(payload["defender"], "Reinhardt");
    assert_eq!(payload["result"]["outcome"], "kill");
    assert_eq!(payload["result"]["bullets"], 3);
    assert_eq!(payload["result"]["reloads"], 0);
}

#[test]
fn duel_command_applies_ability_flags() {
    let output = Command::new(bin())
        .args([
            "duel",
            "Reinhardt",
            "Reinhardt",
            "--attacker-abilities",
            "nano,discord",
        ])
        .output()
        .expect("duel should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("duel should emit json");
    assert_eq!(payload["result"]["bullets"], 2);
}

#[test]
fn duel_command_emits_table_rows_on_request() {
    let output = Command::new(bin())
        .args(["duel", "Cassidy", "Zarya", "--table"])
        .output()
        .expect("duel should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("attacker\tdefender\toutcome\tseconds\tbullets\treloads")
    );
    assert_eq!(lines.next(), Some("Cassidy\tZarya\tkill\t3.000\t6\t0"));
}

#[test]
fn duel_command_returns_usage_without_defender() {
    let output = Command::new(bin())
        .args(["duel", "Reinhardt"])
        .output()
        .expect("duel should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: highnoon duel"));
}

#[test]
fn duel_command_fails_on_unknown_hero() {
    let output = Command::new(bin())
        .args(["duel", "nobody", "Reinhardt"])
        .output()
        .expect("duel should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown attacker 'nobody'"));
}

#[test]
fn matrix_command_ranks_fastest_kills() {
    let output = Command::new(bin())
        .args(["matrix", "--top", "3"])
        .output()
        .expect("matrix should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "header plus the three requested rows");
    assert_eq!(lines[0], "attacker\tdefender\tseconds\tbullets\treloads");
    for row in &lines[1..] {
        assert_eq!(row.split('\t').count(), 5);
    }
}

#[test]
fn matrix_command_writes_full_csv() {
    let path = unique_temp_path("matrix", "csv");

    let output = Command::new(bin())
        .args(["matrix", "--out", path.to_string_lossy().as_ref()])
        .output()
        .expect("matrix should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wrote 1936 matchups"));

    let csv = fs::read_to_string(&path).expect("matrix csv should be written");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "attacker,defender,outcome,seconds,bullets,reloads");
    assert_eq!(lines.len(), 1 + 44 * 44);
    assert!(csv.contains("Cassidy,Zarya,kill,3.000,6,0"));

    let _ = fs::remove_file(path);
}

#[test]
fn roster_command_lists_every_hero() {
    let output = Command::new(bin())
        .arg("roster")
        .output()
        .expect("roster should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1 + 44);
    assert!(stdout.contains("Reinhardt"));
    assert!(stdout.contains("unbounded"));
}

#[test]
fn validate_command_passes_on_shipped_roster() {
    let output = Command::new(bin())
        .arg("validate")
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
}

#[test]
fn validate_command_returns_non_zero_on_invalid_data() {
    let path = unique_temp_path("invalid-roster", "csv");
    fs::write(&path, "role,name\nTank,Stub\n").expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("missing column"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_reports_unreadable_files() {
    let output = Command::new(bin())
        .args(["validate", "/no/such/roster.csv"])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unable to read"));
}
