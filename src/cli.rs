use std::collections::HashSet;
use std::env;
use std::fs;

use crate::combat::{
    compute_matchup_matrix, compute_time_to_kill, fastest_kills, write_matrix_csv, AbilityConfig,
    TtkResult, DEFAULT_ABILITIES_PATH,
};
use crate::data::roster::{load_roster, DEFAULT_ROSTER_PATH};
use crate::data::validate::validate_roster_file;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Duel,
    Matrix,
    Roster,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("duel") => Some(Command::Duel),
        Some("matrix") => Some(Command::Matrix),
        Some("roster") => Some(Command::Roster),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Duel) => handle_duel(args),
        Some(Command::Matrix) => handle_matrix(args),
        Some(Command::Roster) => handle_roster(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: highnoon <serve|duel|matrix|roster|validate>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("HIGHNOON_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_duel(args: &[String]) -> i32 {
    let mut attacker_name: Option<&str> = None;
    let mut defender_name: Option<&str> = None;
    let mut attacker_abilities = HashSet::new();
    let mut defender_abilities = HashSet::new();
    let mut as_table = false;

    let mut index = 2;
    while index < args.len() {
        match args[index].as_str() {
            "--table" => as_table = true,
            "--attacker-abilities" => {
                attacker_abilities = parse_ability_list(args.get(index + 1));
                index += 1;
            }
            "--defender-abilities" => {
                defender_abilities = parse_ability_list(args.get(index + 1));
                index += 1;
            }
            value if attacker_name.is_none() => attacker_name = Some(value),
            value if defender_name.is_none() => defender_name = Some(value),
            value => {
                eprintln!("unexpected argument '{value}'");
                return 2;
            }
        }
        index += 1;
    }

    let (Some(attacker_name), Some(defender_name)) = (attacker_name, defender_name) else {
        eprintln!(
            "usage: highnoon duel <attacker> <defender> \
             [--attacker-abilities a,b] [--defender-abilities c] [--table]"
        );
        return 2;
    };

    let roster = load_roster(DEFAULT_ROSTER_PATH);
    let Some(attacker) = roster.find(attacker_name) else {
        eprintln!("unknown attacker '{attacker_name}'");
        return 1;
    };
    let Some(defender) = roster.find(defender_name) else {
        eprintln!("unknown defender '{defender_name}'");
        return 1;
    };

    let config = AbilityConfig::load(DEFAULT_ABILITIES_PATH);
    let result = compute_time_to_kill(
        &attacker.to_attacker_stats(),
        &defender.to_defender_stats(),
        &config,
        &attacker_abilities,
        &defender_abilities,
    );

    if as_table {
        println!("attacker\tdefender\toutcome\tseconds\tbullets\treloads");
        match result {
            TtkResult::Kill {
                seconds,
                bullets,
                reloads,
            } => println!(
                "{}\t{}\tkill\t{seconds:.3}\t{bullets}\t{reloads}",
                attacker.name, defender.name
            ),
            TtkResult::Unreachable { reloads, note } => {
                println!(
                    "{}\t{}\tunreachable\t-\t-\t{reloads}",
                    attacker.name, defender.name
                );
                eprintln!("note: {note}");
            }
        }
    } else {
        let payload = serde_json::json!({
            "attacker": attacker.name,
            "defender": defender.name,
            "result": result,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize duel result: {err}");
                return 1;
            }
        }
    }

    0
}

fn handle_matrix(args: &[String]) -> i32 {
    let out_path = value_of_flag(args, "--out");
    let top = parse_usize_flag(value_of_flag(args, "--top"), "top", 10);

    let roster = load_roster(DEFAULT_ROSTER_PATH);
    let config = AbilityConfig::load(DEFAULT_ABILITIES_PATH);
    let rows = compute_matchup_matrix(&roster, &config);

    if let Some(path) = out_path {
        let file = match fs::File::create(path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("cannot create '{path}': {err}");
                return 1;
            }
        };
        if let Err(err) = write_matrix_csv(&rows, file) {
            eprintln!("failed to write matchup csv: {err}");
            return 1;
        }
        println!("wrote {} matchups to {path}", rows.len());
        return 0;
    }

    println!("attacker\tdefender\tseconds\tbullets\treloads");
    for row in fastest_kills(&rows, top) {
        if let TtkResult::Kill {
            seconds,
            bullets,
            reloads,
        } = row.result
        {
            println!(
                "{}\t{}\t{seconds:.3}\t{bullets}\t{reloads}",
                row.attacker, row.defender
            );
        }
    }

    0
}

fn handle_roster(args: &[String]) -> i32 {
    let path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_ROSTER_PATH);
    let roster = load_roster(path);
    if roster.is_empty() {
        eprintln!("no heroes loaded from '{path}'");
        return 1;
    }

    println!("name\trole\tdamage\tbullets_per_shot\tfire_rate\tammo\tdurability");
    for hero in &roster.heroes {
        let ammo = match hero.ammo.rounds() {
            Some(rounds) => rounds.to_string(),
            None => "unbounded".to_string(),
        };
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            hero.name,
            hero.role,
            hero.damage_per_bullet,
            hero.bullets_per_shot,
            hero.fire_rate,
            ammo,
            hero.durability()
        );
    }

    0
}

fn handle_validate(args: &[String]) -> i32 {
    let path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_ROSTER_PATH);

    match validate_roster_file(path) {
        Ok(report) => {
            for diagnostic in &report.diagnostics {
                println!(
                    "- [{}] {}: {}",
                    diagnostic.severity, diagnostic.context, diagnostic.message
                );
            }
            if report.has_errors() {
                eprintln!("validation failed: {path}");
                1
            } else {
                println!("validation passed: {path}");
                0
            }
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn value_of_flag<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

fn parse_usize_flag(raw: Option<&str>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_ability_list(raw: Option<&String>) -> HashSet<String> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
