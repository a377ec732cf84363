use highnoon::combat::AmmoCapacity;
use highnoon::data::roster::{load_roster, parse_roster, EMBEDDED_ROSTER_CSV};
use highnoon::data::validate::{validate_roster_text, ValidationSeverity};

#[test]
fn embedded_roster_has_the_full_cast() {
    let roster = parse_roster(EMBEDDED_ROSTER_CSV);
    assert_eq!(roster.len(), 44);

    let reinhardt = roster.find("Reinhardt").expect("Reinhardt should exist");
    assert_eq!(reinhardt.role, "Tank");
    assert_eq!(reinhardt.damage_per_bullet, 100.0);
    assert_eq!(reinhardt.fire_rate, 1.04);
    assert!(reinhardt.ammo.is_unbounded());
    assert!(reinhardt.armor_piercing);
    assert_eq!(reinhardt.armor, 300.0);

    let mauga = roster.find("Mauga").expect("Mauga should exist");
    assert_eq!(mauga.ammo, AmmoCapacity::Rounds(300.0));
    assert_eq!(mauga.reload_time, 2.2);
    assert_eq!(mauga.health, 425.0);
}

#[test]
fn lookup_tolerates_case_and_spacing() {
    let roster = parse_roster(EMBEDDED_ROSTER_CSV);
    assert!(roster.find("junker queen").is_some());
    assert!(roster.find("JUNKER_QUEEN").is_some());
    assert!(roster.find("soldier: 76").is_some());
    assert!(roster.find("wrecking   ball").is_some());
    assert!(roster.find("no such hero").is_none());
}

#[test]
fn missing_file_falls_back_to_embedded_table() {
    let roster = load_roster("/no/such/roster.csv");
    assert_eq!(roster.len(), 44);
    assert!(roster.find("Tracer").is_some());
}

#[test]
fn empty_numeric_cells_take_per_field_defaults() {
    let roster = parse_roster(
        "role,name,damage_per_bullet,bullets_per_shot,fire_rate,reload_time,ammo,armor_piercing,health,shields,armor\n\
         Tank,Blank,,,,,,,,,\n",
    );
    assert_eq!(roster.len(), 1);
    let hero = &roster.heroes[0];
    assert_eq!(hero.damage_per_bullet, 0.0);
    assert_eq!(hero.bullets_per_shot, 1.0);
    assert_eq!(hero.fire_rate, 0.0);
    assert_eq!(hero.reload_time, 0.0);
    assert!(hero.ammo.is_unbounded());
    assert!(!hero.armor_piercing);
    assert_eq!(hero.health, 0.0);
}

#[test]
fn explicit_zero_is_kept_not_defaulted() {
    let roster = parse_roster(
        "role,name,damage_per_bullet,bullets_per_shot,fire_rate,reload_time,ammo,armor_piercing,health,shields,armor\n\
         Tank,Zeroed,10,0,1,0,,true,100,0,0\n",
    );
    // bullets_per_shot stays 0 (degenerate weapon), not the absent-field 1.
    assert_eq!(roster.heroes[0].bullets_per_shot, 0.0);
}

#[test]
fn negative_cells_clamp_to_zero() {
    let roster = parse_roster(
        "role,name,damage_per_bullet,bullets_per_shot,fire_rate,reload_time,ammo,armor_piercing,health,shields,armor\n\
         Tank,Negative,-40,1,-2,1,,false,-100,0,0\n",
    );
    let hero = &roster.heroes[0];
    assert_eq!(hero.damage_per_bullet, 0.0);
    assert_eq!(hero.fire_rate, 0.0);
    assert_eq!(hero.health, 0.0);
}

#[test]
fn rows_without_names_are_skipped() {
    let roster = parse_roster(
        "role,name,damage_per_bullet,bullets_per_shot,fire_rate,reload_time,ammo,armor_piercing,health,shields,armor\n\
         Tank,,10,1,1,0,,true,100,0,0\n\
         Tank,Kept,10,1,1,0,,true,100,0,0\n",
    );
    assert_eq!(roster.len(), 1);
    assert_eq!(roster.heroes[0].name, "Kept");
}

#[test]
fn column_order_and_header_case_do_not_matter() {
    let roster = parse_roster(
        "Name,Role,Health,Shields,Armor,Damage_Per_Bullet,Bullets_Per_Shot,Fire_Rate,Reload_Time,Ammo,Armor_Piercing\n\
         Shuffled,Tank,100,50,25,12,2,3,1.5,24,TRUE\n",
    );
    assert_eq!(roster.len(), 1);
    let hero = &roster.heroes[0];
    assert_eq!(hero.name, "Shuffled");
    assert_eq!(hero.role, "Tank");
    assert_eq!(hero.health, 100.0);
    assert_eq!(hero.damage_per_bullet, 12.0);
    assert_eq!(hero.ammo, AmmoCapacity::Rounds(24.0));
    assert!(hero.armor_piercing);
}

#[test]
fn embedded_roster_validates_clean() {
    let report = validate_roster_text(EMBEDDED_ROSTER_CSV);
    assert!(
        report.diagnostics.is_empty(),
        "expected no diagnostics, got {:?}",
        report.diagnostics
    );
    assert!(!report.has_errors());
}

#[test]
fn validation_flags_missing_columns_as_errors() {
    let report = validate_roster_text("role,name,damage_per_bullet\nTank,Stub,10\n");
    assert!(report.has_errors());
    assert!(report
        .diagnostics
        .iter()
        .any(|diag| diag.severity == ValidationSeverity::Error
            && diag.message.contains("missing column 'fire_rate'")));
}

#[test]
fn validation_flags_coerced_cells_as_warnings() {
    let report = validate_roster_text(
        "role,name,damage_per_bullet,bullets_per_shot,fire_rate,reload_time,ammo,armor_piercing,health,shields,armor\n\
         Tank,Sloppy,lots,1,-3,0,some,maybe,100,0,0\n",
    );
    assert!(!report.has_errors(), "cell coercions are not fatal");

    let messages: Vec<&str> = report
        .diagnostics
        .iter()
        .map(|diag| diag.message.as_str())
        .collect();
    assert!(messages
        .iter()
        .any(|m| m.contains("unparsable damage_per_bullet")));
    assert!(messages.iter().any(|m| m.contains("negative fire_rate")));
    assert!(messages.iter().any(|m| m.contains("ammo 'some'")));
    assert!(messages
        .iter()
        .any(|m| m.contains("armor_piercing 'maybe'")));
}

#[test]
fn validation_flags_non_finite_cells_as_warnings() {
    let report = validate_roster_text(
        "role,name,damage_per_bullet,bullets_per_shot,fire_rate,reload_time,ammo,armor_piercing,health,shields,armor\n\
         Tank,Runaway,inf,1,nan,0,,true,-inf,0,0\n",
    );
    assert!(!report.has_errors());

    let messages: Vec<&str> = report
        .diagnostics
        .iter()
        .map(|diag| diag.message.as_str())
        .collect();
    assert!(messages
        .iter()
        .any(|m| m.contains("non-finite damage_per_bullet 'inf'")));
    assert!(messages
        .iter()
        .any(|m| m.contains("non-finite fire_rate 'nan'")));
    assert!(messages
        .iter()
        .any(|m| m.contains("non-finite health '-inf'")));
    assert!(
        !messages.iter().any(|m| m.contains("negative health")),
        "loading defaults a non-finite cell instead of clamping it"
    );
}

#[test]
fn validation_flags_duplicate_names_as_errors() {
    let report = validate_roster_text(
        "role,name,damage_per_bullet,bullets_per_shot,fire_rate,reload_time,ammo,armor_piercing,health,shields,armor\n\
         Tank,Echo Twin,10,1,1,0,,true,100,0,0\n\
         Tank,echo_twin,12,1,1,0,,true,100,0,0\n",
    );
    assert!(report.has_errors());
    assert!(report
        .diagnostics
        .iter()
        .any(|diag| diag.message.contains("duplicate name")));
}

#[test]
fn validation_warns_on_heroes_that_cannot_kill() {
    let report = validate_roster_text(
        "role,name,damage_per_bullet,bullets_per_shot,fire_rate,reload_time,ammo,armor_piercing,health,shields,armor\n\
         Support,Pacifist,0,1,5,0,,false,200,0,0\n",
    );
    assert!(!report.has_errors());
    assert!(report
        .diagnostics
        .iter()
        .any(|diag| diag.severity == ValidationSeverity::Warning
            && diag.context.contains("Pacifist")
            && diag.message.contains("cannot complete a kill")));
}

#[test]
fn validation_reports_empty_roster_as_error() {
    let report = validate_roster_text(
        "role,name,damage_per_bullet,bullets_per_shot,fire_rate,reload_time,ammo,armor_piercing,health,shields,armor\n",
    );
    assert!(report.has_errors());
    assert!(report
        .diagnostics
        .iter()
        .any(|diag| diag.message.contains("no heroes parsed")));
}
