pub mod hero;
pub mod roster;
pub mod validate;

pub use hero::HeroRecord;
pub use roster::{
    load_roster, normalize_lookup, parse_roster, Roster, DEFAULT_ROSTER_META_PATH,
    DEFAULT_ROSTER_PATH, EMBEDDED_ROSTER_CSV, EXPECTED_HEADER,
};
pub use validate::{
    validate_roster_file, validate_roster_text, ValidationDiagnostic, ValidationReport,
    ValidationSeverity,
};
