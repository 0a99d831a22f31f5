use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Human-readable output is suppressed when `LOCMEMO_QUIET` is set
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| quiet_from_env(std::env::var("LOCMEMO_QUIET").ok().as_deref()))
}

/// Suppress human output regardless of the environment (`--quiet`, `--json`).
/// Only effective before the first `is_quiet` call.
pub fn force_quiet() {
    let _ = QUIET.set(true);
}

fn quiet_from_env(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
