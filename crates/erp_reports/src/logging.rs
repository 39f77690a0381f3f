use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ERP_REPORTS_LOG_LEVEL";

/// Base level from `-v`/`-q` counts; INFO when neither is given.
pub fn level(verbose: u8, quiet: u8) -> &'static str {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i16::MAX => "trace",
    }
}

/// `ERP_REPORTS_LOG_LEVEL`, then `RUST_LOG`, then the verbosity-derived
/// level for this crate with sqlx kept at warn.
pub fn filter_directive(verbose: u8, quiet: u8, env: Option<String>) -> String {
    env.filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("warn,erp_reports={}", level(verbose, quiet)))
}

pub fn init_logging(verbose: u8, quiet: u8) {
    let env = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    let directive = filter_directive(verbose, quiet, env);
    let filter = EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,erp_reports={}", level(verbose, quiet))));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
    tracing::debug!("log filter: {}", directive);
}
