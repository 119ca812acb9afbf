use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset. Quiet unless `--verbose`, and then
/// only this crate's events; reqwest and hyper stay silent.
fn default_directives(verbose: bool) -> &'static str {
    if verbose { "fxpair=debug" } else { "off" }
}

fn session_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Events go to stderr so they never mix with
/// the converter output on stdout.
pub fn init_logging(verbose: bool) {
    let diagnostics = fmt::layer()
        .pretty()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(session_filter(verbose))
        .with(diagnostics)
        .init();
}
