use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Output goes to stderr so stdout only carries responses.
///
/// The filter comes from `RUST_LOG` and falls back to `info`.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = installed {
        tracing::debug!(error = %err, "Tracing subscriber already installed");
    }
}
