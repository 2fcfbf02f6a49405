use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub fn install(verbose: bool) {
    let default = if verbose {
        "blogfeed_cli=debug,blogfeed_client=debug"
    } else {
        "blogfeed_cli=info,blogfeed_client=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
