use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogFormat;

pub(crate) fn init(verbose: bool, format: LogFormat) {
    let default_filter = if verbose {
        "servease=debug,servease_core=debug,servease_provider_zippopotam=debug,info"
    } else {
        "servease=info,servease_core=info,servease_provider_zippopotam=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new(default_filter));

    // stdout carries the response document only.
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init(),
    }
}
