use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("quantum_tutor=debug,tower_http=debug,info")
        } else {
            EnvFilter::new("quantum_tutor=info,tower_http=info,warn")
        }
    })
}

/// Compact lines for terminals, or one JSON object per line for container
/// log collectors.
fn fmt_layer<S>(json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        layer.json().boxed()
    } else {
        layer.compact().boxed()
    }
}

pub fn init_logger(verbose: bool, json: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(fmt_layer(json))
        .init();
}
