use tracing_subscriber::EnvFilter;

// Client events at info; HTTP stack internals (hyper, reqwest) only when they warn.
const DEFAULT_FILTER: &str = "warn,lookbook_client=info,lookbook=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr);

    if matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json")) {
        builder.json().with_current_span(true).init();
    } else {
        builder.compact().init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}
