use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber, `filter` is an `EnvFilter` directive such as `info` or
/// `ndef_decode=debug`
///
/// Later calls leave the first subscriber in place
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|error| {
        eprintln!("invalid log filter {filter:?}, using info: {error}");
        EnvFilter::new("info")
    });

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if let Err(error) = subscriber.try_init() {
        tracing::debug!("logging already initialized: {error}");
    }
}
