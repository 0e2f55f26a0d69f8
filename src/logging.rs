/// Install the stderr tracing subscriber.
///
/// Unknown levels fall back to `warn` with a notice. Uses `try_init` so a
/// second call (e.g. from tests) is harmless.
pub fn init(level: Option<&str>) {
    let filter = match level.unwrap_or("warn") {
        "off" => "off",
        "error" => "error",
        "warn" => "warn",
        "info" => "info",
        "debug" => "debug",
        other => {
            eprintln!(
                "warning: unknown log level '{}', defaulting to 'warn'",
                other
            );
            "warn"
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
