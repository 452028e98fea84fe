use {
    crate::Config,
    std::{io::IsTerminal, sync::Once},
    time::macros::format_description,
    tracing::Subscriber,
    tracing_subscriber::{
        EnvFilter,
        Layer,
        fmt::{MakeWriter, time::UtcTime, writer::MakeWriterExt as _},
        prelude::*,
        registry::LookupSpan,
        util::SubscriberInitExt,
    },
};

/// Initializes tracing setup that is shared between the binaries.
/// `env_filter` has similar syntax to env_logger. It is documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn initialize(config: &Config) {
    set_tracing_subscriber(config);
}

/// Like [`initialize`], but can be called multiple times in a row. Later calls
/// are ignored.
///
/// Useful for tests.
pub fn initialize_reentrant(env_filter: &str) {
    // The tracing subscriber below is global object so initializing it again in the
    // same process by a different thread would fail.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        set_tracing_subscriber(&Config::default().with_env_filter(env_filter));
    });
}

fn set_tracing_subscriber(config: &Config) {
    subscriber(config, std::io::stdout, std::io::stderr).init();
}

/// Builds the subscriber [`initialize`] installs, writing to the given sinks
/// instead of the process' stdout and stderr.
pub fn subscriber<O, E>(
    config: &Config,
    stdout: O,
    stderr: E,
) -> impl Subscriber + Send + Sync + use<O, E>
where
    O: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    E: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(fmt_layer(config, stdout, stderr))
}

fn fmt_layer<S, O, E>(
    config: &Config,
    stdout: O,
    stderr: E,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    O: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    E: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ));
    let filter = EnvFilter::new(&config.env_filter);
    let ansi = std::io::stdout().is_terminal();

    // Events at or above the threshold go to stderr. Everything else ends up on
    // stdout, so a quiet successful run never writes to stderr.
    match (config.use_json_format, config.stderr_threshold) {
        (true, Some(threshold)) => tracing_subscriber::fmt::layer()
            .json()
            .with_timer(timer)
            .with_writer(stderr.with_max_level(threshold).or_else(stdout))
            .with_filter(filter)
            .boxed(),
        (true, None) => tracing_subscriber::fmt::layer()
            .json()
            .with_timer(timer)
            .with_writer(stdout)
            .with_filter(filter)
            .boxed(),
        (false, Some(threshold)) => tracing_subscriber::fmt::layer()
            .with_timer(timer)
            .with_ansi(ansi)
            .with_writer(stderr.with_max_level(threshold).or_else(stdout))
            .with_filter(filter)
            .boxed(),
        (false, None) => tracing_subscriber::fmt::layer()
            .with_timer(timer)
            .with_ansi(ansi)
            .with_writer(stdout)
            .with_filter(filter)
            .boxed(),
    }
}

/// In-memory log sink for asserting on formatted output.
#[cfg(any(test, feature = "test-util"))]
#[derive(Clone, Debug, Default)]
pub struct CapturedOutput(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(any(test, feature = "test-util"))]
impl CapturedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl std::io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-util"))]
impl<'a> MakeWriter<'a> for CapturedOutput {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
