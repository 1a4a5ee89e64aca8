//! Hook that prints the environment with sensitive values redacted

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;
use types::{utils::redact, EnvironmentMap, HookError};

const DEFAULT_HEADING: &str = "Loaded environment variables:";

/// Prints every variable of the snapshot to a sink
pub struct LoggingHook {
    heading: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl LoggingHook {
    /// Create a new logging hook writing to stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a new logging hook writing to the given sink
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            heading: DEFAULT_HEADING.to_string(),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Replace the heading line
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    pub fn name(&self) -> &str {
        "logging"
    }

    /// Print the snapshot; failures are logged, never returned
    pub async fn run(&self, env: &EnvironmentMap) -> Result<(), HookError> {
        if let Err(e) = self.write_env(env) {
            tracing::error!(hook = %self.name(), error = %e, "Failed to print environment");
        }
        Ok(())
    }

    fn write_env(&self, env: &EnvironmentMap) -> io::Result<()> {
        let mut rendered = format!("{}\n", self.heading);
        for (key, value) in env.iter() {
            rendered.push_str(&format!("  {}: {}\n", key, redact(key, value)));
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output sink lock poisoned"))?;
        writer.write_all(rendered.as_bytes())?;
        writer.flush()
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggingHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingHook")
            .field("heading", &self.heading)
            .finish_non_exhaustive()
    }
}

/// In-memory sink shared between a hook and a test
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_prints_sorted_and_redacted() {
        let buffer = SharedBuffer::default();
        let hook = LoggingHook::with_writer(buffer.clone());
        let env: EnvironmentMap = [
            ("APP_NAME", "actorCLI"),
            ("API_KEY", "abc123"),
            ("DB_PASSWORD", "hunter2"),
            ("APP_ENV", "staging"),
        ]
        .into_iter()
        .collect();

        hook.run(&env).await.unwrap();

        assert_eq!(
            buffer.contents(),
            "Loaded environment variables:\n\
             \x20 API_KEY: [REDACTED]\n\
             \x20 APP_ENV: staging\n\
             \x20 APP_NAME: actorCLI\n\
             \x20 DB_PASSWORD: [REDACTED]\n"
        );
    }

    #[tokio::test]
    async fn test_empty_environment_prints_heading_only() {
        let buffer = SharedBuffer::default();
        let hook = LoggingHook::with_writer(buffer.clone()).with_heading("Variables:");

        hook.run(&EnvironmentMap::new()).await.unwrap();
        assert_eq!(buffer.contents(), "Variables:\n");
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let hook = LoggingHook::with_writer(BrokenPipe);
        let env: EnvironmentMap = [("APP_ENV", "development")].into_iter().collect();

        assert!(hook.run(&env).await.is_ok());
    }
}
