//! Runtime configuration and builder

use core::time::Duration;

pub use crate::error::BuilderError;

/// Switcher configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Emit keystrokes. When off, touches still select buttons but nothing
    /// reaches the host (bench testing).
    pub send_codes: bool,
    /// Delay between poll cycles; also the effective debounce window
    pub poll_interval_ms: u32,
}

impl Config {
    pub const DEFAULT_POLL_INTERVAL_MS: u32 = 500;

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms as u64)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            send_codes: true,
            poll_interval_ms: Self::DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Builder for constructing [`Config`]
///
/// # Example
///
/// ```
/// use portal_ui::Config;
///
/// let config = Config::builder()
///     .send_codes(false)
///     .poll_interval_ms(50)
///     .build()
///     .expect("valid configuration");
/// assert!(!config.send_codes);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ConfigBuilder {
    send_codes: bool,
    poll_interval_ms: u32,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let defaults = Config::default();
        Self {
            send_codes: defaults.send_codes,
            poll_interval_ms: defaults.poll_interval_ms,
        }
    }

    /// Enable or disable keystroke emission
    pub fn send_codes(mut self, send_codes: bool) -> Self {
        self.send_codes = send_codes;
        self
    }

    /// Set the poll interval in milliseconds
    pub fn poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ZeroPollInterval` for a zero interval.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.poll_interval_ms == 0 {
            return Err(BuilderError::ZeroPollInterval);
        }
        Ok(Config {
            send_codes: self.send_codes,
            poll_interval_ms: self.poll_interval_ms,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_device() {
        let config = Config::default();
        assert!(config.send_codes);
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(Config::builder().build(), Ok(config));
    }

    #[test]
    fn builder_overrides() {
        let config = Config::builder()
            .send_codes(false)
            .poll_interval_ms(20)
            .build()
            .unwrap();
        assert!(!config.send_codes);
        assert_eq!(config.poll_interval_ms, 20);
    }

    #[test]
    fn zero_interval_rejected() {
        assert_eq!(
            Config::builder().poll_interval_ms(0).build(),
            Err(BuilderError::ZeroPollInterval)
        );
    }
}
