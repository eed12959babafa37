//! Server configuration read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use readme_widgets::RingPi;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_SQUARES: i64 = 10_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub ring_pi: RingPi,
    /// Upper bound on the waffle `numberOfSquares` parameter
    pub max_squares: i64,
    pub revision: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            ring_pi: RingPi::default(),
            max_squares: DEFAULT_MAX_SQUARES,
            revision: build_revision().to_string(),
        }
    }
}

/// Revision baked in at compile time, if any.
fn build_revision() -> &'static str {
    option_env!("WIDGETS_REVISION").unwrap_or("unknown")
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source. Unset keys keep their
    /// defaults; unparseable ones are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = parsed(&lookup, "WIDGETS_HOST") {
            config.host = host;
        }
        if let Some(port) = parsed(&lookup, "PORT") {
            config.port = port;
        }
        if let Some(ring_pi) = parsed(&lookup, "WIDGETS_RING_PI") {
            config.ring_pi = ring_pi;
        }
        match parsed::<i64>(&lookup, "WIDGETS_MAX_SQUARES") {
            Some(max) if max > 0 => config.max_squares = max,
            Some(max) => warn!(max, "ignoring non-positive WIDGETS_MAX_SQUARES"),
            None => {}
        }
        if let Some(revision) = lookup("WIDGETS_REVISION").filter(|r| !r.is_empty()) {
            config.revision = revision;
        }
        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, value = %raw, %err, "ignoring unparseable setting");
            None
        }
    }
}
