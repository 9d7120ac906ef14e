//! Device poll lists loaded from JSON.
//!
//! ```json
//! {
//!   "host": "192.168.1.40",
//!   "interval": 5.0,
//!   "props": [
//!     { "name": "A001", "object_type": "analog-value", "instance": 1 },
//!     { "name": "D169", "object_type": 5, "instance": 169 }
//!   ]
//! }
//! ```

use crate::poller::PollerConfig;
use bacpoll_core::constants::BACNET_IP_DEFAULT_PORT;
use bacpoll_core::types::object_type::MAX_OBJECT_TYPE;
use bacpoll_core::types::ParseObjectTypeError;
use bacpoll_core::{EncodeError, ObjectType, PropertySpec};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("property '{name}': {source}")]
    InvalidObjectType {
        name: String,
        source: ParseObjectTypeError,
    },
    #[error("property '{name}': {source}")]
    Property { name: String, source: EncodeError },
    #[error("'{field}' must be a finite, non-negative number of seconds")]
    InvalidDuration { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seconds between cycle starts.
    #[serde(default = "default_seconds")]
    pub interval: f64,
    /// Device instance, informational only.
    #[serde(default)]
    pub device: Option<u32>,
    /// Seconds to wait for each reply.
    #[serde(default = "default_seconds")]
    pub timeout: f64,
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Poll order.
    pub props: Vec<PropConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropConfig {
    pub name: String,
    pub object_type: ObjectTypeRef,
    pub instance: u32,
}

/// An object type given either by number or by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ObjectTypeRef {
    Number(u16),
    Name(String),
}

fn default_port() -> u16 {
    BACNET_IP_DEFAULT_PORT
}

fn default_seconds() -> f64 {
    3.0
}

fn default_retries() -> u32 {
    2
}

impl ObjectTypeRef {
    pub fn resolve(&self) -> Result<ObjectType, ParseObjectTypeError> {
        match self {
            Self::Number(n) if *n <= MAX_OBJECT_TYPE => Ok(ObjectType::from_u16(*n)),
            Self::Number(_) => Err(ParseObjectTypeError),
            Self::Name(name) => name.parse(),
        }
    }
}

impl PropConfig {
    pub fn to_spec(&self) -> Result<PropertySpec, ConfigError> {
        let object_type =
            self.object_type
                .resolve()
                .map_err(|source| ConfigError::InvalidObjectType {
                    name: self.name.clone(),
                    source,
                })?;
        PropertySpec::new(self.name.clone(), object_type, self.instance).map_err(|source| {
            ConfigError::Property {
                name: self.name.clone(),
                source,
            }
        })
    }
}

impl DeviceConfig {
    /// A device at `host` with every other setting at its default.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            interval: default_seconds(),
            device: None,
            timeout: default_seconds(),
            retries: default_retries(),
            props: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The poll list in configured order.
    pub fn property_specs(&self) -> Result<Vec<PropertySpec>, ConfigError> {
        self.props.iter().map(PropConfig::to_spec).collect()
    }

    pub fn poller_config(&self) -> Result<PollerConfig, ConfigError> {
        Ok(PollerConfig {
            response_timeout: seconds("timeout", self.timeout)?,
            max_retries: self.retries,
            interval: seconds("interval", self.interval)?,
        })
    }

    /// `host:port`, ready for name resolution.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

fn seconds(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration { field })
}
