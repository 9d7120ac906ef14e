use bacpoll_client::DeviceConfig;
use bacpoll_core::types::ParseObjectTypeError;
use bacpoll_core::{EncodeError, ObjectType, PropertySpec};
use std::fmt;
use std::str::FromStr;

/// A `--prop NAME=TYPE:INSTANCE` argument, e.g. `A001=analog-value:1` or
/// `D169=5:169`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropArg(pub PropertySpec);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropArgError {
    MissingName,
    MissingInstance,
    ObjectType(ParseObjectTypeError),
    Instance(String),
    OutOfRange(EncodeError),
}

impl fmt::Display for PropArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => f.write_str("expected NAME=TYPE:INSTANCE"),
            Self::MissingInstance => f.write_str("expected TYPE:INSTANCE after '='"),
            Self::ObjectType(e) => write!(f, "{e}"),
            Self::Instance(s) => write!(f, "invalid instance number '{s}'"),
            Self::OutOfRange(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PropArgError {}

impl FromStr for PropArg {
    type Err = PropArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, object) = s.split_once('=').ok_or(PropArgError::MissingName)?;
        if name.is_empty() {
            return Err(PropArgError::MissingName);
        }
        let (object_type, instance) = object
            .rsplit_once(':')
            .ok_or(PropArgError::MissingInstance)?;
        let object_type: ObjectType = object_type.parse().map_err(PropArgError::ObjectType)?;
        let instance: u32 = instance
            .trim()
            .parse()
            .map_err(|_| PropArgError::Instance(instance.to_string()))?;
        PropertySpec::new(name, object_type, instance)
            .map(Self)
            .map_err(PropArgError::OutOfRange)
    }
}

impl PropArg {
    pub fn into_spec(self) -> PropertySpec {
        self.0
    }
}

/// Command-line settings that take precedence over a device file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub port: Option<u16>,
    pub interval: Option<f64>,
    pub timeout: Option<f64>,
    pub retries: Option<u32>,
}

impl Overrides {
    pub fn apply(&self, device: &mut DeviceConfig) {
        if let Some(port) = self.port {
            device.port = port;
        }
        if let Some(interval) = self.interval {
            device.interval = interval;
        }
        if let Some(timeout) = self.timeout {
            device.timeout = timeout;
        }
        if let Some(retries) = self.retries {
            device.retries = retries;
        }
    }
}
