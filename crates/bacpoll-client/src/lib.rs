#![allow(async_fn_in_trait)]

pub mod config;
pub mod error;
pub mod poller;
pub mod transport;

pub use bacpoll_core::{DecodedSample, PollOutcome, PollStats, PresentValue, SampleSink};
pub use config::{ConfigError, DeviceConfig, ObjectTypeRef, PropConfig};
pub use error::ClientError;
pub use poller::{unix_timestamp, Poller, PollerConfig};
pub use transport::{DataLink, DataLinkError, UdpTransport};
