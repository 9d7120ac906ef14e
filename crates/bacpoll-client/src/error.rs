use crate::config::ConfigError;
use crate::transport::DataLinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("datalink error: {0}")]
    DataLink(#[from] DataLinkError),
    #[error("encode error: {0}")]
    Encode(#[from] bacpoll_core::EncodeError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not resolve device address {0}")]
    Resolve(String),
}
