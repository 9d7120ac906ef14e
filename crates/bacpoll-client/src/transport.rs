use crate::ClientError;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use thiserror::Error;
use tokio::net::UdpSocket;

/// Largest BACnet/IP datagram read off the socket.
pub const MAX_BIP_FRAME_LEN: usize = 1600;

/// Errors that can occur at the data-link layer.
#[derive(Debug, Error)]
pub enum DataLinkError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("frame too large")]
    FrameTooLarge,
}

/// Async link to a single device.
///
/// The poller never addresses anyone but its device, so implementors are
/// bound to one peer and filter out traffic from everyone else.
pub trait DataLink {
    /// Sends one complete BACnet/IP datagram to the device.
    async fn send(&self, payload: &[u8]) -> Result<(), DataLinkError>;

    /// Receives the next datagram from the device into `buf`.
    async fn recv(&self, buf: &mut [u8]) -> Result<usize, DataLinkError>;
}

/// BACnet/IP over a UDP socket connected to the device.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpTransport {
    /// Binds an ephemeral local port and connects it to `peer`.
    pub async fn connect(peer: SocketAddr) -> Result<Self, DataLinkError> {
        let bind_addr = match peer.ip() {
            IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        Self::connect_from(bind_addr, peer).await
    }

    pub async fn connect_from(
        bind_addr: SocketAddr,
        peer: SocketAddr,
    ) -> Result<Self, DataLinkError> {
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(peer).await?;
        log::debug!("bacnet/ip link {:?} -> {peer}", socket.local_addr().ok());
        Ok(Self { socket, peer })
    }

    /// Resolves `host:port` and connects to the first address it yields.
    pub async fn connect_host(address: &str) -> Result<Self, ClientError> {
        let peer = tokio::net::lookup_host(address)
            .await?
            .next()
            .ok_or_else(|| ClientError::Resolve(address.to_string()))?;
        Ok(Self::connect(peer).await?)
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DataLinkError> {
        self.socket.local_addr().map_err(DataLinkError::Io)
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl DataLink for UdpTransport {
    async fn send(&self, payload: &[u8]) -> Result<(), DataLinkError> {
        if payload.len() > MAX_BIP_FRAME_LEN {
            return Err(DataLinkError::FrameTooLarge);
        }
        self.socket.send(payload).await?;
        Ok(())
    }

    async fn recv(&self, buf: &mut [u8]) -> Result<usize, DataLinkError> {
        Ok(self.socket.recv(buf).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::{DataLink, UdpTransport};
    use std::net::SocketAddr;
    use tokio::net::UdpSocket;

    #[tokio::test]
    async fn exchanges_datagrams_with_its_peer() {
        let device = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let device_addr = device.local_addr().unwrap();
        let link = UdpTransport::connect(device_addr).await.unwrap();
        assert_eq!(link.peer_addr(), device_addr);

        link.send(&[0x81, 0x0A, 0x00, 0x04]).await.unwrap();
        let mut buf = [0u8; 16];
        let (n, from): (usize, SocketAddr) = device.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], &[0x81, 0x0A, 0x00, 0x04]);

        device.send_to(&[1, 2, 3], from).await.unwrap();
        let n = link.recv(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], &[1, 2, 3]);
    }

    #[tokio::test]
    async fn connect_host_resolves_literal_addresses() {
        let device = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let device_addr = device.local_addr().unwrap();
        let link = UdpTransport::connect_host(&device_addr.to_string())
            .await
            .unwrap();
        assert_eq!(link.peer_addr(), device_addr);
    }
}
