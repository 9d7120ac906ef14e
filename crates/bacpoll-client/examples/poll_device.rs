//! Poll two present values from a device and print them.
//!
//! Usage:
//!   cargo run -p bacpoll-client --example poll_device -- --ip 192.168.1.100

use bacpoll_client::{Poller, PollerConfig, UdpTransport};
use bacpoll_core::constants::BACNET_IP_DEFAULT_PORT;
use bacpoll_core::{DecodedSample, ObjectType, PollClient, PropertySpec};
use std::net::IpAddr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let ip: IpAddr = std::env::args()
        .skip_while(|a| a != "--ip")
        .nth(1)
        .ok_or("usage: --ip <device-ip>")?
        .parse()?;

    let props = vec![
        PropertySpec::new("A001", ObjectType::AnalogValue, 1)?,
        PropertySpec::new("D169", ObjectType::BinaryValue, 169)?,
    ];
    let client = PollClient::new(props, |s: DecodedSample<'_>| {
        println!("{:.3} {} = {}", s.timestamp, s.name, s.value);
    })?;

    let link = UdpTransport::connect((ip, BACNET_IP_DEFAULT_PORT).into()).await?;
    let mut poller = Poller::new(link, client, PollerConfig::default());

    // Three cycles, three seconds apart.
    poller.run(3).await;
    println!("{:?}", poller.stats());
    Ok(())
}
