use bacpoll_client::{DeviceConfig, Poller, UdpTransport};
use bacpoll_core::{DecodedSample, PollClient};
use bacpoll_tools::{Overrides, PropArg};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

/// Polls present values from one BACnet/IP device and prints each sample as a
/// JSON line.
#[derive(Parser, Debug)]
#[command(name = "bacpoll")]
struct Args {
    /// JSON device file; `--prop` entries are appended to its list.
    #[arg(long, conflicts_with = "ip")]
    config: Option<PathBuf>,
    #[arg(long, required_unless_present = "config")]
    ip: Option<String>,
    /// UDP port of the device [default: 47808, or the config file's].
    #[arg(long)]
    port: Option<u16>,
    /// NAME=TYPE:INSTANCE, repeatable.
    #[arg(long = "prop")]
    props: Vec<PropArg>,
    /// Seconds between cycle starts.
    #[arg(long)]
    interval: Option<f64>,
    /// Seconds to wait for each reply.
    #[arg(long)]
    timeout: Option<f64>,
    #[arg(long)]
    retries: Option<u32>,
    /// Stop after this many cycles; 0 polls forever.
    #[arg(long, default_value_t = 0)]
    cycles: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut device = match (&args.config, &args.ip) {
        (Some(path), _) => DeviceConfig::load(path)?,
        (None, Some(host)) => DeviceConfig::new(host.clone()),
        (None, None) => return Err("either --config or --ip is required".into()),
    };
    Overrides {
        port: args.port,
        interval: args.interval,
        timeout: args.timeout,
        retries: args.retries,
    }
    .apply(&mut device);

    let mut specs = device.property_specs()?;
    specs.extend(args.props.into_iter().map(PropArg::into_spec));
    if specs.is_empty() {
        return Err("no properties to poll".into());
    }
    let config = device.poller_config()?;

    let link = UdpTransport::connect_host(&device.address()).await?;
    log::info!(
        "polling {} properties on {} every {:?}",
        specs.len(),
        link.peer_addr(),
        config.interval
    );

    let client = PollClient::new(specs, |sample: DecodedSample<'_>| {
        match serde_json::to_string(&sample) {
            Ok(line) => {
                let mut out = std::io::stdout().lock();
                if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
                    log::warn!("stdout write failed: {e}");
                }
            }
            Err(e) => log::warn!("cannot serialize sample {}: {e}", sample.name),
        }
    })?;

    let mut poller = Poller::new(link, client, config);
    poller.run(args.cycles).await;

    let stats = poller.stats();
    log::info!(
        "{} samples, {} timeouts, {} cycles",
        stats.samples,
        stats.timeouts,
        stats.cycles
    );
    for (reason, count) in stats.rejections().filter(|(_, n)| *n > 0) {
        log::info!("rejected ({reason}): {count}");
    }
    Ok(())
}
