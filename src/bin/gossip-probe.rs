use std::net::IpAddr;

use anyhow::Context as _;
use clap::Parser;

/// Send a short UDP datagram to local ports to check that listeners are alive.
#[derive(Parser, Debug)]
#[command(name = "gossip-probe", version)]
struct Cli {
    /// Destination ports.
    #[arg(long, num_args = 1.., required = true)]
    port: Vec<u16>,

    /// Destination host.
    #[arg(long, default_value = "::1")]
    host: IpAddr,

    /// Payload to send.
    #[arg(long, default_value = gossip_viz::DEFAULT_PROBE_MESSAGE)]
    message: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let opts = gossip_viz::ProbeOpts {
        host: cli.host,
        message: cli.message,
    };
    let reports = gossip_viz::send_probes(&cli.port, &opts)
        .with_context(|| format!("probe {}", opts.host))?;
    for r in reports {
        println!("Wrote {} bytes to :{}", r.bytes_sent, r.port);
    }
    Ok(())
}
