//! Loopback liveness probe.
//!
//! Sends one short UDP datagram to each of a list of local ports so a listening process can show
//! it is alive. Shares nothing with the rendering pipeline.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use anyhow::Context as _;

use crate::foundation::error::GossipResult;

/// Payload sent when none is given.
pub const DEFAULT_PROBE_MESSAGE: &str = "Hello, world!";

/// Destination host and payload of a probe run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeOpts {
    /// Host every port is addressed on.
    pub host: IpAddr,
    /// Datagram payload.
    pub message: String,
}

impl Default for ProbeOpts {
    fn default() -> Self {
        Self {
            host: IpAddr::V6(Ipv6Addr::LOCALHOST),
            message: DEFAULT_PROBE_MESSAGE.to_owned(),
        }
    }
}

/// Outcome of probing one port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeReport {
    /// Destination port.
    pub port: u16,
    /// Bytes handed to the socket.
    pub bytes_sent: usize,
}

/// Send `opts.message` once to every port in `ports`, in order.
///
/// Stops at the first port the datagram cannot be sent to.
#[tracing::instrument(skip(opts), fields(host = %opts.host))]
pub fn send_probes(ports: &[u16], opts: &ProbeOpts) -> GossipResult<Vec<ProbeReport>> {
    let local = match opts.host {
        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    let socket = UdpSocket::bind(SocketAddr::new(local, 0))
        .with_context(|| format!("bind probe socket on {local}"))?;

    let mut reports = Vec::with_capacity(ports.len());
    for &port in ports {
        let dest = SocketAddr::new(opts.host, port);
        let bytes_sent = socket
            .send_to(opts.message.as_bytes(), dest)
            .with_context(|| format!("send probe to {dest}"))?;
        tracing::debug!(%dest, bytes_sent, "probe sent");
        reports.push(ProbeReport { port, bytes_sent });
    }
    Ok(reports)
}

#[cfg(test)]
#[path = "../tests/unit/probe.rs"]
mod tests;
