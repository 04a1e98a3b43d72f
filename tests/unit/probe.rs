use std::net::{Ipv4Addr, UdpSocket};
use std::time::Duration;

use super::*;

fn receiver() -> UdpSocket {
    let sock = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    sock.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    sock
}

#[test]
fn defaults_target_ipv6_loopback() {
    let opts = ProbeOpts::default();
    assert_eq!(opts.host, IpAddr::V6(Ipv6Addr::LOCALHOST));
    assert_eq!(opts.message, "Hello, world!");
}

#[test]
fn sends_payload_to_every_port_in_order() {
    let a = receiver();
    let b = receiver();
    let ports = [a.local_addr().unwrap().port(), b.local_addr().unwrap().port()];
    let opts = ProbeOpts {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        message: "ping".to_owned(),
    };

    let reports = send_probes(&ports, &opts).unwrap();
    assert_eq!(
        reports,
        vec![
            ProbeReport { port: ports[0], bytes_sent: 4 },
            ProbeReport { port: ports[1], bytes_sent: 4 },
        ]
    );

    let mut buf = [0u8; 16];
    for sock in [&a, &b] {
        let (n, _) = sock.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"ping");
    }
}

#[test]
fn empty_port_list_sends_nothing() {
    let opts = ProbeOpts {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        ..ProbeOpts::default()
    };
    assert!(send_probes(&[], &opts).unwrap().is_empty());
}
