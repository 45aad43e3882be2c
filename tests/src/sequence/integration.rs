//! End-to-end knocks against loopback listeners.
//!
//! Every test resolves its target through the real resolver and knocks with real sockets.

use knockr_common::KnockConfig;
use knockr_common::KnockError;
use knockr_common::network::family::AddressFamily;
use knockr_common::network::knock::{self, KnockSpec, Protocol};
use knockr_core::{resolver, sequencer};
use std::time::{Duration, Instant};
use tokio::net::{TcpListener, UdpSocket};
use tokio::time::timeout;

async fn loopback_config(specs: Vec<KnockSpec>) -> anyhow::Result<KnockConfig> {
    let target = resolver::resolve("127.0.0.1", None).await?;
    let mut cfg = KnockConfig::new(target, specs);
    cfg.timeout = Duration::from_millis(100);
    cfg.delay = Duration::ZERO;
    Ok(cfg)
}

/// Knocks TCP, UDP, then TCP again via the default, and checks each listener was hit.
#[tokio::test]
async fn mixed_sequence_hits_every_port() -> anyhow::Result<()> {
    let first = TcpListener::bind("127.0.0.1:0").await?;
    let second = UdpSocket::bind("127.0.0.1:0").await?;
    let third = TcpListener::bind("127.0.0.1:0").await?;

    let specs = knock::parse_sequence(&[
        format!("{}:tcp", first.local_addr()?.port()),
        format!("{}:udp", second.local_addr()?.port()),
        format!("{}", third.local_addr()?.port()),
    ])?;
    let cfg = loopback_config(specs).await?;
    assert_eq!(cfg.plan()[2].0, Protocol::Tcp);

    sequencer::run(&cfg).await?;

    let wait = Duration::from_secs(1);
    assert!(timeout(wait, first.accept()).await.is_ok(), "first port missed");
    let mut buf = [0u8; 16];
    let (len, _) = timeout(wait, second.recv_from(&mut buf)).await??;
    assert_eq!(len, 0, "udp knock carried a payload");
    assert!(timeout(wait, third.accept()).await.is_ok(), "third port missed");
    Ok(())
}

/// Ports that are closed must not stop the sequence.
#[tokio::test]
async fn closed_ports_do_not_abort() -> anyhow::Result<()> {
    let closed = {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        listener.local_addr()?.port()
    };
    let open = TcpListener::bind("127.0.0.1:0").await?;

    let specs = knock::parse_sequence(&[
        format!("{closed}"),
        format!("{closed}:udp"),
        format!("{}", open.local_addr()?.port()),
    ])?;
    let cfg = loopback_config(specs).await?;

    sequencer::run(&cfg).await?;

    assert!(timeout(Duration::from_secs(1), open.accept()).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn delays_add_up_between_knocks() -> anyhow::Result<()> {
    let specs = knock::parse_sequence(&["1:udp", "2:udp", "3:udp"])?;
    let mut cfg = loopback_config(specs).await?;
    cfg.delay = Duration::from_millis(60);

    let start = Instant::now();
    sequencer::run(&cfg).await?;
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(120), "too fast: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(400), "too slow: {elapsed:?}");
    Ok(())
}

#[tokio::test]
async fn invalid_protocol_stops_before_any_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let result = knock::parse_sequence(&[format!("{port}"), "10:bogus".to_string()]);

    assert!(matches!(result, Err(KnockError::InvalidProtocol { .. })));
    let nothing = timeout(Duration::from_millis(100), listener.accept()).await;
    assert!(nothing.is_err(), "a knock escaped a rejected sequence");
}

#[tokio::test]
#[ignore]
async fn ipv6_loopback_knock() -> anyhow::Result<()> {
    let listener = TcpListener::bind("[::1]:0").await?;
    let target = resolver::resolve("::1", Some(AddressFamily::Ipv6)).await?;
    let specs = vec![KnockSpec::new(listener.local_addr()?.port(), None)];
    let cfg = KnockConfig::new(target, specs);

    sequencer::run(&cfg).await?;

    assert!(timeout(Duration::from_secs(1), listener.accept()).await.is_ok());
    Ok(())
}
