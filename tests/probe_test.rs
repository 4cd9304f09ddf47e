//! 健康探测测试
//!
//! 用本机真实端口验证两种探测结果。

use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::time::timeout;

use flare_sidecar::probe::{ProbeOutcome, TcpProber};

/// 测试：有监听者的端口探测为健康，且连接在成功后立即关闭
#[tokio::test]
async fn test_probe_listening_port_is_healthy() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let port = listener.local_addr().expect("no local addr").port();

    let prober = TcpProber::new(Duration::from_secs(1));
    assert_eq!(prober.probe("127.0.0.1", port).await, ProbeOutcome::Healthy);

    // 探测方不交换数据并立即断开：accept 后第一次读就应当是 EOF
    let (mut stream, _) = timeout(Duration::from_secs(1), listener.accept())
        .await
        .expect("accept timed out")
        .expect("accept failed");
    let mut buf = [0u8; 8];
    let n = timeout(Duration::from_secs(1), stream.read(&mut buf))
        .await
        .expect("read timed out")
        .expect("read failed");
    assert_eq!(n, 0, "prober should close the connection without sending data");
}

/// 测试：没有监听者的端口探测为失联
#[tokio::test]
async fn test_probe_closed_port_is_unhealthy() {
    // 先 bind 再 drop，拿到一个当前必然没有监听者的端口
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let port = listener.local_addr().expect("no local addr").port();
    drop(listener);

    let prober = TcpProber::new(Duration::from_secs(1));
    assert_eq!(
        prober.probe("127.0.0.1", port).await,
        ProbeOutcome::Unhealthy
    );
}

/// 测试：连续探测互不影响，结果只取决于当时的端口状态
#[tokio::test]
async fn test_probe_has_no_internal_state() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let port = listener.local_addr().expect("no local addr").port();
    let prober = TcpProber::new(Duration::from_secs(1));

    assert_eq!(prober.probe("127.0.0.1", port).await, ProbeOutcome::Healthy);
    drop(listener);
    assert_eq!(
        prober.probe("127.0.0.1", port).await,
        ProbeOutcome::Unhealthy
    );
}
