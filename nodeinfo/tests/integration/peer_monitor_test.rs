//! Integration Test: ピアヘルスモニター
//!
//! wiremockでピアを模擬し、プローブ結果・停止動作を検証する。

use std::time::Duration;

use nodeinfo::health::{PeerConfig, PeerHealthChecker, ProbeOutcome};
use nodeinfo::shutdown::ShutdownController;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::http::{spawn_status_server, test_identity};

fn checker_for(mock: &MockServer, interval: Duration, timeout: Duration) -> PeerHealthChecker {
    let addr = mock.address();
    PeerHealthChecker::new(
        PeerConfig::new(addr.ip().to_string(), addr.port())
            .with_interval(interval)
            .with_timeout(timeout),
    )
    .unwrap()
}

async fn received(mock: &MockServer) -> usize {
    mock.received_requests().await.map(|r| r.len()).unwrap_or(0)
}

async fn wait_for_requests(mock: &MockServer, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while received(mock).await < count {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("peer did not receive the expected probes");
}

/// 200を返すピアに対しては毎回Healthyとなり、自身のカウンタは変化しないこと
#[tokio::test]
async fn healthy_peer_is_probed_every_tick() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock)
        .await;

    let status = spawn_status_server(test_identity()).await;

    let checker = checker_for(&mock, Duration::from_millis(50), Duration::from_secs(1));
    assert!(checker.probe().await.is_healthy());

    let shutdown = ShutdownController::default();
    let handle = checker.start(shutdown.clone());

    wait_for_requests(&mock, 3).await;
    shutdown.request_shutdown();

    let probes = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("monitor did not stop")
        .unwrap();
    assert!(probes >= 2, "probes = {probes}");
    assert_eq!(status.state().identity.requests(), 0);

    status.stop().await;
}

/// 200以外のステータスはUnexpectedStatusとして報告されること
#[tokio::test]
async fn non_success_status_is_reported() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock)
        .await;

    let checker = checker_for(&mock, Duration::from_secs(5), Duration::from_secs(1));
    match checker.probe().await {
        ProbeOutcome::UnexpectedStatus(status) => assert_eq!(status.as_u16(), 503),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

/// 201など200以外の成功系ステータスも200 OKとは扱わないこと
#[tokio::test]
async fn only_200_counts_as_healthy() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock)
        .await;

    let checker = checker_for(&mock, Duration::from_secs(5), Duration::from_secs(1));
    assert!(matches!(
        checker.probe().await,
        ProbeOutcome::UnexpectedStatus(_)
    ));
}

/// タイムアウトを超えるピアは通信エラーとして扱われること
#[tokio::test]
async fn slow_peer_times_out() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock)
        .await;

    let checker = checker_for(&mock, Duration::from_secs(5), Duration::from_millis(200));
    let started = std::time::Instant::now();
    let outcome = checker.probe().await;
    assert!(matches!(outcome, ProbeOutcome::Unreachable(_)), "{outcome:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
}

/// 接続できないピアでもループは継続し、停止要求で終了すること
#[tokio::test]
async fn unreachable_peer_does_not_stop_the_loop() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let checker = PeerHealthChecker::new(
        PeerConfig::new("127.0.0.1", port)
            .with_interval(Duration::from_millis(30))
            .with_timeout(Duration::from_millis(200)),
    )
    .unwrap();
    assert!(matches!(
        checker.probe().await,
        ProbeOutcome::Unreachable(_)
    ));

    let shutdown = ShutdownController::default();
    let handle = checker.start(shutdown.clone());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!handle.is_finished());
    shutdown.request_shutdown();

    let probes = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("monitor did not stop")
        .unwrap();
    assert!(probes >= 1, "probes = {probes}");
}

/// プローブ中の停止要求はプローブ完了後に反映されること
#[tokio::test]
async fn shutdown_waits_for_in_flight_probe() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .mount(&mock)
        .await;

    let checker = checker_for(&mock, Duration::from_millis(50), Duration::from_secs(1));
    let shutdown = ShutdownController::default();
    let handle = checker.start(shutdown.clone());

    wait_for_requests(&mock, 1).await;
    shutdown.request_shutdown();

    let probes = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("monitor did not stop")
        .unwrap();
    assert_eq!(probes, 1);
}
