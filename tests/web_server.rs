//! Status server integration tests.

use std::sync::Arc;
use std::time::Duration;

use cluster_seeder::cluster::{ClusterOps, ResourceKind, ResourceState};
use cluster_seeder::config::{SeederConfig, WebConfig};
use cluster_seeder::lifecycle::Shutdown;
use cluster_seeder::resilience::RetryPolicy;
use cluster_seeder::seeder::{SeedExecutor, SeedPlan};
use cluster_seeder::web::{AppState, WebServer};

mod common;
use common::MockCluster;

async fn start_server(cluster: Arc<MockCluster>) -> (std::net::SocketAddr, Shutdown) {
    let plan = Arc::new(SeedPlan::from_config(&SeederConfig::default()));
    let ops: Arc<dyn ClusterOps> = cluster;
    let executor = Arc::new(SeedExecutor::new(ops, RetryPolicy::default()));
    let state = AppState { executor, plan };

    let server = WebServer::new(state, &WebConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_index_renders_resource_states() {
    let cluster = Arc::new(MockCluster::new());
    cluster.set_state(ResourceKind::Namespace, "demo-namespace", ResourceState::Ready);
    cluster.set_state(
        ResourceKind::Deployment,
        "nginx-deployment",
        ResourceState::Pending,
    );

    let (addr, shutdown) = start_server(Arc::clone(&cluster)).await;

    let res = client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("status server unreachable");
    assert_eq!(res.status(), 200);

    let body = res.text().await.unwrap();
    assert!(body.contains("demo-namespace"));
    assert!(body.contains("nginx-deployment"));
    assert!(body.contains("pending"));
    // The pod was never seeded in the mock.
    assert!(body.contains("missing"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_index_degrades_when_cluster_unreachable() {
    let cluster = Arc::new(MockCluster::new());
    cluster.fail_state_lookups();

    let (addr, shutdown) = start_server(cluster).await;

    let res = client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("status server unreachable");
    assert_eq!(res.status(), 200, "page should render despite API errors");

    let body = res.text().await.unwrap();
    assert!(body.contains("unknown"));
    assert!(body.contains("pi-job"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_healthz_never_touches_the_cluster() {
    let cluster = Arc::new(MockCluster::new());
    cluster.fail_state_lookups();

    let (addr, shutdown) = start_server(Arc::clone(&cluster)).await;

    let res = client()
        .get(format!("http://{}/healthz", addr))
        .send()
        .await
        .expect("status server unreachable");
    assert_eq!(res.status(), 200);

    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));

    assert!(
        cluster.calls().is_empty(),
        "healthz must not issue API calls"
    );

    shutdown.trigger();
}
