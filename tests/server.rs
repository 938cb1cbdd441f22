//! Over-the-wire tests for the bridge server.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use stack_bridge::config::BridgeConfig;
use stack_bridge::convert::BufferedMessageFactory;
use stack_bridge::{demo, Bridge, BridgeServer};

/// Serve `bridge` on an ephemeral port until the returned sender fires.
async fn spawn_server(bridge: Bridge) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = BridgeServer::new(BridgeConfig::default(), bridge);
    tokio::spawn(async move {
        let _ = server
            .run(listener, async move {
                let _ = rx.await;
            })
            .await;
    });

    (addr, tx)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn serves_hello_world_through_bridge() {
    let (addr, shutdown) = spawn_server(Bridge::from_callable(demo::hello_world())).await;

    let res = client()
        .get(format!("http://{}/hello-world", addr))
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "hello world");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn echo_sees_method_path_and_body() {
    let (addr, shutdown) = spawn_server(Bridge::from_callable(demo::echo())).await;

    let res = client()
        .post(format!("http://{}/orders?limit=3", addr))
        .body("twelve bytes")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), 200);
    let value: serde_json::Value = res.json().await.unwrap();
    assert_eq!(value["method"], "POST");
    assert_eq!(value["path"], "/orders");
    assert_eq!(value["query"], "limit=3");
    assert_eq!(value["body_bytes"], 12);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let bridge = Bridge::from_callable(demo::echo()).with_message_factory(BufferedMessageFactory::new(8));
    let (addr, shutdown) = spawn_server(bridge).await;

    let res = client()
        .post(format!("http://{}/upload", addr))
        .body(vec![b'x'; 64])
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), 400);

    let _ = shutdown.send(());
}
