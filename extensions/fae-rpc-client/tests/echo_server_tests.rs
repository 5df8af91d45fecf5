use fae_rpc_client::{ClientConfig, Connection, RpcError};
use fae_tokio_rpc_server::utils::{bind_tcp_listener_on_random_port, tcp_listener_to_host_port};
use fae_tokio_rpc_server::{NoopMode, RpcServer};
use rand::Rng;
use std::sync::Arc;
use tokio::task::{JoinHandle, spawn_blocking};

async fn spawn_server(mode: NoopMode) -> (ClientConfig, JoinHandle<()>) {
    let (listener, _) = bind_tcp_listener_on_random_port().await.unwrap();
    let (host, port) = tcp_listener_to_host_port(&listener).unwrap();

    let server = Arc::new(RpcServer::new(mode));
    let task = tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });

    (ClientConfig::new(host, port), task)
}

#[tokio::test(flavor = "multi_thread")]
async fn noop_echoes_every_value() {
    let (config, server_task) = spawn_server(NoopMode::Echo).await;

    spawn_blocking(move || {
        let mut connection = Connection::open(&config).unwrap();
        let mut rng = rand::rng();

        let edges = [0, 1, -1, i32::MIN as i64, i32::MAX as i64, i64::MIN, i64::MAX];
        let sampled: Vec<i64> = (0..200).map(|_| rng.random()).collect();

        for value in edges.into_iter().chain(sampled) {
            assert_eq!(connection.call_noop(value).unwrap(), value);
        }

        connection.close();
    })
    .await
    .unwrap();

    server_task.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn constant_mode_is_visible_to_the_client() {
    let (config, server_task) = spawn_server(NoopMode::Constant(7)).await;

    let result = spawn_blocking(move || Connection::open(&config)?.call_noop(1))
        .await
        .unwrap();

    assert_eq!(result.unwrap(), 7);
    server_task.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_callers_use_separate_connections() {
    let (config, server_task) = spawn_server(NoopMode::Echo).await;

    let callers: Vec<_> = (0..8i64)
        .map(|caller| {
            let config = config.clone();
            spawn_blocking(move || -> Result<(), RpcError> {
                let mut connection = Connection::open(&config)?;
                for i in 0..25 {
                    let value = caller * 1_000 + i;
                    assert_eq!(connection.call_noop(value)?, value);
                }
                Ok(())
            })
        })
        .collect();

    for caller in callers {
        caller.await.unwrap().unwrap();
    }

    server_task.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_calls_share_the_connection_with_noop() {
    let (config, server_task) = spawn_server(NoopMode::Echo).await;

    spawn_blocking(move || {
        let mut connection = Connection::open(&config).unwrap();

        assert_eq!(connection.ping().unwrap(), "ok");
        assert_eq!(connection.call_noop(3).unwrap(), 3);

        let report = connection.stat().unwrap();
        assert!(report.contains(" sessions=1 active=1 calls=2 failed=0 "), "{report}");
        assert!(connection.is_open());
    })
    .await
    .unwrap();

    server_task.abort();
}
