use clap::Parser;
use fae_rpc_app::{ServerArgs, init_tracing};
use fae_tokio_rpc_server::RpcServer;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("info");

    let args = ServerArgs::parse();
    let mode = args.noop_mode();

    let listener = match TcpListener::bind((args.host.as_str(), args.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("error: cannot bind {}:{}: {e}", args.host, args.port);
            return ExitCode::FAILURE;
        }
    };

    let server = RpcServer::new(mode);
    let stats = server.stats();
    tracing::info!("noop mode: {}", mode);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    if let Err(e) = Arc::new(server)
        .serve_with_listener_until(listener, shutdown)
        .await
    {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let snapshot = stats.snapshot();
    tracing::info!(
        "Stopped after {:?}: sessions={} calls={} failed={} peers={:?}",
        snapshot.uptime,
        snapshot.total_sessions,
        snapshot.total_calls,
        snapshot.total_failed_calls,
        snapshot.requests_by_peer
    );

    ExitCode::SUCCESS
}
