//! flare-sidecar 进程入口
//!
//! 启动流程：解析配置 -> 初始化日志 -> 连接 Docker 与 etcd ->
//! 解析被监控实例 -> 进入调度循环。启动阶段任何一步失败都以
//! 非零状态退出；进入循环后只响应中断信号。

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flare_sidecar::config::Config;
use flare_sidecar::inventory::DockerInventory;
use flare_sidecar::probe::TcpProber;
use flare_sidecar::reconcile::Reconciler;
use flare_sidecar::registry::EtcdStore;
use flare_sidecar::resolver::resolve_instances;
use flare_sidecar::runtime::run_loop;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 连接 Docker，取一次运行中容器的快照
    let inventory = DockerInventory::connect(&config.docker)
        .await
        .context("unable to connect to docker, is it running?")?;
    let containers = inventory
        .running_containers()
        .await
        .context("unable to list running containers")?;

    // 解析被监控实例；匹配容器没有对外端口时这里直接失败退出
    let instances = resolve_instances(&containers, &config.resolve_options())?;
    info!(
        "announcing to {}/{} every {}s (ttl {}s)",
        config.prefix, config.domain, config.timeout, config.ttl
    );

    // 连接 etcd 并组装调和器与探测器
    let store = EtcdStore::connect(&config.etcd_host, config.etcd_port)
        .await
        .context("unable to connect to etcd")?;
    let reconciler = Reconciler::new(Box::new(store), config.prefix.clone(), config.ttl);
    let prober = TcpProber::new(Duration::from_secs(config.connect_timeout));

    tokio::select! {
        _ = run_loop(
            &prober,
            &reconciler,
            &instances,
            Duration::from_secs(config.timeout),
        ) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received (Ctrl+C)");
        }
    }

    Ok(())
}
