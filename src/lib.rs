//! Flare IM Service Sidecar
//!
//! 容器健康检查与服务上报 sidecar：启动时从 Docker 清单解析出要监控的
//! 服务实例，之后周期性地对每个实例做 TCP 探活，健康的实例写入 etcd
//! （带 TTL），失联的实例从注册表中摘除，供服务发现或反向代理路由使用。

pub mod config;
pub mod error;
pub mod identity;
pub mod inventory;
pub mod probe;
pub mod reconcile;
pub mod registry;
pub mod resolver;
pub mod runtime;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Result, SidecarError};
pub use identity::identity;
pub use inventory::{ContainerRecord, DockerInventory, PortMapping};
pub use probe::{ProbeOutcome, TcpProber};
pub use reconcile::Reconciler;
pub use registry::{EtcdStore, KvStore};
pub use resolver::{resolve_instances, ResolveOptions};
pub use runtime::run_loop;
pub use types::{AnnounceMode, WatchedInstance};
