//! Docker 容器清单实现

use bollard::container::ListContainersOptions;
use bollard::models::ContainerSummary;
use bollard::{Docker, API_DEFAULT_VERSION};
use tracing::{debug, info};

use super::{ContainerRecord, PortMapping};
use crate::error::{Result, SidecarError};

/// Docker daemon 连接超时（秒）
const DAEMON_TIMEOUT_SECS: u64 = 30;

/// Docker 容器清单
///
/// 启动时连接一次并 ping 验证连通性，之后只用于列出运行中的容器。
pub struct DockerInventory {
    client: Docker,
}

impl DockerInventory {
    /// 按 URI 连接 Docker daemon 并验证连通性。
    ///
    /// 支持 `unix://` 本地套接字和 `tcp://` / `http://` 远端地址，
    /// 其它形式回退到 bollard 的本地默认连接。daemon 不可达视为
    /// 致命错误，由调用方终止进程。
    pub async fn connect(uri: &str) -> Result<Self> {
        let client = if uri.starts_with("unix://") {
            Docker::connect_with_unix(uri, DAEMON_TIMEOUT_SECS, API_DEFAULT_VERSION)
        } else if uri.starts_with("tcp://") || uri.starts_with("http://") {
            Docker::connect_with_http(uri, DAEMON_TIMEOUT_SECS, API_DEFAULT_VERSION)
        } else {
            Docker::connect_with_local_defaults()
        }
        .map_err(|e| SidecarError::Inventory(format!("failed to connect to docker at {uri}: {e}")))?;

        client
            .ping()
            .await
            .map_err(|e| SidecarError::Inventory(format!("docker daemon unreachable: {e}")))?;

        info!("connected to docker daemon at {}", uri);
        Ok(Self { client })
    }

    /// 列出运行中的容器，归一化为 `ContainerRecord`。
    pub async fn running_containers(&self) -> Result<Vec<ContainerRecord>> {
        let containers = self
            .client
            .list_containers(Some(ListContainersOptions::<String>::default()))
            .await
            .map_err(|e| SidecarError::Inventory(format!("failed to list containers: {e}")))?;

        debug!("inventory returned {} running container(s)", containers.len());

        Ok(containers.into_iter().map(ContainerRecord::from).collect())
    }
}

impl From<ContainerSummary> for ContainerRecord {
    fn from(summary: ContainerSummary) -> Self {
        ContainerRecord {
            // Docker daemon 返回的容器名带前导 `/`，这里统一去掉
            names: summary
                .names
                .unwrap_or_default()
                .into_iter()
                .map(|n| n.trim_start_matches('/').to_string())
                .collect(),
            ports: summary
                .ports
                .unwrap_or_default()
                .into_iter()
                .map(|p| PortMapping {
                    private_port: p.private_port,
                    public_port: p.public_port,
                })
                .collect(),
        }
    }
}
