//! 健康探测模块

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::info;

/// 单次探测结果
///
/// 连接失败是常态结果而不是错误，调用方必须显式处理两个分支。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 传输层连接成功
    Healthy,
    /// 连接被拒绝、超时或其它传输层错误
    Unhealthy,
}

impl ProbeOutcome {
    pub fn is_healthy(self) -> bool {
        matches!(self, ProbeOutcome::Healthy)
    }
}

/// TCP 连通性探测器
///
/// 只做传输层检查：连接成功后立即断开，不交换任何数据。
/// 单次探测内部不重试，重试节奏完全由调度循环的固定间隔决定。
#[derive(Debug, Clone)]
pub struct TcpProber {
    connect_timeout: Duration,
}

impl TcpProber {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// 探测一个 address:port，按结果打一条日志。
    pub async fn probe(&self, address: &str, port: u16) -> ProbeOutcome {
        let target = format!("{}:{}", address, port);
        match timeout(self.connect_timeout, TcpStream::connect(target.as_str())).await {
            Ok(Ok(stream)) => {
                drop(stream);
                info!("tcp://{} health check SUCCEEDED", target);
                ProbeOutcome::Healthy
            }
            Ok(Err(e)) => {
                info!("tcp://{} health check FAILED: {}", target, e);
                ProbeOutcome::Unhealthy
            }
            Err(_) => {
                info!(
                    "tcp://{} health check FAILED: connect timed out after {:?}",
                    target, self.connect_timeout
                );
                ProbeOutcome::Unhealthy
            }
        }
    }
}
