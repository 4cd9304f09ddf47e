//! 统一错误类型
//!
//! 只有启动阶段的失败会沿 `Result` 传播到进程退出；
//! 稳态阶段的注册表失败由调和器记录日志后吞掉。

use thiserror::Error;

/// Sidecar 统一错误类型
#[derive(Error, Debug)]
pub enum SidecarError {
    /// 容器清单（Docker daemon）访问失败
    #[error("inventory error: {0}")]
    Inventory(String),

    /// 注册中心（etcd）访问失败
    #[error("registry error: {0}")]
    Registry(String),

    /// 匹配到的容器没有对外暴露的端口
    #[error("container {name} has no public ports")]
    NoPublicPorts { name: String },

    /// 配置无效
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<etcd_client::Error> for SidecarError {
    fn from(err: etcd_client::Error) -> Self {
        SidecarError::Registry(err.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, SidecarError>;
