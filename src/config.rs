//! 进程配置
//!
//! 全部配置来自命令行参数，亦可通过对应的环境变量覆盖。

use clap::Parser;

use crate::error::SidecarError;
use crate::resolver::ResolveOptions;
use crate::types::AnnounceMode;

/// 容器健康检查与 etcd 服务上报 sidecar
#[derive(Debug, Clone, Parser)]
#[command(name = "flare-sidecar", version, about = "Announce healthy container instances to etcd")]
pub struct Config {
    /// 要监控并上报的容器名
    #[arg(long, env = "SIDECAR_NAME")]
    pub name: String,

    /// 对外公布的实例地址（本机的私网或公网 IP）
    #[arg(long, env = "SIDECAR_IP")]
    pub ip: String,

    /// 健康检查使用的地址
    #[arg(long = "check-ip", env = "SIDECAR_CHECK_IP", default_value = "0.0.0.0")]
    pub check_ip: String,

    /// Docker daemon 地址
    #[arg(
        long,
        env = "SIDECAR_DOCKER",
        default_value = "unix:///var/run/docker.sock"
    )]
    pub docker: String,

    /// etcd 主机
    #[arg(long = "etcd-host", env = "SIDECAR_ETCD_HOST", default_value = "localhost")]
    pub etcd_host: String,

    /// etcd 端口
    #[arg(long = "etcd-port", env = "SIDECAR_ETCD_PORT", default_value_t = 2379)]
    pub etcd_port: u16,

    /// 扁平模式上报的根路径
    #[arg(long, env = "SIDECAR_PREFIX", default_value = "/services")]
    pub prefix: String,

    /// 上报使用的域名/路由
    #[arg(long, env = "SIDECAR_DOMAIN", default_value = "example.com")]
    pub domain: String,

    /// 两轮检查之间的休眠秒数
    #[arg(long, env = "SIDECAR_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// 注册条目的 TTL 秒数
    #[arg(long, env = "SIDECAR_TTL", default_value_t = 60)]
    pub ttl: i64,

    /// 以 vulcand 负载均衡模式上报
    #[arg(long, env = "SIDECAR_VULCAND")]
    pub vulcand: bool,

    /// 后端协议类型（负载均衡模式使用）
    #[arg(long = "type", env = "SIDECAR_TYPE", default_value = "http")]
    pub backend_type: String,

    /// 单次健康检查的连接超时秒数
    #[arg(long = "connect-timeout", env = "SIDECAR_CONNECT_TIMEOUT", default_value_t = 5)]
    pub connect_timeout: u64,
}

impl Config {
    /// 校验取值范围
    ///
    /// clap 负责类型和必填项，这里只检查语义上的下界：
    /// 间隔、TTL、连接超时都必须至少 1 秒。
    pub fn validate(&self) -> Result<(), SidecarError> {
        if self.timeout == 0 {
            return Err(SidecarError::InvalidConfig(
                "timeout must be at least 1 second".to_string(),
            ));
        }
        if self.ttl < 1 {
            return Err(SidecarError::InvalidConfig(
                "ttl must be at least 1 second".to_string(),
            ));
        }
        if self.connect_timeout == 0 {
            return Err(SidecarError::InvalidConfig(
                "connect-timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// 生效的注册策略
    pub fn mode(&self) -> AnnounceMode {
        if self.vulcand {
            AnnounceMode::LoadBalancer
        } else {
            AnnounceMode::Flat
        }
    }

    /// 转换为实例解析选项
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            name: self.name.clone(),
            advertise_address: self.ip.clone(),
            check_address: self.check_ip.clone(),
            domain: self.domain.clone(),
            mode: self.mode(),
            backend_type: self.backend_type.clone(),
        }
    }
}
