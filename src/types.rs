use std::fmt;

/// 注册策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnounceMode {
    /// 扁平模式：单键 `{prefix}/{domain}/{id}` -> `"ip:port"`
    Flat,
    /// 负载均衡模式：vulcand backend / server / frontend 三键
    LoadBalancer,
}

impl fmt::Display for AnnounceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnounceMode::Flat => write!(f, "flat"),
            AnnounceMode::LoadBalancer => write!(f, "load-balancer"),
        }
    }
}

/// 被监控的服务实例
///
/// 启动时由解析器一次性生成，进程生命周期内不变。
/// 上报地址和探测地址分别显式保存，即使二者相同也不做隐式回退。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedInstance {
    /// 稳定实例标识：扁平模式下为内容散列，负载均衡模式下为服务名
    pub id: String,
    /// 对外公布的地址
    pub advertise_address: String,
    /// 对外公布的端口
    pub advertise_port: u16,
    /// 健康检查使用的地址
    pub check_address: String,
    /// 健康检查使用的端口
    pub check_port: u16,
    /// 该实例服务的域名/路由
    pub domain: String,
    /// 注册策略
    pub mode: AnnounceMode,
    /// 后端协议类型（仅负载均衡模式使用）
    pub backend_type: String,
}

impl WatchedInstance {
    /// 对外公布的 `"ip:port"` 地址
    pub fn advertise_endpoint(&self) -> String {
        format!("{}:{}", self.advertise_address, self.advertise_port)
    }
}
