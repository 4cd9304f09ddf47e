//! 实例解析模块
//!
//! 启动时执行一次：按服务名从容器清单中找出匹配实例，
//! 为每个对外暴露的端口生成一条 `WatchedInstance` 记录。
//! 结果集在进程生命周期内不再变化。

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{Result, SidecarError};
use crate::identity::identity;
use crate::inventory::ContainerRecord;
use crate::types::{AnnounceMode, WatchedInstance};

/// 实例解析选项
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// 目标服务/容器名（精确匹配）
    pub name: String,
    /// 对外公布的地址
    pub advertise_address: String,
    /// 健康检查使用的地址
    pub check_address: String,
    /// 上报的域名/路由
    pub domain: String,
    /// 注册策略
    pub mode: AnnounceMode,
    /// 后端协议类型（负载均衡模式）
    pub backend_type: String,
}

/// 从容器清单解析出被监控实例集合，键为实例标识。
///
/// - 扁平模式：每个对外端口一条记录，标识为 (名称, 地址, 端口) 散列；
/// - 负载均衡模式：整个服务一条记录，标识为服务名本身，一条路由只有
///   一个条目，多个对外端口时取清单顺序的最后一个。
///
/// 没有容器匹配时返回空集合（循环会空转，不是错误）；
/// 匹配到的容器没有对外端口则是配置错误，启动失败。
pub fn resolve_instances(
    containers: &[ContainerRecord],
    options: &ResolveOptions,
) -> Result<HashMap<String, WatchedInstance>> {
    let mut matching = HashMap::new();

    for container in containers {
        if !container.matches_name(&options.name) {
            continue;
        }

        let ports = container.public_ports();
        if ports.is_empty() {
            return Err(SidecarError::NoPublicPorts {
                name: options.name.clone(),
            });
        }

        for port in ports {
            let id = match options.mode {
                AnnounceMode::Flat => identity(&options.name, &options.advertise_address, port),
                AnnounceMode::LoadBalancer => options.name.clone(),
            };

            debug!(
                "watching {} -> {}:{} (check {}:{})",
                id, options.advertise_address, port, options.check_address, port
            );

            matching.insert(
                id.clone(),
                WatchedInstance {
                    id,
                    advertise_address: options.advertise_address.clone(),
                    advertise_port: port,
                    check_address: options.check_address.clone(),
                    check_port: port,
                    domain: options.domain.clone(),
                    mode: options.mode,
                    backend_type: options.backend_type.clone(),
                },
            );
        }
    }

    info!(
        "resolved {} instance(s) for service {} in {} mode",
        matching.len(),
        options.name,
        options.mode
    );
    Ok(matching)
}
