//! 容器清单模块
//!
//! 封装 Docker Engine API，向解析器提供归一化的容器记录。

pub mod docker;

pub use docker::DockerInventory;

/// 端口映射记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    /// 容器内部端口
    pub private_port: u16,
    /// 对外映射的端口（没有映射时为 None）
    pub public_port: Option<u16>,
}

/// 归一化后的容器记录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRecord {
    /// 容器名列表（已去掉 Docker daemon 的前导 `/`）
    pub names: Vec<String>,
    /// 端口映射列表
    pub ports: Vec<PortMapping>,
}

impl ContainerRecord {
    /// 名称列表中是否有与目标服务名精确相等的项
    pub fn matches_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// 对外暴露的端口：内外两侧都有绑定的映射才算
    pub fn public_ports(&self) -> Vec<u16> {
        self.ports.iter().filter_map(|p| p.public_port).collect()
    }
}
