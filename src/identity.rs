//! 实例标识生成

use sha2::{Digest, Sha256};

/// 根据 (服务名, 地址, 端口) 生成稳定的实例标识。
///
/// 纯函数，进程重启后相同输入生成相同标识，重新上报会落在原有的
/// 注册键上而不是产生重复条目；名称、地址、端口任何一项不同都会
/// 得到不同的标识。取 SHA-256 摘要的前 128 位，小写十六进制编码。
pub fn identity(name: &str, address: &str, port: u16) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(address.as_bytes());
    hasher.update([0u8]);
    hasher.update(port.to_be_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}
