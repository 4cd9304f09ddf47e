//! 注册中心 Trait 定义

use async_trait::async_trait;

use crate::error::Result;

/// 带 TTL 的键值注册中心
///
/// 写入的条目在 `ttl` 秒内未被重新写入时自动过期；
/// 删除不存在的键不是错误。
#[async_trait]
pub trait KvStore: Send + Sync {
    /// 写入（覆盖）一个键，条目在 ttl 秒后过期
    async fn put(&self, key: &str, value: &str, ttl: i64) -> Result<()>;

    /// 删除一个键
    async fn delete(&self, key: &str) -> Result<()>;
}
