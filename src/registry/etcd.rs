//! etcd 注册中心实现

use async_trait::async_trait;
use etcd_client::{Client, PutOptions};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::trait_def::KvStore;
use crate::error::Result;

/// etcd 键值注册中心
///
/// TTL 通过 lease 实现：每次写入先申请一个对应时长的租约，再把键
/// 挂到租约上。条目在租约到期后由 etcd 自动清除，因此调度循环每一轮
/// 的成功写入都相当于一次续期。
pub struct EtcdStore {
    client: Mutex<Client>,
}

impl EtcdStore {
    /// 连接 etcd
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let endpoint = format!("http://{}:{}", host, port);
        let client = Client::connect([endpoint.as_str()], None).await?;
        info!("connected to etcd at {}", endpoint);
        Ok(Self {
            client: Mutex::new(client),
        })
    }
}

#[async_trait]
impl KvStore for EtcdStore {
    async fn put(&self, key: &str, value: &str, ttl: i64) -> Result<()> {
        let mut client = self.client.lock().await;
        let lease = client.lease_grant(ttl, None).await?;
        let opts = PutOptions::new().with_lease(lease.id());
        client.put(key, value, Some(opts)).await?;
        debug!("put {} (ttl {}s)", key, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // etcd 的 delete 对不存在的键返回 deleted=0，不报错
        let mut client = self.client.lock().await;
        client.delete(key, None).await?;
        debug!("delete {}", key);
        Ok(())
    }
}
