//! 注册表调和模块
//!
//! 把注册表状态收敛到探测结果对应的期望状态：健康则带 TTL 写入
//! （等价于续期），失联则删除。所有操作幂等，每一轮都可以安全重放。
//! 注册表层面的失败被记录后吞掉，不会中断循环，下一轮自然重试。

use serde::Serialize;
use tracing::error;

use crate::probe::ProbeOutcome;
use crate::registry::KvStore;
use crate::types::{AnnounceMode, WatchedInstance};

/// vulcand backend 命名空间
const VULCAND_BACKENDS: &str = "/vulcand/backends";
/// vulcand frontend 命名空间
const VULCAND_FRONTENDS: &str = "/vulcand/frontends";

/// vulcand backend 记录
#[derive(Debug, Serialize)]
struct BackendRecord<'a> {
    #[serde(rename = "Type")]
    backend_type: &'a str,
}

/// vulcand server 记录
#[derive(Debug, Serialize)]
struct ServerRecord {
    #[serde(rename = "URL")]
    url: String,
}

/// vulcand frontend 记录
#[derive(Debug, Serialize)]
struct FrontendRecord<'a> {
    #[serde(rename = "Type")]
    backend_type: &'a str,
    #[serde(rename = "BackendId")]
    backend_id: &'a str,
    #[serde(rename = "Route")]
    route: String,
}

/// 注册表调和器
pub struct Reconciler {
    store: Box<dyn KvStore>,
    prefix: String,
    ttl: i64,
}

impl Reconciler {
    /// 创建调和器
    ///
    /// # 参数
    /// * `store` - 注册中心客户端
    /// * `prefix` - 扁平模式的上报根路径
    /// * `ttl` - 注册条目的存活秒数
    pub fn new(store: Box<dyn KvStore>, prefix: impl Into<String>, ttl: i64) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            ttl,
        }
    }

    /// 根据一次探测结果调和该实例对应的注册表条目
    pub async fn reconcile(&self, instance: &WatchedInstance, outcome: ProbeOutcome) {
        match instance.mode {
            AnnounceMode::Flat => self.reconcile_flat(instance, outcome).await,
            AnnounceMode::LoadBalancer => self.reconcile_load_balancer(instance, outcome).await,
        }
    }

    /// 扁平模式：单键 `{prefix}/{domain}/{id}` -> `"ip:port"`
    async fn reconcile_flat(&self, instance: &WatchedInstance, outcome: ProbeOutcome) {
        let key = format!("{}/{}/{}", self.prefix, instance.domain, instance.id);
        if outcome.is_healthy() {
            self.try_put(&key, &instance.advertise_endpoint()).await;
        } else {
            self.try_delete(&key).await;
        }
    }

    /// 负载均衡模式：backend / server / frontend 三键一起写入或删除。
    ///
    /// 每个键独立操作，单键失败不阻断其余键。
    async fn reconcile_load_balancer(&self, instance: &WatchedInstance, outcome: ProbeOutcome) {
        let backend_key = format!("{}/{}/backend", VULCAND_BACKENDS, instance.domain);
        let server_key = format!(
            "{}/{}/servers/{}",
            VULCAND_BACKENDS, instance.domain, instance.id
        );
        let frontend_key = format!("{}/{}/frontend", VULCAND_FRONTENDS, instance.domain);

        if outcome.is_healthy() {
            self.try_put_record(
                &backend_key,
                &BackendRecord {
                    backend_type: &instance.backend_type,
                },
            )
            .await;
            self.try_put_record(
                &server_key,
                &ServerRecord {
                    url: format!("http://{}", instance.advertise_endpoint()),
                },
            )
            .await;
            self.try_put_record(
                &frontend_key,
                &FrontendRecord {
                    backend_type: &instance.backend_type,
                    backend_id: &instance.domain,
                    route: format!("Host(`{}`)", instance.domain),
                },
            )
            .await;
        } else {
            self.try_delete(&backend_key).await;
            self.try_delete(&server_key).await;
            self.try_delete(&frontend_key).await;
        }
    }

    /// 序列化一条记录并写入，失败记日志后返回
    async fn try_put_record<T: Serialize>(&self, key: &str, record: &T) {
        match serde_json::to_string(record) {
            Ok(value) => self.try_put(key, &value).await,
            Err(e) => error!("failed to encode record for {}: {}", key, e),
        }
    }

    async fn try_put(&self, key: &str, value: &str) {
        if let Err(e) = self.store.put(key, value, self.ttl).await {
            error!("registry put {} failed: {}", key, e);
        }
    }

    async fn try_delete(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            error!("registry delete {} failed: {}", key, e);
        }
    }
}
