//! 调度循环
//!
//! 以固定间隔驱动所有被监控实例走一遍 探测 -> 调和。

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::probe::TcpProber;
use crate::reconcile::Reconciler;
use crate::types::WatchedInstance;

/// 主循环，永不返回。
///
/// 每一轮按序对每个实例执行一次探测和一次调和，调和看到的一定是
/// 本轮的探测结果；整轮结束后休眠固定间隔。实例之间相互独立，
/// 遍历顺序无关紧要。循环自身没有终止条件，进程退出由调用方在
/// `tokio::select!` 中与中断信号竞争实现，取消发生在 await 点上。
pub async fn run_loop(
    prober: &TcpProber,
    reconciler: &Reconciler,
    instances: &HashMap<String, WatchedInstance>,
    interval: Duration,
) {
    loop {
        for (id, instance) in instances {
            debug!("health check for {}", id);
            let outcome = prober
                .probe(&instance.check_address, instance.check_port)
                .await;
            reconciler.reconcile(instance, outcome).await;
        }

        debug!("sleeping for {:?}", interval);
        tokio::time::sleep(interval).await;
    }
}
