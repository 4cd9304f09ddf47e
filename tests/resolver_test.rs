//! 实例解析测试

use flare_sidecar::resolver::{resolve_instances, ResolveOptions};
use flare_sidecar::{identity, AnnounceMode, ContainerRecord, PortMapping, SidecarError};

/// 创建测试用的容器记录
fn create_container(names: &[&str], ports: &[(u16, Option<u16>)]) -> ContainerRecord {
    ContainerRecord {
        names: names.iter().map(|n| n.to_string()).collect(),
        ports: ports
            .iter()
            .map(|&(private_port, public_port)| PortMapping {
                private_port,
                public_port,
            })
            .collect(),
    }
}

/// 创建测试用的解析选项
fn create_options(name: &str, mode: AnnounceMode) -> ResolveOptions {
    ResolveOptions {
        name: name.to_string(),
        advertise_address: "10.0.0.5".to_string(),
        check_address: "0.0.0.0".to_string(),
        domain: "example.com".to_string(),
        mode,
        backend_type: "http".to_string(),
    }
}

/// 测试：扁平模式下每个对外端口生成一条记录
#[test]
fn test_flat_mode_one_entry_per_public_port() {
    let containers = vec![create_container(
        &["test"],
        &[(9200, Some(9200)), (9300, Some(9300))],
    )];
    let options = create_options("test", AnnounceMode::Flat);

    let instances = resolve_instances(&containers, &options).expect("resolve failed");

    assert_eq!(instances.len(), 2, "expected one entry per public port");

    let id = identity("test", "10.0.0.5", 9200);
    let instance = instances.get(&id).expect("instance for port 9200 missing");
    assert_eq!(instance.advertise_address, "10.0.0.5");
    assert_eq!(instance.advertise_port, 9200);
    assert_eq!(instance.check_address, "0.0.0.0");
    assert_eq!(instance.check_port, 9200);
    assert_eq!(instance.domain, "example.com");
    assert_eq!(instance.mode, AnnounceMode::Flat);
}

/// 测试：只有内外两侧都有绑定的端口才算对外端口
#[test]
fn test_unmapped_ports_are_ignored() {
    let containers = vec![create_container(
        &["test"],
        &[(9200, Some(9200)), (9300, None)],
    )];
    let options = create_options("test", AnnounceMode::Flat);

    let instances = resolve_instances(&containers, &options).expect("resolve failed");

    assert_eq!(instances.len(), 1);
    let id = identity("test", "10.0.0.5", 9200);
    assert!(instances.contains_key(&id));
}

/// 测试：负载均衡模式下整个服务只有一条记录，标识为服务名
#[test]
fn test_load_balancer_mode_single_entry() {
    let containers = vec![create_container(
        &["test"],
        &[(9200, Some(9200)), (9300, Some(9300))],
    )];
    let options = create_options("test", AnnounceMode::LoadBalancer);

    let instances = resolve_instances(&containers, &options).expect("resolve failed");

    assert_eq!(instances.len(), 1, "one entry per advertised route");
    assert!(instances.contains_key("test"));
}

/// 测试：负载均衡模式下多个对外端口时取清单顺序的最后一个
#[test]
fn test_load_balancer_last_port_wins() {
    let containers = vec![create_container(
        &["test"],
        &[(9200, Some(9200)), (9300, Some(9300))],
    )];
    let options = create_options("test", AnnounceMode::LoadBalancer);

    let instances = resolve_instances(&containers, &options).expect("resolve failed");
    let instance = instances.get("test").expect("instance missing");

    assert_eq!(instance.advertise_port, 9300);
    assert_eq!(instance.check_port, 9300);
}

/// 测试：名称必须精确相等，任何一个名称匹配即可
#[test]
fn test_name_matching_is_exact() {
    let containers = vec![create_container(
        &["test", "test-alias"],
        &[(9200, Some(9200))],
    )];

    let matched = resolve_instances(&containers, &create_options("test-alias", AnnounceMode::Flat))
        .expect("resolve failed");
    assert_eq!(matched.len(), 1);

    // 前缀/子串不算匹配
    let unmatched = resolve_instances(&containers, &create_options("test-", AnnounceMode::Flat))
        .expect("resolve failed");
    assert!(unmatched.is_empty());

    let slashed = resolve_instances(&containers, &create_options("/test", AnnounceMode::Flat))
        .expect("resolve failed");
    assert!(slashed.is_empty(), "names are matched after normalization");
}

/// 测试：没有任何容器匹配时返回空集合而不是错误
#[test]
fn test_no_matching_container_yields_empty_map() {
    let containers = vec![create_container(&["other"], &[(9200, Some(9200))])];
    let options = create_options("test", AnnounceMode::Flat);

    let instances = resolve_instances(&containers, &options).expect("resolve failed");
    assert!(instances.is_empty());
}

/// 测试：匹配到的容器没有对外端口是配置错误
#[test]
fn test_matched_container_without_public_ports_is_an_error() {
    let containers = vec![create_container(&["test"], &[(9200, None)])];
    let options = create_options("test", AnnounceMode::Flat);

    match resolve_instances(&containers, &options) {
        Err(SidecarError::NoPublicPorts { name }) => assert_eq!(name, "test"),
        other => panic!("expected NoPublicPorts, got {:?}", other.map(|m| m.len())),
    }
}
