use axum::body::Body;
use axum::http::{Request, StatusCode};
use netpol_gateway::client::Client;
use netpol_gateway::converters::{
    BgpPeerConverter, ConfigConverter, HostEndpointConverter, IpPoolConverter, NodeConverter,
    PolicyConverter, ProfileConverter, TierConverter, WorkloadEndpointConverter,
};
use netpol_gateway::server::build_router;
use netpol_gateway::state::AppState;
use netpol_kernel::api::{PolicyMetadata, TierMetadata, WorkloadEndpointMetadata};
use netpol_kernel::{
    ClientError, ConversionDirection, DatastoreError, Key, Resource, ResourceConverter,
    ResourceKind,
};
use netpol_testing::fixtures;
use netpol_testing::{BackendCall, MockBackend};
use std::fmt::Debug;
use std::sync::Arc;
use tower::ServiceExt;

fn setup() -> (Arc<MockBackend>, Client) {
    let backend = Arc::new(MockBackend::new());
    let client = Client::new(backend.clone());
    (backend, client)
}

async fn create_then_get<C>(client: &Client, converter: C, resource: C::Resource)
where
    C: ResourceConverter,
    C::Resource: PartialEq + Debug,
{
    let created = client.create(&converter, &resource).await.unwrap();
    assert_eq!(created, resource);
    let got = client.get(&converter, resource.metadata()).await.unwrap();
    assert_eq!(got, resource);
}

#[tokio::test]
async fn every_kind_reads_back_what_was_written() {
    let (backend, client) = setup();

    create_then_get(&client, TierConverter, fixtures::tier("security", 100.0)).await;
    create_then_get(&client, NodeConverter, fixtures::node("node-1")).await;
    create_then_get(&client, PolicyConverter, fixtures::policy("security", "web", 443)).await;
    create_then_get(&client, ProfileConverter, fixtures::profile("frontend")).await;
    create_then_get(
        &client,
        WorkloadEndpointConverter,
        fixtures::workload_endpoint("node-1", "ns.web-0", "eth0"),
    )
    .await;
    create_then_get(
        &client,
        HostEndpointConverter,
        fixtures::host_endpoint("node-1", "eth0"),
    )
    .await;
    create_then_get(&client, BgpPeerConverter, fixtures::bgp_peer("10.0.0.1", 64512)).await;
    create_then_get(&client, IpPoolConverter, fixtures::ip_pool("10.1.0.0/24")).await;
    create_then_get(&client, ConfigConverter, fixtures::config("LogLevel", "info")).await;

    assert_eq!(backend.stored(), 9);
}

#[tokio::test]
async fn address_identities_read_back_exactly_as_accepted() {
    let (backend, client) = setup();

    for cidr in ["10.1.2.3/16", "fd00:0::/64"] {
        assert!(matches!(
            client.ip_pools().create(&fixtures::ip_pool(cidr)).await,
            Err(ClientError::Validation(_))
        ));
    }
    assert!(matches!(
        client.bgp_peers().create(&fixtures::bgp_peer("fd00:0:0::1", 64512)).await,
        Err(ClientError::Validation(_))
    ));
    netpol_testing::assert_backend_called!(backend, 0);

    create_then_get(&client, IpPoolConverter, fixtures::ip_pool("10.1.0.0/16")).await;
    create_then_get(&client, IpPoolConverter, fixtures::ip_pool("fd00::/64")).await;
    create_then_get(&client, BgpPeerConverter, fixtures::bgp_peer("fd00::1", 64512)).await;
}

#[tokio::test]
async fn duplicate_create_leaves_store_unchanged() {
    let (backend, client) = setup();
    let original = fixtures::policy("default", "web", 80);
    client.policies().create(&original).await.unwrap();

    let err = client
        .policies()
        .create(&fixtures::policy("default", "web", 8080))
        .await
        .unwrap_err();
    assert!(err.is_already_exists());

    let got = client
        .policies()
        .get(&PolicyMetadata::new("default", "web"))
        .await
        .unwrap();
    assert_eq!(got, original);
    assert_eq!(backend.stored(), 1);
}

#[tokio::test]
async fn missing_objects_are_not_found() {
    let (_, client) = setup();
    let md = TierMetadata::new("ghost");
    assert!(client.tiers().get(&md).await.unwrap_err().is_not_found());
    assert!(client.tiers().delete(&md).await.unwrap_err().is_not_found());
    assert!(
        client
            .tiers()
            .update(&fixtures::tier("ghost", 1.0))
            .await
            .unwrap_err()
            .is_not_found()
    );
}

#[tokio::test]
async fn deleted_objects_stay_gone() {
    let (_, client) = setup();
    let pool = fixtures::ip_pool("192.168.0.0/16");
    client.ip_pools().create(&pool).await.unwrap();
    client.ip_pools().delete(&pool.metadata).await.unwrap();

    assert!(client.ip_pools().get(&pool.metadata).await.unwrap_err().is_not_found());
    let remaining = client.ip_pools().list(&Default::default()).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn apply_is_idempotent() {
    let (backend, client) = setup();
    let peer = fixtures::bgp_peer("fd00::1", 64513);
    let first = client.bgp_peers().apply(&peer).await.unwrap();
    let second = client.bgp_peers().apply(&peer).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(backend.stored(), 1);
}

#[tokio::test]
async fn list_returns_exactly_the_matching_objects() {
    let (_, client) = setup();
    let weps = [
        fixtures::workload_endpoint("node-1", "ns.a", "eth0"),
        fixtures::workload_endpoint("node-1", "ns.b", "eth0"),
        fixtures::workload_endpoint("node-2", "ns.c", "eth0"),
    ];
    for wep in &weps {
        client.workload_endpoints().create(wep).await.unwrap();
    }

    let all = client
        .workload_endpoints()
        .list(&WorkloadEndpointMetadata::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    for wep in &weps {
        assert!(all.iter().any(|listed| listed == wep));
    }

    let on_node_1 = client
        .workload_endpoints()
        .list(&WorkloadEndpointMetadata {
            node: "node-1".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(on_node_1.items, weps[..2].to_vec());
}

#[tokio::test]
async fn one_corrupt_entry_fails_the_whole_list() {
    let (backend, client) = setup();
    client.tiers().create(&fixtures::tier("a", 1.0)).await.unwrap();
    client.tiers().create(&fixtures::tier("c", 3.0)).await.unwrap();
    backend.plant(Key::new(ResourceKind::Tier, ["b"]), "{not json");

    let err = client.tiers().list(&TierMetadata::default()).await.unwrap_err();
    match err {
        ClientError::Conversion(err) => assert_eq!(err.direction, ConversionDirection::FromBackend),
        other => panic!("expected a conversion failure, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_input_never_reaches_the_datastore() {
    let (backend, client) = setup();

    let bad_name = fixtures::tier("not a name", 1.0);
    assert!(matches!(
        client.tiers().create(&bad_name).await,
        Err(ClientError::Validation(_))
    ));

    let mut bad_rule = fixtures::policy("default", "web", 80);
    bad_rule.spec.ingress[0].protocol = Some("icmp".into());
    assert!(matches!(
        client.policies().apply(&bad_rule).await,
        Err(ClientError::Validation(_))
    ));

    // Valid but lacking identity.
    assert!(matches!(
        client.nodes().create(&fixtures::node("")).await,
        Err(ClientError::Conversion(_))
    ));

    netpol_testing::assert_backend_called!(backend, 0);
}

#[tokio::test]
async fn datastore_failures_are_not_masked() {
    let (backend, client) = setup();
    client.profiles().create(&fixtures::profile("p1")).await.unwrap();
    backend.clear_history().await;

    backend.go_offline_once().await;
    let err = client.profiles().create(&fixtures::profile("p2")).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Backend(DatastoreError::Unavailable("mock datastore offline".into()))
    );

    // A datastore "already exists" on update is not an identity outcome.
    backend
        .fail_next(DatastoreError::ResourceAlreadyExists(Key::new(
            ResourceKind::Profile,
            ["p1"],
        )))
        .await;
    let err = client.profiles().update(&fixtures::profile("p1")).await.unwrap_err();
    assert!(matches!(err, ClientError::Backend(_)));

    assert_eq!(
        backend.history().await,
        vec![
            BackendCall::Create(Key::new(ResourceKind::Profile, ["p2"])),
            BackendCall::Update(Key::new(ResourceKind::Profile, ["p1"])),
        ]
    );
}

#[tokio::test]
async fn initialization_prepares_store_then_assigns_guid() {
    let (backend, client) = setup();
    client.ensure_initialized().await.unwrap();

    let history = backend.history().await;
    assert_eq!(history[0], BackendCall::EnsureInitialized);
    assert!(matches!(
        history[1],
        BackendCall::Create(ref key) if key.kind() == ResourceKind::Config
    ));
    assert_eq!(backend.stored(), 1);
}

#[tokio::test]
async fn unreachable_datastore_is_a_gateway_error_over_http() {
    let (backend, client) = setup();
    let router = build_router(Arc::new(AppState::new(client)));
    backend.go_offline_once().await;

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/tier")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    netpol_testing::assert_backend_called!(backend, 1);
}
