//! End-to-end resource and data source behaviour against the fake API

mod common;

use bpkio_plugin::{ActionType, Severity};
use common::{
    FakeApi, Kind, apply, assert_ok, call, configured, configured_with_key, destroy, read,
    read_data_source,
};
use serde_json::{Value, json};

const SLATE: &str = "bpkio_source_slate";
const LIVE: &str = "bpkio_source_live";
const AD_SERVER: &str = "bpkio_source_adserver";
const AD_INSERTION: &str = "bpkio_service_ad_insertion";

fn slate_config() -> Value {
    json!({"name": "tf-acc-test-slate", "url": "https://example/slate.jpg"})
}

fn id_of(state: &Value) -> u64 {
    state["id"].as_u64().unwrap()
}

#[tokio::test]
async fn test_slate_create_fills_defaults_and_computed() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;

    let response = apply(&server, SLATE, &Value::Null, slate_config()).await;
    assert_ok(&response);
    assert_eq!(response.action, Some(ActionType::Create));
    let state = response.new_state.unwrap();
    assert_eq!(state["description"], json!(""));
    assert_eq!(state["format"], json!("jpg"));
    assert_eq!(state["type"], json!("slate"));
    assert!(state["id"].as_u64().is_some());
}

#[tokio::test]
async fn test_read_is_idempotent_and_plan_is_empty() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let state = apply(&server, SLATE, &Value::Null, slate_config())
        .await
        .new_state
        .unwrap();

    let first = read(&server, SLATE, &state).await;
    let second = read(&server, SLATE, &state).await;
    assert_ok(&first);
    assert_eq!(first.new_state, second.new_state);
    assert_eq!(first.new_state.as_ref(), Some(&state));

    let plan = call(
        &server,
        json!({
            "method": "plan_resource_change",
            "params": {"type_name": SLATE, "prior_state": state, "config": slate_config()}
        }),
    )
    .await;
    assert_eq!(plan.action, Some(ActionType::NoOp));
}

#[tokio::test]
async fn test_update_reflects_the_sent_fields() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let config = json!({
        "name": "channel",
        "url": "https://origin.example.com/live.m3u8",
        "origin": {"custom_headers": [{"name": "X-Token", "value": "abc"}]}
    });
    let state = apply(&server, LIVE, &Value::Null, config)
        .await
        .new_state
        .unwrap();
    assert_eq!(state["multi_period"], json!(false));
    assert_eq!(
        state["origin"]["custom_headers"][0],
        json!({"name": "X-Token", "value": "abc"})
    );

    let updated = apply(
        &server,
        LIVE,
        &state,
        json!({
            "name": "channel-2",
            "url": "https://origin.example.com/live.m3u8",
            "description": "main feed",
            "multi_period": true
        }),
    )
    .await;
    assert_ok(&updated);
    assert_eq!(updated.action, Some(ActionType::Update));
    let new_state = updated.new_state.unwrap();
    assert_eq!(new_state["id"], state["id"]);
    assert_eq!(new_state["name"], json!("channel-2"));
    assert_eq!(new_state["description"], json!("main feed"));
    assert_eq!(new_state["multi_period"], json!(true));
    assert_eq!(new_state["origin"], Value::Null);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let state = apply(&server, SLATE, &Value::Null, slate_config())
        .await
        .new_state
        .unwrap();

    let deleted = destroy(&server, SLATE, &state).await;
    assert_ok(&deleted);
    assert_eq!(deleted.action, Some(ActionType::Delete));
    assert_eq!(deleted.new_state, Some(Value::Null));
    assert!(api.stored(id_of(&state)).is_none());

    let again = destroy(&server, SLATE, &state).await;
    assert_ok(&again);
    assert_eq!(again.new_state, Some(Value::Null));
}

#[tokio::test]
async fn test_external_removal_drops_state() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let state = apply(&server, SLATE, &Value::Null, slate_config())
        .await
        .new_state
        .unwrap();

    api.remove(id_of(&state));
    let response = read(&server, SLATE, &state).await;
    assert_ok(&response);
    assert_eq!(response.new_state, Some(Value::Null));
}

#[tokio::test]
async fn test_import() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let state = apply(&server, SLATE, &Value::Null, slate_config())
        .await
        .new_state
        .unwrap();

    let before = api.requests();
    let bad = call(
        &server,
        json!({"method": "import_resource_state", "params": {"type_name": SLATE, "id": "abc"}}),
    )
    .await;
    assert_eq!(api.requests(), before);
    let diag = bad.diagnostics.iter().next().unwrap();
    assert_eq!(diag.summary, "Error Importing Resource");
    assert!(diag.detail.contains("abc"));
    assert_eq!(bad.new_state, Some(Value::Null));

    let id = id_of(&state).to_string();
    let imported = call(
        &server,
        json!({"method": "import_resource_state", "params": {"type_name": SLATE, "id": id}}),
    )
    .await;
    assert_ok(&imported);
    let read_back = read(&server, SLATE, &state).await;
    assert_eq!(imported.new_state, read_back.new_state);

    let missing = call(
        &server,
        json!({"method": "import_resource_state", "params": {"type_name": SLATE, "id": "9999"}}),
    )
    .await;
    assert!(missing.diagnostics.has_error());
}

#[tokio::test]
async fn test_import_record_with_null_fields() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let id = api.insert(
        Kind::AdServer,
        json!({
            "name": "ads",
            "url": "https://ads.example.com/vast",
            "description": null,
            "queries": null,
            "queryParameters": null
        }),
    )
    .to_string();

    let imported = call(
        &server,
        json!({"method": "import_resource_state", "params": {"type_name": AD_SERVER, "id": id}}),
    )
    .await;
    assert_ok(&imported);
    let state = imported.new_state.unwrap();
    assert_eq!(state["description"], json!(""));
    assert_eq!(state["queries"], json!(""));
    assert_eq!(state["query_parameters"], Value::Null);

    let sources = read_data_source(&server, "bpkio_sources", json!({})).await;
    assert_ok(&sources);
}

#[tokio::test]
async fn test_api_validation_error_is_surfaced() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let response = apply(
        &server,
        SLATE,
        &Value::Null,
        json!({"name": "slate", "url": "not-a-url"}),
    )
    .await;
    assert_eq!(response.new_state, Some(Value::Null));
    let diag = response.diagnostics.iter().next().unwrap();
    assert_eq!(diag.summary, "Error Creating Slate");
    assert!(diag.detail.contains("url must be an URL address"));
}

#[tokio::test]
async fn test_update_with_failed_read_back_keeps_planned_values() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let state = apply(&server, SLATE, &Value::Null, slate_config())
        .await
        .new_state
        .unwrap();

    api.fail_next_get();
    let response = apply(
        &server,
        SLATE,
        &state,
        json!({"name": "renamed", "url": "https://example/slate.jpg"}),
    )
    .await;
    let diag = response.diagnostics.iter().next().unwrap();
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.summary, "Error Reading Updated Slate");
    let new_state = response.new_state.unwrap();
    assert_eq!(new_state["name"], json!("renamed"));
    assert_eq!(new_state["id"], state["id"]);
    assert_eq!(new_state["format"], json!("jpg"));
    assert_eq!(api.stored(id_of(&state)).unwrap()["name"], json!("renamed"));
}

#[tokio::test]
async fn test_ad_server_sends_custom_template_and_parameters() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let config = json!({
        "name": "ads",
        "url": "https://ads.example.com/vast",
        "query_parameters": [
            {"type": "from-variable", "name": "session", "value": "$session_id"},
            {"type": "custom", "name": "site", "value": "tv"}
        ]
    });

    let response = apply(&server, AD_SERVER, &Value::Null, config.clone()).await;
    assert_ok(&response);
    let state = response.new_state.unwrap();
    assert_eq!(state["queries"], json!(""));
    assert_eq!(state["query_parameters"][1]["name"], json!("site"));

    let stored = api.stored(id_of(&state)).unwrap();
    assert_eq!(stored["template"], json!("custom"));
    assert_eq!(stored["queryParameters"][0]["type"], json!("from-variable"));

    let bare = apply(
        &server,
        AD_SERVER,
        &Value::Null,
        json!({"name": "bare", "url": "https://ads.example.com/vast"}),
    )
    .await;
    assert_ok(&bare);
    assert_eq!(bare.new_state.unwrap()["query_parameters"], Value::Null);
}

#[tokio::test]
async fn test_ad_server_config_validation() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let response = call(
        &server,
        json!({
            "method": "validate_resource_config",
            "params": {
                "type_name": AD_SERVER,
                "config": {
                    "name": "ads",
                    "url": "https://ads.example.com/vast",
                    "queries": "a=1",
                    "query_parameters": [{"type": "bogus", "name": "x", "value": "y"}]
                }
            }
        }),
    )
    .await;
    let errors: Vec<_> = response.diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].attribute.as_deref(),
        Some("query_parameters[0].type")
    );
    assert!(
        response
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning && d.attribute.as_deref() == Some("queries"))
    );
}

#[tokio::test]
async fn test_ad_insertion_links_and_null_blocks() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let live = api.insert(
        Kind::Live,
        json!({"name": "channel", "url": "https://origin.example.com/live.m3u8"}),
    );
    let ads = api.insert(
        Kind::AdServer,
        json!({"name": "ads", "url": "https://ads.example.com/vast", "queryParameters": []}),
    );
    let profile = api.seed_transcoding_profile("hd");

    let config = json!({
        "name": "svc",
        "source": {"id": live},
        "transcoding_profile": {"id": profile},
        "live_ad_preroll": {"ad_server": {"id": ads}, "max_duration": 30},
        "live_ad_replacement": {"ad_server": {"id": ads}}
    });
    let response = apply(&server, AD_INSERTION, &Value::Null, config.clone()).await;
    assert_ok(&response);
    let state = response.new_state.unwrap();

    assert_eq!(state["source"]["name"], json!("channel"));
    assert_eq!(state["source"]["format"], json!("hls"));
    assert_eq!(state["transcoding_profile"]["internal_id"], json!("tp-hd"));
    assert_eq!(state["live_ad_preroll"]["ad_server"]["name"], json!("ads"));
    assert_eq!(state["live_ad_preroll"]["max_duration"], json!(30));
    assert_eq!(state["live_ad_preroll"]["offset"], json!(0));
    assert_eq!(state["live_ad_replacement"]["gap_filler"], Value::Null);
    assert_eq!(state["live_ad_replacement"]["spot_aware"], Value::Null);
    assert_eq!(state["advanced_options"], Value::Null);
    assert_eq!(state["server_side_ad_tracking"], Value::Null);
    assert_eq!(state["tags"], json!([]));
    assert_eq!(state["enable_ad_transcoding"], json!(true));
    assert_eq!(state["state"], json!("enabled"));

    let plan = call(
        &server,
        json!({
            "method": "plan_resource_change",
            "params": {"type_name": AD_INSERTION, "prior_state": state, "config": config}
        }),
    )
    .await;
    assert_eq!(plan.action, Some(ActionType::NoOp));
}

#[tokio::test]
async fn test_ad_insertion_update_replaces_blocks() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let live = api.insert(
        Kind::Live,
        json!({"name": "channel", "url": "https://origin.example.com/live.m3u8"}),
    );
    let ads = api.insert(
        Kind::AdServer,
        json!({"name": "ads", "url": "https://ads.example.com/vast"}),
    );
    let slate = api.insert(
        Kind::Slate,
        json!({"name": "filler", "url": "https://example/filler.mp4"}),
    );

    let state = apply(
        &server,
        AD_INSERTION,
        &Value::Null,
        json!({
            "name": "svc",
            "source": {"id": live},
            "live_ad_preroll": {"ad_server": {"id": ads}}
        }),
    )
    .await
    .new_state
    .unwrap();

    let response = apply(
        &server,
        AD_INSERTION,
        &state,
        json!({
            "name": "svc",
            "tags": ["prod"],
            "source": {"id": live},
            "live_ad_replacement": {
                "ad_server": {"id": ads},
                "gap_filler": {"id": slate},
                "spot_aware": {}
            },
            "server_side_ad_tracking": {},
            "advanced_options": {
                "authorization_header": {"name": "Authorization", "value": "Bearer origin"}
            }
        }),
    )
    .await;
    assert_ok(&response);
    let updated = response.new_state.unwrap();

    assert_eq!(updated["live_ad_preroll"], Value::Null);
    assert_eq!(updated["tags"], json!(["prod"]));
    assert_eq!(updated["live_ad_replacement"]["gap_filler"]["name"], json!("filler"));
    assert_eq!(
        updated["live_ad_replacement"]["spot_aware"]["mode"],
        json!("disabled")
    );
    assert_eq!(
        updated["server_side_ad_tracking"],
        json!({"enable": true, "check_ad_media_segment_availability": false})
    );
    assert_eq!(
        updated["advanced_options"]["authorization_header"]["name"],
        json!("Authorization")
    );
    assert_eq!(updated["creation_date"], state["creation_date"]);
    assert_ne!(updated["update_date"], state["update_date"]);
}

#[tokio::test]
async fn test_lookup_data_sources() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    let slate = api.insert(
        Kind::Slate,
        json!({"name": "filler", "url": "https://example/filler.png"}),
    );

    let found = read_data_source(&server, SLATE, json!({"id": slate})).await;
    assert_ok(&found);
    let state = found.new_state.unwrap();
    assert_eq!(state["name"], json!("filler"));
    assert_eq!(state["format"], json!("png"));

    let missing = read_data_source(&server, SLATE, json!({"id": 4242})).await;
    let diag = missing.diagnostics.iter().next().unwrap();
    assert_eq!(diag.summary, "Unable to Read Slate");
    assert_eq!(missing.new_state, Some(Value::Null));

    let readonly = call(
        &server,
        json!({
            "method": "validate_data_source_config",
            "params": {"type_name": SLATE, "config": {"id": slate, "name": "x"}}
        }),
    )
    .await;
    assert!(readonly.diagnostics.has_error());
}

#[tokio::test]
async fn test_listing_data_sources() {
    let api = FakeApi::start().await;
    let server = configured(&api).await;
    api.insert(
        Kind::Live,
        json!({"name": "channel", "url": "https://origin.example.com/live.m3u8"}),
    );
    api.insert(
        Kind::Slate,
        json!({"name": "filler", "url": "https://example/filler.png"}),
    );
    api.insert(Kind::AdInsertion, json!({"name": "svc", "tags": ["prod"]}));
    api.seed_transcoding_profile("hd");

    let all = read_data_source(&server, "bpkio_sources", json!({})).await;
    assert_ok(&all);
    assert_eq!(all.new_state.unwrap()["sources"].as_array().unwrap().len(), 2);

    let live = read_data_source(&server, "bpkio_sources", json!({"type": "live"})).await;
    let sources = live.new_state.unwrap()["sources"].clone();
    assert_eq!(sources.as_array().unwrap().len(), 1);
    assert_eq!(sources[0]["name"], json!("channel"));

    let none = read_data_source(&server, "bpkio_sources", json!({"type": "asset"})).await;
    assert_eq!(none.new_state.unwrap()["sources"], json!([]));

    let services = read_data_source(&server, "bpkio_services", json!({"state": "enabled"})).await;
    assert_ok(&services);
    let services = services.new_state.unwrap()["services"].clone();
    assert_eq!(services[0]["tags"], json!(["prod"]));

    let profiles = read_data_source(&server, "bpkio_transcoding_profiles", json!({})).await;
    assert_ok(&profiles);
    let profiles = profiles.new_state.unwrap()["profiles"].clone();
    assert_eq!(profiles[0]["content"], json!(r#"{"ladder":[]}"#));
}

#[tokio::test]
async fn test_unconfigured_provider_rejects_calls() {
    let server = bpkio_plugin::ProviderServer::new(bpkio_provider::BpkioProvider::new());
    let response = read(&server, SLATE, &json!({"id": 1})).await;
    assert_eq!(
        response.diagnostics.iter().next().unwrap().summary,
        "Provider Not Configured"
    );
}

#[tokio::test]
async fn test_wrong_api_key_fails_reads() {
    let api = FakeApi::start().await;
    let server = configured_with_key(&api, "wrong").await;
    let response = read_data_source(&server, "bpkio_sources", json!({})).await;
    let diag = response.diagnostics.iter().next().unwrap();
    assert!(diag.detail.contains("401"));
}
