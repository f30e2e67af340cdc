//! Integration tests for `RegionClient` using wiremock HTTP mocks. Each test
//! runs one server for the primary family and one for the fallback.

use cementlife_core::{RegionId, RegionList, RegionLookup, RegionSource};
use cementlife_regions::RegionClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn servers() -> (MockServer, MockServer, RegionClient) {
    let primary = MockServer::start().await;
    let fallback = MockServer::start().await;
    let client = RegionClient::with_base_urls(&primary.uri(), &fallback.uri(), 5, "cementlife-test")
        .expect("client construction should not fail");
    (primary, fallback, client)
}

fn names(list: &RegionList) -> Vec<&str> {
    list.entries.iter().map(|e| e.name.as_str()).collect()
}

#[tokio::test]
async fn provinces_come_from_primary_when_it_answers() {
    let (primary, fallback, client) = servers().await;

    Mock::given(method("GET"))
        .and(path("/api/p/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Thành phố Hà Nội", "code": 1 },
            { "name": "Thành phố Hồ Chí Minh", "code": 79 }
        ])))
        .expect(1)
        .mount(&primary)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&fallback)
        .await;

    let list = client.provinces().await;

    assert_eq!(list.source, Some(RegionSource::Primary));
    assert_eq!(names(&list), ["Thành phố Hà Nội", "Thành phố Hồ Chí Minh"]);
    assert_eq!(list.entries[1].id, RegionId::Number(79));
}

#[tokio::test]
async fn server_error_falls_back_once() {
    let (primary, fallback, client) = servers().await;

    Mock::given(method("GET"))
        .and(path("/api/p/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&primary)
        .await;
    Mock::given(method("GET"))
        .and(path("/api-tinhthanh/1/0.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": 0,
            "error_text": "",
            "data": [
                { "id": "01", "name": "Hà Nội", "full_name": "Thành phố Hà Nội" }
            ]
        })))
        .expect(1)
        .mount(&fallback)
        .await;

    let list = client.provinces().await;

    assert_eq!(list.source, Some(RegionSource::Fallback));
    assert_eq!(names(&list), ["Hà Nội"]);
    assert_eq!(list.entries[0].id, RegionId::Text("01".into()));
}

#[tokio::test]
async fn unparseable_body_falls_back() {
    let (primary, fallback, client) = servers().await;

    Mock::given(method("GET"))
        .and(path("/api/p/79"))
        .and(query_param("depth", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&primary)
        .await;
    Mock::given(method("GET"))
        .and(path("/api-tinhthanh/2/79.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "id": "760", "name": "Quận 1" }]
        })))
        .mount(&fallback)
        .await;

    let list = client.districts(&RegionId::Number(79), None).await;

    assert_eq!(list.source, Some(RegionSource::Fallback));
    assert_eq!(names(&list), ["Quận 1"]);
}

#[tokio::test]
async fn object_without_list_counts_as_failure() {
    let (primary, fallback, client) = servers().await;

    Mock::given(method("GET"))
        .and(path("/api/d/760"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "detail": "Not Found" })),
        )
        .mount(&primary)
        .await;
    Mock::given(method("GET"))
        .and(path("/api-tinhthanh/3/760.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "id": "26734", "name": "Phường Bến Nghé" }]
        })))
        .mount(&fallback)
        .await;

    let list = client.wards(&RegionId::Number(760), None).await;

    assert_eq!(list.source, Some(RegionSource::Fallback));
    assert_eq!(names(&list), ["Phường Bến Nghé"]);
}

#[tokio::test]
async fn both_failing_yields_empty_list() {
    let (primary, fallback, client) = servers().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&primary)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&fallback)
        .await;

    let list = client.districts(&RegionId::Number(1), None).await;

    assert!(list.is_empty());
    assert_eq!(list.source, None);
}

#[tokio::test]
async fn district_detail_payload_is_unwrapped() {
    let (primary, _fallback, client) = servers().await;

    Mock::given(method("GET"))
        .and(path("/api/p/1"))
        .and(query_param("depth", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Thành phố Hà Nội",
            "code": 1,
            "districts": [
                { "name": "Quận Ba Đình", "code": 1, "wards": [] },
                { "name": "Quận Hoàn Kiếm", "code": 2, "wards": [] }
            ]
        })))
        .mount(&primary)
        .await;

    let list = client.districts(&RegionId::Number(1), None).await;

    assert_eq!(list.source, Some(RegionSource::Primary));
    assert_eq!(names(&list), ["Quận Ba Đình", "Quận Hoàn Kiếm"]);
}

#[tokio::test]
async fn pinned_family_is_the_only_one_asked() {
    let (primary, fallback, client) = servers().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "code": 999, "name": "should not be used" }
        ])))
        .expect(0)
        .mount(&primary)
        .await;
    Mock::given(method("GET"))
        .and(path("/api-tinhthanh/2/01.htm"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&fallback)
        .await;

    let list = client
        .districts(&RegionId::Text("01".into()), Some(RegionSource::Fallback))
        .await;

    assert!(list.is_empty());
    assert_eq!(list.source, None);
}

#[tokio::test]
async fn empty_list_from_primary_is_a_success() {
    let (primary, fallback, client) = servers().await;

    Mock::given(method("GET"))
        .and(path("/api/d/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Huyện đảo",
            "code": 5,
            "wards": []
        })))
        .mount(&primary)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&fallback)
        .await;

    let list = client.wards(&RegionId::Number(5), None).await;

    assert!(list.is_empty());
    assert_eq!(list.source, Some(RegionSource::Primary));
}
