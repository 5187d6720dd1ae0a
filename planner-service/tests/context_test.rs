//! Wikipedia attraction lookup against a wiremock stand-in.

use planner_service::config::ContextConfig;
use planner_service::services::{AttractionSource, ProviderError, WikipediaAttractions};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> WikipediaAttractions {
    WikipediaAttractions::new(ContextConfig {
        enabled: true,
        api_url: format!("{}/w/api.php", server.uri()),
        result_limit: 2,
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn parses_search_hits_into_attractions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", "Kyoto, Japan notable attractions OR landmarks"))
        .and(query_param("srlimit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": {
                "search": [
                    {
                        "title": "Kinkaku-ji",
                        "snippet": "Zen <span class=\"searchmatch\">temple</span> in Kyoto"
                    },
                    { "title": "", "snippet": "untitled hit is skipped" },
                    {
                        "title": "Fushimi Inari-taisha",
                        "snippet": "Shinto shrine &amp; thousands of torii"
                    }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let attractions = source_for(&server).attractions("Kyoto, Japan").await.unwrap();

    assert_eq!(attractions.len(), 2);
    assert_eq!(attractions[0].name, "Kinkaku-ji");
    assert_eq!(attractions[0].description, "Zen temple in Kyoto");
    assert_eq!(attractions[1].description, "Shinto shrine & thousands of torii");
}

#[tokio::test]
async fn missing_query_block_means_no_attractions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "batchcomplete": "" })))
        .mount(&server)
        .await;

    assert!(source_for(&server).attractions("Atlantis").await.unwrap().is_empty());
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = source_for(&server).attractions("Paris").await.unwrap_err();

    assert!(matches!(err, ProviderError::ApiError(_)));
}
