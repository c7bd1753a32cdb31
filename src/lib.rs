//! Shared fixtures for the cross-crate integration tests: a mock catalog and
//! a mock chat-completions server.

use serde_json::{json, Value};
use vitrine_search::Attribute;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Catalog API double
pub struct MockCatalog {
    pub server: MockServer,
}

impl MockCatalog {
    /// Start a catalog whose value lists and filter results are empty until mounted
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        for attribute in Attribute::ALL {
            Mock::given(method("GET"))
                .and(path(format!("/products/values/{attribute}")))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"column": attribute.as_str(), "values": []})),
                )
                .with_priority(10)
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/products/filter"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .with_priority(10)
            .mount(&server)
            .await;
        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub async fn values(&self, attribute: Attribute, values: &[&str]) {
        Mock::given(method("GET"))
            .and(path(format!("/products/values/{attribute}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"column": attribute.as_str(), "values": values})),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer filter queries carrying exactly these pairs
    pub async fn filter(&self, pairs: &[(Attribute, &str)], items: Value) {
        let mut mock = Mock::given(method("GET")).and(path("/products/filter"));
        for (attribute, value) in pairs {
            mock = mock.and(query_param(attribute.as_str(), *value));
        }
        let excluded: Vec<Attribute> = Attribute::ALL
            .into_iter()
            .filter(|a| !pairs.iter().any(|(p, _)| p == a))
            .collect();
        mock.and(move |request: &wiremock::Request| {
            request
                .url
                .query_pairs()
                .all(|(key, _)| !excluded.iter().any(|a| a.as_str() == key))
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(&self.server)
        .await;
    }

    /// Answer the unfiltered query
    pub async fn unfiltered(&self, items: Value) {
        self.filter(&[], items).await;
    }

    /// Every catalog request made so far, as `path?query`
    pub async fn requests(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| match r.url.query() {
                Some(query) => format!("{}?{}", r.url.path(), query),
                None => r.url.path().to_string(),
            })
            .collect()
    }
}

/// Chat-completions double replying with a fixed script
pub struct MockChat {
    pub server: MockServer,
}

impl MockChat {
    /// Replies are served in order; the last one repeats
    pub async fn start(replies: &[&str]) -> Self {
        let server = MockServer::start().await;
        for (index, reply) in replies.iter().enumerate() {
            let mock = Mock::given(method("POST"))
                .and(path("/chat/completions"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "choices": [{"message": {"role": "assistant", "content": reply}}]
                })));
            let mock = if index + 1 < replies.len() {
                mock.up_to_n_times(1)
            } else {
                mock
            };
            mock.mount(&server).await;
        }
        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }
}

/// Minimal product record as the catalog returns it
pub fn product(id: i64, name: &str, colour: &str, subcategory: &str) -> Value {
    json!({
        "product_id": id,
        "name": name,
        "image_url": format!("https://img.example.com/{id}.jpg"),
        "basecolour": colour,
        "subcategory": subcategory
    })
}
