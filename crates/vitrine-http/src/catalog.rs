//! Remote product catalog over HTTP

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;
use vitrine_search::{
    Attribute, CatalogClient, CatalogError, CatalogItem, DomainValues, FilterSet, ValuesService,
};

use crate::auth::{Credentials, TokenProvider};
use crate::client::{parse_base_url, HttpClient};
use crate::config::HttpConfig;
use crate::error::{HttpError, Result};

/// One product as returned by `products/single/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A nearest neighbour with its similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductNeighbor {
    pub product_id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarProducts {
    pub base_product: ProductSummary,
    #[serde(default)]
    pub neighbors: Vec<ProductNeighbor>,
}

/// A customer and the products on their account, from `customers/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "id_as_string")]
    pub customer_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub products: Vec<ProductSummary>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Customer ids are strings, but some catalogs send them as numbers
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number customer id, got {other}"
        ))),
    }
}

#[derive(Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    column: Option<String>,
    #[serde(default)]
    values: Vec<serde_json::Value>,
}

/// Catalog API client.
///
/// GETs go through the retry middleware; a 401 drops the cached token and the
/// request is sent once more with a fresh one.
pub struct HttpCatalogClient {
    base: Url,
    http: HttpClient,
    tokens: TokenProvider,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, credentials: Option<Credentials>, config: HttpConfig) -> Result<Self> {
        let base = parse_base_url(base_url)?;
        let tokens = TokenProvider::new(&base, credentials)?;
        let http = HttpClient::new(config)?;
        info!("Catalog client targeting {}", base);
        Ok(Self { base, http, tokens })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Fetch a single product by id
    pub async fn product(&self, id: i64) -> Result<ProductSummary> {
        let url = self.endpoint(&format!("products/single/{id}"))?;
        self.get_authorized(&url).await
    }

    /// Fetch a product and its nearest neighbours
    pub async fn similar(&self, id: i64) -> Result<SimilarProducts> {
        let url = self.endpoint(&format!("products/similar/{id}"))?;
        self.get_authorized(&url).await
    }

    /// Fetch a customer with their products
    pub async fn customer(&self, id: &str) -> Result<Customer> {
        let id = id.trim();
        if id.is_empty()
            || !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(HttpError::InvalidUrl(format!("invalid customer id: {id:?}")));
        }
        let url = self.endpoint(&format!("customers/{id}"))?;
        self.get_authorized(&url).await
    }

    /// Legal values of one attribute, in the order the catalog lists them
    pub async fn values(&self, attribute: Attribute) -> Result<Vec<String>> {
        let url = self.endpoint(&format!("products/values/{}", attribute.as_str()))?;
        let response: ValuesResponse = self.get_authorized(&url).await?;
        if let Some(column) = response.column.as_deref() {
            if column != attribute.as_str() {
                debug!("Values for {} came back labelled {}", attribute, column);
            }
        }
        Ok(response.values.iter().filter_map(stringify).collect())
    }

    /// Filtered product query
    pub async fn filter(&self, filters: &FilterSet, limit: usize) -> Result<Vec<CatalogItem>> {
        let mut url = self.endpoint("products/filter")?;
        url.query_pairs_mut()
            .extend_pairs(filters.query_pairs())
            .append_pair("limit", &limit.to_string());
        self.get_authorized(&url).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| HttpError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn get_authorized<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let token = self.tokens.token(&self.http).await?;
        match self.http.get_json(url, token.as_deref()).await {
            Err(e) if e.is_unauthorized() && self.tokens.has_credentials() => {
                warn!("Catalog rejected token, requesting a new one");
                self.tokens.invalidate().await;
                let token = self.tokens.token(&self.http).await?;
                self.http.get_json(url, token.as_deref()).await
            }
            other => other,
        }
    }
}

fn stringify(value: &serde_json::Value) -> Option<String> {
    let text = match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn query(
        &self,
        filters: &FilterSet,
        limit: usize,
    ) -> std::result::Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.filter(filters, limit).await?)
    }
}

#[async_trait]
impl ValuesService for HttpCatalogClient {
    async fn list_values(
        &self,
        attributes: &[Attribute],
    ) -> std::result::Result<DomainValues, CatalogError> {
        let lists = try_join_all(attributes.iter().map(|&attribute| async move {
            self.values(attribute).await.map(|values| (attribute, values))
        }))
        .await?;

        let mut snapshot = DomainValues::new();
        for (attribute, values) in lists {
            snapshot.set(attribute, values);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify_values() {
        assert_eq!(stringify(&json!("Green")), Some("Green".to_string()));
        assert_eq!(stringify(&json!(2012)), Some("2012".to_string()));
        assert_eq!(stringify(&json!("  ")), None);
        assert_eq!(stringify(&json!(null)), None);
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let client =
            HttpCatalogClient::new("https://shop.example.com/api", None, HttpConfig::catalog())
                .unwrap();
        assert_eq!(
            client.endpoint("products/single/7").unwrap().as_str(),
            "https://shop.example.com/api/products/single/7"
        );
    }

    #[test]
    fn test_customer_decode_accepts_numeric_id() {
        let customer: Customer = serde_json::from_value(json!({
            "customer_id": 12345,
            "first_name": "Ana",
            "last_name": "Ruiz",
            "products": [{"product_id": 9, "name": "Trail Gloves", "image_url": "9.jpg"}]
        }))
        .unwrap();

        assert_eq!(customer.customer_id, "12345");
        assert_eq!(customer.full_name(), "Ana Ruiz");
        assert_eq!(customer.products[0].product_id, 9);
        assert!(serde_json::from_value::<Customer>(json!({"customer_id": null})).is_err());
    }

    #[tokio::test]
    async fn test_customer_id_must_be_a_single_segment() {
        let client =
            HttpCatalogClient::new("https://shop.example.com", None, HttpConfig::catalog())
                .unwrap();
        for id in ["", "../admin", "1?x=2"] {
            assert!(matches!(
                client.customer(id).await,
                Err(HttpError::InvalidUrl(_))
            ));
        }
    }

    #[test]
    fn test_similar_products_decode() {
        let body = json!({
            "base_product": {"product_id": 1, "name": "Olive Jacket", "image_url": "a.jpg"},
            "neighbors": [
                {"product_id": 2, "name": "Green Jacket", "image_url": null, "score": 0.91}
            ]
        });
        let similar: SimilarProducts = serde_json::from_value(body).unwrap();
        assert_eq!(similar.base_product.category, None);
        assert_eq!(similar.neighbors.len(), 1);
        assert_eq!(similar.neighbors[0].image_url, None);
    }
}
