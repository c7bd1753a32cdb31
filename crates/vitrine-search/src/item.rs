//! Catalog items returned by the product catalog

use serde::{Deserialize, Deserializer, Serialize};

use crate::attribute::Attribute;

/// A product record as returned by a filtered catalog query.
///
/// Identity is `product_id` alone; two records with the same id are the same
/// item whatever their other fields say.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub product_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastercategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articletype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basecolour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Absent and `null` both decode to an empty string
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CatalogItem {
    /// Minimal item with only an id and a name
    pub fn new(product_id: i64, name: impl Into<String>) -> Self {
        Self {
            product_id,
            name: name.into(),
            image_url: String::new(),
            category: None,
            gender: None,
            mastercategory: None,
            subcategory: None,
            articletype: None,
            basecolour: None,
            usage: None,
            season: None,
            year: None,
        }
    }

    /// Value this item carries for a filterable attribute
    pub fn attribute(&self, attribute: Attribute) -> Option<&str> {
        let value = match attribute {
            Attribute::Gender => &self.gender,
            Attribute::MasterCategory => &self.mastercategory,
            Attribute::SubCategory => &self.subcategory,
            Attribute::ArticleType => &self.articletype,
            Attribute::BaseColour => &self.basecolour,
            Attribute::Usage => &self.usage,
            Attribute::Season => &self.season,
        };
        value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_sparse_record() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"product_id": 15970, "name": "Turtle Check Men Navy Blue Shirt",
                "basecolour": "Navy Blue", "year": 2011}"#,
        )
        .unwrap();

        assert_eq!(item.product_id, 15970);
        assert_eq!(item.attribute(Attribute::BaseColour), Some("Navy Blue"));
        assert_eq!(item.attribute(Attribute::Season), None);
        assert_eq!(item.year, Some(2011));
        assert!(item.image_url.is_empty());
    }

    #[test]
    fn test_null_text_fields_decode_as_empty() {
        let items: Vec<CatalogItem> = serde_json::from_str(
            r#"[{"product_id": 1, "name": "Green Gloves", "image_url": null},
                {"product_id": 2, "name": null, "image_url": "https://img/2.jpg"}]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Green Gloves");
        assert!(items[0].image_url.is_empty());
        assert!(items[1].name.is_empty());
        assert_eq!(items[1].image_url, "https://img/2.jpg");
    }
}
