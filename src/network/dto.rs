use serde::{Deserialize, Deserializer};

use crate::domain::MenuItem;

/// Accepts a JSON integer or a string holding one, e.g. `10` or `"10"`.
fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// A menu item as published by the remote endpoint.
///
/// Unknown fields are ignored so the feed can grow without breaking decoding.
/// `id` and `price` may be published either as numbers or as quoted numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuItemDto {
    #[serde(deserialize_with = "int_or_string")]
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "int_or_string")]
    pub price: i64,
    #[serde(rename = "image")]
    pub image_url: String,
    pub category: String,
}

/// The whole remote document: `{ "menu": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuDocument {
    pub menu: Vec<MenuItemDto>,
}

impl From<MenuItemDto> for MenuItem {
    fn from(dto: MenuItemDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            price: dto.price,
            image_url: dto.image_url,
            category: dto.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(id: &str, price: &str) -> String {
        format!(
            r#"{{
                "menu": [
                    {{
                        "id": {id},
                        "title": "Greek Salad",
                        "description": "The famous greek salad",
                        "price": {price},
                        "image": "https://example.com/greekSalad.jpg",
                        "category": "starters",
                        "rating": 5
                    }}
                ]
            }}"#
        )
    }

    #[test]
    fn test_decodes_feed_and_ignores_unknown_fields() {
        let document: MenuDocument = serde_json::from_str(&document("1", "10")).unwrap();
        assert_eq!(document.menu.len(), 1);

        let item = MenuItem::from(document.menu[0].clone());
        assert_eq!(item.id, 1);
        assert_eq!(item.image_url, "https://example.com/greekSalad.jpg");
        assert_eq!(item.price, 10);
        assert_eq!(item.category, "starters");
    }

    #[test]
    fn test_quoted_numbers_are_accepted() {
        let document: MenuDocument = serde_json::from_str(&document(r#""7""#, r#""10""#)).unwrap();
        assert_eq!(document.menu[0].id, 7);
        assert_eq!(document.menu[0].price, 10);
    }

    #[test]
    fn test_non_numeric_price_fails() {
        for price in [r#""ten""#, r#""10.5""#, r#""""#, "10.5", "null"] {
            assert!(
                serde_json::from_str::<MenuDocument>(&document("1", price)).is_err(),
                "{price}"
            );
        }
    }

    #[test]
    fn test_missing_menu_key_fails() {
        assert!(serde_json::from_str::<MenuDocument>(r#"{"items": []}"#).is_err());
    }
}
