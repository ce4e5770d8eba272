//! Wire DTOs for the REST backend.
//!
//! The backend speaks JSON numbers for prices (`179.9`). They are kept as
//! [`serde_json::Number`] and parsed from their decimal text, so no value
//! ever passes through binary floating point on its way to [`Money`].

use kart_core::validation::validate_price;
use kart_core::{Money, Product, ProductId};
use serde::Deserialize;

use crate::error::ApiError;

/// Product as returned by `GET /products/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProduct {
    pub id: u64,
    pub title: String,
    pub price: serde_json::Number,
    pub image: String,
}

impl TryFrom<ApiProduct> for Product {
    type Error = ApiError;

    fn try_from(dto: ApiProduct) -> Result<Self, Self::Error> {
        let price: Money = dto
            .price
            .to_string()
            .parse()
            .map_err(|e| ApiError::Parse(format!("product {}: {}", dto.id, e)))?;
        validate_price(price).map_err(|e| ApiError::Parse(format!("product {}: {}", dto.id, e)))?;

        Ok(Product {
            id: ProductId::new(dto.id),
            name: dto.title,
            price,
            image_url: dto.image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<Product, ApiError> {
        let dto: ApiProduct = serde_json::from_str(json).unwrap();
        Product::try_from(dto)
    }

    #[test]
    fn test_wire_names_map_to_domain() {
        let product = decode(
            r#"{"id":1,"title":"Tênis de Caminhada Leve Confortável","price":179.9,"image":"https://cdn.example.com/1.jpg"}"#,
        )
        .unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Tênis de Caminhada Leve Confortável");
        assert_eq!(product.price, Money::from_cents(17990));
        assert_eq!(product.image_url, "https://cdn.example.com/1.jpg");
    }

    #[test]
    fn test_integer_and_small_prices() {
        let p = decode(r#"{"id":2,"title":"A","price":10,"image":""}"#).unwrap();
        assert_eq!(p.price, Money::from_cents(1000));

        let p = decode(r#"{"id":3,"title":"B","price":0.05,"image":""}"#).unwrap();
        assert_eq!(p.price, Money::from_cents(5));
    }

    #[test]
    fn test_rejects_unrepresentable_prices() {
        assert!(matches!(
            decode(r#"{"id":4,"title":"C","price":1.234,"image":""}"#),
            Err(ApiError::Parse(_))
        ));
        assert!(matches!(
            decode(r#"{"id":5,"title":"D","price":-1,"image":""}"#),
            Err(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let p = decode(r#"{"id":6,"title":"E","price":1.5,"image":"","amount":9}"#).unwrap();
        assert_eq!(p.price, Money::from_cents(150));
    }
}
