use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub created_at: OffsetDateTime,
}

impl Product {
    pub fn new(name: &str, price: f64) -> Result<Self, AppError> {
        let name = validate(name, price)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            price,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    /// Replace name and price; id and creation time stay as they were.
    pub fn update(&mut self, name: &str, price: f64) -> Result<(), AppError> {
        self.name = validate(name, price)?;
        self.price = price;
        Ok(())
    }
}

fn validate(name: &str, price: f64) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation("price must be a non-negative number".into()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_gets_id() {
        let a = Product::new("Keyboard", 49.9).unwrap();
        let b = Product::new("Keyboard", 49.9).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Keyboard");
        assert_eq!(a.price, 49.9);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(Product::new("", 1.0), Err(AppError::Validation(_))));
        assert!(matches!(Product::new("   ", 1.0), Err(AppError::Validation(_))));
    }

    #[test]
    fn negative_or_non_finite_price_is_rejected() {
        assert!(matches!(Product::new("Mouse", -0.01), Err(AppError::Validation(_))));
        assert!(matches!(Product::new("Mouse", f64::NAN), Err(AppError::Validation(_))));
        assert!(matches!(Product::new("Mouse", f64::INFINITY), Err(AppError::Validation(_))));
    }

    #[test]
    fn zero_price_is_allowed() {
        assert_eq!(Product::new("Sticker", 0.0).unwrap().price, 0.0);
    }

    #[test]
    fn update_keeps_identity() {
        let mut p = Product::new("Mouse", 10.0).unwrap();
        let (id, created_at) = (p.id, p.created_at);
        p.update("Wireless mouse", 25.0).unwrap();
        assert_eq!((p.id, p.created_at), (id, created_at));
        assert_eq!(p.name, "Wireless mouse");
        assert_eq!(p.price, 25.0);
    }

    #[test]
    fn failed_update_leaves_product_untouched() {
        let mut p = Product::new("Mouse", 10.0).unwrap();
        let before = p.clone();
        assert!(p.update("", 5.0).is_err());
        assert!(p.update("Mouse", -5.0).is_err());
        assert_eq!(p, before);
    }
}
