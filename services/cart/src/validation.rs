//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{NewProduct, NewUser};

/// Validate a user's display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    Ok(())
}

/// Validate phone number
pub fn validate_phone_number(phone_number: &str) -> Result<(), String> {
    if phone_number.is_empty() {
        return Err("Phone number is required".to_string());
    }

    let length = phone_number.chars().count();
    if !(9..=12).contains(&length) {
        return Err(
            "Phone number length must have at least 9 characters and at most 12 characters"
                .to_string(),
        );
    }

    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX
        .get_or_init(|| Regex::new(r"^\+?[0-9]+$").expect("Failed to compile phone number regex"));

    if !regex.is_match(phone_number) {
        return Err("Invalid phone number format".to_string());
    }

    Ok(())
}

/// Validate product name
pub fn validate_product_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Product name is required".to_string());
    }

    Ok(())
}

/// Validate product price
pub fn validate_price(price: i32) -> Result<(), String> {
    if price < 0 {
        return Err("Price must not be negative".to_string());
    }

    Ok(())
}

/// Validate a cart quantity
pub fn validate_quantity(quantity: i32) -> Result<(), String> {
    if quantity <= 0 {
        return Err("Quantity must be greater than zero".to_string());
    }

    Ok(())
}

pub fn validate_new_user(user: &NewUser) -> Result<(), String> {
    validate_name(&user.name)?;
    validate_phone_number(&user.phone_number)
}

pub fn validate_new_product(product: &NewProduct) -> Result<(), String> {
    validate_product_name(&product.name)?;
    validate_price(product.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_rules() {
        assert!(validate_phone_number("0244123456").is_ok());
        assert!(validate_phone_number("+233244123").is_ok());
        assert!(validate_phone_number("").is_err());
        assert!(validate_phone_number("02441234").is_err());
        assert!(validate_phone_number("0244123456789").is_err());
        assert!(validate_phone_number("0244-12345").is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Kofi").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_product_name("").is_err());
    }

    #[test]
    fn test_numeric_rules() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(-1).is_err());
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
    }
}
