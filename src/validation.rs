//! Domain validation helpers
//!
//! Pure checks shared by the service layer. Range rules live here so the
//! services stay focused on persistence and the rules stay testable without
//! a database.

use rust_decimal::Decimal;

/// Validate a warehouse address (non-blank)
pub fn validate_address(address: &str) -> Result<(), &'static str> {
    if address.trim().is_empty() {
        return Err("address must not be empty");
    }
    Ok(())
}

/// Validate a product name (non-blank)
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name must not be empty");
    }
    Ok(())
}

/// Validate a product unit weight
pub fn validate_weight(weight: Decimal) -> Result<(), &'static str> {
    if weight < Decimal::ZERO {
        return Err("weight cannot be negative");
    }
    Ok(())
}

/// Validate a discount as a fraction in [0, 1] (`0.2` = 20% off, never `20`)
pub fn validate_discount_fraction(discount: Decimal) -> Result<(), &'static str> {
    if discount < Decimal::ZERO || discount > Decimal::ONE {
        return Err("discount must be a fraction between 0 and 1");
    }
    Ok(())
}

/// Validate a unit price
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("price cannot be negative");
    }
    Ok(())
}

/// Validate an initial stock quantity (zero allowed)
pub fn validate_initial_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("quantity cannot be negative");
    }
    Ok(())
}

/// Validate a requested order quantity (at least one unit)
pub fn validate_order_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("quantity must be at least 1");
    }
    Ok(())
}

/// Validate a recorded sale quantity (zero allowed, negative rejected)
pub fn validate_sale_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("quantity cannot be negative");
    }
    Ok(())
}

/// Validate a recorded sale amount (zero allowed, negative rejected)
pub fn validate_sale_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("total_amount cannot be negative");
    }
    Ok(())
}
