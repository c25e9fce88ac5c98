//! The landing page's client-local cart. Only the total leaves the client.

use crate::navigation::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    /// Unit price in VND.
    pub unit_price: u64,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// The hard-coded demo cart shown on the landing page.
    pub fn demo() -> Self {
        Self::new(vec![CartItem {
            id: "1".to_string(),
            name: "Demo product".to_string(),
            unit_price: 50_000,
            quantity: 1,
        }])
    }

    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |sum, item| sum.saturating_add(item.line_total()))
    }

    /// Where "checkout" leads, or `None` for an empty or zero-value cart.
    pub fn checkout_route(&self) -> Option<Route> {
        match self.total() {
            0 => None,
            total => Some(Route::checkout_for_amount(total)),
        }
    }
}

/// Format a VND amount as `50.000 ₫`.
pub fn format_vnd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{grouped} ₫")
}
