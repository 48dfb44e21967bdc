//! Receipts issued after a successful checkout.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::{Order, OrderId};

/// One purchased dish on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    /// Dish name at checkout.
    pub name: String,
    /// Dish price at checkout.
    pub price: u64,
}

/// Record handed back to the customer after checkout.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use eatery::domain::{OrderId, Receipt, ReceiptLine};
///
/// let receipt = Receipt {
///     order_id: OrderId::new(1),
///     customer: "Valued Customer".to_owned(),
///     issued_on: NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"),
///     lines: vec![ReceiptLine { name: "Adobo".to_owned(), price: 150 }],
///     total: 150,
///     payment_method: "Pay at Cashier".to_owned(),
/// };
/// assert!(receipt.to_string().contains("Total Paid: ₱150"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Order the receipt belongs to.
    pub order_id: OrderId,
    /// Customer name on the order.
    pub customer: String,
    /// Local calendar date of issue.
    pub issued_on: NaiveDate,
    /// Purchased dishes in cart order.
    pub lines: Vec<ReceiptLine>,
    /// Amount paid.
    pub total: u64,
    /// Payment method label.
    pub payment_method: String,
}

impl Receipt {
    /// Build a receipt for `order` dated `issued_on`.
    #[must_use]
    pub fn for_order(order: &Order, issued_on: NaiveDate) -> Self {
        Self {
            order_id: order.id(),
            customer: order.customer().to_owned(),
            issued_on,
            lines: order
                .items()
                .iter()
                .map(|dish| ReceiptLine {
                    name: dish.name().to_owned(),
                    price: dish.price(),
                })
                .collect(),
            total: order.total(),
            payment_method: order.payment_method().to_owned(),
        }
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Elha's Eatery - Official Receipt")?;
        writeln!(f, "Order ID: {}", self.order_id)?;
        writeln!(f, "Customer: {}", self.customer)?;
        writeln!(f, "Date: {}", self.issued_on.format("%Y-%m-%d"))?;
        for line in &self.lines {
            writeln!(f, "{} ..... ₱{}", line.name, line.price)?;
        }
        writeln!(f, "Total Paid: ₱{}", self.total)?;
        write!(f, "Payment Method: {}", self.payment_method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dish, DishDraft};
    use rstest::rstest;

    #[rstest]
    fn renders_every_line() {
        let adobo = Dish::new(DishDraft {
            name: "Adobo".to_owned(),
            price: 150,
            category: "Mains".to_owned(),
            ..DishDraft::default()
        })
        .expect("valid dish");
        let order = Order::new(
            OrderId::new(4),
            "Ana".to_owned(),
            vec![adobo.clone(), adobo],
            300,
            "GCash".to_owned(),
        );
        let issued_on = NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date");

        let text = Receipt::for_order(&order, issued_on).to_string();

        assert_eq!(
            text,
            "Elha's Eatery - Official Receipt\n\
             Order ID: 4\n\
             Customer: Ana\n\
             Date: 2026-10-16\n\
             Adobo ..... ₱150\n\
             Adobo ..... ₱150\n\
             Total Paid: ₱300\n\
             Payment Method: GCash"
        );
    }
}
