//! Historical collection of placed orders.

use super::{Dish, EateryError, Order, OrderId, OrderStatus};

/// All placed orders plus the next identifier to hand out.
///
/// ## Invariants
/// - `next_id` is greater than every stored order id.
/// - `u64::MAX` is never assigned, so the counter can always move past the
///   last issued id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLedger {
    orders: Vec<Order>,
    next_id: u64,
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            next_id: 1,
        }
    }
}

impl OrderLedger {
    /// Rebuild a ledger from persisted parts.
    ///
    /// The counter is raised past the highest stored id so an old or missing
    /// counter never reissues an identifier. A zero counter becomes `1`. A
    /// stored id of `u64::MAX` pins the counter there, which leaves the ledger
    /// unable to create further orders.
    #[must_use]
    pub fn from_parts(orders: Vec<Order>, next_id: u64) -> Self {
        let floor = orders
            .iter()
            .map(|order| order.id().get().saturating_add(1))
            .max()
            .unwrap_or(1);
        Self {
            orders,
            next_id: next_id.max(floor),
        }
    }

    /// Append a new pending order and return a copy of it.
    ///
    /// # Errors
    ///
    /// Returns an internal [`EateryError`] when the id counter is exhausted.
    /// The ledger is left unchanged.
    pub fn create(
        &mut self,
        customer: &str,
        items: Vec<Dish>,
        total: u64,
        payment_method: &str,
    ) -> Result<Order, EateryError> {
        let id = OrderId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| EateryError::internal("order id counter exhausted"))?;
        let order = Order::new(
            id,
            customer.to_owned(),
            items,
            total,
            payment_method.to_owned(),
        );
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Overwrite the status of order `id`.
    ///
    /// Returns `false` and leaves the ledger untouched when no such order
    /// exists.
    pub fn set_status(&mut self, id: OrderId, status: OrderStatus) -> bool {
        let Some(order) = self.orders.iter_mut().find(|order| order.id() == id) else {
            return false;
        };
        order.set_status(status);
        true
    }

    /// Look up an order by id.
    #[must_use]
    pub fn find(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id() == id)
    }

    /// Orders placed under exactly `customer`, oldest first.
    #[must_use]
    pub fn list_for(&self, customer: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.customer() == customer)
            .collect()
    }

    /// Orders whose customer contains `query` ignoring case, or whose decimal
    /// id contains `query`. An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Order> {
        let needle = query.to_lowercase();
        self.orders
            .iter()
            .filter(|order| {
                order.customer().to_lowercase().contains(&needle)
                    || order.id().to_string().contains(query)
            })
            .collect()
    }

    /// Every order, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Identifier the next [`OrderLedger::create`] call will assign.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }
}
