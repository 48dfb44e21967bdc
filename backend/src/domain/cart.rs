//! Session cart holding dish copies until checkout.

use super::Dish;

/// Selected-but-unpurchased dishes for the active session.
///
/// Items are copies taken when added, so later catalog edits never change
/// what is in the cart.
///
/// # Examples
///
/// ```
/// use eatery::domain::{Cart, Dish, DishDraft};
///
/// let adobo = Dish::new(DishDraft {
///     name: "Adobo".to_owned(),
///     price: 150,
///     category: "Mains".to_owned(),
///     ..DishDraft::default()
/// })
/// .expect("valid dish");
/// let mut cart = Cart::default();
/// cart.add(&adobo);
/// assert_eq!(cart.total(), 150);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<Dish>,
}

impl Cart {
    /// Append a copy of `dish`.
    pub fn add(&mut self, dish: &Dish) {
        self.items.push(dish.clone());
    }

    /// Remove the item at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Dish> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of item prices.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.iter().map(Dish::price).sum()
    }

    /// Items in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Dish] {
        &self.items
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
