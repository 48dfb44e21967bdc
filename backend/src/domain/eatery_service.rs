//! Ordering service: sessions, catalog administration, cart, and checkout.
//!
//! The service owns the [`AppState`] and a [`SnapshotRepository`]. Every
//! operation that changes the catalog or the ledger works on a copy of the
//! state, saves it, and only then swaps it in; a failed save leaves the
//! in-memory state exactly as it was. Cart changes are session-only and never
//! touch storage.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use super::ports::{KeyValueStore, LoginService};
use super::{
    AppState, Cart, CatalogStore, Dish, DishDraft, DishId, DishTag, EateryError, LoginCredentials,
    MenuEntry, MenuFilter, MenuSection, Order, OrderId, OrderStatus, Promo, PromoDraft, Receipt,
    Session, SessionUser, SnapshotRepository, TransitionPolicy,
};

/// Application service driving every ordering use-case.
pub struct EateryService<S, L> {
    state: AppState,
    repository: SnapshotRepository<S>,
    login: L,
    clock: Arc<dyn Clock>,
    policy: TransitionPolicy,
    session: Option<Session>,
}

impl<S, L> EateryService<S, L>
where
    S: KeyValueStore,
    L: LoginService,
{
    /// Load the stored snapshot and start with no session.
    ///
    /// # Errors
    ///
    /// Returns a storage [`EateryError`] when the snapshot cannot be read.
    pub fn open(
        repository: SnapshotRepository<S>,
        login: L,
        clock: Arc<dyn Clock>,
        policy: TransitionPolicy,
    ) -> Result<Self, EateryError> {
        let state = repository.load()?;
        info!(
            dishes = state.catalog.dishes().len(),
            orders = state.ledger.orders().len(),
            next_id = state.ledger.next_id(),
            "snapshot loaded"
        );
        Ok(Self {
            state,
            repository,
            login,
            clock,
            policy,
            session: None,
        })
    }

    /// Current in-memory data set.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The active session, if anyone is logged in.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The snapshot repository backing this service.
    #[must_use]
    pub const fn repository(&self) -> &SnapshotRepository<S> {
        &self.repository
    }

    // --- sessions ---

    /// Log in, replacing any current session.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request [`EateryError`] for blank input, or whatever
    /// the [`LoginService`] reports.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&SessionUser, EateryError> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        let user = self.login.authenticate(&credentials)?;
        info!(admin = user.is_admin(), "session started");
        Ok(self.session.insert(Session::start(user)).user())
    }

    /// Sign up as a named customer and start a session.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request [`EateryError`] for a blank name or email.
    pub fn signup(&mut self, name: &str, email: &str) -> Result<&SessionUser, EateryError> {
        let user = SessionUser::customer(name, email)?;
        info!(admin = false, "session started");
        Ok(self.session.insert(Session::start(user)).user())
    }

    /// End the session and discard its cart. Returns `false` when nobody was
    /// logged in.
    pub fn logout(&mut self) -> bool {
        let ended = self.session.take().is_some();
        if ended {
            info!("session ended");
        }
        ended
    }

    fn require_admin(&self) -> Result<&SessionUser, EateryError> {
        match self.session.as_ref().map(Session::user) {
            Some(user) if user.is_admin() => Ok(user),
            Some(_) => Err(EateryError::forbidden("administrator session required")),
            None => Err(EateryError::forbidden("log in as the administrator first")),
        }
    }

    fn require_customer(&self) -> Result<&Session, EateryError> {
        match self.session.as_ref() {
            Some(session) if !session.user().is_admin() => Ok(session),
            Some(_) => Err(EateryError::forbidden("customer session required")),
            None => Err(EateryError::forbidden("log in or sign up first")),
        }
    }

    fn require_customer_mut(&mut self) -> Result<&mut Session, EateryError> {
        match self.session.as_mut() {
            Some(session) if !session.user().is_admin() => Ok(session),
            Some(_) => Err(EateryError::forbidden("customer session required")),
            None => Err(EateryError::forbidden("log in or sign up first")),
        }
    }

    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut AppState) -> Result<T, EateryError>,
    ) -> Result<T, EateryError> {
        let mut next = self.state.clone();
        let outcome = mutate(&mut next)?;
        self.repository.save(&next)?;
        self.state = next;
        Ok(outcome)
    }

    // --- catalog reads ---

    /// Dishes matching `filter`, grouped by category.
    #[must_use]
    pub fn list_dishes(&self, filter: &MenuFilter) -> Vec<MenuSection<'_>> {
        debug!(?filter, "listing dishes");
        self.state.catalog.list_dishes(filter)
    }

    /// Dishes on the shelf for `tag`.
    #[must_use]
    pub fn dishes_tagged(&self, tag: DishTag) -> Vec<MenuEntry<'_>> {
        self.state.catalog.dishes_tagged(tag)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.state.catalog.categories()
    }

    /// Every promo.
    #[must_use]
    pub fn promos(&self) -> &[Promo] {
        self.state.catalog.promos()
    }

    /// Current position of a dish.
    #[must_use]
    pub fn dish_position(&self, id: DishId) -> Option<usize> {
        self.state.catalog.dish_position(id)
    }

    fn catalog(&self) -> &CatalogStore {
        &self.state.catalog
    }

    // --- catalog administration ---

    /// Add a dish. Admin only.
    ///
    /// # Errors
    ///
    /// Forbidden outside an admin session; invalid request for a bad draft;
    /// storage when the snapshot cannot be saved.
    pub fn add_dish(&mut self, draft: DishDraft) -> Result<usize, EateryError> {
        self.require_admin()?;
        let position = self.commit(|state| state.catalog.add_dish(draft))?;
        info!(position, "dish added");
        Ok(position)
    }

    /// Replace the dish at `index`. Admin only.
    ///
    /// # Errors
    ///
    /// Forbidden outside an admin session; invalid request for an
    /// out-of-range index or bad draft; storage when saving fails.
    pub fn update_dish(&mut self, index: usize, draft: DishDraft) -> Result<(), EateryError> {
        self.require_admin()?;
        self.commit(|state| state.catalog.update_dish(index, draft))?;
        info!(index, "dish updated");
        Ok(())
    }

    /// Delete the dish at `index`. Admin only.
    ///
    /// # Errors
    ///
    /// Forbidden outside an admin session; invalid request for an
    /// out-of-range index; storage when saving fails.
    pub fn delete_dish(&mut self, index: usize) -> Result<Dish, EateryError> {
        self.require_admin()?;
        let removed = self.commit(|state| state.catalog.delete_dish(index))?;
        info!(index, name = removed.name(), "dish deleted");
        Ok(removed)
    }

    /// Add a promo. Admin only.
    ///
    /// # Errors
    ///
    /// Forbidden outside an admin session; invalid request for a blank title;
    /// storage when saving fails.
    pub fn add_promo(&mut self, draft: PromoDraft) -> Result<usize, EateryError> {
        self.require_admin()?;
        let position = self.commit(|state| state.catalog.add_promo(draft))?;
        info!(position, "promo added");
        Ok(position)
    }

    /// Delete the promo at `index`. Admin only.
    ///
    /// # Errors
    ///
    /// Forbidden outside an admin session; invalid request for an
    /// out-of-range index; storage when saving fails.
    pub fn delete_promo(&mut self, index: usize) -> Result<Promo, EateryError> {
        self.require_admin()?;
        let removed = self.commit(|state| state.catalog.delete_promo(index))?;
        info!(index, title = removed.title(), "promo deleted");
        Ok(removed)
    }

    // --- order administration ---

    /// Overwrite an order's status. Admin only.
    ///
    /// Returns `Ok(false)` without saving when no order has that id.
    ///
    /// # Errors
    ///
    /// Forbidden outside an admin session; invalid request when the
    /// configured [`TransitionPolicy`] refuses the change; storage when
    /// saving fails.
    pub fn set_order_status(&mut self, id: OrderId, status: OrderStatus) -> Result<bool, EateryError> {
        self.require_admin()?;
        let Some(current) = self.state.ledger.find(id).map(Order::status) else {
            debug!(%id, "status change for unknown order ignored");
            return Ok(false);
        };
        if !self.policy.permits(&current, &status) {
            return Err(EateryError::invalid_request(format!(
                "order {id} is {current} and can no longer change status"
            )));
        }
        self.commit(|state| Ok(state.ledger.set_status(id, status.clone())))?;
        info!(%id, from = %current, to = %status, "order status changed");
        Ok(true)
    }

    /// Orders matching `query` by customer or id. Admin only.
    ///
    /// # Errors
    ///
    /// Forbidden outside an admin session.
    pub fn search_orders(&self, query: &str) -> Result<Vec<&Order>, EateryError> {
        self.require_admin()?;
        Ok(self.state.ledger.search(query))
    }

    /// Look up an order by id. Admin only.
    ///
    /// # Errors
    ///
    /// Forbidden outside an admin session.
    pub fn find_order(&self, id: OrderId) -> Result<Option<&Order>, EateryError> {
        self.require_admin()?;
        Ok(self.state.ledger.find(id))
    }

    // --- customer flow ---

    /// Copy the dish at catalog `index` into the cart. Customer only.
    ///
    /// # Errors
    ///
    /// Forbidden outside a customer session; invalid request when no dish
    /// sits at `index`.
    pub fn add_to_cart(&mut self, index: usize) -> Result<(), EateryError> {
        let dish = self
            .catalog()
            .dish(index)
            .cloned()
            .ok_or_else(|| EateryError::invalid_request(format!("no dish at position {index}")));
        let session = self.require_customer_mut()?;
        let picked = dish?;
        session.cart_mut().add(&picked);
        debug!(index, name = picked.name(), "dish added to cart");
        Ok(())
    }

    /// Remove the cart item at `index`; out-of-range indices are ignored.
    /// Customer only.
    ///
    /// # Errors
    ///
    /// Forbidden outside a customer session.
    pub fn remove_from_cart(&mut self, index: usize) -> Result<Option<Dish>, EateryError> {
        let session = self.require_customer_mut()?;
        Ok(session.cart_mut().remove_at(index))
    }

    /// Empty the cart. Customer only.
    ///
    /// # Errors
    ///
    /// Forbidden outside a customer session.
    pub fn cancel_cart(&mut self) -> Result<(), EateryError> {
        let session = self.require_customer_mut()?;
        session.cart_mut().clear();
        debug!("cart cleared");
        Ok(())
    }

    /// Turn the cart into a pending order and issue a receipt. Customer only.
    ///
    /// The cart is cleared only after the new order is saved. The payment
    /// method is recorded exactly as given.
    ///
    /// # Errors
    ///
    /// Forbidden outside a customer session; invalid request for an empty
    /// cart or blank payment method; internal when the order id counter is
    /// exhausted; storage when saving fails. On any error the cart is left as
    /// it was.
    pub fn checkout(&mut self, payment_method: &str) -> Result<Receipt, EateryError> {
        let session = self.require_customer()?;
        if session.cart().is_empty() {
            return Err(EateryError::invalid_request("your cart is empty"));
        }
        if payment_method.trim().is_empty() {
            return Err(EateryError::invalid_request("payment method must not be empty"));
        }
        let customer = session.user().name().to_owned();
        let items = session.cart().items().to_vec();
        let total = session.cart().total();

        let order =
            self.commit(|state| state.ledger.create(&customer, items, total, payment_method))?;
        if let Some(active) = self.session.as_mut() {
            active.cart_mut().clear();
        }
        info!(id = %order.id(), total, payment_method, "order placed");
        Ok(Receipt::for_order(&order, self.clock.local().date_naive()))
    }

    /// The session cart. Customer only.
    ///
    /// # Errors
    ///
    /// Forbidden outside a customer session.
    pub fn cart(&self) -> Result<&Cart, EateryError> {
        Ok(self.require_customer()?.cart())
    }

    /// Orders placed by the logged-in customer, oldest first. Customer only.
    ///
    /// # Errors
    ///
    /// Forbidden outside a customer session.
    pub fn my_orders(&self) -> Result<Vec<&Order>, EateryError> {
        let session = self.require_customer()?;
        Ok(self.state.ledger.list_for(session.user().name()))
    }
}

#[cfg(test)]
#[path = "eatery_service_tests.rs"]
mod tests;
