//! Tests for the ordering service.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    ConfiguredLoginService, KeyValueStoreError, MockKeyValueStore, MockLoginService,
};
use crate::domain::{ErrorCode, StorageKeys};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: Utc
            .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    })
}

/// Store double whose writes succeed until `fail` is raised.
fn store(fail: &Arc<AtomicBool>) -> MockKeyValueStore {
    let mut store = MockKeyValueStore::new();
    store.expect_get().returning(|_| Ok(None));
    let flag = Arc::clone(fail);
    store.expect_set().returning(move |key, _| {
        if flag.load(Ordering::SeqCst) {
            Err(KeyValueStoreError::write(key, "quota exceeded"))
        } else {
            Ok(())
        }
    });
    store
}

type Service = EateryService<MockKeyValueStore, ConfiguredLoginService>;

fn service_with(fail: &Arc<AtomicBool>, policy: TransitionPolicy) -> Service {
    EateryService::open(
        SnapshotRepository::new(store(fail), StorageKeys::default()),
        ConfiguredLoginService::new("admin@elha.com", "admin123"),
        fixture_clock(),
        policy,
    )
    .expect("service opens")
}

#[fixture]
fn write_failure() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

#[fixture]
fn service(write_failure: Arc<AtomicBool>) -> Service {
    service_with(&write_failure, TransitionPolicy::Permissive)
}

fn adobo() -> DishDraft {
    DishDraft {
        name: "Adobo".to_owned(),
        description: "Pork braised in vinegar and soy".to_owned(),
        price: 150,
        category: "Mains".to_owned(),
        ..DishDraft::default()
    }
}

fn login_admin(service: &mut Service) {
    service
        .login("admin@elha.com", "admin123")
        .expect("admin login");
}

fn signup_ana(service: &mut Service) {
    service
        .signup("Ana Reyes", "ana@example.com")
        .expect("customer signup");
}

/// Seed one dish as admin and switch to a customer session.
fn seeded(mut service: Service) -> Service {
    login_admin(&mut service);
    service.add_dish(adobo()).expect("dish added");
    signup_ana(&mut service);
    service
}

#[rstest]
fn adobo_checkout_produces_first_order(service: Service) {
    let mut svc = seeded(service);
    svc.add_to_cart(0).expect("added to cart");
    assert_eq!(svc.cart().expect("customer cart").total(), 150);

    let receipt = svc.checkout("Pay at Cashier").expect("checkout succeeds");

    assert_eq!(receipt.order_id, OrderId::new(1));
    assert_eq!(receipt.total, 150);
    assert_eq!(receipt.payment_method, "Pay at Cashier");
    assert_eq!(receipt.customer, "Ana Reyes");
    assert_eq!(
        receipt.issued_on,
        fixture_clock().local().date_naive()
    );
    assert!(svc.cart().expect("customer cart").is_empty());
    let orders = svc.my_orders().expect("customer orders");
    let order = orders.first().expect("one order");
    assert_eq!(order.status(), OrderStatus::Pending);
    assert_eq!(order.total(), 150);
}

#[rstest]
fn consecutive_checkouts_get_consecutive_ids(service: Service) {
    let mut svc = seeded(service);
    svc.add_to_cart(0).expect("added");
    let first = svc.checkout("GCash").expect("first checkout");
    svc.add_to_cart(0).expect("added");
    let second = svc.checkout("GCash").expect("second checkout");
    assert_eq!(first.order_id.get() + 1, second.order_id.get());
}

#[rstest]
fn empty_cart_checkout_creates_nothing(service: Service) {
    let mut svc = seeded(service);
    let err = svc.checkout("Pay at Cashier").expect_err("empty cart");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(svc.state().ledger.orders().is_empty());
    assert_eq!(svc.state().ledger.next_id(), 1);
}

#[rstest]
fn blank_payment_method_is_rejected(service: Service) {
    let mut svc = seeded(service);
    svc.add_to_cart(0).expect("added");
    let err = svc.checkout("  ").expect_err("blank method");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(svc.cart().expect("cart").items().len(), 1);
}

#[rstest]
fn payment_method_is_recorded_as_given(service: Service) {
    let mut svc = seeded(service);
    svc.add_to_cart(0).expect("added");
    let receipt = svc.checkout(" GCash ").expect("checkout succeeds");
    assert_eq!(receipt.payment_method, " GCash ");
    let order = svc
        .state()
        .ledger
        .find(receipt.order_id)
        .expect("order recorded");
    assert_eq!(order.payment_method(), " GCash ");
}

#[rstest]
fn exhausted_order_counter_keeps_the_cart() {
    let mut store = MockKeyValueStore::new();
    store
        .expect_get()
        .returning(|key| Ok((key == "elhaOrderIdCounter").then(|| u64::MAX.to_string())));
    store.expect_set().returning(|_, _| Ok(()));
    let mut svc = seeded(EateryService::open(
        SnapshotRepository::new(store, StorageKeys::default()),
        ConfiguredLoginService::new("admin@elha.com", "admin123"),
        fixture_clock(),
        TransitionPolicy::Permissive,
    )
    .expect("service opens"));
    svc.add_to_cart(0).expect("added");

    let err = svc.checkout("GCash").expect_err("no order id left");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(svc.cart().expect("cart").items().len(), 1);
    assert!(svc.state().ledger.orders().is_empty());
}

#[rstest]
fn failed_save_keeps_cart_and_ledger(write_failure: Arc<AtomicBool>) {
    let mut svc = seeded(service_with(&write_failure, TransitionPolicy::Permissive));
    svc.add_to_cart(0).expect("added");
    write_failure.store(true, Ordering::SeqCst);

    let err = svc.checkout("Pay at Cashier").expect_err("save fails");

    assert_eq!(err.code(), ErrorCode::Storage);
    assert_eq!(svc.cart().expect("cart").total(), 150);
    assert!(svc.state().ledger.orders().is_empty());
    assert_eq!(svc.state().ledger.next_id(), 1);
}

#[rstest]
fn failed_save_leaves_catalog_untouched(write_failure: Arc<AtomicBool>) {
    let mut svc = service_with(&write_failure, TransitionPolicy::Permissive);
    login_admin(&mut svc);
    write_failure.store(true, Ordering::SeqCst);
    let err = svc.add_dish(adobo()).expect_err("save fails");
    assert_eq!(err.code(), ErrorCode::Storage);
    assert!(svc.state().catalog.dishes().is_empty());
}

#[rstest]
fn logout_discards_the_cart(service: Service) {
    let mut svc = seeded(service);
    svc.add_to_cart(0).expect("added");
    assert!(svc.logout());
    assert!(!svc.logout());
    signup_ana(&mut svc);
    assert!(svc.cart().expect("cart").is_empty());
}

#[rstest]
fn remove_from_cart_ignores_out_of_range(service: Service) {
    let mut svc = seeded(service);
    svc.add_to_cart(0).expect("added");
    assert!(svc.remove_from_cart(3).expect("customer").is_none());
    assert!(svc.remove_from_cart(0).expect("customer").is_some());
    svc.add_to_cart(0).expect("added");
    svc.cancel_cart().expect("customer");
    assert!(svc.cart().expect("cart").is_empty());
}

#[rstest]
fn adding_a_missing_dish_is_rejected(service: Service) {
    let mut svc = seeded(service);
    let err = svc.add_to_cart(7).expect_err("no dish 7");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
fn customers_cannot_administer(service: Service) {
    let mut svc = seeded(service);
    for err in [
        svc.add_dish(adobo()).expect_err("forbidden"),
        svc.delete_dish(0).expect_err("forbidden"),
        svc.set_order_status(OrderId::new(1), OrderStatus::Ready)
            .expect_err("forbidden"),
    ] {
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
    assert_eq!(
        svc.search_orders("").expect_err("forbidden").code(),
        ErrorCode::Forbidden
    );
    assert_eq!(svc.state().catalog.dishes().len(), 1);
}

#[rstest]
fn admins_cannot_shop(mut service: Service) {
    login_admin(&mut service);
    service.add_dish(adobo()).expect("dish added");
    assert_eq!(
        service.add_to_cart(0).expect_err("forbidden").code(),
        ErrorCode::Forbidden
    );
    assert_eq!(
        service.checkout("GCash").expect_err("forbidden").code(),
        ErrorCode::Forbidden
    );
}

#[rstest]
fn anonymous_callers_are_turned_away(mut service: Service) {
    assert_eq!(
        service.add_dish(adobo()).expect_err("forbidden").code(),
        ErrorCode::Forbidden
    );
    assert_eq!(service.my_orders().expect_err("forbidden").code(), ErrorCode::Forbidden);
}

#[rstest]
fn non_admin_credentials_log_in_as_valued_customer(mut service: Service) {
    let user = service
        .login("ana@example.com", "secret")
        .expect("customer login");
    assert_eq!(user.name(), "Valued Customer");
    assert!(!user.is_admin());
}

#[rstest]
fn unknown_order_status_change_is_a_no_op(service: Service) {
    let mut svc = seeded(service);
    svc.add_to_cart(0).expect("added");
    svc.checkout("GCash").expect("checkout");
    login_admin(&mut svc);
    let before = svc.state().clone();
    assert!(!svc
        .set_order_status(OrderId::new(999), OrderStatus::Ready)
        .expect("admin"));
    assert_eq!(svc.state(), &before);
}

#[rstest]
#[case(TransitionPolicy::Permissive, true)]
#[case(TransitionPolicy::LockFinal, false)]
fn final_orders_follow_policy(
    write_failure: Arc<AtomicBool>,
    #[case] policy: TransitionPolicy,
    #[case] reopen_allowed: bool,
) {
    let mut svc = seeded(service_with(&write_failure, policy));
    svc.add_to_cart(0).expect("added");
    let id = svc.checkout("GCash").expect("checkout").order_id;
    login_admin(&mut svc);
    assert!(svc.set_order_status(id, OrderStatus::Completed).expect("admin"));

    let result = svc.set_order_status(id, OrderStatus::Pending);

    if reopen_allowed {
        assert_eq!(result, Ok(true));
    } else {
        assert_eq!(
            result.expect_err("locked").code(),
            ErrorCode::InvalidRequest
        );
    }
    let expected = if reopen_allowed {
        OrderStatus::Pending
    } else {
        OrderStatus::Completed
    };
    let order = svc.find_order(id).expect("admin").expect("order exists");
    assert_eq!(order.status(), expected);
}

#[rstest]
fn admin_search_spans_customers(service: Service) {
    let mut svc = seeded(service);
    svc.add_to_cart(0).expect("added");
    svc.checkout("GCash").expect("checkout");
    svc.signup("Ben Cruz", "ben@example.com").expect("signup");
    svc.add_to_cart(0).expect("added");
    svc.checkout("Maya").expect("checkout");
    login_admin(&mut svc);

    let found = svc.search_orders("ben").expect("admin");
    let customers: Vec<_> = found.iter().map(|order| order.customer()).collect();
    assert_eq!(customers, ["Ben Cruz"]);
    assert_eq!(svc.search_orders("").expect("admin").len(), 2);
}

#[rstest]
fn login_service_errors_propagate() {
    let mut login = MockLoginService::new();
    login
        .expect_authenticate()
        .times(1)
        .returning(|_| Err(EateryError::forbidden("account locked")));
    let fail = Arc::new(AtomicBool::new(false));
    let mut svc = EateryService::open(
        SnapshotRepository::new(store(&fail), StorageKeys::default()),
        login,
        fixture_clock(),
        TransitionPolicy::default(),
    )
    .expect("service opens");

    let err = svc.login("ana@example.com", "pw").expect_err("locked");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert!(svc.session().is_none());
}

#[rstest]
fn open_fails_when_store_is_unreadable() {
    let mut store = MockKeyValueStore::new();
    store
        .expect_get()
        .returning(|key| Err(KeyValueStoreError::read(key, "permission denied")));
    let result = EateryService::open(
        SnapshotRepository::new(store, StorageKeys::default()),
        ConfiguredLoginService::new("admin@elha.com", "admin123"),
        fixture_clock(),
        TransitionPolicy::default(),
    );
    let err = result.err().expect("load fails");
    assert_eq!(err.code(), ErrorCode::Storage);
}
