//! End-to-end booking flow tests against recording mock gateways.
//!
//! These pin down the orchestration contract: write ordering, the
//! no-write guarantee before checkout approval, and the reconciliation
//! error shape after a captured payment.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use washbook::booking::StaticIdentity;
use washbook::{
    BookingError, BookingOrchestrator, BookingRequest, CheckoutOutcome, CheckoutRequest,
    CustomerId, ExtraItems, GarmentType, IdentityProvider, Offer, Order, OrderId, Payment,
    PaymentGateway, PaymentId, PersistenceGateway, PricingConfig, Service, ServiceType, StoreError,
};

// ============================================================================
// Recording mocks
// ============================================================================

type CallLog = Arc<Mutex<Vec<String>>>;

fn log_call(log: &CallLog, name: &str) {
    log.lock().unwrap().push(name.to_string());
}

/// Store mock: records call order, optionally fails a chosen step
struct RecordingStore {
    log: CallLog,
    fail_create_order: bool,
    fail_create_payment: bool,
    orders: Mutex<Vec<(OrderId, Order)>>,
    payments: Mutex<Vec<(PaymentId, Payment)>>,
}

impl RecordingStore {
    fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_create_order: false,
            fail_create_payment: false,
            orders: Mutex::new(Vec::new()),
            payments: Mutex::new(Vec::new()),
        }
    }

    fn failing_orders(log: CallLog) -> Self {
        Self {
            fail_create_order: true,
            ..Self::new(log)
        }
    }

    fn failing_payments(log: CallLog) -> Self {
        Self {
            fail_create_payment: true,
            ..Self::new(log)
        }
    }

    fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    fn payment_count(&self) -> usize {
        self.payments.lock().unwrap().len()
    }

    fn first_order_id(&self) -> Option<OrderId> {
        self.orders.lock().unwrap().first().map(|(id, _)| *id)
    }
}

#[async_trait]
impl PersistenceGateway for RecordingStore {
    async fn create_order(&self, order: &Order) -> Result<OrderId, StoreError> {
        log_call(&self.log, "create_order");
        if self.fail_create_order {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        let id = OrderId::new();
        self.orders.lock().unwrap().push((id, order.clone()));
        Ok(id)
    }

    async fn create_payment(&self, payment: &Payment) -> Result<PaymentId, StoreError> {
        log_call(&self.log, "create_payment");
        if self.fail_create_payment {
            return Err(StoreError::Rejected("write denied".to_string()));
        }
        let id = PaymentId::new();
        self.payments.lock().unwrap().push((id, payment.clone()));
        Ok(id)
    }

    async fn orders_for_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<(OrderId, Order)>, StoreError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, o)| &o.customer_id == customer_id)
            .map(|(id, o)| (*id, o.clone()))
            .collect())
    }
}

/// Payment gateway mock: records the request it saw, then approves or
/// declines deterministically
struct ScriptedGateway {
    log: CallLog,
    approve: bool,
    seen: Mutex<Vec<CheckoutRequest>>,
}

impl ScriptedGateway {
    fn approving(log: CallLog) -> Self {
        Self {
            log,
            approve: true,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn declining(log: CallLog) -> Self {
        Self {
            log,
            approve: false,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn checkout_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    fn last_amount(&self) -> Option<u64> {
        self.seen
            .lock()
            .unwrap()
            .last()
            .map(|r| r.amount_minor_units)
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn open_checkout(&self, request: CheckoutRequest) -> CheckoutOutcome {
        log_call(&self.log, "open_checkout");
        self.seen.lock().unwrap().push(request);
        if self.approve {
            CheckoutOutcome::Approved {
                receipt_id: "pi_test_receipt".to_string(),
            }
        } else {
            CheckoutOutcome::Declined {
                reason: "card_declined".to_string(),
            }
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn wash_service(price_cents: i64) -> Service {
    Service {
        id: "svc_wash".to_string(),
        name: "Wash & Fold".to_string(),
        price: Decimal::new(price_cents, 2),
        unit: "kg".to_string(),
        service_type: ServiceType::WashAndFold,
    }
}

fn request(service: Service, quantity: u32) -> BookingRequest {
    BookingRequest {
        customer_id: CustomerId::new("cust_1001"),
        service,
        quantity,
        offer: None,
        extra_items: ExtraItems::new(),
        pickup_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        pickup_time: "10:00 - 12:00".to_string(),
        address: "12 Soap St".to_string(),
        notes: None,
    }
}

struct Harness {
    log: CallLog,
    store: Arc<RecordingStore>,
    gateway: Arc<ScriptedGateway>,
    orchestrator: BookingOrchestrator,
}

fn harness(store: RecordingStore, gateway: ScriptedGateway, log: CallLog) -> Harness {
    let store = Arc::new(store);
    let gateway = Arc::new(gateway);
    let orchestrator = BookingOrchestrator::new(
        PricingConfig::default(),
        store.clone(),
        gateway.clone(),
    );
    Harness {
        log,
        store,
        gateway,
        orchestrator,
    }
}

fn approving_harness() -> Harness {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    harness(
        RecordingStore::new(log.clone()),
        ScriptedGateway::approving(log.clone()),
        log,
    )
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn happy_path_writes_order_then_payment() {
    let h = approving_harness();

    // Scenario A: 14.99 * 2, no offer, no extras, 5.00 delivery
    let confirmation = h
        .orchestrator
        .complete_booking(request(wash_service(1499), 2))
        .await
        .unwrap();

    assert_eq!(confirmation.final_price, Decimal::new(3498, 2));
    assert_eq!(h.store.order_count(), 1);
    assert_eq!(h.store.payment_count(), 1);
    assert_eq!(h.gateway.last_amount(), Some(3498));

    // Ordering invariant: checkout before any write, order before payment
    let calls = h.log.lock().unwrap().clone();
    assert_eq!(calls, vec!["open_checkout", "create_order", "create_payment"]);
}

#[tokio::test]
async fn payment_record_matches_order_total() {
    let h = approving_harness();
    let confirmation = h
        .orchestrator
        .complete_booking(request(wash_service(1499), 2))
        .await
        .unwrap();

    let payments = h.store.payments.lock().unwrap();
    let (_, payment) = payments.first().unwrap();
    assert_eq!(payment.order_id, confirmation.order_id);
    assert_eq!(payment.amount, confirmation.final_price);
    assert_eq!(payment.gateway_payment_id, "pi_test_receipt");
}

#[tokio::test]
async fn offer_and_extras_priced_into_checkout_amount() {
    let h = approving_harness();

    // Scenario B: 100.00 @ 20% off + 2 t-shirts + delivery = 185.00
    let mut req = request(wash_service(10000), 1);
    req.offer = Some(Offer {
        discount_percent: Decimal::new(20, 0),
        active: true,
        title: None,
        code: None,
    });
    req.extra_items = ExtraItems::new().with(GarmentType::TShirts, 2);

    let confirmation = h.orchestrator.complete_booking(req).await.unwrap();
    assert_eq!(confirmation.final_price, Decimal::new(18500, 2));
    assert_eq!(h.gateway.last_amount(), Some(18500));
}

#[tokio::test]
async fn order_history_returns_created_orders() {
    let h = approving_harness();
    h.orchestrator
        .complete_booking(request(wash_service(1499), 2))
        .await
        .unwrap();

    let history = h
        .orchestrator
        .order_history(&CustomerId::new("cust_1001"))
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].1.service.final_price, Decimal::new(3498, 2));
}

// ============================================================================
// Failures before checkout: zero side effects
// ============================================================================

#[tokio::test]
async fn validation_failure_never_reaches_gateway() {
    let h = approving_harness();

    let mut req = request(wash_service(1499), 2);
    req.address = "   ".to_string();

    let err = h.orchestrator.complete_booking(req).await.unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
    assert!(err.is_retryable());

    assert_eq!(h.gateway.checkout_count(), 0);
    assert_eq!(h.store.order_count(), 0);
    assert_eq!(h.store.payment_count(), 0);
}

#[tokio::test]
async fn zero_quantity_is_rejected_before_any_call() {
    let h = approving_harness();
    let err = h
        .orchestrator
        .complete_booking(request(wash_service(1499), 0))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
    assert!(h.log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn misconfigured_delivery_fee_is_pricing_error() {
    // A negative regional fee that cancels out the total is catalog/config
    // data damage; it must block checkout, not charge zero.
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let store = Arc::new(RecordingStore::new(log.clone()));
    let gateway = Arc::new(ScriptedGateway::approving(log.clone()));
    let config = PricingConfig {
        delivery_fee: Decimal::new(-2998, 2),
        currency: "USD".to_string(),
    };
    let orchestrator = BookingOrchestrator::new(config, store.clone(), gateway.clone());

    let err = orchestrator
        .complete_booking(request(wash_service(1499), 2))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Pricing { .. }));
    assert_eq!(gateway.checkout_count(), 0);
    assert_eq!(store.order_count(), 0);
}

// ============================================================================
// Gateway decline: no writes (Scenario C)
// ============================================================================

#[tokio::test]
async fn declined_checkout_writes_nothing() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let h = harness(
        RecordingStore::new(log.clone()),
        ScriptedGateway::declining(log.clone()),
        log,
    );

    let err = h
        .orchestrator
        .complete_booking(request(wash_service(1499), 2))
        .await
        .unwrap_err();

    match err {
        BookingError::Payment { ref reason } => assert_eq!(reason, "card_declined"),
        other => panic!("expected Payment error, got {:?}", other),
    }
    assert!(err.is_retryable());

    // create_order must have zero calls
    let calls = h.log.lock().unwrap().clone();
    assert_eq!(calls, vec!["open_checkout"]);
    assert_eq!(h.store.order_count(), 0);
    assert_eq!(h.store.payment_count(), 0);
}

// ============================================================================
// Post-payment failures: reconciliation cases
// ============================================================================

#[tokio::test]
async fn order_write_failure_after_capture_is_data_integrity() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let h = harness(
        RecordingStore::failing_orders(log.clone()),
        ScriptedGateway::approving(log.clone()),
        log,
    );

    let err = h
        .orchestrator
        .complete_booking(request(wash_service(1499), 2))
        .await
        .unwrap_err();

    match err {
        BookingError::DataIntegrity { order_id, .. } => assert!(order_id.is_none()),
        other => panic!("expected DataIntegrity, got {:?}", other),
    }
    assert_eq!(h.store.payment_count(), 0);
}

#[tokio::test]
async fn payment_write_failure_carries_created_order_id() {
    // Scenario D: order persisted, payment write rejected
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let h = harness(
        RecordingStore::failing_payments(log.clone()),
        ScriptedGateway::approving(log.clone()),
        log,
    );

    let err = h
        .orchestrator
        .complete_booking(request(wash_service(1499), 2))
        .await
        .unwrap_err();

    let created = h.store.first_order_id().unwrap();
    match err {
        BookingError::DataIntegrity { order_id, .. } => assert_eq!(order_id, Some(created)),
        other => panic!("expected DataIntegrity, got {:?}", other),
    }
    assert!(err.needs_reconciliation());
    assert!(!err.is_retryable());
}

// ============================================================================
// Non-idempotence (documented gap, by design)
// ============================================================================

#[tokio::test]
async fn duplicate_submission_creates_two_orders() {
    // The core provides no request de-duplication: two identical calls
    // are two bookings. Submission locking is the caller's job.
    let h = approving_harness();

    let first = h
        .orchestrator
        .complete_booking(request(wash_service(1499), 2))
        .await
        .unwrap();
    let second = h
        .orchestrator
        .complete_booking(request(wash_service(1499), 2))
        .await
        .unwrap();

    assert_ne!(first.order_id, second.order_id);
    assert_eq!(h.store.order_count(), 2);
    assert_eq!(h.store.payment_count(), 2);
}

// ============================================================================
// Identity provider boundary
// ============================================================================

#[tokio::test]
async fn identity_provider_supplies_explicit_customer_id() {
    // The orchestrator takes the customer id as an explicit request
    // field; the identity trait is how the UI resolves it beforehand.
    let identity = StaticIdentity::signed_in(CustomerId::new("cust_1001"));
    let customer = identity.current_customer_id().unwrap();

    let h = approving_harness();
    let mut req = request(wash_service(1499), 2);
    req.customer_id = customer;

    assert!(h.orchestrator.complete_booking(req).await.is_ok());
}
