//! # Profile Aggregation
//!
//! Fans out to the user and order sources and merges their results.
//!
//! Both fetches run as spawned tasks and are joined before merging. The merge
//! is asymmetric: a failed [`UserSource`] ends the aggregation with an
//! [`AggregationError`], while a failed [`OrderSource`] only empties
//! `recentOrders` and records its message in `aggregationInfo.errors`.

use crate::application::error::{AggregationError, AggregationResult};
use crate::domain::entities::{AggregatedProfile, OrderRecord, UserRecord};
use crate::domain::value_objects::{SourceName, Timestamp, UserId};
use crate::infrastructure::sources::{OrderSource, SourceResult, UserSource};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// Aggregates user profiles from a critical user source and a non-critical
/// order source.
#[derive(Debug, Clone)]
pub struct ProfileAggregator {
    user_source: Arc<dyn UserSource>,
    order_source: Arc<dyn OrderSource>,
}

impl ProfileAggregator {
    /// Creates a new ProfileAggregator.
    #[must_use]
    pub fn new(user_source: Arc<dyn UserSource>, order_source: Arc<dyn OrderSource>) -> Self {
        Self {
            user_source,
            order_source,
        }
    }

    /// Aggregates the profile of one user.
    ///
    /// Both sources are queried concurrently and always awaited; the order
    /// fetch is not cancelled when the user fetch fails.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::CriticalSource`] if the user source failed.
    pub async fn aggregate(&self, id: &UserId) -> AggregationResult<AggregatedProfile> {
        let request_id = Uuid::new_v4();
        let span = info_span!("aggregate", user_id = %id, %request_id);

        async {
            let (user, orders) = self.fan_out(id).await;
            let outcome = merge(user, orders, Timestamp::now());
            if let Ok(profile) = &outcome {
                info!(degraded = profile.aggregation_info().is_degraded(), "profile aggregated");
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Runs both fetches concurrently and waits for both.
    async fn fan_out(
        &self,
        id: &UserId,
    ) -> (SourceResult<UserRecord>, SourceResult<Vec<OrderRecord>>) {
        let user_task = {
            let source = Arc::clone(&self.user_source);
            let id = id.clone();
            tokio::spawn(async move { source.fetch(&id).await }.in_current_span())
        };
        let order_task = {
            let source = Arc::clone(&self.order_source);
            let id = id.clone();
            tokio::spawn(async move { source.fetch(&id).await }.in_current_span())
        };

        let (user, orders) = tokio::join!(user_task, order_task);
        (
            settle(SourceName::UserService, user),
            settle(SourceName::OrderService, orders),
        )
    }
}

/// Turns a crashed fetch task into an ordinary source failure.
fn settle<T>(source: SourceName, joined: Result<SourceResult<T>, JoinError>) -> SourceResult<T> {
    joined.unwrap_or_else(|error| {
        SourceResult::failed(format!("{}: task failed: {}", source.failure_prefix(), error))
    })
}

/// Merges the two source results into a profile.
///
/// Completion order is irrelevant; only the failure weight of each source
/// matters.
///
/// # Errors
///
/// Returns [`AggregationError::CriticalSource`] if `user` failed, whatever
/// `orders` holds.
pub fn merge(
    user: SourceResult<UserRecord>,
    orders: SourceResult<Vec<OrderRecord>>,
    timestamp: Timestamp,
) -> AggregationResult<AggregatedProfile> {
    match (user, orders) {
        (SourceResult::Failed(message), _) => {
            warn!(source = %SourceName::UserService, error = %message, "critical source failed");
            Err(AggregationError::critical_source(
                SourceName::UserService,
                message,
            ))
        }
        (SourceResult::Ok(user), SourceResult::Ok(orders)) => {
            if orders.is_empty() {
                debug!(source = %SourceName::OrderService, "user has no orders");
            }
            Ok(AggregatedProfile::complete(user, orders, timestamp))
        }
        (SourceResult::Ok(user), SourceResult::Failed(message)) => {
            warn!(source = %SourceName::OrderService, error = %message, "non-critical source failed, degrading");
            Ok(AggregatedProfile::degraded(user, message, timestamp))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::value_objects::OrderId;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::registry::Registry;

    /// Records the level and message of every event.
    #[derive(Debug, Clone, Default)]
    struct EventLog(Arc<Mutex<Vec<(Level, String)>>>);

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" && self.0.is_empty() {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for EventLog {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0.lock().unwrap().push((*event.metadata().level(), visitor.0));
        }
    }

    impl EventLog {
        fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
            let log = Self::default();
            let subscriber = Registry::default().with(log.clone());
            let value = tracing::subscriber::with_default(subscriber, f);
            let events = log.0.lock().unwrap().clone();
            (value, events)
        }
    }

    #[derive(Debug)]
    struct MockUserSource {
        result: SourceResult<UserRecord>,
        delay_ms: u64,
        calls: AtomicUsize,
    }

    impl MockUserSource {
        fn found(user: UserRecord) -> Self {
            Self {
                result: SourceResult::Ok(user),
                delay_ms: 0,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: SourceResult::failed(message),
                delay_ms: 0,
                calls: AtomicUsize::new(0),
            }
        }

        fn slow(mut self, delay_ms: u64) -> Self {
            self.delay_ms = delay_ms;
            self
        }
    }

    #[async_trait]
    impl UserSource for MockUserSource {
        async fn fetch(&self, _id: &UserId) -> SourceResult<UserRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            self.result.clone()
        }
    }

    #[derive(Debug)]
    struct MockOrderSource {
        result: SourceResult<Vec<OrderRecord>>,
        delay_ms: u64,
        calls: AtomicUsize,
    }

    impl MockOrderSource {
        fn with_orders(orders: Vec<OrderRecord>) -> Self {
            Self {
                result: SourceResult::Ok(orders),
                delay_ms: 0,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: SourceResult::failed(message),
                delay_ms: 0,
                calls: AtomicUsize::new(0),
            }
        }

        fn slow(mut self, delay_ms: u64) -> Self {
            self.delay_ms = delay_ms;
            self
        }
    }

    #[async_trait]
    impl OrderSource for MockOrderSource {
        async fn fetch(&self, _id: &UserId) -> SourceResult<Vec<OrderRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            self.result.clone()
        }
    }

    #[derive(Debug)]
    struct PanickingUserSource;

    #[async_trait]
    impl UserSource for PanickingUserSource {
        async fn fetch(&self, _id: &UserId) -> SourceResult<UserRecord> {
            panic!("user source crashed");
        }
    }

    fn alice() -> UserRecord {
        UserRecord::new(UserId::new("1"), "Alice", "alice@example.com")
    }

    fn alice_orders() -> Vec<OrderRecord> {
        vec![
            OrderRecord::new(OrderId::new("o101"), 150, "2024-09-01"),
            OrderRecord::new(OrderId::new("o102"), 200, "2024-09-05"),
        ]
    }

    fn fixed_time() -> Timestamp {
        Timestamp::from_millis(1_725_148_800_000).unwrap()
    }

    fn aggregator(users: MockUserSource, orders: MockOrderSource) -> ProfileAggregator {
        ProfileAggregator::new(Arc::new(users), Arc::new(orders))
    }

    #[tokio::test]
    async fn both_sources_succeed() {
        let engine = aggregator(
            MockUserSource::found(alice()),
            MockOrderSource::with_orders(alice_orders()),
        );

        let profile = engine.aggregate(&UserId::new("1")).await.unwrap();

        assert_eq!(profile.user_info(), &alice());
        assert_eq!(profile.recent_orders(), alice_orders().as_slice());
        assert!(profile.aggregation_info().errors.is_empty());
        assert_eq!(
            profile.aggregation_info().sources,
            vec![SourceName::UserService, SourceName::OrderService]
        );
    }

    #[tokio::test]
    async fn user_failure_is_fatal_and_orders_still_complete() {
        let orders = Arc::new(MockOrderSource::with_orders(alice_orders()).slow(50));
        let engine = ProfileAggregator::new(
            Arc::new(MockUserSource::failing("Failed to fetch user: User not found")),
            orders.clone(),
        );

        let err = engine.aggregate(&UserId::new("3")).await.unwrap_err();

        assert_eq!(err.details(), "Failed to fetch user: User not found");
        assert_eq!(err.source_name(), SourceName::UserService);
        assert_eq!(orders.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn order_failure_degrades() {
        let engine = aggregator(
            MockUserSource::found(alice()),
            MockOrderSource::failing("Failed to fetch orders: connection failed: refused"),
        );

        let profile = engine.aggregate(&UserId::new("1")).await.unwrap();

        assert!(profile.recent_orders().is_empty());
        assert_eq!(
            profile.aggregation_info().errors,
            vec!["Failed to fetch orders: connection failed: refused"]
        );
    }

    #[tokio::test]
    async fn empty_order_history_is_not_an_error() {
        let engine = aggregator(
            MockUserSource::found(alice()),
            MockOrderSource::with_orders(Vec::new()),
        );

        let profile = engine.aggregate(&UserId::new("1")).await.unwrap();

        assert!(profile.recent_orders().is_empty());
        assert!(profile.aggregation_info().errors.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_run_concurrently() {
        let engine = aggregator(
            MockUserSource::found(alice()).slow(200),
            MockOrderSource::with_orders(alice_orders()).slow(300),
        );

        let started = tokio::time::Instant::now();
        engine.aggregate(&UserId::new("1")).await.unwrap();
        let elapsed = started.elapsed();

        assert!(
            elapsed < Duration::from_millis(500),
            "fetches were serialized: {:?}",
            elapsed
        );
        assert!(elapsed >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn completion_order_does_not_matter() {
        let user_first = aggregator(
            MockUserSource::found(alice()),
            MockOrderSource::failing("Failed to fetch orders: late").slow(60),
        );
        let orders_first = aggregator(
            MockUserSource::found(alice()).slow(60),
            MockOrderSource::failing("Failed to fetch orders: late"),
        );

        let a = user_first.aggregate(&UserId::new("1")).await.unwrap();
        let b = orders_first.aggregate(&UserId::new("1")).await.unwrap();

        assert_eq!(a.with_timestamp(fixed_time()), b.with_timestamp(fixed_time()));
    }

    #[tokio::test]
    async fn repeated_aggregation_is_idempotent() {
        let engine = aggregator(
            MockUserSource::found(alice()),
            MockOrderSource::with_orders(alice_orders()),
        );

        let first = engine.aggregate(&UserId::new("1")).await.unwrap();
        let second = engine.aggregate(&UserId::new("1")).await.unwrap();

        assert_eq!(
            first.with_timestamp(fixed_time()),
            second.with_timestamp(fixed_time())
        );
    }

    #[tokio::test]
    async fn crashed_user_task_is_fatal() {
        let engine = ProfileAggregator::new(
            Arc::new(PanickingUserSource),
            Arc::new(MockOrderSource::with_orders(alice_orders())),
        );

        let err = engine.aggregate(&UserId::new("1")).await.unwrap_err();

        assert!(err.details().starts_with("Failed to fetch user: task failed"));
    }

    #[test]
    fn settle_passes_results_through() {
        let settled = settle(SourceName::OrderService, Ok(SourceResult::Ok(vec![1])));
        assert_eq!(settled, SourceResult::Ok(vec![1]));
    }

    #[test]
    fn empty_history_and_order_failure_log_differently() {
        let (_, empty) = EventLog::capture(|| {
            merge(SourceResult::Ok(alice()), SourceResult::Ok(Vec::new()), fixed_time())
        });
        let (_, failed) = EventLog::capture(|| {
            merge(
                SourceResult::Ok(alice()),
                SourceResult::failed("Failed to fetch orders: down"),
                fixed_time(),
            )
        });

        assert_eq!(empty, vec![(Level::DEBUG, "user has no orders".to_owned())]);
        assert_eq!(
            failed,
            vec![(Level::WARN, "non-critical source failed, degrading".to_owned())]
        );
    }

    #[test]
    fn populated_history_logs_nothing() {
        let (_, events) = EventLog::capture(|| {
            merge(SourceResult::Ok(alice()), SourceResult::Ok(alice_orders()), fixed_time())
        });
        assert!(events.is_empty());
    }

    fn order_strategy() -> impl Strategy<Value = OrderRecord> {
        ("[a-z][a-z0-9]{0,7}", any::<u32>(), 1u32..=28).prop_map(|(id, total, day)| {
            OrderRecord::new(OrderId::new(id), total, format!("2024-09-{day:02}"))
        })
    }

    proptest! {
        #[test]
        fn successful_orders_are_kept_verbatim(
            orders in prop::collection::vec(order_strategy(), 0..8)
        ) {
            let profile = merge(
                SourceResult::Ok(alice()),
                SourceResult::Ok(orders.clone()),
                fixed_time(),
            )
            .unwrap();

            prop_assert_eq!(profile.recent_orders(), orders.as_slice());
            prop_assert!(profile.aggregation_info().errors.is_empty());
        }

        #[test]
        fn failed_orders_never_escalate(message in ".{0,40}") {
            let profile = merge(
                SourceResult::Ok(alice()),
                SourceResult::Failed(message.clone()),
                fixed_time(),
            )
            .unwrap();

            prop_assert!(profile.recent_orders().is_empty());
            prop_assert_eq!(&profile.aggregation_info().errors, &vec![message]);
        }

        #[test]
        fn failed_user_is_always_fatal(
            message in ".{0,40}",
            orders in prop::option::of(prop::collection::vec(order_strategy(), 0..4))
        ) {
            let orders = match orders {
                Some(list) => SourceResult::Ok(list),
                None => SourceResult::failed("Failed to fetch orders: down"),
            };

            let err = merge(SourceResult::Failed(message.clone()), orders, fixed_time()).unwrap_err();

            prop_assert_eq!(err.details(), message.as_str());
        }
    }
}
