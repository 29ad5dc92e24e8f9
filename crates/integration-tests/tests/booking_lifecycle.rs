//! End-to-end booking lifecycle against the in-memory store.

use std::sync::Arc;

use phonebooth_core::application::strategy::StrategyRegistry;
use phonebooth_core::application::{device_event_channel, BookingManager, DeviceService};
use phonebooth_core::domain::DeviceCatalog;
use phonebooth_core::error::AppError;
use phonebooth_core::port::id_provider::ModelSequenceProvider;
use phonebooth_core::port::time_provider::SystemTimeProvider;
use phonebooth_core::port::DeviceStore;
use phonebooth_infra_memory::InMemoryDeviceStore;

struct Fixture {
    store: Arc<InMemoryDeviceStore>,
    manager: Arc<BookingManager>,
    devices: Arc<DeviceService>,
    strategies: StrategyRegistry,
}

async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryDeviceStore::new());
    let (events_tx, _events_rx) = device_event_channel();
    let devices = Arc::new(DeviceService::new(
        store.clone(),
        DeviceCatalog::new(),
        Arc::new(ModelSequenceProvider::new()),
        events_tx,
    ));
    let manager = Arc::new(BookingManager::new(
        store.clone(),
        Arc::new(SystemTimeProvider),
    ));
    Fixture {
        store,
        manager,
        devices,
        strategies: StrategyRegistry::with_defaults(),
    }
}

#[tokio::test]
async fn book_and_return_through_the_simple_strategy() {
    let fx = fixture().await;
    let device = fx.devices.create_device("Nokia 3310").await.unwrap().unwrap();
    assert_eq!(device.id, "Nokia 3310-1");

    let simple = fx.strategies.select("simple").unwrap();
    assert!(simple.book_device(&fx.manager, &device.id, "alice").await.unwrap());
    assert!(!fx.store.find_by_id(&device.id).await.unwrap().unwrap().is_available);

    // Booking again before return is a plain negative outcome
    assert!(!simple.book_device(&fx.manager, &device.id, "bob").await.unwrap());

    assert!(simple.return_device(&fx.manager, &device.id, "alice").await.unwrap());
    assert!(fx.store.find_by_id(&device.id).await.unwrap().unwrap().is_available);
}

#[tokio::test]
async fn return_by_wrong_user_keeps_the_device_booked() {
    let fx = fixture().await;
    fx.devices.create_device("Apple iPhone 13").await.unwrap().unwrap();

    let advanced = fx.strategies.select("advanced").unwrap();
    assert!(advanced
        .book_device(&fx.manager, "Apple iPhone 13-1", "alice")
        .await
        .unwrap());
    assert!(!advanced
        .return_device(&fx.manager, "Apple iPhone 13-1", "bob")
        .await
        .unwrap());
    assert!(fx.manager.is_device_booked("Apple iPhone 13-1").await.unwrap());
}

#[tokio::test]
async fn priority_strategy_gates_on_rank() {
    let fx = fixture().await;
    fx.devices.create_device("Samsung Galaxy S9").await.unwrap().unwrap();

    let priority = fx.strategies.select("priority").unwrap();

    // Unranked user: rejected regardless of availability
    assert!(!priority
        .book_device(&fx.manager, "Samsung Galaxy S9-1", "visitor")
        .await
        .unwrap());
    assert!(!fx.manager.is_device_booked("Samsung Galaxy S9-1").await.unwrap());

    // Ranked user behaves like the simple strategy
    assert!(priority
        .book_device(&fx.manager, "Samsung Galaxy S9-1", "admin")
        .await
        .unwrap());
}

#[tokio::test]
async fn unknown_strategy_is_a_not_found_condition() {
    let fx = fixture().await;
    assert!(matches!(fx.strategies.select("vip"), Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn unknown_model_yields_no_device() {
    let fx = fixture().await;
    assert!(fx.devices.create_device("Pixel 8").await.unwrap().is_none());
    assert!(fx.store.is_empty().await);
}

#[tokio::test]
async fn each_booking_round_trip_is_independent() {
    let fx = fixture().await;
    let device = fx.devices.create_device("Oneplus 9").await.unwrap().unwrap();

    let first = fx.manager.book_device(&device.id, "alice").await.unwrap().unwrap();
    fx.manager.return_device(&first.id, "alice").await.unwrap().unwrap();
    let second = fx.manager.book_device(&device.id, "bob").await.unwrap().unwrap();
    fx.manager.return_device(&second.id, "bob").await.unwrap().unwrap();
    let third = fx.manager.book_device(&device.id, "alice").await.unwrap().unwrap();

    assert_eq!(first.device_id, third.device_id);
    assert_eq!(fx.manager.active_bookings().await.len(), 1);
    assert!(fx.manager.is_device_booked(&device.id).await.unwrap());
}

#[tokio::test]
async fn concurrent_bookers_race_for_one_device() {
    let fx = fixture().await;
    let device = fx.devices.create_device("iPhone X").await.unwrap().unwrap();

    let mut handles = Vec::new();
    for user in ["alice", "bob", "carol", "dave"] {
        let manager = fx.manager.clone();
        let device_id = device.id.clone();
        handles.push(tokio::spawn(async move {
            manager.book_device(&device_id, user).await.unwrap().is_some()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1, "exactly one booker may win the device");
    assert_eq!(fx.manager.active_bookings().await.len(), 1);
}
