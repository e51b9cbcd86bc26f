use bytes::Bytes;

use drivehub_domain::booking::BookingStatus;
use drivehub_domain::car::{CarType, FuelType, Transmission};
use drivehub_domain::id::UserId;
use drivehub_marketplace::domain::types::{ImageUpload, MAX_IMAGE_BYTES};
use drivehub_marketplace::error::MarketplaceError;
use drivehub_marketplace::usecase::admin::{
    AdminGate, AdvanceBookingUseCase, CreateCarUseCase, DashboardUseCase, ListFleetUseCase,
    NewCarInput, SetAvailabilityUseCase,
};

use crate::helpers::{
    MockBookingRepo, MockCarRepo, MockRoleRepo, MockStorage, test_booking, test_car,
};

fn gate_for(admin: UserId) -> AdminGate<MockRoleRepo> {
    AdminGate {
        roles: MockRoleRepo::admins(vec![admin]),
    }
}

fn png(len: usize) -> ImageUpload {
    ImageUpload {
        content_type: "image/png".to_owned(),
        bytes: Bytes::from(vec![0u8; len]),
    }
}

fn new_car(images: Vec<ImageUpload>) -> NewCarInput {
    NewCarInput {
        name: "Tesla Model Y".to_owned(),
        brand: "Tesla".to_owned(),
        model: "Model Y".to_owned(),
        year: 2024,
        price_per_day: 110.0,
        insurance_per_day: None,
        car_type: CarType::Electric,
        transmission: Transmission::Automatic,
        fuel_type: FuelType::Electric,
        seats: 5,
        luggage: 3,
        location: "Lisbon Airport".to_owned(),
        features: vec!["Autopilot".to_owned(), " ".to_owned(), "Heated seats".to_owned()],
        description: Some("Long range".to_owned()),
        mileage_policy: None,
        images,
    }
}

#[tokio::test]
async fn should_deny_fleet_to_non_admin() {
    let uc = ListFleetUseCase {
        gate: AdminGate {
            roles: MockRoleRepo::none(),
        },
        cars: MockCarRepo::default(),
    };
    let result = uc.execute(UserId::generate()).await;
    assert!(matches!(result, Err(MarketplaceError::NotAdmin)));
}

#[tokio::test]
async fn should_list_only_own_fleet() {
    let admin = UserId::generate();
    let mut hidden = test_car(admin, "Hidden", 40.0, 1);
    hidden.available = false;
    let uc = ListFleetUseCase {
        gate: gate_for(admin),
        cars: MockCarRepo::new(vec![
            test_car(admin, "Mine", 50.0, 2),
            hidden,
            test_car(UserId::generate(), "Theirs", 60.0, 0),
        ]),
    };

    let fleet = uc.execute(admin).await.unwrap();
    let names: Vec<&str> = fleet.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Hidden", "Mine"]);
}

#[tokio::test]
async fn should_upload_images_and_list_car() {
    let admin = UserId::generate();
    let cars = MockCarRepo::default();
    let storage = MockStorage::default();
    let uc = CreateCarUseCase {
        gate: gate_for(admin),
        cars: cars.clone(),
        storage: storage.clone(),
    };

    let jpeg = ImageUpload {
        content_type: "image/jpeg".to_owned(),
        bytes: Bytes::from_static(b"\xff\xd8\xff"),
    };
    let car = uc.execute(admin, new_car(vec![png(64), jpeg])).await.unwrap();

    assert_eq!(car.provider_id, admin);
    assert!(car.available);
    assert_eq!(car.insurance_per_day, 15.0);
    assert_eq!(car.features, vec!["Autopilot", "Heated seats"]);

    let uploads = storage.uploads();
    assert_eq!(uploads.len(), 2);
    let prefix = format!("{admin}/{}/", car.id);
    assert!(uploads[0].0.starts_with(&prefix) && uploads[0].0.ends_with(".png"));
    assert_eq!(uploads[1].1, "image/jpeg");
    assert!(uploads[1].0.ends_with(".jpg"));
    let urls: Vec<String> = uploads
        .iter()
        .map(|(key, _, _)| format!("https://storage.drivehub.test/car-images/{key}"))
        .collect();
    assert_eq!(car.image_url.as_deref(), Some(urls[0].as_str()));
    assert_eq!(car.image_urls, urls, "every uploaded image is kept");
    assert!(storage.removed().is_empty());

    assert_eq!(cars.snapshot(), vec![car]);
}

#[tokio::test]
async fn should_remove_uploaded_images_when_listing_cannot_be_saved() {
    let admin = UserId::generate();
    let storage = MockStorage::default();
    let uc = CreateCarUseCase {
        gate: gate_for(admin),
        cars: MockCarRepo::failing(),
        storage: storage.clone(),
    };

    let result = uc.execute(admin, new_car(vec![png(64), png(32)])).await;

    assert!(matches!(result, Err(MarketplaceError::Internal(_))));
    assert_eq!(storage.uploaded_keys().len(), 2);
    assert_eq!(storage.removed(), storage.uploaded_keys());
}

#[tokio::test]
async fn should_remove_earlier_images_when_an_upload_fails() {
    let admin = UserId::generate();
    let storage = MockStorage {
        fail_upload_at: Some(1),
        ..MockStorage::default()
    };
    let cars = MockCarRepo::default();
    let uc = CreateCarUseCase {
        gate: gate_for(admin),
        cars: cars.clone(),
        storage: storage.clone(),
    };

    let result = uc
        .execute(admin, new_car(vec![png(64), png(32), png(16)]))
        .await;

    assert!(matches!(result, Err(MarketplaceError::Internal(_))));
    assert_eq!(storage.uploaded_keys().len(), 1);
    assert_eq!(storage.removed(), storage.uploaded_keys());
    assert!(cars.snapshot().is_empty());
}

#[tokio::test]
async fn should_reject_unsupported_image_before_uploading() {
    let admin = UserId::generate();
    let storage = MockStorage::default();
    let cars = MockCarRepo::default();
    let uc = CreateCarUseCase {
        gate: gate_for(admin),
        cars: cars.clone(),
        storage: storage.clone(),
    };
    let gif = ImageUpload {
        content_type: "image/gif".to_owned(),
        bytes: Bytes::from_static(b"GIF89a"),
    };

    let result = uc.execute(admin, new_car(vec![png(16), gif])).await;

    assert!(matches!(result, Err(MarketplaceError::InvalidImage)));
    assert!(storage.uploads().is_empty(), "nothing may be uploaded");
    assert!(cars.snapshot().is_empty());
}

#[tokio::test]
async fn should_reject_oversized_image() {
    let admin = UserId::generate();
    let uc = CreateCarUseCase {
        gate: gate_for(admin),
        cars: MockCarRepo::default(),
        storage: MockStorage::default(),
    };
    let result = uc
        .execute(admin, new_car(vec![png(MAX_IMAGE_BYTES + 1)]))
        .await;
    assert!(matches!(result, Err(MarketplaceError::ImageTooLarge)));
}

#[tokio::test]
async fn should_reject_non_positive_price() {
    let admin = UserId::generate();
    let uc = CreateCarUseCase {
        gate: gate_for(admin),
        cars: MockCarRepo::default(),
        storage: MockStorage::default(),
    };
    let result = uc
        .execute(
            admin,
            NewCarInput {
                price_per_day: 0.0,
                ..new_car(vec![])
            },
        )
        .await;
    assert!(
        matches!(&result, Err(MarketplaceError::InvalidField(field)) if field == "price_per_day"),
        "expected InvalidField(price_per_day), got {:?}",
        result.err()
    );
}

#[tokio::test]
async fn should_toggle_availability_of_own_car_only() {
    let admin = UserId::generate();
    let mine = test_car(admin, "Mine", 50.0, 1);
    let theirs = test_car(UserId::generate(), "Theirs", 60.0, 1);
    let cars = MockCarRepo::new(vec![mine.clone(), theirs.clone()]);
    let uc = SetAvailabilityUseCase {
        gate: gate_for(admin),
        cars: cars.clone(),
    };

    let updated = uc.execute(admin, mine.id, false).await.unwrap();
    assert!(!updated.available);
    assert!(!cars.snapshot()[0].available);

    let result = uc.execute(admin, theirs.id, false).await;
    assert!(matches!(result, Err(MarketplaceError::Forbidden)));
    assert!(cars.snapshot()[1].available);
}

#[tokio::test]
async fn should_advance_booking_along_lifecycle() {
    let admin = UserId::generate();
    let car = test_car(admin, "Mine", 50.0, 5);
    let booking = test_booking(UserId::generate(), &car, 220.0, BookingStatus::Pending, 1);
    let bookings = MockBookingRepo::new(vec![booking.clone()]);
    let uc = AdvanceBookingUseCase {
        gate: gate_for(admin),
        cars: MockCarRepo::new(vec![car]),
        bookings: bookings.clone(),
    };

    let skipped = uc
        .execute(admin, booking.id, BookingStatus::Completed)
        .await;
    assert!(matches!(skipped, Err(MarketplaceError::InvalidStatusTransition)));

    let upcoming = uc
        .execute(admin, booking.id, BookingStatus::Upcoming)
        .await
        .unwrap();
    assert_eq!(upcoming.status, BookingStatus::Upcoming);

    uc.execute(admin, booking.id, BookingStatus::Completed)
        .await
        .unwrap();
    assert_eq!(bookings.snapshot()[0].status, BookingStatus::Completed);
}

#[tokio::test]
async fn should_forbid_advancing_booking_on_foreign_car() {
    let admin = UserId::generate();
    let car = test_car(UserId::generate(), "Theirs", 50.0, 5);
    let booking = test_booking(UserId::generate(), &car, 220.0, BookingStatus::Pending, 1);
    let uc = AdvanceBookingUseCase {
        gate: gate_for(admin),
        cars: MockCarRepo::new(vec![car]),
        bookings: MockBookingRepo::new(vec![booking.clone()]),
    };
    let result = uc
        .execute(admin, booking.id, BookingStatus::Upcoming)
        .await;
    assert!(matches!(result, Err(MarketplaceError::Forbidden)));
}

#[tokio::test]
async fn should_summarize_own_fleet_on_dashboard() {
    let admin = UserId::generate();
    let tesla = test_car(admin, "Tesla Model 3", 85.0, 30);
    let polo = test_car(admin, "VW Polo", 35.0, 30);
    let foreign = test_car(UserId::generate(), "Foreign", 70.0, 30);
    let renter = UserId::generate();

    let uc = DashboardUseCase {
        gate: gate_for(admin),
        cars: MockCarRepo::new(vec![tesla.clone(), polo.clone(), foreign.clone()]),
        bookings: MockBookingRepo::new(vec![
            test_booking(renter, &tesla, 325.0, BookingStatus::Completed, 20),
            test_booking(renter, &tesla, 425.0, BookingStatus::Upcoming, 6),
            test_booking(renter, &polo, 175.0, BookingStatus::Pending, 2),
            test_booking(renter, &polo, 140.0, BookingStatus::Cancelled, 1),
            test_booking(renter, &foreign, 999.0, BookingStatus::Pending, 0),
        ]),
    };

    let summary = uc.execute(admin).await.unwrap();

    assert_eq!(summary.total_cars, 2);
    assert_eq!(summary.revenue, 925.0);
    assert_eq!(summary.active_bookings, 2);
    assert_eq!(summary.pending_bookings, 1);
    assert_eq!(summary.recent_bookings.len(), 4);
    assert_eq!(summary.recent_bookings[0].booking.total_price, 140.0);
    assert_eq!(summary.top_cars[0].name, "Tesla Model 3");
    assert_eq!(summary.top_cars[0].bookings, 2);
    assert_eq!(summary.top_cars[0].revenue, 750.0);
    assert_eq!(summary.top_cars[1].revenue, 175.0);
}

#[tokio::test]
async fn should_show_empty_dashboard_for_new_provider() {
    let admin = UserId::generate();
    let uc = DashboardUseCase {
        gate: gate_for(admin),
        cars: MockCarRepo::default(),
        bookings: MockBookingRepo::default(),
    };
    let summary = uc.execute(admin).await.unwrap();
    assert_eq!(summary.total_cars, 0);
    assert_eq!(summary.revenue, 0.0);
    assert!(summary.recent_bookings.is_empty());
    assert!(summary.top_cars.is_empty());
}
