use anyhow::Context as _;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use drivehub_domain::booking::BookingStatus;
use drivehub_domain::id::{BookingId, CarId, UserId};
use drivehub_domain::pagination::PageRequest;
use drivehub_domain::role::AppRole;
use drivehub_marketplace_schema::{bookings, cars, profiles, user_roles};

use crate::domain::repository::{
    BookingRepository, CarRepository, ProfileRepository, RoleRepository,
};
use crate::domain::types::{Booking, Car, CarFilter, Profile};
use crate::error::MarketplaceError;

// ── Car repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCarRepository {
    pub db: DatabaseConnection,
}

impl CarRepository for DbCarRepository {
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, MarketplaceError> {
        let model = cars::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find car by id")?;
        Ok(model.map(car_from_model).transpose()?)
    }

    async fn list_available(&self, filter: &CarFilter) -> Result<Vec<Car>, MarketplaceError> {
        let mut query = cars::Entity::find().filter(cars::Column::Available.eq(true));
        let location = filter
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());
        if let Some(location) = location {
            let pattern = format!("%{}%", escape_like(&location.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(cars::Column::Location)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }
        if !filter.car_types.is_empty() {
            query = query.filter(
                cars::Column::CarType.is_in(filter.car_types.iter().map(|t| t.as_str())),
            );
        }
        if !filter.transmissions.is_empty() {
            query = query.filter(
                cars::Column::Transmission.is_in(filter.transmissions.iter().map(|t| t.as_str())),
            );
        }
        if !filter.fuel_types.is_empty() {
            query = query.filter(
                cars::Column::FuelType.is_in(filter.fuel_types.iter().map(|f| f.as_str())),
            );
        }
        if let Some(min_seats) = filter.min_seats {
            let min_seats = i32::try_from(min_seats).unwrap_or(i32::MAX);
            query = query.filter(cars::Column::Seats.gte(min_seats));
        }
        let models = query
            .order_by_desc(cars::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list available cars")?;
        Ok(models
            .into_iter()
            .map(car_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn list_featured(&self, limit: u64) -> Result<Vec<Car>, MarketplaceError> {
        let models = cars::Entity::find()
            .filter(cars::Column::Available.eq(true))
            .order_by_desc(cars::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list featured cars")?;
        Ok(models
            .into_iter()
            .map(car_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn list_by_provider(&self, provider_id: UserId) -> Result<Vec<Car>, MarketplaceError> {
        let models = cars::Entity::find()
            .filter(cars::Column::ProviderId.eq(provider_id.0))
            .order_by_desc(cars::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list cars by provider")?;
        Ok(models
            .into_iter()
            .map(car_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn list_by_ids(&self, ids: &[CarId]) -> Result<Vec<Car>, MarketplaceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = cars::Entity::find()
            .filter(cars::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .context("list cars by ids")?;
        Ok(models
            .into_iter()
            .map(car_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn create(&self, car: &Car) -> Result<(), MarketplaceError> {
        cars::ActiveModel {
            id: Set(car.id.0),
            provider_id: Set(car.provider_id.0),
            name: Set(car.name.clone()),
            brand: Set(car.brand.clone()),
            model: Set(car.model.clone()),
            year: Set(car.year),
            price_per_day: Set(car.price_per_day),
            insurance_per_day: Set(car.insurance_per_day),
            car_type: Set(car.car_type.as_str().to_owned()),
            transmission: Set(car.transmission.as_str().to_owned()),
            fuel_type: Set(car.fuel_type.as_str().to_owned()),
            seats: Set(i32::try_from(car.seats).context("seats out of range")?),
            luggage: Set(i32::try_from(car.luggage).context("luggage out of range")?),
            location: Set(car.location.clone()),
            features: Set(serde_json::Value::from(car.features.clone())),
            description: Set(car.description.clone()),
            mileage_policy: Set(car.mileage_policy.clone()),
            image_url: Set(car.image_url.clone()),
            image_urls: Set(serde_json::Value::from(car.image_urls.clone())),
            available: Set(car.available),
            created_at: Set(car.created_at),
        }
        .insert(&self.db)
        .await
        .context("create car")?;
        Ok(())
    }

    async fn set_available(&self, id: CarId, available: bool) -> Result<(), MarketplaceError> {
        cars::ActiveModel {
            id: Set(id.0),
            available: Set(available),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set car availability")?;
        Ok(())
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn car_from_model(model: cars::Model) -> anyhow::Result<Car> {
    Ok(Car {
        id: CarId(model.id),
        provider_id: UserId(model.provider_id),
        car_type: model.car_type.parse().context("car type")?,
        transmission: model.transmission.parse().context("transmission")?,
        fuel_type: model.fuel_type.parse().context("fuel type")?,
        seats: u32::try_from(model.seats).context("seats")?,
        luggage: u32::try_from(model.luggage).context("luggage")?,
        features: serde_json::from_value(model.features).context("features")?,
        image_urls: serde_json::from_value(model.image_urls).context("image urls")?,
        name: model.name,
        brand: model.brand,
        model: model.model,
        year: model.year,
        price_per_day: model.price_per_day,
        insurance_per_day: model.insurance_per_day,
        location: model.location,
        description: model.description,
        mileage_policy: model.mileage_policy,
        image_url: model.image_url,
        available: model.available,
        created_at: model.created_at,
    })
}

// ── Booking repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookingRepository {
    pub db: DatabaseConnection,
}

impl BookingRepository for DbBookingRepository {
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, MarketplaceError> {
        let model = bookings::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find booking by id")?;
        Ok(model.map(booking_from_model).transpose()?)
    }

    async fn create(&self, booking: &Booking) -> Result<(), MarketplaceError> {
        bookings::ActiveModel {
            id: Set(booking.id.0),
            user_id: Set(booking.user_id.0),
            car_id: Set(booking.car_id.0),
            pickup_location: Set(booking.pickup_location.clone()),
            dropoff_location: Set(booking.dropoff_location.clone()),
            pickup_date: Set(booking.pickup_date),
            dropoff_date: Set(booking.dropoff_date),
            total_price: Set(booking.total_price),
            first_name: Set(booking.first_name.clone()),
            last_name: Set(booking.last_name.clone()),
            email: Set(booking.email.clone()),
            phone: Set(booking.phone.clone()),
            status: Set(booking.status.as_str().to_owned()),
            created_at: Set(booking.created_at),
        }
        .insert(&self.db)
        .await
        .context("create booking")?;
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Booking>, MarketplaceError> {
        let models = bookings::Entity::find()
            .filter(bookings::Column::UserId.eq(user_id.0))
            .order_by_desc(bookings::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list bookings by user")?;
        Ok(models
            .into_iter()
            .map(booking_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn count_by_user(&self, user_id: UserId) -> Result<u64, MarketplaceError> {
        let count = bookings::Entity::find()
            .filter(bookings::Column::UserId.eq(user_id.0))
            .count(&self.db)
            .await
            .context("count bookings by user")?;
        Ok(count)
    }

    async fn list_by_cars(&self, car_ids: &[CarId]) -> Result<Vec<Booking>, MarketplaceError> {
        if car_ids.is_empty() {
            return Ok(vec![]);
        }
        let models = bookings::Entity::find()
            .filter(bookings::Column::CarId.is_in(car_ids.iter().map(|id| id.0)))
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list bookings by cars")?;
        Ok(models
            .into_iter()
            .map(booking_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<(), MarketplaceError> {
        bookings::ActiveModel {
            id: Set(id.0),
            status: Set(status.as_str().to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update booking status")?;
        Ok(())
    }
}

fn booking_from_model(model: bookings::Model) -> anyhow::Result<Booking> {
    Ok(Booking {
        id: BookingId(model.id),
        user_id: UserId(model.user_id),
        car_id: CarId(model.car_id),
        status: model.status.parse().context("booking status")?,
        pickup_location: model.pickup_location,
        dropoff_location: model.dropoff_location,
        pickup_date: model.pickup_date,
        dropoff_date: model.dropoff_date,
        total_price: model.total_price,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        phone: model.phone,
        created_at: model.created_at,
    })
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<Profile>, MarketplaceError> {
        let model = profiles::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn create(&self, profile: &Profile) -> Result<(), MarketplaceError> {
        profiles::ActiveModel {
            id: Set(profile.id.0),
            first_name: Set(profile.first_name.clone()),
            last_name: Set(profile.last_name.clone()),
            email: Set(profile.email.clone()),
            created_at: Set(profile.created_at),
        }
        .insert(&self.db)
        .await
        .context("create profile")?;
        Ok(())
    }

    async fn update_names(
        &self,
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), MarketplaceError> {
        let mut am = profiles::ActiveModel {
            id: Set(id.0),
            ..Default::default()
        };
        if let Some(first_name) = first_name {
            am.first_name = Set(first_name.to_owned());
        }
        if let Some(last_name) = last_name {
            am.last_name = Set(last_name.to_owned());
        }
        am.update(&self.db).await.context("update profile names")?;
        Ok(())
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        id: UserId(model.id),
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        created_at: model.created_at,
    }
}

// ── Role repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn has_role(&self, user_id: UserId, role: AppRole) -> Result<bool, MarketplaceError> {
        let count = user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(user_id.0))
            .filter(user_roles::Column::Role.eq(role.as_str()))
            .count(&self.db)
            .await
            .context("check user role")?;
        Ok(count > 0)
    }
}
