use sea_orm_migration::prelude::*;

mod m20250601_000001_create_profiles;
mod m20250601_000002_create_user_roles;
mod m20250601_000003_create_cars;
mod m20250601_000004_create_bookings;
mod m20250601_000005_add_listing_indexes;
mod m20250601_000006_add_car_image_urls;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_profiles::Migration),
            Box::new(m20250601_000002_create_user_roles::Migration),
            Box::new(m20250601_000003_create_cars::Migration),
            Box::new(m20250601_000004_create_bookings::Migration),
            Box::new(m20250601_000005_add_listing_indexes::Migration),
            Box::new(m20250601_000006_add_car_image_urls::Migration),
        ]
    }
}
