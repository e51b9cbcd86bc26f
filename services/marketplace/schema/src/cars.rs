use sea_orm::entity::prelude::*;

/// Car listed by a provider.
///
/// `car_type`, `transmission` and `fuel_type` hold the lowercase labels of
/// the domain enums. `features` and `image_urls` are JSON arrays of strings,
/// in display order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
    pub insurance_per_day: f64,
    pub car_type: String,
    pub transmission: String,
    pub fuel_type: String,
    pub seats: i32,
    pub luggage: i32,
    pub location: String,
    pub features: Json,
    pub description: Option<String>,
    pub mileage_policy: Option<String>,
    pub image_url: Option<String>,
    pub image_urls: Json,
    pub available: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
