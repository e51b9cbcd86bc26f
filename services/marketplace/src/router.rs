use axum::{
    Router,
    extract::DefaultBodyLimit,
    handler::Handler,
    routing::{delete, get, patch, post},
};

use drivehub_core::health::healthz;
use drivehub_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    account::{cancel_my_booking, get_account, get_my_bookings, update_account},
    admin::{
        MAX_CAR_FORM_BYTES, advance_booking, create_car, get_dashboard, get_fleet,
        set_availability,
    },
    booking::create_booking,
    car::{get_car, get_featured_cars, get_quote, search_cars},
    health::readyz,
    session::{get_session, sign_in, sign_out, sign_up},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Cars
        .route("/cars", get(search_cars))
        .route("/cars/featured", get(get_featured_cars))
        .route("/cars/{car_id}", get(get_car))
        .route("/cars/{car_id}/quote", get(get_quote))
        // Bookings
        .route("/bookings", post(create_booking))
        // Account
        .route("/account", get(get_account).patch(update_account))
        .route("/account/bookings", get(get_my_bookings))
        .route("/account/bookings/{booking_id}", delete(cancel_my_booking))
        // Admin
        .route("/admin/dashboard", get(get_dashboard))
        .route(
            "/admin/cars",
            get(get_fleet).post(create_car.layer(DefaultBodyLimit::max(MAX_CAR_FORM_BYTES))),
        )
        .route("/admin/cars/{car_id}/availability", patch(set_availability))
        .route("/admin/bookings/{booking_id}/status", patch(advance_booking))
        // Session
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/session", get(get_session).delete(sign_out))
        .layer(trace_layer())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
