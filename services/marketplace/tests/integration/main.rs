mod helpers;

mod admin_test;
mod router_test;
mod session_test;
