// Page handlers for the browser-facing views
//
// UI glue only: the pages are static HTML compiled into the binary and talk
// to the proxy routes with browser-managed cookies. Access is enforced by
// the session gate, not here.

use axum::response::Html;

/// Task list page (protected)
pub async fn home_page() -> Html<&'static str> {
    Html(include_str!("../../assets/home.html"))
}

/// Login page
pub async fn login_page() -> Html<&'static str> {
    Html(include_str!("../../assets/login.html"))
}

/// Registration page
pub async fn register_page() -> Html<&'static str> {
    Html(include_str!("../../assets/register.html"))
}
