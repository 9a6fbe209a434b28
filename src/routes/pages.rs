//! Dashboard page routes: the rendered card and its view tree.

use axum::response::{Html, Json};
use dashboard::Node;

/// Stylesheet path the page links to, served from the static directory.
pub const STYLESHEET_HREF: &str = "/static/style.css";

/// `GET /` and `GET /dashboard` — the dashboard card as a full HTML page.
pub async fn page() -> Html<String> {
    Html(dashboard::render_page(STYLESHEET_HREF))
}

/// `GET /api/dashboard` — the card's view tree as JSON.
pub async fn view() -> Json<Node> {
    Json(dashboard::dashboard())
}
