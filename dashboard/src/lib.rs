//! Food Waste Dashboard view.
//!
//! This crate builds the dashboard card as a retained view tree and renders
//! it to HTML with Leptos SSR. The card is a static shell: every tile value,
//! category weight and image reference is a literal baked into [`view`].
//! Nothing here fetches data or holds state, so [`view::dashboard`] can be
//! called from any thread and always returns the same tree.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`view`] | Literal dashboard data and the argument-free view builder |
//! | [`node`] | View tree types, builders, and tree queries |
//! | [`render`] | Leptos components and server-side HTML rendering |
//! | [`consts`] | Image URLs, layout widths, and the bar scaling divisor |

pub mod consts;
pub mod node;
pub mod render;
pub mod view;

pub use node::{Element, Node, Role, Tag};
pub use render::{DashboardCard, DashboardDocument, node_view, render_html, render_page};
pub use view::dashboard;
