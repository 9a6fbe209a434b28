//! Leptos rendering of the view tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders the card once per request with Leptos SSR. Each
//! [`Node`] becomes a `view!` element of the matching tag; text is escaped
//! by Leptos. Semantic markers travel as `data-key` / `data-role`
//! attributes so rendered output can be inspected without class matching.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use leptos::prelude::*;
use leptos::reactive::owner::Owner;

use crate::consts::TITLE;
use crate::node::{Element, Node, Role, Tag};
use crate::view::dashboard;

/// The dashboard card as a Leptos component.
#[component]
pub fn DashboardCard() -> impl IntoView {
    node_view(dashboard())
}

/// Full document hosting the card inside `#webcrumbs`, the scope the
/// companion stylesheet targets. A missing stylesheet only loses styling.
#[component]
pub fn DashboardDocument(stylesheet_href: String) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{TITLE}</title>
                <link rel="stylesheet" href=stylesheet_href />
            </head>
            <body>
                <div id="webcrumbs">
                    <DashboardCard />
                </div>
            </body>
        </html>
    }
}

/// Render a node and its subtree to an HTML fragment.
#[must_use]
pub fn render_html(node: &Node) -> String {
    let node = node.clone();
    Owner::new().with(move || node_view(node).to_html())
}

/// Render the complete dashboard page.
#[must_use]
pub fn render_page(stylesheet_href: &str) -> String {
    let stylesheet_href = stylesheet_href.to_owned();
    Owner::new().with(move || view! { <DashboardDocument stylesheet_href=stylesheet_href /> }.to_html())
}

/// Convert a view tree node into a Leptos view.
pub fn node_view(node: Node) -> AnyView {
    match node {
        Node::Text { text } => text.into_any(),
        Node::Element(el) => element_view(el),
    }
}

fn element_view(el: Element) -> AnyView {
    let src = el.attr_value("src").map(str::to_owned);
    let alt = el.attr_value("alt").map(str::to_owned);
    let Element { tag, class, style, key, role, children, .. } = el;
    let role = role.map(Role::as_str);
    let children: Vec<AnyView> = children.into_iter().map(node_view).collect();

    match (tag, style) {
        (Tag::Div, Some(style)) => {
            view! { <div class=class style=style data-key=key data-role=role>{children}</div> }.into_any()
        }
        (Tag::Div, None) => view! { <div class=class data-key=key data-role=role>{children}</div> }.into_any(),
        (Tag::H1, _) => view! { <h1 class=class data-key=key data-role=role>{children}</h1> }.into_any(),
        (Tag::H2, _) => view! { <h2 class=class data-key=key data-role=role>{children}</h2> }.into_any(),
        (Tag::P, _) => view! { <p class=class data-key=key data-role=role>{children}</p> }.into_any(),
        (Tag::Span, _) => view! { <span class=class data-key=key data-role=role>{children}</span> }.into_any(),
        (Tag::Img, _) => view! { <img class=class src=src alt=alt data-key=key data-role=role /> }.into_any(),
    }
}
