//! The dashboard card and the literal data it displays.
//!
//! DESIGN
//! ======
//! The card takes no input. Each section reads only its own literal list:
//! three metric tiles, seven wasted-food bars, one chart placeholder, and
//! four photo thumbnails. List order is display order.
//!
//! The only computation is the bar width: `value / 6` percent, so that the
//! largest sample value (600) fills its bar.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::consts::{
    BAR_SCALE_DIVISOR, CARD_WIDTH_PX, CHART_HEIGHT_PX, CHART_PLACEHOLDER_URL, CHART_WIDTH_PX, PANEL_WIDTH_PX,
    PHOTO_HEIGHT_PX, PHOTO_WIDTH_PX, TILE_WIDTH_PX, TITLE, TREND_BANNER, TREND_ICON,
};
use crate::node::{Element, Node, Role, Tag};

// =============================================================================
// DATA
// =============================================================================

/// Headline figure with its period-over-period delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricTile {
    pub label: &'static str,
    pub delta: &'static str,
    pub value: &'static str,
}

/// A wasted-food category and the magnitude its bar represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WastedFood {
    pub name: &'static str,
    pub value: u32,
}

/// A photo thumbnail from the transaction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Photo {
    pub id: u32,
    pub src: &'static str,
}

pub const METRIC_TILES: [MetricTile; 3] = [
    MetricTile { label: "Waste Value", delta: "12%", value: "$1,724.96" },
    MetricTile { label: "Waste Weight", delta: "8%", value: "2,421.93 LB" },
    MetricTile { label: "Waste Transactions", delta: "8%", value: "1,800" },
];

pub const WASTED_FOODS: [WastedFood; 7] = [
    WastedFood { name: "Vegetables", value: 550 },
    WastedFood { name: "Fruit", value: 500 },
    WastedFood { name: "Fish", value: 450 },
    WastedFood { name: "Eggs", value: 400 },
    WastedFood { name: "Hot Cereal", value: 350 },
    WastedFood { name: "Pasta", value: 300 },
    WastedFood { name: "Chicken", value: 600 },
];

pub const PHOTOS: [Photo; 4] = [
    Photo { id: 1, src: "https://tools-api.webcrumbs.org/image-placeholder/180/120/food1/2" },
    Photo { id: 2, src: "https://tools-api.webcrumbs.org/image-placeholder/180/120/food2/2" },
    Photo { id: 3, src: "https://tools-api.webcrumbs.org/image-placeholder/180/120/food3/2" },
    Photo { id: 4, src: "https://tools-api.webcrumbs.org/image-placeholder/180/120/food4/2" },
];

/// Bar width for a wasted-food value, in percent of the track.
#[must_use]
pub fn bar_width_percent(value: u32) -> f64 {
    f64::from(value) / BAR_SCALE_DIVISOR
}

// =============================================================================
// VIEW
// =============================================================================

/// Build the dashboard card.
#[must_use]
pub fn dashboard() -> Node {
    Element::new(Tag::Div)
        .class(format!("w-[{CARD_WIDTH_PX}px] bg-white p-6 rounded-lg shadow-lg"))
        .role(Role::Card)
        .child(header())
        .child(tile_row())
        .child(analysis_row())
        .child(photo_stream())
        .into()
}

fn header() -> Element {
    let banner = Element::new(Tag::Div)
        .class("flex items-center bg-purple-500 text-white rounded-full px-4 py-2")
        .role(Role::Banner)
        .child(Element::new(Tag::Span).class("material-symbols-outlined mr-2").text(TREND_ICON))
        .text(TREND_BANNER);

    Element::new(Tag::Div)
        .class("flex justify-between items-center")
        .role(Role::Header)
        .child(
            Element::new(Tag::H1)
                .class("text-2xl font-title text-neutral-950")
                .role(Role::Title)
                .text(TITLE),
        )
        .child(banner)
}

fn tile_row() -> Element {
    Element::new(Tag::Div)
        .class("flex justify-between space-x-4 mt-6")
        .role(Role::TileRow)
        .children(METRIC_TILES.iter().map(metric_tile))
}

fn metric_tile(tile: &MetricTile) -> Element {
    Element::new(Tag::Div)
        .class(format!("w-[{TILE_WIDTH_PX}px] bg-gray-50 rounded-md p-4 shadow"))
        .role(Role::MetricTile)
        .child(
            Element::new(Tag::Div)
                .class("flex justify-between items-center")
                .child(
                    Element::new(Tag::P)
                        .class("text-neutral-500")
                        .role(Role::TileLabel)
                        .text(tile.label),
                )
                .child(
                    Element::new(Tag::P)
                        .class("text-neutral-500 text-xs")
                        .role(Role::TileDelta)
                        .text(tile.delta),
                ),
        )
        .child(
            Element::new(Tag::P)
                .class("text-2xl text-neutral-950 font-semibold")
                .role(Role::TileValue)
                .text(tile.value),
        )
}

fn analysis_row() -> Element {
    Element::new(Tag::Div)
        .class("flex justify-between space-x-6 mt-6")
        .role(Role::AnalysisRow)
        .child(wasted_foods_panel())
        .child(loss_reasons_panel())
}

fn panel(title: &str, role: Role) -> Element {
    Element::new(Tag::Div)
        .class(format!("w-[{PANEL_WIDTH_PX}px] bg-gray-50 rounded-md p-6 shadow"))
        .role(role)
        .child(
            Element::new(Tag::H2)
                .class("text-sm text-neutral-950 font-semibold mb-4")
                .text(title),
        )
}

fn wasted_foods_panel() -> Element {
    panel("Top Wasted Foods", Role::WastedFoodsPanel).child(
        Element::new(Tag::Div)
            .class("space-y-2")
            .children(WASTED_FOODS.iter().map(waste_bar)),
    )
}

fn waste_bar(item: &WastedFood) -> Element {
    let width = bar_width_percent(item.value);
    Element::new(Tag::Div)
        .key(item.name)
        .role(Role::WasteBar)
        .child(Element::new(Tag::Span).class("text-neutral-500").text(item.name))
        .child(
            Element::new(Tag::Div)
                .class("bg-purple-200 h-2 rounded-full mt-1")
                .child(
                    Element::new(Tag::Div)
                        .class("bg-purple-500 h-2 rounded-full")
                        .role(Role::BarFill)
                        .style(format!("width: {width}%")),
                ),
        )
}

fn loss_reasons_panel() -> Element {
    panel("Top Loss Reasons", Role::LossReasonsPanel).child(
        Element::new(Tag::Div).class("relative").child(
            Element::new(Tag::Img)
                .class(format!("object-cover w-[{CHART_WIDTH_PX}px] h-[{CHART_HEIGHT_PX}px] rounded-md"))
                .role(Role::Chart)
                .attr("src", CHART_PLACEHOLDER_URL)
                .attr("alt", "chart"),
        ),
    )
}

fn photo_stream() -> Element {
    Element::new(Tag::Div)
        .class("mt-8")
        .role(Role::PhotoStream)
        .child(
            Element::new(Tag::H2)
                .class("text-xl font-title text-neutral-950")
                .text("Photo Stream"),
        )
        .child(
            Element::new(Tag::P)
                .class("text-sm text-neutral-500 mb-4")
                .text("Your Most Recent Transaction Photos"),
        )
        .child(
            Element::new(Tag::Div)
                .class("flex justify-between space-x-3")
                .children(PHOTOS.iter().map(photo)),
        )
}

fn photo(item: &Photo) -> Element {
    Element::new(Tag::Img)
        .class(format!("object-cover w-[{PHOTO_WIDTH_PX}px] h-[{PHOTO_HEIGHT_PX}px] rounded-md"))
        .key(item.id.to_string())
        .role(Role::Photo)
        .attr("src", item.src)
        .attr("alt", format!("photo-{}", item.id))
}
