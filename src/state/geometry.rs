// Element position relative to its scroll container and the sides that can start a swipe
use crate::model::{AllowedSides, Bounds, Edges, Sides};
use crate::util::is_close;

/// What the tracked element scrolls inside of.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContainerBounds {
    /// The window; offsets are measured against its inner size.
    Viewport { width: f64, height: f64 },
    Element(Bounds),
}

/// Signed distance of each element edge past the matching container edge.
pub fn relative_offsets(element: &Bounds, container: &ContainerBounds) -> Edges<f64> {
    match container {
        ContainerBounds::Viewport { width, height } => Edges {
            top: element.top,
            left: element.left,
            bottom: element.top + element.height - height,
            right: element.left + element.width - width,
        },
        ContainerBounds::Element(outer) => Edges {
            top: element.top - outer.top,
            left: element.left - outer.left,
            right: element.right - outer.right,
            bottom: element.bottom - outer.bottom,
        },
    }
}

pub fn bounds_reached(offsets: &Edges<f64>, margin: f64) -> Edges<bool> {
    offsets.map(|offset| is_close(offset, 0.0, margin))
}

/// Edge -> direction table: reaching the bottom edge arms an upward swipe, and so on.
pub fn to_swipe_sides<T>(edges: Edges<T>) -> Sides<T> {
    Sides {
        up: edges.bottom,
        down: edges.top,
        left: edges.right,
        right: edges.left,
    }
}

pub fn allowed_sides(offsets: &Edges<f64>, margin: f64) -> AllowedSides {
    to_swipe_sides(bounds_reached(offsets, margin))
}
