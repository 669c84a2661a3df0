pub mod coords;
pub mod geometry;
pub mod grid;
pub mod id;
pub mod model;
pub mod zorder;

pub use coords::{MAX_SCALE, MIN_SCALE, Viewport, absolute_bounds, absolute_position};
pub use geometry::{Point, Rect};
pub use id::NodeId;
pub use model::*;
pub use zorder::{SELECTION_BOOST, display_z, effective_z};
