pub mod error;
pub mod geometry;
pub mod model;
pub mod view;

pub use error::MenuError;
pub use geometry::{AuxButton, Geometry, Point, Region, WedgeRegion};
pub use model::{ButtonSlot, MenuState, PieMenu};
pub use view::draw;

pub const DEFAULT_BUTTON_COUNT: usize = 4;
/// One wedge per degree at most.
pub const MAX_BUTTON_COUNT: usize = 360;
pub const DEFAULT_PIE_RADIUS: f64 = 100.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;
pub const DEFAULT_CLOSE_RADIUS: f64 = 28.0;
pub const DEFAULT_PIN_RADIUS: f64 = 16.0;
pub const DEFAULT_PIE_ICON_SIZE: u32 = 32;
pub const DEFAULT_CLOSE_ICON_SIZE: u32 = 24;
pub const DEFAULT_PIN_ICON_SIZE: u32 = 16;
pub const DISABLED_ICON_OPACITY: f64 = 0.2;
