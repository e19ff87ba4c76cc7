//! Dual-ring rotational video scrubber.
//!
//! Dragging the outer or inner ring of a circular dial scrubs a paused video;
//! full clockwise turns of the inner ring are counted on the dial's center.

pub mod error;
pub mod ops;
pub mod renderer;
pub mod types;
pub mod ui;
