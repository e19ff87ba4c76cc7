pub mod angle_ops;
pub mod scrub_controller;
pub mod seek_ops;
