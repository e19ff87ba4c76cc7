pub mod camera_feed;
pub mod frame_slot;
pub mod video_source;
