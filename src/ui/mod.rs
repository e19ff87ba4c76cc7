pub mod app;
pub mod loading_overlay;
pub mod ring_dial;
pub mod video_player;
