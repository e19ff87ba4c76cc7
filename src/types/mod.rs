pub mod clock;
pub mod loop_counter;
pub mod media;
pub mod overlay;
pub mod playback_state;
pub mod reset_transition;
pub mod ring;
pub mod settings;
