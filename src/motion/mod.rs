pub mod cursor;
pub mod easing;
pub mod flip;
pub mod geometry;
pub mod marquee;
pub mod proximity;
pub mod reveal;
pub mod scroll_progress;
pub mod search_demo;
pub mod sequencer;
pub mod spring;
pub mod text_effects;
pub mod visibility;
