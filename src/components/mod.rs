pub mod app;
pub mod camera_controls;
pub mod game_over_overlay;
pub mod hud;
pub mod map_view;
pub mod orientation_warning;
