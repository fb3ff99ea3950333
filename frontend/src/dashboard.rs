pub mod api;
pub mod components;
pub mod player;
pub mod state;
