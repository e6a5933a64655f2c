#![warn(clippy::all, rust_2018_idioms)]

mod app;
mod image_view;
mod input;
mod save;
mod settings;
mod sliders;
pub use app::{ColorFiltersApp, Launch, SessionSnapshot};
pub use settings::Settings;
