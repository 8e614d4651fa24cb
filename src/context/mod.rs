//! The ESP context type and its anti-replay window.

mod esp_context;
mod window;

pub use esp_context::EspContext;
