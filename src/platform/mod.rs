//! Platform front-ends
//!
//! - `web`: canvas surface, score element and DOM wiring (wasm32)
//! - `terminal`: crossterm surface and input loop (native)

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;
#[cfg(target_arch = "wasm32")]
pub mod web;
