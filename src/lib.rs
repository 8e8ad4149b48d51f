//! Air Combat: a small top-down shoot-em-up.
//!
//! The simulation (`world`, `compute`) is platform independent: it consumes a
//! frame delta and an [`input::InputState`] and is drawn through the
//! [`display::Surface`] trait. The terminal front end lives in `main.rs` and
//! [`display::terminal`].

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod scene;
pub mod ui;
pub mod world;
