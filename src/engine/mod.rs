//! Engine controller for running searches in the background.
//!
//! The controller consults the opening book, then searches a copy of the position on its own
//! thread while a timer thread raises the stop flag when the time budget runs out.

mod controller;

pub use controller::{EngineController, SearchJob};
