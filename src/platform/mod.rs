//! Platform abstraction layer
//!
//! Translates browser events into simulation intents. Everything here is
//! plain data so it can be driven from native tests; the DOM listeners in
//! the binary only forward raw keys, touch points and timestamps.

pub mod input;

pub use input::InputState;
