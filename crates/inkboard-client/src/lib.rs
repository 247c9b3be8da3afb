//! Inkboard client engine: the drawing controller and relay bridge.
//!
//! The controller is the single owner of a surface's replicated state.
//! Canonical input events come in from the normalizer, relay commands come
//! in from the transport, and a retained scene plus an outbound command
//! queue come out.

pub mod controller;

pub use controller::BoardController;
