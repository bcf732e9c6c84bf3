//! Request middleware.
//!
//! Request lifecycle concerns that sit outside individual handlers, such as
//! trace correlation.

pub mod trace;

pub use trace::Trace;
