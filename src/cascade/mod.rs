//! Cascade resolution: apply a placement and settle the resulting chain.
//!
//! The resolver is the only code that mutates a live grid. It never rejects
//! a settled or unsettled grid; placement validation runs first through the
//! grid model.

pub mod event;
pub mod resolver;

pub use event::{CascadeAnomaly, CascadeOutcome, ExplosionEvent};
pub use resolver::CascadeResolver;
