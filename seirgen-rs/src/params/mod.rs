//! This module declares the parameter machinery of the seirgen crate.
//!
//! A parameter file describes every epidemiological input either as a fixed
//! constant or as a distribution to draw from; each Monte Carlo trajectory
//! gets its own realization of the whole set, with the dependent quantities
//! (latent period, reproduction number, rates) derived algebraically from the
//! drawn ones.
mod derive;
mod derived;
mod generator;
mod macros;
mod reroll;
mod set;
mod spec;
mod value;

pub use derive::*;
pub use derived::*;
pub use generator::*;
pub use set::*;
pub use spec::*;
pub use value::*;
