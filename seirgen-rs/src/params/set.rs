use std::collections::BTreeMap;

use paste::paste;
use serde::Serialize;

use crate::derived_props;
use crate::prelude::Real;

use super::{Consts, ParamValue};

/// One realization of every parameter, produced by a single reroll of the
/// specification and extended with the derived quantities. Each Monte Carlo
/// trajectory owns its own set; nothing is shared with other sets or with
/// the specification it was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
    consts: Consts,
}

impl ParameterSet {
    pub fn new(consts: Consts) -> Self {
        ParameterSet {
            values: BTreeMap::new(),
            consts,
        }
    }

    /// The simulation-wide constants this set was drawn under.
    pub fn consts(&self) -> &Consts {
        &self.consts
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Borrow an entry that must exist. Panics when it does not: the loader
    /// checks every derivation input up front, so a miss here means the set
    /// was assembled by hand without it.
    pub fn require(&self, name: &str) -> &ParamValue {
        match self.values.get(name) {
            Some(value) => value,
            None => panic!("parameter set has no entry `{}`", name),
        }
    }

    /// Scalar view of an entry: the value itself, or the mean over age bins.
    pub fn scalar(&self, name: &str) -> Real {
        self.require(name).mean()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Acceptance test for a freshly derived set: the latent period exceeds
    /// one day, the generation interval exceeds the latent period, and the
    /// infectious period exceeds three days.
    pub fn is_valid(&self) -> bool {
        self.scalar("Te") > 1.0
            && self.scalar("Tg") > self.scalar("Te")
            && self.scalar("Ti") > 3.0
    }

    derived_props! {
        te => "Te",
        ti => "Ti",
        r0 => "R0",
        sigma => "SIGMA",
        gamma => "GAMMA",
        beta => "BETA",
        sym_frac => "SYM_FRAC",
        theta => "THETA",
        gamma_h => "GAMMA_H",
    }
}
