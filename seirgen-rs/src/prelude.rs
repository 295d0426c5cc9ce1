pub use crate::error::ConfigError;
pub use crate::params::{
    calc_beta, calc_derived_params, calc_gamma, calc_reff, calc_te, calc_ti, ci_to_std,
    rescale_doubling_rate, Consts, ConstValue, ParamEntry, ParamKind, ParamValue, ParameterSet,
    SeirParams, Specification, DEFAULT_VAR,
};
pub use crate::sampler::{default_rng, mpert, truncnorm, truncnorm_vec};
pub use crate::utils::age_interp;

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;

/// A half-open `[lower, upper)` age interval. Age-stratified parameters hold
/// one value per bin.
pub type AgeBin = [Real; 2];
