//! Closed-form relations between the epidemiological quantities of a chain
//! SEIR model with `n` exposed and `m` infectious sub-stages. All functions
//! are pure and broadcast elementwise over age-stratified values; none of
//! them checks its numeric domain, so a pathological draw (denominator near
//! zero, negative period) flows through and is culled by the acceptance test
//! when sets are generated.
use crate::prelude::Real;

use super::ParamValue;

/// Latent period from the generation interval `Tg`, the symptom-onset time
/// `Ts`, the exposed-stage count `n` and the fraction `f` of transmission
/// happening before symptom onset.
pub fn calc_te(tg: &ParamValue, ts: &ParamValue, n: Real, f: &ParamValue) -> ParamValue {
    let k = 2.0 * n / (n + 1.0);
    let num = k * f * tg - ts;
    let den = k * f - 1.0;
    num / den
}

/// Infectious period left once the latent period is subtracted from the
/// generation interval.
pub fn calc_ti(te: &ParamValue, tg: &ParamValue, n: Real) -> ParamValue {
    (tg - te) * (2.0 * n / (n + 1.0))
}

/// Effective reproduction number of the chain model for exponential growth
/// rate `r`, via the renewal equation.
pub fn calc_reff(m: Real, n: Real, tg: &ParamValue, te: &ParamValue, r: &ParamValue) -> ParamValue {
    let tdiff = tg - te;
    let growth = (1.0 + (r * te) / m).powf(m);
    let num = 2.0 * n / (n + 1.0) * r * &tdiff * &growth;
    let den = 1.0 - (1.0 + 2.0 * r / (n + 1.0) * &tdiff).powf(-n);
    num / den
}

/// Exposed-compartment exit rate, the reciprocal latent period.
pub fn calc_beta(te: &ParamValue) -> ParamValue {
    te.recip()
}

/// Recovery rate, the reciprocal infectious period.
pub fn calc_gamma(ti: &ParamValue) -> ParamValue {
    ti.recip()
}

/// Convert a 95% confidence interval to the `(mean, stddev)` of the normal
/// distribution with that interval. Callers pass `(lower, upper)` in order;
/// a swapped interval yields a negative spread.
pub fn ci_to_std(ci: [Real; 2]) -> (Real, Real) {
    let [lower, upper] = ci;
    let std95 = (1.0 as Real / 0.05).sqrt();
    ((upper + lower) / 2.0, (upper - lower) / std95 / 2.0)
}
