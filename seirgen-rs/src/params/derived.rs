use std::f64::consts::LN_2;

use ndarray::Array1;

use crate::prelude::Real;

use super::{calc_reff, calc_te, calc_ti, ParamValue, ParameterSet};

/// Extend a rerolled set with every quantity derived from the drawn ones.
///
/// Reads `Tg`, `Ts`, `D`, `frac_trans_before_sym`, `ASYM_FRAC`, `H_TIME` and
/// `I_TO_H_TIME` together with the `En`/`Im` constants; the loader guarantees
/// all of them exist. Derived entries never feed back into rerolling.
pub fn calc_derived_params(params: &mut ParameterSet) -> &mut ParameterSet {
    let en = params.consts().en();
    let im = params.consts().im();

    let te = calc_te(
        params.require("Tg"),
        params.require("Ts"),
        en,
        params.require("frac_trans_before_sym"),
    );
    let ti = calc_ti(&te, params.require("Tg"), en);
    let r = LN_2 / params.require("D");
    let r0 = calc_reff(im, en, params.require("Tg"), &te, &r);

    let sigma = te.recip();
    let gamma = ti.recip();
    let beta = &r0 * &gamma;
    let sym_frac = 1.0 - params.require("ASYM_FRAC");
    let theta = params.require("H_TIME").recip();
    let gamma_h = params.require("I_TO_H_TIME").recip();

    params.insert("Te", te);
    params.insert("Ti", ti);
    params.insert("R0", r0);
    params.insert("SIGMA", sigma);
    params.insert("GAMMA", gamma);
    params.insert("BETA", beta);
    params.insert("SYM_FRAC", sym_frac);
    params.insert("THETA", theta);
    params.insert("GAMMA_H", gamma_h);
    params
}

/// Rescale an already derived set to match the doubling time `d`, replacing
/// its `R0` and `BETA` in place and returning the same set.
///
/// The caller hands over exclusive access; when the diagonal of a contact
/// matrix is supplied, `BETA` is additionally divided through by it to
/// normalize per-group transmission.
pub fn rescale_doubling_rate<'a>(
    d: Real,
    params: &'a mut ParameterSet,
    a_diag: Option<&Array1<Real>>,
) -> &'a mut ParameterSet {
    let en = params.consts().en();
    let im = params.consts().im();

    let r = ParamValue::Scalar(LN_2 / d);
    let r0 = calc_reff(im, en, params.require("Tg"), params.require("Te"), &r);
    let mut beta = &r0 * params.require("GAMMA");
    if let Some(diag) = a_diag {
        beta = &beta / diag;
    }

    params.insert("R0", r0);
    params.insert("BETA", beta);
    params
}
