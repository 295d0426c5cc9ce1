use crate::prelude::{AgeBin, Real};
use ndarray::Array1;

/// Midpoint of every bin in a binning.
fn bin_midpoints(bins: &[AgeBin]) -> Vec<Real> {
    bins.iter().map(|b| 0.5 * (b[0] + b[1])).collect()
}

/// Map values defined over one set of age bins onto another by linear
/// interpolation between bin midpoints. Target midpoints outside the source
/// range take the nearest edge value.
///
/// Bins are expected in increasing order. Values are not weighted by the
/// population inside a bin, so coarse terminal bins ("65+") are approximate.
pub fn age_interp(new_bins: &[AgeBin], bins: &[AgeBin], y: &Array1<Real>) -> Array1<Real> {
    let xs_new = bin_midpoints(new_bins);
    let xs = bin_midpoints(bins);
    Array1::from(
        xs_new
            .iter()
            .map(|&x| interp1(x, &xs, y))
            .collect::<Vec<_>>(),
    )
}

fn interp1(x: Real, xs: &[Real], ys: &Array1<Real>) -> Real {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    for j in 0..last {
        if x <= xs[j + 1] {
            let t = (x - xs[j]) / (xs[j + 1] - xs[j]);
            return ys[j] + t * (ys[j + 1] - ys[j]);
        }
    }
    ys[last]
}
