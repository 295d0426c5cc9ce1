use rand::Rng;

use crate::prelude::Real;
use crate::sampler;
use crate::utils::age_interp;

use super::{ParamKind, ParamValue, ParameterSet, Specification};

/// Draws never go below this, keeping rates and periods strictly positive.
const MIN_DRAW: Real = 1e-6;

impl Specification {
    /// Realize every entry of the specification once.
    ///
    /// `var` scales the jitter applied to entries that carry no confidence
    /// interval of their own; at zero the reroll is fully deterministic
    /// except for PERT entries, which sample regardless. The specification
    /// itself is never modified.
    pub fn reroll_params(&self, var: Real, rng: &mut impl Rng) -> ParameterSet {
        let mut params = ParameterSet::new(self.consts().clone());
        for (name, entry) in self.entries() {
            let mut value = match entry.kind() {
                ParamKind::PertMean { mean, gamma } => {
                    mean.map(|mu| sampler::mpert(mu, 0.0, 1.0, *gamma, rng))
                }
                ParamKind::MeanWithCi { mean, ci } => {
                    if var != 0.0 {
                        let (mu, std) = super::ci_to_std(*ci);
                        ParamValue::Scalar(sampler::truncnorm(mu, std, MIN_DRAW, rng))
                    } else {
                        mean.clone()
                    }
                }
                ParamKind::MeanJitter { mean } => {
                    mean * sampler::truncnorm(1.0, var, MIN_DRAW, rng)
                }
                ParamKind::AgeVector { values, age_bins } => {
                    let jitter = sampler::truncnorm_vec(1.0, var, MIN_DRAW, values.len(), rng);
                    let mut drawn = values * &jitter;
                    if age_bins != self.consts().age_bins() {
                        drawn = age_interp(self.consts().age_bins(), age_bins, &drawn);
                    }
                    ParamValue::Vector(drawn)
                }
                ParamKind::Constant(value) => value.clone(),
            };
            if let Some([lo, hi]) = entry.clip() {
                value = value.clip(lo, hi);
            }
            params.insert(name.as_str(), value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use ndarray::array;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const MEANS_ONLY: &str = r#"
        [Tg]
        mean = 7.0

        [Ts]
        mean = 3.0

        [D]
        mean = 10.0

        [frac_trans_before_sym]
        mean = 0.3

        [ASYM_FRAC]
        mean = 0.4

        [H_TIME]
        mean = 5.0

        [I_TO_H_TIME]
        mean = 6.0

        [consts]
        En = 3
        Im = 2
        age_bins = [[0, 20], [20, 100]]
    "#;

    #[test]
    fn zero_variance_returns_the_means() {
        let spec = Specification::from_toml_str(MEANS_ONLY).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let params = spec.reroll_params(0.0, &mut rng);
        assert_eq!(params.require("Tg"), &ParamValue::Scalar(7.0));
        assert_eq!(params.require("Ts"), &ParamValue::Scalar(3.0));
        assert_eq!(params.require("ASYM_FRAC"), &ParamValue::Scalar(0.4));
        assert_eq!(params.require("I_TO_H_TIME"), &ParamValue::Scalar(6.0));
    }

    #[test]
    fn zero_variance_uses_the_ci_mean() {
        let text = MEANS_ONLY.replace("mean = 7.0", "mean = 7.0\n        CI = [6.0, 8.0]");
        let spec = Specification::from_toml_str(&text).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let params = spec.reroll_params(0.0, &mut rng);
        assert_eq!(params.require("Tg"), &ParamValue::Scalar(7.0));
    }

    #[test]
    fn ci_draws_stay_above_the_floor() {
        let text = MEANS_ONLY.replace("mean = 7.0", "mean = 7.0\n        CI = [6.0, 8.0]");
        let spec = Specification::from_toml_str(&text).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            let params = spec.reroll_params(0.2, &mut rng);
            assert!(params.scalar("Tg") >= super::MIN_DRAW);
        }
    }

    #[test]
    fn clip_applies_after_the_draw() {
        let text = MEANS_ONLY.replace(
            "[Ts]\n        mean = 3.0",
            "[Ts]\n        mean = 3.0\n        clip = [0.0, 2.5]",
        );
        let spec = Specification::from_toml_str(&text).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let params = spec.reroll_params(0.0, &mut rng);
        assert_eq!(params.require("Ts"), &ParamValue::Scalar(2.5));
    }

    #[test]
    fn age_vectors_are_rebinned_onto_the_canonical_bins() {
        let text = MEANS_ONLY.replace(
            "[H_TIME]\n        mean = 5.0",
            "[H_TIME]\n        values = [1.0, 3.0]\n        age_bins = [[0, 10], [10, 20]]",
        );
        let spec = Specification::from_toml_str(&text).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let params = spec.reroll_params(0.0, &mut rng);
        match params.require("H_TIME") {
            ParamValue::Vector(v) => {
                assert_eq!(v.len(), 2);
                assert_approx_eq!(v[0], 2.0, 1e-12);
                assert_approx_eq!(v[1], 3.0, 1e-12);
            }
            other => panic!("expected a vector, got {:?}", other),
        }
    }

    #[test]
    fn matching_age_bins_skip_interpolation() {
        let text = MEANS_ONLY.replace(
            "[H_TIME]\n        mean = 5.0",
            "[H_TIME]\n        values = [1.0, 3.0]\n        age_bins = [[0, 20], [20, 100]]",
        );
        let spec = Specification::from_toml_str(&text).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let params = spec.reroll_params(0.0, &mut rng);
        assert_eq!(params.require("H_TIME"), &ParamValue::Vector(array![1.0, 3.0]));
    }

    #[test]
    fn constants_pass_through_unchanged() {
        // Bare literals must precede the first table header.
        let text = format!(
            "H_TIME = [4.0, 6.0]\n{}",
            MEANS_ONLY.replace("[H_TIME]\n        mean = 5.0", "")
        );
        let spec = Specification::from_toml_str(&text).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let params = spec.reroll_params(0.2, &mut rng);
        assert_eq!(params.require("H_TIME"), &ParamValue::Vector(array![4.0, 6.0]));
    }

    #[test]
    fn jittered_draws_differ_between_rolls() {
        let spec = Specification::from_toml_str(MEANS_ONLY).unwrap();
        let mut rng = SmallRng::seed_from_u64(9);
        let a = spec.reroll_params(0.2, &mut rng);
        let b = spec.reroll_params(0.2, &mut rng);
        assert!(a.scalar("Tg") != b.scalar("Tg"));
    }
}
