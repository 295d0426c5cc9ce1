use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use getset::{CopyGetters, Getters};
use log::info;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::prelude::{AgeBin, Real};

use super::ParamValue;

/// Parameter names the derivation step reads; their absence is rejected at
/// load time rather than when the first set is drawn.
const REQUIRED_PARAMS: &[&str] = &[
    "Tg",
    "Ts",
    "D",
    "frac_trans_before_sym",
    "ASYM_FRAC",
    "H_TIME",
    "I_TO_H_TIME",
];

/// Simulation-wide constants from the `consts` table of the parameter file.
///
/// `En` and `Im` are the number of exposed and infectious sub-stages of the
/// compartment chain, `age_bins` is the canonical age binning every
/// age-stratified parameter is mapped onto. Any further keys are kept as-is
/// and exposed through [`Consts::get`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
pub struct Consts {
    #[serde(rename = "En")]
    #[getset(get_copy = "pub")]
    en: Real,

    #[serde(rename = "Im")]
    #[getset(get_copy = "pub")]
    im: Real,

    #[getset(get = "pub")]
    age_bins: Vec<AgeBin>,

    #[serde(flatten)]
    #[getset(get = "pub")]
    extra: BTreeMap<String, ConstValue>,
}

impl Consts {
    pub fn new(en: Real, im: Real, age_bins: Vec<AgeBin>) -> Self {
        Consts {
            en,
            im,
            age_bins,
            extra: BTreeMap::new(),
        }
    }

    /// Look up an additional constant by name.
    pub fn get(&self, name: &str) -> Option<&ConstValue> {
        self.extra.get(name)
    }
}

/// A constant carried alongside the model structure: switches, scalars or
/// plain numeric lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstValue {
    Bool(bool),
    Scalar(Real),
    Vector(Vec<Real>),
}

// Every optional field a parameter table may declare; which ones are present
// decides how the parameter is drawn.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSpec {
    mean: Option<ParamValue>,
    #[serde(rename = "CI")]
    ci: Option<[Real; 2]>,
    gamma: Option<Real>,
    values: Option<Vec<Real>>,
    age_bins: Option<Vec<AgeBin>>,
    clip: Option<[Real; 2]>,
}

/// How a single parameter is realized on each draw. The variant is fixed once
/// at load time; `gamma` takes precedence over `CI`, which takes precedence
/// over a bare `mean`, which takes precedence over `values`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    /// Fixed value copied through unchanged.
    Constant(ParamValue),
    /// Modified-PERT draw on `[0, 1]` around `mean` with concentration `gamma`.
    PertMean { mean: ParamValue, gamma: Real },
    /// Truncated-normal draw matching a 95% confidence interval.
    MeanWithCi { mean: ParamValue, ci: [Real; 2] },
    /// The mean scaled by a single truncated-normal jitter.
    MeanJitter { mean: ParamValue },
    /// An age-stratified table, jittered per bin and re-binned onto the
    /// canonical age bins.
    AgeVector {
        values: Array1<Real>,
        age_bins: Vec<AgeBin>,
    },
}

/// One named entry of the specification: the draw kind plus an optional
/// range the realized value is clamped into.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct ParamEntry {
    #[getset(get = "pub")]
    kind: ParamKind,

    #[getset(get_copy = "pub")]
    clip: Option<[Real; 2]>,
}

impl ParamEntry {
    pub fn constant(value: ParamValue) -> Self {
        ParamEntry {
            kind: ParamKind::Constant(value),
            clip: None,
        }
    }

    fn from_raw(name: &str, raw: RawSpec) -> Result<Self, ConfigError> {
        let clip = raw.clip;
        let kind = if let Some(gamma) = raw.gamma {
            let mean = raw
                .mean
                .ok_or_else(|| ConfigError::bad_spec(name, "`gamma` requires a `mean`"))?;
            if gamma <= 0.0 {
                return Err(ConfigError::bad_spec(name, "`gamma` must be positive"));
            }
            ParamKind::PertMean { mean, gamma }
        } else if let Some(mean) = raw.mean {
            match raw.ci {
                Some(ci) => ParamKind::MeanWithCi { mean, ci },
                None => ParamKind::MeanJitter { mean },
            }
        } else if let Some(values) = raw.values {
            let age_bins = raw
                .age_bins
                .ok_or_else(|| ConfigError::bad_spec(name, "`values` requires `age_bins`"))?;
            if values.is_empty() {
                return Err(ConfigError::bad_spec(name, "`values` must not be empty"));
            }
            if values.len() != age_bins.len() {
                return Err(ConfigError::bad_spec(
                    name,
                    format!(
                        "{} values for {} age bins",
                        values.len(),
                        age_bins.len()
                    ),
                ));
            }
            ParamKind::AgeVector {
                values: Array1::from(values),
                age_bins,
            }
        } else if raw.ci.is_some() {
            return Err(ConfigError::bad_spec(name, "`CI` requires a `mean`"));
        } else {
            return Err(ConfigError::bad_spec(name, "empty specification record"));
        };
        Ok(ParamEntry { kind, clip })
    }
}

/// The full, validated parameter specification: every named entry in file
/// order plus the `consts` table. Immutable once loaded; drawing parameter
/// sets never touches it.
#[derive(Debug, Clone, Getters)]
pub struct Specification {
    entries: Vec<(String, ParamEntry)>,

    #[getset(get = "pub")]
    consts: Consts,
}

impl Specification {
    /// Read and validate a parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let spec = Self::from_toml_str(&text)?;
        info!(
            "loaded {} parameter entries from {}",
            spec.entries.len(),
            path.display()
        );
        Ok(spec)
    }

    /// Parse a specification from TOML text. Key order in the document is
    /// kept for iteration but has no effect on correctness.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let table: toml::value::Table = toml::from_str(text)?;
        let mut consts = None;
        let mut entries = Vec::with_capacity(table.len());

        for (name, value) in table {
            if name == "consts" {
                consts = Some(value.try_into::<Consts>().map_err(ConfigError::Parse)?);
                continue;
            }
            let entry = match value {
                toml::Value::Table(_) => {
                    let raw: RawSpec = value.try_into().map_err(|e| {
                        ConfigError::bad_spec(&name, e.to_string())
                    })?;
                    ParamEntry::from_raw(&name, raw)?
                }
                other => {
                    let literal: ParamValue = other.try_into().map_err(|_| {
                        ConfigError::bad_spec(
                            &name,
                            "expected a number, an array of numbers, or a specification table",
                        )
                    })?;
                    ParamEntry::constant(literal)
                }
            };
            entries.push((name, entry));
        }

        let spec = Specification {
            entries,
            consts: consts.ok_or(ConfigError::MissingConsts)?,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// All named entries in file order.
    pub fn entries(&self) -> &[(String, ParamEntry)] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ParamEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for key in REQUIRED_PARAMS {
            if self.get(key).is_none() {
                return Err(ConfigError::MissingParam((*key).to_string()));
            }
        }
        if self.consts.age_bins().is_empty() {
            return Err(ConfigError::bad_spec("consts", "`age_bins` must not be empty"));
        }
        if self.consts.en() < 1.0 {
            return Err(ConfigError::bad_spec("consts", "`En` must be at least 1"));
        }
        if self.consts.im() <= 0.0 {
            return Err(ConfigError::bad_spec("consts", "`Im` must be positive"));
        }
        Ok(())
    }
}
