use crate::impl_value_binop;
use crate::prelude::Real;
use ndarray::Array1;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// A realized parameter: either a single number or one value per age bin.
///
/// Arithmetic between two values broadcasts scalars over vectors; combining
/// two vectors requires equal lengths.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Scalar(Real),
    Vector(Array1<Real>),
}

impl ParamValue {
    /// Apply `f` to every element, preserving the shape.
    pub fn map(&self, mut f: impl FnMut(Real) -> Real) -> ParamValue {
        match self {
            ParamValue::Scalar(x) => ParamValue::Scalar(f(*x)),
            ParamValue::Vector(v) => ParamValue::Vector(v.mapv(f)),
        }
    }

    /// Combine two values elementwise, broadcasting scalars.
    pub fn zip_with(&self, other: &ParamValue, mut f: impl FnMut(Real, Real) -> Real) -> ParamValue {
        use ParamValue::*;
        match (self, other) {
            (Scalar(a), Scalar(b)) => Scalar(f(*a, *b)),
            (Scalar(a), Vector(b)) => Vector(b.mapv(|y| f(*a, y))),
            (Vector(a), Scalar(b)) => Vector(a.mapv(|x| f(x, *b))),
            (Vector(a), Vector(b)) => {
                assert_eq!(a.len(), b.len(), "parameter value length mismatch");
                Vector(Array1::from(
                    a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect::<Vec<_>>(),
                ))
            }
        }
    }

    /// Elementwise reciprocal.
    pub fn recip(&self) -> ParamValue {
        self.map(|x| 1.0 / x)
    }

    /// Elementwise power.
    pub fn powf(&self, exp: Real) -> ParamValue {
        self.map(|x| x.powf(exp))
    }

    /// Clamp every element into `[lo, hi]`.
    pub fn clip(&self, lo: Real, hi: Real) -> ParamValue {
        self.map(|x| x.max(lo).min(hi))
    }

    /// Scalar view: the value itself, or the mean over age bins.
    pub fn mean(&self) -> Real {
        match self {
            ParamValue::Scalar(x) => *x,
            ParamValue::Vector(v) => v.mean().unwrap_or(Real::NAN),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ParamValue::Scalar(_))
    }

    /// Number of elements (1 for a scalar).
    pub fn len(&self) -> usize {
        match self {
            ParamValue::Scalar(_) => 1,
            ParamValue::Vector(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Real> for ParamValue {
    fn from(x: Real) -> Self {
        ParamValue::Scalar(x)
    }
}

impl From<Array1<Real>> for ParamValue {
    fn from(v: Array1<Real>) -> Self {
        ParamValue::Vector(v)
    }
}

impl From<Vec<Real>> for ParamValue {
    fn from(v: Vec<Real>) -> Self {
        ParamValue::Vector(Array1::from(v))
    }
}

impl_value_binop!(Add, add, +);
impl_value_binop!(Sub, sub, -);
impl_value_binop!(Mul, mul, *);
impl_value_binop!(Div, div, /);

impl core::ops::Div<&Array1<Real>> for &ParamValue {
    type Output = ParamValue;

    fn div(self, rhs: &Array1<Real>) -> ParamValue {
        match self {
            ParamValue::Scalar(a) => ParamValue::Vector(rhs.mapv(|y| a / y)),
            ParamValue::Vector(a) => {
                assert_eq!(a.len(), rhs.len(), "parameter value length mismatch");
                ParamValue::Vector(a / rhs)
            }
        }
    }
}

// On file a value is a bare number or a list of numbers; the array backing is
// an internal detail.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawValue {
    Scalar(Real),
    Vector(Vec<Real>),
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Scalar(x) => ParamValue::Scalar(x),
            RawValue::Vector(xs) => ParamValue::Vector(Array1::from(xs)),
        })
    }
}

impl Serialize for ParamValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ParamValue::Scalar(x) => serializer.serialize_f64(*x),
            ParamValue::Vector(v) => serializer.collect_seq(v.iter()),
        }
    }
}
