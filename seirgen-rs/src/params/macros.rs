/// Implement one arithmetic operator for every owned/borrowed combination of
/// [`ParamValue`](crate::params::ParamValue) and `Real`, broadcasting scalars
/// over vectors.
#[macro_export]
macro_rules! impl_value_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl core::ops::$trait<&$crate::params::ParamValue> for &$crate::params::ParamValue {
            type Output = $crate::params::ParamValue;
            fn $method(self, rhs: &$crate::params::ParamValue) -> $crate::params::ParamValue {
                self.zip_with(rhs, |a, b| a $op b)
            }
        }

        impl core::ops::$trait<$crate::params::ParamValue> for &$crate::params::ParamValue {
            type Output = $crate::params::ParamValue;
            fn $method(self, rhs: $crate::params::ParamValue) -> $crate::params::ParamValue {
                self.zip_with(&rhs, |a, b| a $op b)
            }
        }

        impl core::ops::$trait<&$crate::params::ParamValue> for $crate::params::ParamValue {
            type Output = $crate::params::ParamValue;
            fn $method(self, rhs: &$crate::params::ParamValue) -> $crate::params::ParamValue {
                self.zip_with(rhs, |a, b| a $op b)
            }
        }

        impl core::ops::$trait<$crate::params::ParamValue> for $crate::params::ParamValue {
            type Output = $crate::params::ParamValue;
            fn $method(self, rhs: $crate::params::ParamValue) -> $crate::params::ParamValue {
                self.zip_with(&rhs, |a, b| a $op b)
            }
        }

        impl core::ops::$trait<$crate::prelude::Real> for &$crate::params::ParamValue {
            type Output = $crate::params::ParamValue;
            fn $method(self, rhs: $crate::prelude::Real) -> $crate::params::ParamValue {
                self.map(|a| a $op rhs)
            }
        }

        impl core::ops::$trait<$crate::prelude::Real> for $crate::params::ParamValue {
            type Output = $crate::params::ParamValue;
            fn $method(self, rhs: $crate::prelude::Real) -> $crate::params::ParamValue {
                self.map(|a| a $op rhs)
            }
        }

        impl core::ops::$trait<&$crate::params::ParamValue> for $crate::prelude::Real {
            type Output = $crate::params::ParamValue;
            fn $method(self, rhs: &$crate::params::ParamValue) -> $crate::params::ParamValue {
                rhs.map(|b| self $op b)
            }
        }

        impl core::ops::$trait<$crate::params::ParamValue> for $crate::prelude::Real {
            type Output = $crate::params::ParamValue;
            fn $method(self, rhs: $crate::params::ParamValue) -> $crate::params::ParamValue {
                rhs.map(|b| self $op b)
            }
        }
    };
}

/// Generate accessors for computed entries of a parameter set: a borrow of
/// the stored value plus a `_scalar` view that averages vector values.
#[macro_export]
macro_rules! derived_props {
    ($($name:ident => $key:literal),* $(,)?) => {
        $(
            paste! {
                pub fn $name(&self) -> &$crate::params::ParamValue {
                    self.require($key)
                }

                pub fn [<$name _scalar>](&self) -> $crate::prelude::Real {
                    self.require($key).mean()
                }
            }
        )*
    };
}
