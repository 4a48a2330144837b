//! The two capabilities every bound type implements.

use bric::Bric;

use crate::error::BindError;

/// Encode to a generic JSON value. Total — encoding never fails.
pub trait ToBric {
    fn to_bric(&self) -> Bric;
}

/// Decode from a generic JSON value, or explain why not.
pub trait FromBric: Sized {
    fn from_bric(bric: &Bric) -> Result<Self, BindError>;
}
