// inclusion facility

pub use crate::error::*;

pub use crate::iter::*;

pub use crate::lineiter::*;

pub use crate::sliceiter::*;

pub use crate::input::{open, open_with_params};
