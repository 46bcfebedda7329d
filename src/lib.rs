//! Uniform pull iteration over a stream of items.
//!
//! A consumer sees only the [Iter](iter::Iter) contract : it calls advance, reads the current item,
//! and checks the terminal error once advance returned false.
//! Producers are :
//!   - [LineIter](lineiter::LineIter) : lines of a readable resource it owns and must close.
//!   - [SliceIter](sliceiter::SliceIter) : values of an in memory slice.
//!
//! [input::open] chooses the producer from command line arguments.

pub mod prelude;

pub mod error;
pub mod iter;

pub mod lineiter;
pub mod sliceiter;

pub mod input;
