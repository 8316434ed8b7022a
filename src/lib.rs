#![forbid(unsafe_code)]
//! Statically checked error sets for plain Rust enums.
//!
//! An error domain is an ordinary fieldless enum. An *error set* is a value
//! that holds exactly one variant drawn from a declared subset of that enum,
//! where the subset is part of the value's type: a function's signature
//! states precisely which error kinds it can produce, callers widen or
//! narrow those sets under compile-time checked set relations, and dispatch
//! over a set is checked for exhaustiveness, with `transform` inferring
//! its output type as the canonical union of every arm's output set.
//!
//! ## Notes
//!
//! - This is a pure value/type algebra: **no IO**, no global state, no
//!   runtime cost beyond one discriminant comparison per dispatch arm. All
//!   set relations are evaluated in const context, so illegal conversions,
//!   comparisons, and non-exhaustive dispatch fail compilation.
//! - Breaking the membership invariant at runtime (constructing from a
//!   non-member value, narrowing onto a value outside the target set) is a
//!   contract violation and panics with a diagnostic; it is never surfaced
//!   as a recoverable error.
//! - Set-equal descriptors (`Or<A, B>` vs `Or<B, A>`, duplicated listings)
//!   expose byte-identical canonical descriptors and interconvert
//!   infallibly, even when Rust gives them distinct nominal names.
//!
//! ## Examples
//!
//! ```rust
//! use errset::{ErrorDomain, ErrorSet, ResultExt, cases, error_set};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
//! pub enum LookupError {
//!     Timeout,
//!     Refused,
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
//! pub enum FetchError {
//!     Stale,
//!     Missing,
//!     Interrupted,
//! }
//!
//! error_set! {
//!     pub struct LookupFailure: LookupError = [Timeout, Refused];
//!     pub struct FetchFailure: FetchError = [Stale, Missing, Interrupted];
//! }
//!
//! fn lookup(key: i32) -> Result<i32, ErrorSet<LookupFailure>> {
//!     match key {
//!         k if k > 0 => Ok(k),
//!         0 => ErrorSet::<lookup_error::Timeout>::default().into_result(),
//!         _ => ErrorSet::<lookup_error::Refused>::default().into_result(),
//!     }
//! }
//!
//! fn fetch(key: i32) -> Result<i32, ErrorSet<FetchFailure>> {
//!     lookup(key)
//!         .transform_error(
//!             cases()
//!                 .on::<lookup_error::Timeout, _>(|_| ErrorSet::<fetch_error::Missing>::default())
//!                 .on::<lookup_error::Refused, _>(|_| ErrorSet::<fetch_error::Stale>::default()),
//!         )
//!         .map_err(|e| e.widen())
//! }
//!
//! fn main() {
//!     assert_eq!(fetch(7), Ok(7));
//!     assert_eq!(fetch(0), Err(ErrorSet::new(FetchError::Missing)));
//!     assert_eq!(fetch(-1), Err(ErrorSet::new(FetchError::Stale)));
//! }
//! ```

// Let the derive's `::errset::` paths resolve inside this crate's own tests.
extern crate self as errset;

pub mod algebra;
mod dispatch;
mod domain;
mod macros;
mod set;

pub use dispatch::{
    Arms, Arms2, ArmsInto, Cases, Complete, Covers, End, MapArms, On, On2, ResultExt, Transformer,
    Visitor, Visitor2, VisitorInto, cases, transform, transform_error, visit, visit2,
};
pub use domain::ErrorDomain;
pub use errset_derive::ErrorDomain;
pub use set::{ErrorSet, Or, VariantSet};
