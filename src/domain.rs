//! The enum-domain abstraction: a closed set of named error constants.
//!
//! The core never defines error domains, it only consumes them. A domain is
//! an ordinary fieldless `enum` with `#[derive(ErrorDomain)]`, which wires
//! up the discriminant/name bookkeeping below and emits one singleton
//! error-set marker per variant (in a snake_case companion module).

use core::fmt;

/// A closed error domain: a fieldless enum whose variants are the error
/// constants that error sets draw from.
///
/// ## Notes
/// - Implement via `#[derive(ErrorDomain)]`; the derive also checks that
///   every discriminant is non-negative and fits in 16 bits (required so
///   variant pairs pack into a `u32` for two-way dispatch).
/// - `code` and `from_code` are inverses over the declared variants.
pub trait ErrorDomain: Copy + Eq + fmt::Debug + 'static {
    /// Every variant of the domain, in declaration order.
    const VARIANTS: &'static [Self];

    /// Return the stable per-variant code (the discriminant).
    fn code(self) -> u32;

    /// Resolve a code back to its variant.
    ///
    /// ## Returns
    /// - (`Option<Self>`): `None` if the code names no variant.
    fn from_code(code: u32) -> Option<Self>;

    /// Return the variant identifier as written in the enum.
    fn name(self) -> &'static str;
}
