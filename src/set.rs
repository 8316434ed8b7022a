//! Error-set descriptors and the `ErrorSet` value type.
//!
//! A descriptor is a zero-sized marker type implementing [`VariantSet`]: its
//! `CODES` constant is the canonical (sorted, duplicate-free) list of
//! discriminant codes the set may hold. Descriptors come from three places:
//! the `#[derive(ErrorDomain)]` singleton markers, [`error_set!`] named
//! declarations, and [`Or`] unions of existing sets.
//!
//! [`ErrorSet<S>`] then wraps exactly one runtime variant of `S::Domain`
//! and maintains the load-bearing invariant that the variant is a member of
//! `S::CODES`. Conversions between sets are gated by const assertions over
//! the descriptors, so an illegal relation fails compilation rather than
//! producing a value.
//!
//! [`error_set!`]: crate::error_set

use core::fmt;
use core::marker::PhantomData;

use crate::ErrorDomain;
use crate::algebra;

/// A compile-time set of variants of one error domain.
///
/// ## Notes
/// - `CODES` must be canonical: non-empty, strictly ascending, at most
///   [`algebra::MAX_MEMBERS`] entries, and every code must name a variant
///   of `Domain`. The provided constructors (`#[derive(ErrorDomain)]`
///   markers, [`error_set!`](crate::error_set), [`Or`]) all guarantee this;
///   hand-written impls that violate it are rejected at the first
///   construction of an [`ErrorSet`] over them.
pub trait VariantSet: 'static {
    /// The enum domain the members belong to.
    type Domain: ErrorDomain;

    /// The canonical descriptor: sorted, duplicate-free discriminant codes.
    const CODES: &'static [u32];
}

/// The canonical union of two error sets over the same domain.
///
/// `Or<A, B>` is itself a [`VariantSet`]; its descriptor is the sorted,
/// deduplicated merge of both inputs, so any two set-equal combinations
/// (`Or<A, B>`, `Or<B, A>`, `Or<A, Or<A, B>>`, ...) expose byte-identical
/// `CODES` and interconvert infallibly in both directions. Wider unions are
/// written by nesting: `Or<A, Or<B, C>>`.
///
/// ## Examples
/// ```rust
/// use errset::{ErrorDomain, Or, VariantSet};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
/// enum DnsError {
///     Timeout,
///     Refused,
/// }
///
/// use dns_error::{Refused, Timeout};
///
/// fn main() {
///     assert_eq!(<Or<Timeout, Refused>>::CODES, <Or<Refused, Timeout>>::CODES);
/// }
/// ```
pub struct Or<A, B>(PhantomData<fn() -> (A, B)>);

impl<A, B> Or<A, B>
where
    A: VariantSet,
    B: VariantSet<Domain = A::Domain>,
{
    const MERGED: ([u32; algebra::MAX_MEMBERS], usize) = algebra::merge(A::CODES, B::CODES);
}

impl<A, B> VariantSet for Or<A, B>
where
    A: VariantSet,
    B: VariantSet<Domain = A::Domain>,
{
    type Domain = A::Domain;

    const CODES: &'static [u32] = {
        let (buf, len) = &Self::MERGED;
        let codes: &[u32] = buf;
        codes.split_at(*len).0
    };
}

/// One error drawn from a declared set of variants.
///
/// The set is part of the type: `ErrorSet<S>` can only ever hold a variant
/// listed in `S::CODES`, and every construction path that accepts a raw
/// value checks membership. Values are `Copy`, immutable, and carry no
/// resources; all set relations are evaluated at compile time.
pub struct ErrorSet<S: VariantSet> {
    value: S::Domain,
}

impl<S: VariantSet> ErrorSet<S> {
    /// Wrap a raw domain value.
    ///
    /// ## Panics
    /// - If `value` is not a member of the set. Passing a variant the type
    ///   statically disallows is a contract breach by the caller, not a
    ///   recoverable condition.
    ///
    /// ## Examples
    /// ```rust
    /// use errset::{ErrorDomain, ErrorSet, error_set};
    ///
    /// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
    /// enum DnsError {
    ///     Timeout,
    ///     Refused,
    ///     ServFail,
    /// }
    ///
    /// error_set! {
    ///     struct Transient: DnsError = [Timeout, Refused];
    /// }
    ///
    /// fn main() {
    ///     let e = ErrorSet::<Transient>::new(DnsError::Timeout);
    ///     assert_eq!(e.value(), DnsError::Timeout);
    /// }
    /// ```
    #[track_caller]
    pub fn new(value: S::Domain) -> Self {
        const {
            assert!(
                algebra::is_canonical(S::CODES),
                "error-set descriptor is not canonical (declare sets via the derive, error_set!, or Or)"
            )
        };
        if !algebra::contains(S::CODES, value.code()) {
            member_violation::<S>(value);
        }
        Self { value }
    }

    /// Wrap a value whose membership has already been established.
    #[inline]
    pub(crate) fn trusted(value: S::Domain) -> Self {
        debug_assert!(algebra::contains(S::CODES, value.code()));
        Self { value }
    }

    /// Extract the raw domain value, dropping the static set guarantee.
    #[inline]
    pub fn value(self) -> S::Domain {
        self.value
    }

    /// Return the number of members in the set.
    #[inline]
    pub const fn len() -> usize {
        S::CODES.len()
    }

    /// Check whether the set has exactly one member.
    #[inline]
    pub const fn is_singleton() -> bool {
        S::CODES.len() == 1
    }

    /// Check whether a domain value is a member of the set.
    #[inline]
    pub fn contains(value: S::Domain) -> bool {
        algebra::contains(S::CODES, value.code())
    }

    /// Iterate over the members of the set, in canonical order.
    pub fn members() -> impl Iterator<Item = S::Domain> {
        S::CODES.iter().map(|&code| decode::<S::Domain>(code))
    }

    /// Convert into a superset: the always-safe, infallible direction.
    ///
    /// This is also how subset-gated assignment is written: widen the
    /// narrower value and assign the result.
    ///
    /// Widening to a type that is not a superset fails compilation:
    /// ```compile_fail
    /// use errset::{ErrorDomain, ErrorSet};
    ///
    /// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
    /// enum DnsError {
    ///     Timeout,
    ///     Refused,
    /// }
    ///
    /// fn main() {
    ///     let e = ErrorSet::<dns_error::Timeout>::default();
    ///     let _: ErrorSet<dns_error::Refused> = e.widen();
    /// }
    /// ```
    #[inline]
    pub fn widen<B>(self) -> ErrorSet<B>
    where
        B: VariantSet<Domain = S::Domain>,
    {
        const {
            assert!(
                algebra::is_subset(S::CODES, B::CODES),
                "widening requires every member of the source set to appear in the target set"
            )
        };
        debug_assert!(algebra::contains(B::CODES, self.value.code()));
        ErrorSet { value: self.value }
    }

    /// Convert into any overlapping set, asserting membership at runtime.
    ///
    /// The target only has to share at least one member with the source;
    /// the runtime check is kept even when the value is statically known to
    /// fit, so a descriptor/value mismatch introduced elsewhere is caught
    /// here rather than propagated.
    ///
    /// ## Panics
    /// - If the held variant is not a member of the target set.
    ///
    /// Sets with no shared member cannot be converted at all:
    /// ```compile_fail
    /// use errset::{ErrorDomain, ErrorSet};
    ///
    /// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
    /// enum DnsError {
    ///     Timeout,
    ///     Refused,
    /// }
    ///
    /// fn main() {
    ///     let e = ErrorSet::<dns_error::Timeout>::default();
    ///     let _: ErrorSet<dns_error::Refused> = e.narrow();
    /// }
    /// ```
    #[track_caller]
    pub fn narrow<B>(self) -> ErrorSet<B>
    where
        B: VariantSet<Domain = S::Domain>,
    {
        const {
            assert!(
                algebra::is_overlap(S::CODES, B::CODES),
                "conversion between error sets with no shared member"
            )
        };
        if !algebra::contains(B::CODES, self.value.code()) {
            member_violation::<B>(self.value);
        }
        ErrorSet { value: self.value }
    }

    /// Move the error into the failure channel of a [`Result`] whose error
    /// set overlaps this one.
    ///
    /// This is how a function returns a narrower, internally-produced error
    /// set through its declared signature.
    ///
    /// ## Panics
    /// - If the held variant is not a member of the target set (same
    ///   narrowing contract as [`narrow`](Self::narrow)).
    #[track_caller]
    pub fn into_result<T, B>(self) -> Result<T, ErrorSet<B>>
    where
        B: VariantSet<Domain = S::Domain>,
    {
        Err(self.narrow())
    }

    /// Dispatch to the unique case arm for the held variant.
    ///
    /// All arms produce one common output type. Without an `otherwise`
    /// fallback the arms must cover every member of the set:
    /// ```compile_fail
    /// use errset::{ErrorDomain, ErrorSet, cases};
    ///
    /// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
    /// enum DnsError {
    ///     Timeout,
    ///     Refused,
    /// }
    ///
    /// errset::error_set! {
    ///     struct Any: DnsError = [Timeout, Refused];
    /// }
    ///
    /// fn main() {
    ///     let e = ErrorSet::<Any>::new(DnsError::Timeout);
    ///     // Missing an arm for `Refused` and no fallback: rejected.
    ///     let _ = e.visit(cases().on::<dns_error::Timeout, _>(|_| 1));
    /// }
    /// ```
    #[inline]
    pub fn visit<C>(self, cases: C) -> C::Output
    where
        C: crate::Visitor<S>,
    {
        cases.apply(self)
    }

    /// Like [`visit`](Self::visit), but each arm's output converts into an
    /// explicitly chosen result type via [`Into`].
    #[inline]
    pub fn visit_into<R, C>(self, cases: C) -> R
    where
        C: crate::VisitorInto<S, R>,
    {
        cases.apply_into(self)
    }

    /// Dispatch to per-variant arms that each return an error set, and
    /// collect the result as the canonical union of every arm's output set.
    ///
    /// The output type is computed by the case chain; the caller never
    /// spells the union out.
    #[inline]
    pub fn transform<C>(self, cases: C) -> ErrorSet<C::Combined>
    where
        C: crate::Transformer<S>,
    {
        cases.apply_map(self)
    }
}

/// The sole member of a single-variant set.
///
/// Multi-variant sets have no canonical default and reject this at compile
/// time:
/// ```compile_fail
/// use errset::{ErrorDomain, ErrorSet, error_set};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
/// enum DnsError {
///     Timeout,
///     Refused,
/// }
///
/// error_set! {
///     struct Any: DnsError = [Timeout, Refused];
/// }
///
/// fn main() {
///     let _ = ErrorSet::<Any>::default();
/// }
/// ```
impl<S: VariantSet> Default for ErrorSet<S> {
    fn default() -> Self {
        const {
            assert!(
                S::CODES.len() == 1,
                "only a single-variant error set has a default value"
            )
        };
        Self {
            value: decode::<S::Domain>(S::CODES[0]),
        }
    }
}

impl<S: VariantSet> Clone for ErrorSet<S> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: VariantSet> Copy for ErrorSet<S> {}

/// Equality between error sets requires overlapping descriptors; comparing
/// unrelated sets is statically false and rejected instead of evaluated:
/// ```compile_fail
/// use errset::{ErrorDomain, ErrorSet};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
/// enum DnsError {
///     Timeout,
///     Refused,
/// }
///
/// fn main() {
///     let a = ErrorSet::<dns_error::Timeout>::default();
///     let b = ErrorSet::<dns_error::Refused>::default();
///     let _ = a == b;
/// }
/// ```
impl<A, B> PartialEq<ErrorSet<B>> for ErrorSet<A>
where
    A: VariantSet,
    B: VariantSet<Domain = A::Domain>,
{
    fn eq(&self, other: &ErrorSet<B>) -> bool {
        const {
            assert!(
                algebra::is_overlap(A::CODES, B::CODES),
                "comparison between error sets with no shared member is always false"
            )
        };
        self.value == other.value
    }
}

impl<S: VariantSet> Eq for ErrorSet<S> {}

impl<S: VariantSet> fmt::Debug for ErrorSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorSet").field(&self.value).finish()
    }
}

impl<S: VariantSet> fmt::Display for ErrorSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.name())
    }
}

impl<S: VariantSet> std::error::Error for ErrorSet<S> {}

/// Resolve a descriptor code back to its domain variant.
fn decode<D: ErrorDomain>(code: u32) -> D {
    match D::from_code(code) {
        Some(value) => value,
        None => code_violation(code),
    }
}

/// Abort on a value that is not a member of the declared set.
#[cold]
#[track_caller]
fn member_violation<S: VariantSet>(value: S::Domain) -> ! {
    let members = ErrorSet::<S>::members()
        .map(ErrorDomain::name)
        .collect::<Vec<_>>()
        .join(", ");
    panic!(
        "variant `{}` is not a member of the error set {{{members}}}",
        value.name()
    );
}

/// Abort on a descriptor code that names no variant of the domain.
#[cold]
#[track_caller]
fn code_violation(code: u32) -> ! {
    panic!("descriptor code {code} names no variant of the error domain");
}
