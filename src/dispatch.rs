//! Case-chain dispatch over error sets.
//!
//! Dispatch reduces an [`ErrorSet`] value to the one singleton variant it
//! actually holds and invokes the unique case arm registered for that
//! variant. Arms are composed into a chain with [`cases`]: each
//! [`on`](Cases::on) adds an arm keyed by a singleton marker, an optional
//! [`otherwise`](Cases::otherwise) closes the chain with a fallback, and
//! [`on2`](Cases::on2) builds two-way (variant-pair) chains for
//! [`visit2`].
//!
//! Three evaluation modes share the same chains:
//! - `visit`: every arm produces one common output type;
//! - `visit_into`: each arm's output converts into a chosen type via
//!   [`Into`];
//! - `transform`: each arm returns an error set, and the overall output
//!   type is the canonical union of every arm's output set, computed here
//!   so the caller never spells it out.
//!
//! ## Notes
//! - Coverage and duplicate-arm checks are const assertions: a chain
//!   without a fallback must cover the dispatched set, and two arms for
//!   one variant (or pair) fail compilation.
//! - Arms for variants outside the dispatched set are permitted and simply
//!   unreachable.
//! - Handlers run synchronously, at most once, on the caller's thread.

use core::marker::PhantomData;

use crate::algebra;
use crate::domain::ErrorDomain;
use crate::set::{ErrorSet, Or, VariantSet};

/// Start an empty case chain.
///
/// ## Examples
/// ```rust
/// use errset::{ErrorDomain, ErrorSet, cases, error_set};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
/// enum DnsError {
///     Timeout,
///     Refused,
///     ServFail,
/// }
///
/// error_set! {
///     struct Any: DnsError = [Timeout, Refused, ServFail];
/// }
///
/// fn main() {
///     let e = ErrorSet::<Any>::new(DnsError::Refused);
///     let n = e.visit(
///         cases()
///             .on::<dns_error::Timeout, _>(|_| 1)
///             .on::<dns_error::Refused, _>(|_| 2)
///             .otherwise(|_| 3),
///     );
///     assert_eq!(n, 2);
/// }
/// ```
pub fn cases<R>() -> Cases<End<R>> {
    Cases {
        arms: End(PhantomData),
    }
}

/// An open case chain: arms only, more can be added.
pub struct Cases<L> {
    arms: L,
}

/// A closed case chain: arms plus a fallback, no further arms.
pub struct Complete<L, F> {
    arms: L,
    fallback: F,
}

/// The empty tail of a case chain.
pub struct End<R>(PhantomData<fn() -> R>);

/// One case arm keyed by a singleton error set.
pub struct On<V, F, Rest> {
    handler: F,
    rest: Rest,
    _variant: PhantomData<fn() -> V>,
}

/// One two-way case arm keyed by a pair of singleton error sets.
pub struct On2<Va, Vb, F, Rest> {
    handler: F,
    rest: Rest,
    _variants: PhantomData<fn() -> (Va, Vb)>,
}

impl<L> Cases<L> {
    /// Add an arm for the variant named by the singleton set `V`.
    ///
    /// Registering two arms for one variant is rejected:
    /// ```compile_fail
    /// use errset::{ErrorDomain, ErrorSet, cases, error_set};
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
    ///     let e = ErrorSet::<Any>::new(DnsError::Timeout);
    ///     let _ = e.visit(
    ///         cases()
    ///             .on::<dns_error::Timeout, _>(|_| 1)
    ///             .on::<dns_error::Timeout, _>(|_| 2)
    ///             .otherwise(|_| 3),
    ///     );
    /// }
    /// ```
    pub fn on<V, F>(self, handler: F) -> Cases<On<V, F, L>>
    where
        V: VariantSet,
    {
        const {
            assert!(
                V::CODES.len() == 1,
                "case arms are keyed by single-variant error sets"
            )
        };
        Cases {
            arms: On {
                handler,
                rest: self.arms,
                _variant: PhantomData,
            },
        }
    }

    /// Add a two-way arm for the variant pair named by `Va` and `Vb`.
    pub fn on2<Va, Vb, F>(self, handler: F) -> Cases<On2<Va, Vb, F, L>>
    where
        Va: VariantSet,
        Vb: VariantSet,
    {
        const {
            assert!(
                Va::CODES.len() == 1 && Vb::CODES.len() == 1,
                "case arms are keyed by single-variant error sets"
            )
        };
        Cases {
            arms: On2 {
                handler,
                rest: self.arms,
                _variants: PhantomData,
            },
        }
    }

    /// Close the chain with a fallback that receives the full-set value
    /// (or both values, for two-way chains).
    pub fn otherwise<F>(self, fallback: F) -> Complete<L, F> {
        Complete {
            arms: self.arms,
            fallback,
        }
    }
}

// ---------------------------------------------------------------------
// Coverage bookkeeping
// ---------------------------------------------------------------------

/// The set of variant codes (or encoded pair codes) a chain's arms cover.
///
/// Implemented structurally by the chain types; user code never implements
/// this.
pub trait Covers {
    /// Covered codes in canonical order.
    const COVERED: &'static [u32];
}

impl<R> Covers for End<R> {
    const COVERED: &'static [u32] = &[];
}

impl<V: VariantSet, F, Rest: Covers> On<V, F, Rest> {
    const GROWN: ([u32; algebra::MAX_MEMBERS], usize) =
        algebra::with_code(Rest::COVERED, V::CODES[0]);
}

impl<V: VariantSet, F, Rest: Covers> Covers for On<V, F, Rest> {
    const COVERED: &'static [u32] = {
        let (buf, len) = &Self::GROWN;
        let codes: &[u32] = buf;
        codes.split_at(*len).0
    };
}

impl<Va: VariantSet, Vb: VariantSet, F, Rest: Covers> On2<Va, Vb, F, Rest> {
    const GROWN: ([u32; algebra::MAX_MEMBERS], usize) =
        algebra::with_code(Rest::COVERED, algebra::pair(Va::CODES[0], Vb::CODES[0]));
}

impl<Va: VariantSet, Vb: VariantSet, F, Rest: Covers> Covers for On2<Va, Vb, F, Rest> {
    const COVERED: &'static [u32] = {
        let (buf, len) = &Self::GROWN;
        let codes: &[u32] = buf;
        codes.split_at(*len).0
    };
}

// ---------------------------------------------------------------------
// Uniform-output arms (visit)
// ---------------------------------------------------------------------

/// A chain of arms producing one common output type.
///
/// Implemented structurally by the chain types; user code never implements
/// this.
pub trait Arms<S: VariantSet> {
    /// The common output type of every arm.
    type Output;

    /// Run the arm matching the held variant, if any.
    fn try_run(self, err: ErrorSet<S>) -> Option<Self::Output>;
}

impl<S: VariantSet, R> Arms<S> for End<R> {
    type Output = R;

    fn try_run(self, _err: ErrorSet<S>) -> Option<R> {
        None
    }
}

impl<S, V, F, Rest> Arms<S> for On<V, F, Rest>
where
    S: VariantSet,
    V: VariantSet<Domain = S::Domain>,
    Rest: Arms<S>,
    F: FnOnce(ErrorSet<V>) -> Rest::Output,
{
    type Output = Rest::Output;

    fn try_run(self, err: ErrorSet<S>) -> Option<Self::Output> {
        if err.value().code() == V::CODES[0] {
            Some((self.handler)(ErrorSet::<V>::trusted(err.value())))
        } else {
            self.rest.try_run(err)
        }
    }
}

/// Dispatch a complete, uniform-output case chain over one error set.
pub trait Visitor<S: VariantSet> {
    /// The output produced by every arm.
    type Output;

    /// Select and run the unique matching arm.
    fn apply(self, err: ErrorSet<S>) -> Self::Output;
}

impl<S, L> Visitor<S> for Cases<L>
where
    S: VariantSet,
    L: Arms<S> + Covers,
{
    type Output = L::Output;

    fn apply(self, err: ErrorSet<S>) -> Self::Output {
        const {
            assert!(
                algebra::is_subset(S::CODES, L::COVERED),
                "case arms must cover every member of the error set (or add an `otherwise` arm)"
            )
        };
        match self.arms.try_run(err) {
            Some(output) => output,
            None => unreachable_arm(),
        }
    }
}

impl<S, L, F> Visitor<S> for Complete<L, F>
where
    S: VariantSet,
    L: Arms<S> + Covers,
    F: FnOnce(ErrorSet<S>) -> L::Output,
{
    type Output = L::Output;

    fn apply(self, err: ErrorSet<S>) -> Self::Output {
        // Referencing COVERED runs the duplicate-arm check even though the
        // fallback makes coverage itself moot.
        const { assert!(L::COVERED.len() <= algebra::MAX_MEMBERS) };
        match self.arms.try_run(err) {
            Some(output) => output,
            None => (self.fallback)(err),
        }
    }
}

// ---------------------------------------------------------------------
// Converting arms (visit_into)
// ---------------------------------------------------------------------

/// A chain of arms whose outputs each convert into `R`.
///
/// Implemented structurally by the chain types; user code never implements
/// this.
pub trait ArmsInto<S: VariantSet, R> {
    /// Run the arm matching the held variant, converting its output.
    fn try_run_into(self, err: ErrorSet<S>) -> Option<R>;
}

impl<S: VariantSet, R> ArmsInto<S, R> for End<R> {
    fn try_run_into(self, _err: ErrorSet<S>) -> Option<R> {
        None
    }
}

impl<S, V, F, T, R, Rest> ArmsInto<S, R> for On<V, F, Rest>
where
    S: VariantSet,
    V: VariantSet<Domain = S::Domain>,
    Rest: ArmsInto<S, R>,
    F: FnOnce(ErrorSet<V>) -> T,
    T: Into<R>,
{
    fn try_run_into(self, err: ErrorSet<S>) -> Option<R> {
        if err.value().code() == V::CODES[0] {
            Some((self.handler)(ErrorSet::<V>::trusted(err.value())).into())
        } else {
            self.rest.try_run_into(err)
        }
    }
}

/// Dispatch a case chain whose arm outputs convert into `R`.
pub trait VisitorInto<S: VariantSet, R> {
    /// Select and run the unique matching arm, converting its output.
    fn apply_into(self, err: ErrorSet<S>) -> R;
}

impl<S, R, L> VisitorInto<S, R> for Cases<L>
where
    S: VariantSet,
    L: ArmsInto<S, R> + Covers,
{
    fn apply_into(self, err: ErrorSet<S>) -> R {
        const {
            assert!(
                algebra::is_subset(S::CODES, L::COVERED),
                "case arms must cover every member of the error set (or add an `otherwise` arm)"
            )
        };
        match self.arms.try_run_into(err) {
            Some(output) => output,
            None => unreachable_arm(),
        }
    }
}

impl<S, R, L, F, T> VisitorInto<S, R> for Complete<L, F>
where
    S: VariantSet,
    L: ArmsInto<S, R> + Covers,
    F: FnOnce(ErrorSet<S>) -> T,
    T: Into<R>,
{
    fn apply_into(self, err: ErrorSet<S>) -> R {
        const { assert!(L::COVERED.len() <= algebra::MAX_MEMBERS) };
        match self.arms.try_run_into(err) {
            Some(output) => output,
            None => (self.fallback)(err).into(),
        }
    }
}

// ---------------------------------------------------------------------
// Set-producing arms (transform)
// ---------------------------------------------------------------------

/// A chain of arms that each return an error set; the chain's `Combined`
/// type is the canonical union of every arm's output set.
///
/// Implemented structurally by the chain types; user code never implements
/// this.
pub trait MapArms<S: VariantSet> {
    /// The union of every arm's output set.
    type Combined: VariantSet;

    /// Run the arm matching the held variant, widening its output into the
    /// combined set.
    fn try_map(self, err: ErrorSet<S>) -> Option<ErrorSet<Self::Combined>>;
}

impl<S, V, F, O> MapArms<S> for On<V, F, End<ErrorSet<O>>>
where
    S: VariantSet,
    V: VariantSet<Domain = S::Domain>,
    O: VariantSet,
    F: FnOnce(ErrorSet<V>) -> ErrorSet<O>,
{
    type Combined = O;

    fn try_map(self, err: ErrorSet<S>) -> Option<ErrorSet<O>> {
        if err.value().code() == V::CODES[0] {
            Some((self.handler)(ErrorSet::<V>::trusted(err.value())))
        } else {
            None
        }
    }
}

impl<S, V, F, O, V2, F2, Rest> MapArms<S> for On<V, F, On<V2, F2, Rest>>
where
    S: VariantSet,
    V: VariantSet<Domain = S::Domain>,
    O: VariantSet,
    F: FnOnce(ErrorSet<V>) -> ErrorSet<O>,
    On<V2, F2, Rest>: MapArms<S>,
    <On<V2, F2, Rest> as MapArms<S>>::Combined: VariantSet<Domain = O::Domain>,
{
    type Combined = Or<O, <On<V2, F2, Rest> as MapArms<S>>::Combined>;

    fn try_map(self, err: ErrorSet<S>) -> Option<ErrorSet<Self::Combined>> {
        if err.value().code() == V::CODES[0] {
            Some((self.handler)(ErrorSet::<V>::trusted(err.value())).widen())
        } else {
            match self.rest.try_map(err) {
                Some(mapped) => Some(mapped.widen()),
                None => None,
            }
        }
    }
}

/// Dispatch a case chain whose arms return error sets, producing a value
/// of the combined output set.
pub trait Transformer<S: VariantSet> {
    /// The canonical union of every arm's output set.
    type Combined: VariantSet;

    /// Select and run the unique matching arm, widening into `Combined`.
    fn apply_map(self, err: ErrorSet<S>) -> ErrorSet<Self::Combined>;
}

impl<S, L> Transformer<S> for Cases<L>
where
    S: VariantSet,
    L: MapArms<S> + Covers,
{
    type Combined = L::Combined;

    fn apply_map(self, err: ErrorSet<S>) -> ErrorSet<L::Combined> {
        const {
            assert!(
                algebra::is_subset(S::CODES, L::COVERED),
                "case arms must cover every member of the error set (or add an `otherwise` arm)"
            )
        };
        match self.arms.try_map(err) {
            Some(mapped) => mapped,
            None => unreachable_arm(),
        }
    }
}

impl<S, O, F> Transformer<S> for Complete<End<ErrorSet<O>>, F>
where
    S: VariantSet,
    O: VariantSet,
    F: FnOnce(ErrorSet<S>) -> ErrorSet<O>,
{
    type Combined = O;

    fn apply_map(self, err: ErrorSet<S>) -> ErrorSet<O> {
        (self.fallback)(err)
    }
}

impl<S, V, G, Rest, O, F> Transformer<S> for Complete<On<V, G, Rest>, F>
where
    S: VariantSet,
    On<V, G, Rest>: MapArms<S> + Covers,
    O: VariantSet<Domain = <<On<V, G, Rest> as MapArms<S>>::Combined as VariantSet>::Domain>,
    F: FnOnce(ErrorSet<S>) -> ErrorSet<O>,
{
    type Combined = Or<O, <On<V, G, Rest> as MapArms<S>>::Combined>;

    fn apply_map(self, err: ErrorSet<S>) -> ErrorSet<Self::Combined> {
        const { assert!(<On<V, G, Rest> as Covers>::COVERED.len() <= algebra::MAX_MEMBERS) };
        match self.arms.try_map(err) {
            Some(mapped) => mapped.widen(),
            None => (self.fallback)(err).widen(),
        }
    }
}

// ---------------------------------------------------------------------
// Two-way arms (visit2)
// ---------------------------------------------------------------------

/// A chain of two-way arms producing one common output type.
///
/// Implemented structurally by the chain types; user code never implements
/// this.
pub trait Arms2<S1: VariantSet, S2: VariantSet> {
    /// The common output type of every arm.
    type Output;

    /// Run the arm matching the held variant pair, if any.
    fn try_run2(self, a: ErrorSet<S1>, b: ErrorSet<S2>) -> Option<Self::Output>;
}

impl<S1: VariantSet, S2: VariantSet, R> Arms2<S1, S2> for End<R> {
    type Output = R;

    fn try_run2(self, _a: ErrorSet<S1>, _b: ErrorSet<S2>) -> Option<R> {
        None
    }
}

impl<S1, S2, Va, Vb, F, Rest> Arms2<S1, S2> for On2<Va, Vb, F, Rest>
where
    S1: VariantSet,
    S2: VariantSet,
    Va: VariantSet<Domain = S1::Domain>,
    Vb: VariantSet<Domain = S2::Domain>,
    Rest: Arms2<S1, S2>,
    F: FnOnce(ErrorSet<Va>, ErrorSet<Vb>) -> Rest::Output,
{
    type Output = Rest::Output;

    fn try_run2(self, a: ErrorSet<S1>, b: ErrorSet<S2>) -> Option<Self::Output> {
        if a.value().code() == Va::CODES[0] && b.value().code() == Vb::CODES[0] {
            Some((self.handler)(
                ErrorSet::<Va>::trusted(a.value()),
                ErrorSet::<Vb>::trusted(b.value()),
            ))
        } else {
            self.rest.try_run2(a, b)
        }
    }
}

/// Dispatch a complete two-way case chain over a pair of error sets.
pub trait Visitor2<S1: VariantSet, S2: VariantSet> {
    /// The output produced by every arm.
    type Output;

    /// Select and run the unique arm matching the held pair.
    fn apply2(self, a: ErrorSet<S1>, b: ErrorSet<S2>) -> Self::Output;
}

impl<S1, S2, L> Visitor2<S1, S2> for Cases<L>
where
    S1: VariantSet,
    S2: VariantSet,
    L: Arms2<S1, S2> + Covers,
{
    type Output = L::Output;

    fn apply2(self, a: ErrorSet<S1>, b: ErrorSet<S2>) -> Self::Output {
        const {
            assert!(
                algebra::covers_pairs(S1::CODES, S2::CODES, L::COVERED),
                "two-way case arms must cover the full cross product (or add an `otherwise` arm)"
            )
        };
        match self.arms.try_run2(a, b) {
            Some(output) => output,
            None => unreachable_arm(),
        }
    }
}

impl<S1, S2, L, F> Visitor2<S1, S2> for Complete<L, F>
where
    S1: VariantSet,
    S2: VariantSet,
    L: Arms2<S1, S2> + Covers,
    F: FnOnce(ErrorSet<S1>, ErrorSet<S2>) -> L::Output,
{
    type Output = L::Output;

    fn apply2(self, a: ErrorSet<S1>, b: ErrorSet<S2>) -> Self::Output {
        const { assert!(L::COVERED.len() <= algebra::MAX_MEMBERS) };
        match self.arms.try_run2(a, b) {
            Some(output) => output,
            None => (self.fallback)(a, b),
        }
    }
}

// ---------------------------------------------------------------------
// Free functions and the Result adapter
// ---------------------------------------------------------------------

/// Dispatch one error set through a case chain (free-function form of
/// [`ErrorSet::visit`]).
pub fn visit<S, C>(err: ErrorSet<S>, cases: C) -> C::Output
where
    S: VariantSet,
    C: Visitor<S>,
{
    cases.apply(err)
}

/// Dispatch a pair of error sets through a two-way case chain.
pub fn visit2<S1, S2, C>(a: ErrorSet<S1>, b: ErrorSet<S2>, cases: C) -> C::Output
where
    S1: VariantSet,
    S2: VariantSet,
    C: Visitor2<S1, S2>,
{
    cases.apply2(a, b)
}

/// Map one error set through set-producing arms (free-function form of
/// [`ErrorSet::transform`]).
pub fn transform<S, C>(err: ErrorSet<S>, cases: C) -> ErrorSet<C::Combined>
where
    S: VariantSet,
    C: Transformer<S>,
{
    cases.apply_map(err)
}

/// Map the failure channel of a result through set-producing arms, leaving
/// success values untouched.
pub fn transform_error<T, S, C>(
    result: Result<T, ErrorSet<S>>,
    cases: C,
) -> Result<T, ErrorSet<C::Combined>>
where
    S: VariantSet,
    C: Transformer<S>,
{
    result.map_err(|err| err.transform(cases))
}

/// Method-call form of [`transform_error`] for `Result<T, ErrorSet<S>>`.
pub trait ResultExt<T, S: VariantSet> {
    /// Map the failure channel through set-producing arms; the error type
    /// of the result is the arms' combined output set.
    fn transform_error<C>(self, cases: C) -> Result<T, ErrorSet<C::Combined>>
    where
        C: Transformer<S>;
}

impl<T, S: VariantSet> ResultExt<T, S> for Result<T, ErrorSet<S>> {
    fn transform_error<C>(self, cases: C) -> Result<T, ErrorSet<C::Combined>>
    where
        C: Transformer<S>,
    {
        self.map_err(|err| err.transform(cases))
    }
}

/// Abort when a fully covering chain matched no arm: the dispatched value
/// broke the membership invariant upstream.
#[cold]
#[track_caller]
fn unreachable_arm() -> ! {
    panic!("error-set value matched no case arm despite full coverage");
}

#[cfg(test)]
mod tests {
    use crate::{ErrorDomain, ErrorSet, cases, error_set, visit};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
    enum LinkError {
        Down,
        Flapping,
        Saturated,
    }

    error_set! {
        struct AnyLink: LinkError = [Down, Flapping, Saturated];
    }

    #[test]
    fn free_visit_matches_method_visit() {
        let e = ErrorSet::<AnyLink>::new(LinkError::Saturated);
        let chain = || {
            cases()
                .on::<link_error::Down, _>(|_| "down")
                .otherwise(|_| "other")
        };
        assert_eq!(visit(e, chain()), e.visit(chain()));
    }

    #[test]
    fn arms_outside_the_dispatched_set_are_unreachable() {
        let e = ErrorSet::<link_error::Down>::default();
        let n = e.visit(
            cases()
                .on::<link_error::Saturated, _>(|_| 1)
                .otherwise(|_| 2),
        );
        assert_eq!(n, 2);
    }

    #[test]
    fn fallback_defers_to_a_matching_arm() {
        let e = ErrorSet::<AnyLink>::new(LinkError::Flapping);
        let n = e.visit(
            cases()
                .on::<link_error::Flapping, _>(|_| 10)
                .otherwise(|_| 0),
        );
        assert_eq!(n, 10);
    }
}
