//! The `error_set!` declaration macro.

/// Declare named error-set marker types over an existing error domain.
///
/// Each declaration produces a zero-sized struct implementing
/// [`VariantSet`](crate::VariantSet) whose descriptor is the canonical
/// (sorted, deduplicated) form of the listed variants, so declaration order
/// and accidental duplicates never affect the resulting set.
///
/// ## Examples
/// ```rust
/// use errset::{ErrorDomain, ErrorSet, error_set};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
/// pub enum DnsError {
///     Timeout,
///     Refused,
///     ServFail,
/// }
///
/// error_set! {
///     /// Failures worth retrying.
///     pub struct Transient: DnsError = [Timeout, Refused];
///     /// Everything the resolver can report.
///     pub struct Any: DnsError = [Timeout, Refused, ServFail];
/// }
///
/// fn main() {
///     let e = ErrorSet::<Transient>::new(DnsError::Refused);
///     assert_eq!(DnsError::Refused, e.widen::<Any>());
/// }
/// ```
#[macro_export]
macro_rules! error_set {
    ($($(#[$meta:meta])* $vis:vis struct $name:ident: $domain:ty = [$($variant:ident),+ $(,)?];)+) => {
        $(
            $(#[$meta])*
            $vis struct $name;

            impl $crate::VariantSet for $name {
                type Domain = $domain;

                const CODES: &'static [u32] = {
                    const CANON: ([u32; $crate::algebra::MAX_MEMBERS], usize) =
                        $crate::algebra::canon(&[$(<$domain>::$variant as u32),+]);
                    let (buf, len) = &CANON;
                    let codes: &[u32] = buf;
                    codes.split_at(*len).0
                };
            }
        )+
    };
}
