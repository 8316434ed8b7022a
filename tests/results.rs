//! End-to-end use with `Result`: declared error channels, remapping via
//! `transform_error`, success-channel chaining, and `Display` composition
//! with `thiserror`-derived domains.

use errset::{ErrorDomain, ErrorSet, ResultExt, cases, error_set, transform_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain, thiserror::Error)]
enum LookupError {
    #[error("the lookup timed out")]
    Timeout,
    #[error("the backend refused the request")]
    Refused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain, thiserror::Error)]
enum FetchError {
    #[error("entry is stale")]
    Stale,
    #[error("entry is missing")]
    Missing,
    #[error("fetch was interrupted")]
    Interrupted,
}

error_set! {
    struct LookupFailure: LookupError = [Timeout, Refused];
    struct FetchFailure: FetchError = [Stale, Missing, Interrupted];
}

fn lookup(key: i32) -> Result<i32, ErrorSet<LookupFailure>> {
    match key {
        k if k > 0 => Ok(k),
        0 => ErrorSet::<lookup_error::Timeout>::default().into_result(),
        _ => ErrorSet::<lookup_error::Refused>::default().into_result(),
    }
}

fn fetch(key: i32) -> Result<i32, ErrorSet<FetchFailure>> {
    if key % 2 != 0 {
        return ErrorSet::<fetch_error::Interrupted>::default().into_result();
    }
    lookup(key)
        .transform_error(
            cases()
                .on::<lookup_error::Timeout, _>(|_| ErrorSet::<fetch_error::Missing>::default())
                .on::<lookup_error::Refused, _>(|_| ErrorSet::<fetch_error::Stale>::default()),
        )
        .map_err(|e| e.widen())
}

fn fetch_doubled(key: i32) -> Result<i32, ErrorSet<FetchFailure>> {
    fetch(key).map(|value| value * 2)
}

#[test]
fn fetch_routes_each_input_to_its_outcome() {
    assert_eq!(fetch(2), Ok(2));
    assert_eq!(fetch(1), Err(ErrorSet::new(FetchError::Interrupted)));
    assert_eq!(fetch(0), Err(ErrorSet::new(FetchError::Missing)));
    assert_eq!(fetch(-2), Err(ErrorSet::new(FetchError::Stale)));
}

#[test]
fn success_channel_chaining_leaves_failures_alone() {
    assert_eq!(fetch_doubled(2), Ok(4));
    assert_eq!(fetch_doubled(1), Err(ErrorSet::new(FetchError::Interrupted)));
    assert_eq!(fetch_doubled(0), Err(ErrorSet::new(FetchError::Missing)));
    assert_eq!(fetch_doubled(-2), Err(ErrorSet::new(FetchError::Stale)));
}

#[test]
fn free_function_form_matches_the_method() {
    let remap = || {
        cases()
            .on::<lookup_error::Timeout, _>(|_| ErrorSet::<fetch_error::Missing>::default())
            .on::<lookup_error::Refused, _>(|_| ErrorSet::<fetch_error::Stale>::default())
    };
    assert_eq!(
        transform_error(lookup(0), remap()),
        lookup(0).transform_error(remap())
    );
    assert_eq!(transform_error(lookup(3), remap()), Ok(3));
}

#[test]
fn display_composes_with_thiserror_domains() {
    let e = ErrorSet::<LookupFailure>::new(LookupError::Timeout);
    // The set displays the variant name; the domain keeps its own message.
    assert_eq!(e.to_string(), "Timeout");
    assert_eq!(e.value().to_string(), "the lookup timed out");
}

#[test]
fn error_sets_are_std_errors_at_api_boundaries() {
    fn boxed(key: i32) -> Result<i32, Box<dyn std::error::Error>> {
        Ok(fetch(key)?)
    }
    assert_eq!(boxed(2).unwrap(), 2);
    let err = boxed(0).unwrap_err();
    assert_eq!(err.to_string(), "Missing");
}
