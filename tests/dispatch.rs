//! Dispatch behavior: `visit`, `visit_into`, `visit2`, and `transform`.
//!
//! Each test pins one selection rule: the unique matching arm runs, the
//! fallback catches everything else, and `transform` recombines per-arm
//! output sets into their canonical union without the caller naming it.

use errset::{ErrorDomain, ErrorSet, cases, error_set, visit2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
enum StoreFault {
    Timeout,
    Refused,
    Reset,
    Stale,
    Poisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
enum CacheFault {
    StaleEntry,
    MissingEntry,
}

error_set! {
    struct Transport: StoreFault = [Timeout, Refused, Reset];
    struct Remapped: StoreFault = [Refused, Reset, Poisoned];
}

#[test]
fn visit_on_a_singleton_runs_its_only_arm() {
    let e = ErrorSet::<store_fault::Timeout>::default();
    let n = e.visit(cases().on::<store_fault::Timeout, _>(|_| 1));
    assert_eq!(n, 1);
}

#[test]
fn visit_selects_the_matching_arm() {
    let e = ErrorSet::<Transport>::new(StoreFault::Refused);
    let n = e.visit(
        cases()
            .on::<store_fault::Timeout, _>(|_| 1)
            .on::<store_fault::Refused, _>(|_| 2)
            .otherwise(|_| 3),
    );
    assert_eq!(n, 2);
}

#[test]
fn visit_without_fallback_needs_full_coverage() {
    let e = ErrorSet::<Transport>::new(StoreFault::Reset);
    let n = e.visit(
        cases()
            .on::<store_fault::Timeout, _>(|_| 1)
            .on::<store_fault::Refused, _>(|_| 2)
            .on::<store_fault::Reset, _>(|_| 3),
    );
    assert_eq!(n, 3);
}

#[test]
fn visit_into_converts_each_arm_output() {
    let e = ErrorSet::<Transport>::new(StoreFault::Refused);
    let x = e.visit_into::<f64, _>(
        cases()
            .on::<store_fault::Timeout, _>(|_| 42)
            .otherwise(|_| 3.14159),
    );
    assert_eq!(x, 3.14159);

    let e = ErrorSet::<Transport>::new(StoreFault::Timeout);
    let x = e.visit_into::<f64, _>(
        cases()
            .on::<store_fault::Timeout, _>(|_| 42)
            .otherwise(|_| 3.14159),
    );
    assert_eq!(x, 42.0);
}

#[test]
fn visit2_selects_the_matching_pair() {
    let a = ErrorSet::<store_fault::Timeout>::default();
    let b = ErrorSet::<Transport>::new(StoreFault::Refused);
    let n = visit2(
        a,
        b,
        cases()
            .on2::<store_fault::Timeout, store_fault::Timeout, _>(|_, _| 1)
            .on2::<store_fault::Timeout, store_fault::Refused, _>(|_, _| 2)
            .otherwise(|_, _| 3),
    );
    assert_eq!(n, 2);
}

#[test]
fn visit2_without_fallback_covers_the_cross_product() {
    error_set! {
        struct TwoWay: StoreFault = [Timeout, Refused];
    }
    let chain = || {
        cases()
            .on2::<store_fault::Timeout, store_fault::Timeout, _>(|_, _| 10)
            .on2::<store_fault::Timeout, store_fault::Refused, _>(|_, _| 20)
    };
    let a = ErrorSet::<store_fault::Timeout>::default();
    let hit = ErrorSet::<TwoWay>::new(StoreFault::Timeout);
    let miss = ErrorSet::<TwoWay>::new(StoreFault::Refused);
    assert_eq!(visit2(a, hit, chain()), 10);
    assert_eq!(visit2(a, miss, chain()), 20);
}

#[test]
fn transform_maps_a_singleton_to_a_new_set() {
    let e = ErrorSet::<store_fault::Timeout>::default();
    let out = e.transform(
        cases().on::<store_fault::Timeout, _>(|_| ErrorSet::<store_fault::Refused>::default()),
    );
    assert_eq!(StoreFault::Refused, out);
}

#[test]
fn transform_unions_arm_outputs_across_domains() {
    error_set! {
        struct Pair: StoreFault = [Timeout, Refused];
    }
    let e = ErrorSet::<Pair>::new(StoreFault::Timeout);
    let out = e.transform(
        cases()
            .on::<store_fault::Timeout, _>(|_| ErrorSet::<cache_fault::StaleEntry>::default())
            .on::<store_fault::Refused, _>(|_| ErrorSet::<cache_fault::MissingEntry>::default()),
    );
    assert_eq!(CacheFault::StaleEntry, out);
}

#[test]
fn transform_fallback_passes_the_full_set_through() {
    let e = ErrorSet::<Transport>::new(StoreFault::Timeout);
    let out = e.transform(
        cases()
            .on::<store_fault::Timeout, _>(|_| ErrorSet::<store_fault::Refused>::default())
            .on::<store_fault::Reset, _>(|_| ErrorSet::<store_fault::Poisoned>::default())
            .otherwise(|e| e),
    );
    assert_eq!(StoreFault::Refused, out);

    let e = ErrorSet::<Transport>::new(StoreFault::Refused);
    let out = e.transform(
        cases()
            .on::<store_fault::Timeout, _>(|_| ErrorSet::<store_fault::Refused>::default())
            .on::<store_fault::Reset, _>(|_| ErrorSet::<store_fault::Poisoned>::default())
            .otherwise(|e| e),
    );
    assert_eq!(StoreFault::Refused, out);
}

#[test]
fn transform_with_a_whole_set_mapping() {
    let e = ErrorSet::<Transport>::new(StoreFault::Timeout);
    let out = e.transform(cases().otherwise(|e: ErrorSet<Transport>| -> ErrorSet<Remapped> {
        if e.value() == StoreFault::Timeout {
            ErrorSet::<store_fault::Poisoned>::default().widen()
        } else {
            e.narrow()
        }
    }));
    assert_eq!(StoreFault::Poisoned, out);

    let e = ErrorSet::<Transport>::new(StoreFault::Reset);
    let out = e.transform(cases().otherwise(|e: ErrorSet<Transport>| -> ErrorSet<Remapped> {
        if e.value() == StoreFault::Timeout {
            ErrorSet::<store_fault::Poisoned>::default().widen()
        } else {
            e.narrow()
        }
    }));
    assert_eq!(StoreFault::Reset, out);
}
