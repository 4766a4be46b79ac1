//! Picks the backend that computes an indicator.
//!
//! Resolution is a pure lookup over catalog and availability: the first
//! backend, in priority order, that is both available and listed in the
//! indicator's support wins.

use crate::backend::{Availability, Backend};
use crate::catalog::{canonical_name, Catalog, IndicatorSpec};
use crate::dispatch::{Failure, FailureReason};

pub fn resolve<'c>(
    catalog: &'c Catalog,
    availability: &Availability,
    name: &str,
) -> Result<(&'c IndicatorSpec, Backend), Failure> {
    let spec = catalog.lookup(name).ok_or_else(|| {
        Failure::new(
            FailureReason::UnknownIndicator,
            format!("`{}` is not in the indicator catalog", canonical_name(name)),
        )
    })?;

    if spec.support.is_empty() {
        return Err(Failure::new(
            FailureReason::NoBackendAvailable,
            format!("no backend implements {}", spec.name),
        ));
    }

    match availability
        .available()
        .find(|&backend| spec.function_for(backend).is_some())
    {
        Some(backend) => Ok((spec, backend)),
        None => {
            let supported: Vec<&str> = spec.support.iter().map(|s| s.backend.id()).collect();
            Err(Failure::new(
                FailureReason::NoBackendAvailable,
                format!(
                    "no available backend implements {} (supported by: {})",
                    spec.name,
                    supported.join(", ")
                ),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn catalog() -> Catalog {
        Catalog::from_specs(vec![
            IndicatorSpec::new("sma", "SMA", Category::Overlap)
                .talib("SMA")
                .ta("sma")
                .native("sma"),
            IndicatorSpec::new("adx", "ADX", Category::Momentum).talib("ADX"),
            IndicatorSpec::new("orphan", "Orphan", Category::Overlap),
        ])
        .unwrap()
    }

    #[test]
    fn unknown_names_fail_regardless_of_availability() {
        let availability = Availability::from_flags(&[
            (Backend::TaLib, true),
            (Backend::Ta, true),
            (Backend::Native, true),
        ]);
        let failure = resolve(&catalog(), &availability, "Unknown_X").unwrap_err();
        assert_eq!(failure.reason, FailureReason::UnknownIndicator);
        assert!(failure.detail.contains("unknown_x"));
    }

    #[test]
    fn highest_priority_available_backend_wins() {
        let catalog = catalog();
        let all = Availability::from_flags(&[
            (Backend::TaLib, true),
            (Backend::Ta, true),
            (Backend::Native, true),
        ]);
        assert_eq!(resolve(&catalog, &all, "sma").unwrap().1, Backend::TaLib);

        let no_talib = Availability::from_flags(&[(Backend::Ta, true), (Backend::Native, true)]);
        assert_eq!(resolve(&catalog, &no_talib, " SMA ").unwrap().1, Backend::Ta);

        let native_only = Availability::from_flags(&[(Backend::Native, true)]);
        let (spec, backend) = resolve(&catalog, &native_only, "sma").unwrap();
        assert_eq!(spec.name, "sma");
        assert_eq!(backend, Backend::Native);
    }

    #[test]
    fn unavailable_capable_backend_is_reported() {
        let native_only = Availability::from_flags(&[(Backend::Native, true)]);
        let failure = resolve(&catalog(), &native_only, "adx").unwrap_err();
        assert_eq!(failure.reason, FailureReason::NoBackendAvailable);
        assert_eq!(
            failure.detail,
            "no available backend implements adx (supported by: talib)"
        );
    }

    #[test]
    fn entry_without_backends_is_reported() {
        let all = Availability::from_flags(&[(Backend::TaLib, true), (Backend::Native, true)]);
        let failure = resolve(&catalog(), &all, "orphan").unwrap_err();
        assert_eq!(failure.reason, FailureReason::NoBackendAvailable);
        assert_eq!(failure.detail, "no backend implements orphan");
    }
}
