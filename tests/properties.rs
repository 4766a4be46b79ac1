use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use indicator_analysis::analysis::{dedup_names, Analyzer};
use indicator_analysis::backend::{Availability, Backend};
use indicator_analysis::catalog::Catalog;
use indicator_analysis::dispatch::{FailureReason, Params};
use indicator_analysis::frame::{Bar, PriceFrame};
use indicator_analysis::resolver;
use proptest::prelude::*;

const KNOWN: &[&str] = &[
    "sma", "EMA", " rsi", "macd", "bbands", "atr", "vwap", "ichimoku", "obv", "cdldoji", "adx", "kc",
    "stddev", "mfi",
];

fn frame(rows: usize, seed: f64) -> PriceFrame {
    let start = DateTime::<Utc>::from_timestamp(1_600_000_000, 0).unwrap();
    PriceFrame::from_bars((0..rows).map(|i| {
        let p = 50.0 + ((i as f64 + seed) * 0.37).sin() * 4.0 + i as f64 * 0.05;
        Bar::new(start + Duration::days(i as i64), p - 0.4, p + 1.1, p - 1.3, p, 900.0 + (i % 7) as f64 * 50.0)
    }))
    .unwrap()
}

fn request() -> impl Strategy<Value = Vec<String>> {
    let name = prop_oneof![
        3 => proptest::sample::select(KNOWN).prop_map(str::to_string),
        1 => "zz_[a-z]{1,6}",
    ];
    proptest::collection::vec(name, 0..12)
}

fn availability() -> impl Strategy<Value = Availability> {
    (any::<bool>(), any::<bool>()).prop_map(|(talib, ta)| {
        Availability::from_flags(&[(Backend::TaLib, talib), (Backend::Ta, ta), (Backend::Native, true)])
    })
}

proptest! {
    #[test]
    fn unknown_names_are_always_unknown(suffix in "[a-z_]{1,10}", availability in availability()) {
        let catalog = Catalog::builtin().unwrap();
        let failure = resolver::resolve(&catalog, &availability, &format!("zz_{}", suffix)).unwrap_err();
        prop_assert_eq!(failure.reason, FailureReason::UnknownIndicator);
    }

    #[test]
    fn resolver_picks_highest_priority_available(availability in availability()) {
        let catalog = Catalog::builtin().unwrap();
        for spec in catalog.list_all() {
            let expected = spec
                .backends()
                .into_iter()
                .filter(|&b| availability.is_available(b))
                .min_by_key(|b| b.rank());
            match resolver::resolve(&catalog, &availability, spec.name) {
                Ok((_, backend)) => prop_assert_eq!(Some(backend), expected),
                Err(failure) => {
                    prop_assert_eq!(expected, None);
                    prop_assert_eq!(failure.reason, FailureReason::NoBackendAvailable);
                }
            }
        }
    }

    #[test]
    fn runs_are_idempotent_and_partition_the_request(
        names in request(),
        rows in 1usize..90,
        seed in 0.0f64..10.0,
    ) {
        let catalog = Catalog::builtin().unwrap();
        let availability = Availability::from_flags(&[(Backend::Native, true)]);
        let analyzer = Analyzer::new(&catalog, &availability);
        let frame = frame(rows, seed);

        let first = analyzer.run(names.as_slice(), &frame);
        let second = analyzer.run(names.as_slice(), &frame);
        prop_assert_eq!(&first, &second);

        let expected = dedup_names(names.as_slice());
        let computed: HashSet<&str> = first.computed.iter().map(String::as_str).collect();
        let skipped: HashSet<&str> = first.skipped.iter().map(|s| s.name.as_str()).collect();
        prop_assert!(computed.is_disjoint(&skipped));
        prop_assert_eq!(computed.len() + skipped.len(), expected.len());

        // Both lists keep request order
        let in_order = |list: Vec<&str>| {
            let positions: Vec<usize> = list
                .iter()
                .map(|name| expected.iter().position(|e| e == name).unwrap_or(usize::MAX))
                .collect();
            positions.windows(2).all(|w| w[0] < w[1]) && !positions.contains(&usize::MAX)
        };
        prop_assert!(in_order(first.computed.iter().map(String::as_str).collect()));
        prop_assert!(in_order(first.skipped.iter().map(|s| s.name.as_str()).collect()));
    }

    #[test]
    fn short_frames_never_compute(rows in 1usize..200) {
        let catalog = Catalog::builtin().unwrap();
        let availability = Availability::from_flags(&[(Backend::Native, true)]);
        let analyzer = Analyzer::new(&catalog, &availability);
        let frame = frame(rows, 1.0);

        for spec in catalog.list_all().iter().filter(|spec| spec.min_bars > rows) {
            if resolver::resolve(&catalog, &availability, spec.name).is_err() {
                continue;
            }
            let result = analyzer.run(&[spec.name], &frame);
            prop_assert!(result.computed.is_empty());
            prop_assert_eq!(result.skipped[0].reason, FailureReason::InsufficientInputRows);
        }
    }

    #[test]
    fn defaults_are_defined_once_min_bars_rows_exist(seed in 0.0f64..10.0, with_ta in any::<bool>()) {
        let catalog = Catalog::builtin().unwrap();
        let availability = Availability::from_flags(&[
            (Backend::Ta, with_ta && cfg!(feature = "ta-crate")),
            (Backend::Native, true),
        ]);
        let analyzer = Analyzer::new(&catalog, &availability);

        for spec in catalog.list_all() {
            if resolver::resolve(&catalog, &availability, spec.name).is_err() {
                continue;
            }
            let result = analyzer.run(&[spec.name], &frame(spec.min_bars, seed));
            prop_assert_eq!(
                &result.computed,
                &vec![spec.name.to_string()],
                "{} at {} rows: {:?}",
                spec.name,
                spec.min_bars,
                result.skipped
            );
            for column in spec.column_names() {
                let values = result.column(&column).unwrap();
                prop_assert!(
                    values.iter().any(Option::is_some),
                    "{} has no value at {} rows",
                    column,
                    spec.min_bars
                );
            }
        }
    }

    #[test]
    fn overridden_periods_beyond_the_frame_are_insufficient(rows in 1usize..60, extra in 1usize..1_000) {
        let catalog = Catalog::builtin().unwrap();
        let availability = Availability::from_flags(&[(Backend::Native, true)]);
        let length = (rows + extra) as f64;
        let analyzer = Analyzer::new(&catalog, &availability)
            .with_params("sma", Params::new().with("length", length))
            .with_params("rsi", Params::new().with("length", length));

        let result = analyzer.run(&["sma", "rsi"], &frame(rows, 2.0));
        prop_assert!(result.computed.is_empty());
        for skipped in &result.skipped {
            prop_assert_eq!(skipped.reason, FailureReason::InsufficientInputRows);
        }
    }
}
