//! Fuzz target for dataset snapshot loading and content reports.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_snapshot
//! ```

#![no_main]

use ladle_core::{content_report, Dataset, DatasetSnapshot, LadleConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = serde_json::from_slice::<DatasetSnapshot>(data) else {
        return;
    };
    if snapshot.items.len() > 256 || snapshot.orders.len() > 4096 {
        return;
    }
    let Ok(dataset) = Dataset::from_snapshot(snapshot) else {
        return;
    };

    let config = LadleConfig::default();
    for user in dataset.users().iter().take(4) {
        if let Ok(report) = content_report(&dataset, user.id, &config) {
            assert!(report.recommendation.len() <= config.recommend.nb_recipes);
            assert!((0.0..=1.0).contains(&report.sellability));
        }
    }
});
