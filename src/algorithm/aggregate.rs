//! Record aggregation to the regional level
//!
//! Groups the three raw event streams into one `RegionAggregate` row per
//! unique (state, district) pair. The enrolment stream defines the region
//! universe: regions that only appear in an update stream are excluded,
//! and regions with enrolments but no updates get zero update counts.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::models::{EnrolmentRecord, RegionAggregate, RegionKey, UpdateRecord};

#[derive(Default)]
struct EnrolmentSums {
    age_0_5: u64,
    age_5_17: u64,
    age_18_plus: u64,
    pincodes: FxHashSet<String>,
}

/// Count update events per region
fn count_updates(updates: &[UpdateRecord]) -> FxHashMap<RegionKey, u64> {
    let mut counts: FxHashMap<RegionKey, u64> = FxHashMap::default();
    for update in updates {
        let key = RegionKey::new(update.state.clone(), update.district.clone());
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Aggregate raw event records into one row per region
///
/// Output rows are sorted by (state, district) so downstream normalization
/// and reporting are deterministic. Empty enrolment input yields an empty
/// table.
#[must_use]
pub fn aggregate_regions(
    enrolments: &[EnrolmentRecord],
    demo_updates: &[UpdateRecord],
    bio_updates: &[UpdateRecord],
) -> Vec<RegionAggregate> {
    let mut sums: FxHashMap<RegionKey, EnrolmentSums> = FxHashMap::default();
    for record in enrolments {
        let key = RegionKey::new(record.state.clone(), record.district.clone());
        let entry = sums.entry(key).or_default();
        entry.age_0_5 += record.age_0_5;
        entry.age_5_17 += record.age_5_17;
        entry.age_18_plus += record.age_18_plus;
        entry.pincodes.insert(record.pincode.clone());
    }

    let demo_counts = count_updates(demo_updates);
    let bio_counts = count_updates(bio_updates);

    let mut aggregates: Vec<RegionAggregate> = sums
        .into_iter()
        .map(|(key, entry)| {
            // Left-join semantics: missing update counts become 0
            let demo_update_count = demo_counts.get(&key).copied().unwrap_or(0);
            let bio_update_count = bio_counts.get(&key).copied().unwrap_or(0);
            RegionAggregate {
                state: key.state,
                district: key.district,
                age_0_5: entry.age_0_5,
                age_5_17: entry.age_5_17,
                age_18_plus: entry.age_18_plus,
                total_registrations: entry.age_0_5 + entry.age_5_17 + entry.age_18_plus,
                pincode_count: entry.pincodes.len() as u64,
                demo_update_count,
                bio_update_count,
            }
        })
        .collect();

    aggregates.sort_by(|a, b| a.key().cmp(&b.key()));

    log::info!(
        "Aggregated {} raw enrolment records into {} regions",
        enrolments.len(),
        aggregates.len()
    );

    aggregates
}
