/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Property-based tests for the numeric range tree using `proptest`.

#[cfg(not(miri))]
mod proptests {
    use numeric_range_tree::{NumericFilter, NumericRangeTree, TreeConfig, rdb};
    use proptest::prelude::*;
    use rqe_iterators::t_docId;

    use crate::helpers::{brute_force, query};

    /// Doc-ids are non-decreasing; a step of 0 gives a multi-value document.
    /// Values are drawn from a small grid so that duplicates and exact hits on
    /// split values are common.
    fn arb_entries() -> impl Strategy<Value = Vec<(t_docId, f64)>> {
        proptest::collection::vec((0u64..3, -50i32..50), 0..400).prop_map(|steps| {
            let mut doc_id = 1;
            steps
                .into_iter()
                .map(|(step, value)| {
                    doc_id += step;
                    (doc_id, f64::from(value) / 2.0)
                })
                .collect()
        })
    }

    fn arb_filter() -> impl Strategy<Value = NumericFilter> {
        let bound = prop_oneof![
            1 => Just(f64::NEG_INFINITY),
            1 => Just(f64::INFINITY),
            8 => (-60i32..60).prop_map(|v| f64::from(v) / 2.0),
        ];
        (bound.clone(), bound, any::<bool>(), any::<bool>()).prop_map(
            |(a, b, min_inclusive, max_inclusive)| {
                NumericFilter::new(a.min(b), a.max(b), min_inclusive, max_inclusive)
            },
        )
    }

    fn arb_config() -> impl Strategy<Value = TreeConfig> {
        (1usize..6, 0u32..4).prop_map(|(split_cardinality, max_retained_depth)| {
            TreeConfig::default()
                .with_split_cardinality(split_cardinality)
                .with_max_retained_depth(max_retained_depth)
        })
    }

    fn build(config: TreeConfig, entries: &[(t_docId, f64)]) -> NumericRangeTree {
        let mut tree = NumericRangeTree::new(config);
        for &(doc_id, value) in entries {
            tree.add(doc_id, value);
        }
        tree
    }

    proptest! {
        #[test]
        fn query_matches_brute_force(
            entries in arb_entries(),
            filter in arb_filter(),
            config in arb_config(),
        ) {
            let tree = build(config, &entries);
            prop_assert_eq!(query(&tree, &filter), brute_force(&entries, &filter));
        }

        #[test]
        fn statistics_match_the_tree(entries in arb_entries(), config in arb_config()) {
            let tree = build(config, &entries);

            let leaves = tree.iter().filter(|n| n.is_leaf()).count();
            let allocated: Vec<_> = tree.iter().filter_map(|n| n.range()).collect();

            prop_assert_eq!(tree.num_entries(), entries.len());
            prop_assert_eq!(tree.num_ranges(), leaves);
            prop_assert_eq!(tree.num_allocated_ranges(), allocated.len());
            prop_assert_eq!(
                tree.num_records(),
                allocated.iter().map(|r| r.num_entries()).sum::<usize>()
            );
            prop_assert_eq!(
                tree.entries_size(),
                allocated.iter().map(|r| r.entries_size()).sum::<usize>()
            );
            prop_assert_eq!(tree.leaves().map(|r| r.num_entries()).sum::<usize>(), entries.len());
        }

        #[test]
        fn spans_enclose_their_entries(entries in arb_entries(), config in arb_config()) {
            let tree = build(config, &entries);
            for range in tree.iter().filter_map(|n| n.range()) {
                for entry in range.entries() {
                    prop_assert!(range.min_val() <= entry.value && entry.value <= range.max_val());
                }
                prop_assert!(range.within(range.min_val(), range.max_val().next_up()));
                prop_assert!(range.contains(range.min_val(), range.max_val().next_down()));
            }
        }

        #[test]
        fn round_trip_preserves_queries(
            entries in arb_entries(),
            filter in arb_filter(),
            config in arb_config(),
        ) {
            let tree = build(config, &entries);
            let mut buf = Vec::new();
            rdb::rdb_save(&tree, &mut buf).unwrap();
            let loaded = rdb::rdb_load(&mut buf.as_slice(), 0, config).unwrap();

            prop_assert_eq!(loaded.num_entries(), tree.num_entries());
            prop_assert_eq!(query(&loaded, &filter), query(&tree, &filter));
        }
    }
}
