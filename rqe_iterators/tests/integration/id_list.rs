/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use rqe_iterators::{IdList, RQEIterator, SkipToOutcome, t_docId};
use rstest::rstest;

fn drain(it: &mut impl RQEIterator) -> Vec<t_docId> {
    let mut ids = Vec::new();
    while let Some(result) = it.read().unwrap() {
        ids.push(result.doc_id);
    }
    ids
}

#[test]
fn read_yields_all_ids_in_order() {
    let mut it = IdList::new(vec![2, 3, 7, 10]);
    assert_eq!(it.num_estimated(), 4);
    assert!(it.current().is_none());

    assert_eq!(drain(&mut it), [2, 3, 7, 10]);
    assert!(it.at_eof());
    assert!(it.read().unwrap().is_none());
}

#[test]
fn last_id_is_not_eof_until_read_past() {
    let mut it = IdList::new(vec![5]);
    assert_eq!(it.read().unwrap().unwrap().doc_id, 5);
    assert!(!it.at_eof());
    assert_eq!(it.current().unwrap().doc_id, 5);
    assert!(it.read().unwrap().is_none());
    assert!(it.at_eof());
}

#[rstest]
#[case::exact(7, Some((7, true)))]
#[case::between(4, Some((7, false)))]
#[case::first(1, Some((2, false)))]
#[case::past_the_end(11, None)]
fn skip_to(#[case] target: t_docId, #[case] expected: Option<(t_docId, bool)>) {
    let mut it = IdList::new(vec![2, 3, 7, 10]);
    let outcome = it
        .skip_to(target)
        .unwrap()
        .map(|o| (o.result().doc_id, matches!(o, SkipToOutcome::Found(_))));
    assert_eq!(outcome, expected);
    assert_eq!(it.at_eof(), expected.is_none());
}

#[test]
fn skip_then_read_continues_after_target() {
    let mut it = IdList::new(vec![2, 3, 7, 10]);
    it.skip_to(3).unwrap();
    assert_eq!(it.last_doc_id(), 3);
    assert_eq!(drain(&mut it), [7, 10]);
}

#[test]
fn rewind_restarts() {
    let mut it = IdList::new(vec![1, 2]);
    drain(&mut it);
    it.rewind();
    assert!(!it.at_eof());
    assert_eq!(it.last_doc_id(), 0);
    assert_eq!(drain(&mut it), [1, 2]);
}

#[test]
fn empty_list_starts_at_eof() {
    let mut it = IdList::new(Vec::new());
    assert!(it.at_eof());
    assert!(it.skip_to(1).unwrap().is_none());
}
