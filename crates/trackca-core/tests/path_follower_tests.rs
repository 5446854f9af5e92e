mod common;

use common::{chain_abc, cycle_ab, id, tie_fan};
use trackca_core::{follow_all, follow_single, is_highest_neighbor, mark_seeds, relax};

#[test]
fn test_chain_follow_single_gives_full_chain() {
    // GIVEN a relaxed and seeded chain
    let (mut arena, hood) = chain_abc();
    relax(&mut arena, &hood);
    mark_seeds(&mut arena, &hood, true, f64::NEG_INFINITY);

    // WHEN following from the head
    let mut path = Vec::new();
    let ok = follow_single(&arena, &hood, id(0), &mut path, f64::NEG_INFINITY);

    // THEN the whole chain comes back, head first
    assert!(ok);
    assert_eq!(path, vec![id(0), id(1), id(2)]);
}

#[test]
fn test_chain_follow_all_single_path() {
    let (mut arena, hood) = chain_abc();
    relax(&mut arena, &hood);
    mark_seeds(&mut arena, &hood, true, f64::NEG_INFINITY);

    let mut paths = Vec::new();
    let n = follow_all(&arena, &hood, &mut paths, f64::NEG_INFINITY);

    assert_eq!(n, 1);
    assert_eq!(paths, vec![vec![id(0), id(1), id(2)]]);
}

#[test]
fn test_cycle_yields_no_paths() {
    // GIVEN A <-> B seeded non-strictly
    let (mut arena, hood) = cycle_ab();
    relax(&mut arena, &hood);
    let n_seeds = mark_seeds(&mut arena, &hood, false, f64::NEG_INFINITY);

    // WHEN following all
    let mut paths = Vec::new();
    let n = follow_all(&arena, &hood, &mut paths, f64::NEG_INFINITY);

    // THEN nothing is seeded or produced
    assert_eq!(n_seeds, 0);
    assert_eq!(n, 0);
    assert!(paths.is_empty());
}

#[test]
fn test_tie_branches_in_follow_all() {
    // GIVEN I -> N1, I -> N2 with equal sums
    let (mut arena, hood) = tie_fan();
    relax(&mut arena, &hood);
    mark_seeds(&mut arena, &hood, true, f64::NEG_INFINITY);

    // WHEN following all
    let mut paths = Vec::new();
    follow_all(&arena, &hood, &mut paths, f64::NEG_INFINITY);

    // THEN both branches come out, sharing I, in neighbor order
    assert_eq!(paths, vec![vec![id(0), id(1)], vec![id(0), id(2)]]);
}

#[test]
fn test_tie_follow_single_takes_first_neighbor() {
    let (mut arena, hood) = tie_fan();
    relax(&mut arena, &hood);
    mark_seeds(&mut arena, &hood, true, f64::NEG_INFINITY);

    let mut path = Vec::new();
    assert!(follow_single(&arena, &hood, id(0), &mut path, f64::NEG_INFINITY));

    assert_eq!(path, vec![id(0), id(1)]);
}

#[test]
fn test_follow_all_is_deterministic() {
    let (mut arena, hood) = tie_fan();
    relax(&mut arena, &hood);
    mark_seeds(&mut arena, &hood, false, f64::NEG_INFINITY);

    let mut first = Vec::new();
    let mut second = Vec::new();
    follow_all(&arena, &hood, &mut first, f64::NEG_INFINITY);
    follow_all(&arena, &hood, &mut second, f64::NEG_INFINITY);

    assert_eq!(first, second);
}

#[test]
fn test_non_strict_seeds_give_sub_paths() {
    let (mut arena, hood) = chain_abc();
    relax(&mut arena, &hood);
    mark_seeds(&mut arena, &hood, false, f64::NEG_INFINITY);

    let mut paths = Vec::new();
    follow_all(&arena, &hood, &mut paths, 4.0);

    assert_eq!(paths, vec![vec![id(0), id(1), id(2)], vec![id(1), id(2)]]);
}

#[test]
fn test_is_highest_neighbor_on_relaxed_chain() {
    let (mut arena, hood) = chain_abc();
    relax(&mut arena, &hood);

    assert!(is_highest_neighbor(&arena[id(0)], 2.0, &arena[id(1)]));
    assert!(!is_highest_neighbor(&arena[id(0)], 1.0, &arena[id(1)]));
}
