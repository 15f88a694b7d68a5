use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use twinmap::Bimap;

/// Reference model: two plain maps kept in lockstep by hand.
struct Shadow {
    by_left: BTreeMap<i64, i64>,
    by_right: BTreeMap<i64, i64>,
}

impl Shadow {
    fn new() -> Self {
        Self {
            by_left: BTreeMap::new(),
            by_right: BTreeMap::new(),
        }
    }

    fn insert(&mut self, l: i64, r: i64) -> bool {
        if self.by_left.contains_key(&l) || self.by_right.contains_key(&r) {
            return false;
        }
        self.by_left.insert(l, r);
        self.by_right.insert(r, l);
        true
    }

    fn erase_left(&mut self, l: &i64) -> bool {
        match self.by_left.remove(l) {
            Some(r) => {
                self.by_right.remove(&r);
                true
            }
            None => false,
        }
    }

    fn erase_right(&mut self, r: &i64) -> bool {
        match self.by_right.remove(r) {
            Some(l) => {
                self.by_left.remove(&l);
                true
            }
            None => false,
        }
    }
}

fn crosscheck(map: &Bimap<i64, i64>, shadow: &Shadow) {
    map.check_invariants().unwrap();
    assert_eq!(map.len(), shadow.by_left.len());

    let lefts: Vec<(i64, i64)> = map.iter_left().map(|(l, r)| (*l, *r)).collect();
    let expect: Vec<(i64, i64)> = shadow.by_left.iter().map(|(l, r)| (*l, *r)).collect();
    assert_eq!(lefts, expect);

    let rights: Vec<(i64, i64)> = map.iter_right().map(|(r, l)| (*r, *l)).collect();
    let expect: Vec<(i64, i64)> = shadow.by_right.iter().map(|(r, l)| (*r, *l)).collect();
    assert_eq!(rights, expect);
}

#[test]
fn random_ops_match_shadow_maps() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x7e1f00d);
    let mut map = Bimap::new();
    let mut shadow = Shadow::new();

    // Keys are drawn from a small range to force plenty of collisions on
    // both sides.
    for step in 0..4000 {
        let op = rng.gen_range(0..100);
        let l = rng.gen_range(0..64i64);
        let r = rng.gen_range(0..64i64);
        match op {
            0..=49 => {
                let inserted = map.insert(l, r) != map.end_left();
                assert_eq!(inserted, shadow.insert(l, r));
            }
            50..=69 => {
                assert_eq!(map.erase_left(&l), shadow.erase_left(&l));
            }
            70..=89 => {
                assert_eq!(map.erase_right(&r), shadow.erase_right(&r));
            }
            _ => {
                let got = *map.at_right_or_default(r);
                let want = match shadow.by_right.get(&r) {
                    Some(l) => *l,
                    None => {
                        // The accessor inserts (0, r), evicting whichever
                        // pair held left key 0.
                        shadow.erase_left(&0);
                        assert!(shadow.insert(0, r));
                        0
                    }
                };
                assert_eq!(got, want);
            }
        }
        if step % 97 == 0 {
            crosscheck(&map, &shadow);
        }
    }
    crosscheck(&map, &shadow);
}

#[test]
fn reverse_comparators_iterate_descending() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed);
    let mut map = Bimap::with_comparators(
        |a: &i64, b: &i64| b.cmp(a),
        |a: &i64, b: &i64| b.cmp(a),
    );
    let mut shadow = Shadow::new();

    for _ in 0..1500 {
        let l = rng.gen_range(0..48i64);
        let r = rng.gen_range(0..48i64);
        if rng.gen_bool(0.7) {
            let inserted = map.insert(l, r) != map.end_left();
            assert_eq!(inserted, shadow.insert(l, r));
        } else {
            assert_eq!(map.erase_left(&l), shadow.erase_left(&l));
        }
    }

    map.check_invariants().unwrap();
    let lefts: Vec<i64> = map.iter_left().map(|(l, _)| *l).collect();
    let expect: Vec<i64> = shadow.by_left.keys().rev().copied().collect();
    assert_eq!(lefts, expect);
    let rights: Vec<i64> = map.iter_right().map(|(r, _)| *r).collect();
    let expect: Vec<i64> = shadow.by_right.keys().rev().copied().collect();
    assert_eq!(rights, expect);
}

#[test]
fn navigation_agrees_with_iteration_after_churn() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0xf11b);
    let mut map = Bimap::new();
    for _ in 0..800 {
        let l = rng.gen_range(0..256i64);
        let r = rng.gen_range(0..256i64);
        map.insert(l, r);
        if rng.gen_bool(0.3) {
            let victim = rng.gen_range(0..256i64);
            map.erase_left(&victim);
        }
    }
    map.check_invariants().unwrap();

    let mut walked = Vec::new();
    let mut pos = map.begin_left();
    while pos != map.end_left() {
        let (l, r) = map.pair_left(pos).expect("live entry");
        walked.push((*l, *r));

        // The flipped position reads the same entry from the other side.
        let flipped = map.flip_left(pos);
        assert_eq!(map.pair_right(flipped), Some((r, l)));

        pos = map.next_left(pos);
    }

    let iterated: Vec<(i64, i64)> = map.iter_left().map(|(l, r)| (*l, *r)).collect();
    assert_eq!(walked, iterated);
    assert_eq!(map.iter_left().len(), walked.len());
}
