//! Structural invariants from section 8 that compare the engine against
//! itself rather than against the oracle: order-independence of interleaved
//! appends, widen-vs-rebuild equivalence, and monotonicity under widening.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use banded_dl::Snapshot;

const ALPHABET: &[u8] = b"abcd";

fn random_sequence(rng: &mut impl Rng, max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())]).collect()
}

fn build(a: &[u8], b: &[u8], w: usize) -> Snapshot<u8> {
    let mut s = Snapshot::with_band(w);
    for &x in a {
        s = s.append_input(x);
    }
    for &y in b {
        s = s.append_match(y);
    }
    s
}

/// Appends `a` and `b` in the interleaving described by `take_from_a`: a
/// sequence of booleans, `true` meaning "take the next input symbol next".
/// Once one side runs out, the rest of the other side is appended in order.
fn build_interleaved(a: &[u8], b: &[u8], w: usize, take_from_a: &[bool]) -> Snapshot<u8> {
    let mut s = Snapshot::with_band(w);
    let (mut ai, mut bi) = (0, 0);
    for &from_a in take_from_a {
        if from_a && ai < a.len() {
            s = s.append_input(a[ai]);
            ai += 1;
        } else if bi < b.len() {
            s = s.append_match(b[bi]);
            bi += 1;
        }
    }
    while ai < a.len() {
        s = s.append_input(a[ai]);
        ai += 1;
    }
    while bi < b.len() {
        s = s.append_match(b[bi]);
        bi += 1;
    }
    s
}

#[test]
fn order_of_interleaved_appends_does_not_matter() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xF00D_u64);
    for _ in 0..200 {
        let a = random_sequence(&mut rng, 8);
        let b = random_sequence(&mut rng, 8);
        let w = rng.gen_range(0..=3usize);

        let baseline = build(&a, &b, w).heuristic_final_cost();

        let input_then_match = build_interleaved(&a, &b, w, &[]);
        assert_eq!(input_then_match.heuristic_final_cost(), baseline, "a={a:?} b={b:?} w={w}");

        let match_then_input = build_interleaved(&a, &b, w, &[false]);
        assert_eq!(match_then_input.heuristic_final_cost(), baseline, "a={a:?} b={b:?} w={w}");

        let alternating: Vec<bool> = (0..a.len() + b.len()).map(|i| i % 2 == 0).collect();
        let alternating = build_interleaved(&a, &b, w, &alternating);
        assert_eq!(alternating.heuristic_final_cost(), baseline, "a={a:?} b={b:?} w={w}");
    }
}

#[test]
fn widening_matches_a_fresh_build_at_the_wider_width() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xBEEF_u64);
    for _ in 0..200 {
        let a = random_sequence(&mut rng, 10);
        let b = random_sequence(&mut rng, 10);
        let w = rng.gen_range(0..=3usize);

        let widened = build(&a, &b, w).widen();
        let rebuilt = build(&a, &b, w + 1);
        assert_eq!(
            widened.final_cost(),
            rebuilt.final_cost(),
            "a={a:?} b={b:?} w={w}"
        );
        assert_eq!(widened.w(), rebuilt.w());
    }
}

#[test]
fn heuristic_is_monotone_under_widening() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xC0FFEE_u64);
    for _ in 0..200 {
        let a = random_sequence(&mut rng, 10);
        let b = random_sequence(&mut rng, 10);

        let mut s = build(&a, &b, 0);
        let mut prev = s.heuristic_final_cost();
        for _ in 0..5 {
            s = s.widen();
            let now = s.heuristic_final_cost();
            assert!(now <= prev, "widening worsened the heuristic: a={a:?} b={b:?}");
            prev = now;
        }
    }
}
