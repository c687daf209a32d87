//! Integration tests for match selection policies.
//!
//! The engine reports every accepting configuration; these tests pin down
//! how the first/longest/shortest policies choose among them.

use wicker::engine::dsl::{eq, one_more, seq, zero_more};
use wicker::engine::{Match, Regex, Runner, match_exactly, matches_from_start};
use wicker::foundation::{Tree, Value};

fn words(texts: &[&str]) -> Vec<Value> {
    texts.iter().map(|&s| Value::from(s)).collect()
}

// =============================================================================
// Stream Policies (shared end position)
// =============================================================================

#[test]
fn stream_longest_prefers_the_earliest_anchor() {
    let r = one_more(eq("a"));
    let mut runner = Runner::new();
    runner.add(&r);
    runner.advance(Value::from("a"));
    runner.add(&r);
    runner.advance(Value::from("a"));

    let stream = runner.matches();
    assert_eq!(stream.longest().unwrap().start(), 0);
    assert_eq!(stream.shortest().unwrap().start(), 1);
}

#[test]
fn stream_policies_agree_on_a_single_match() {
    let r = seq(["a", "b"]);
    let mut runner = Runner::new();
    runner.add(&r);
    runner.advance_all(words(&["a", "b"]));

    let stream = runner.matches();
    let spans: Vec<usize> = [stream.first(), stream.longest(), stream.shortest()]
        .into_iter()
        .map(|m| m.unwrap().span())
        .collect();
    assert_eq!(spans, vec![2, 2, 2]);
}

#[test]
fn empty_stream_yields_no_selection() {
    let runner = Runner::new();
    let stream = runner.matches();
    assert!(stream.is_empty());
    assert!(stream.first().is_none());
    assert!(stream.longest().is_none());
    assert!(stream.shortest().is_none());
    assert!(stream.longest_tree().is_none());
}

// =============================================================================
// Set Policies (spans compared across positions)
// =============================================================================

#[test]
fn set_longest_spans_positions() {
    let r = zero_more(eq("a"));
    let set = matches_from_start(&r, words(&["a", "a"]));
    assert_eq!(set.longest().unwrap().span(), 2);
    assert_eq!(set.shortest().unwrap().span(), 0);
    assert_eq!(set.first().unwrap().span(), 0);
}

#[test]
fn set_trees_pair_matches_with_values() {
    let r = one_more(eq("a"));
    let set = matches_from_start(&r, words(&["a", "a"]));
    for tree in set.trees() {
        let n = tree.origin().span();
        assert_eq!(
            tree.value(),
            &Tree::list(std::iter::repeat_n(Tree::leaf("a"), n))
        );
    }
}

#[test]
fn ambiguity_reports_every_configuration() {
    // "aa" splits as a|aa anchored at 0 and 1.
    let r = one_more(eq("a"));
    let set = match_exactly(&r, words(&["a", "a"]));
    // Exact matching anchors once, so only the full-span match remains.
    assert_eq!(set.len(), 1);

    let both: Vec<(usize, usize)> = matches_from_start(&r, words(&["a", "a"]))
        .iter()
        .map(|m| (m.start(), m.end()))
        .collect();
    assert_eq!(both, vec![(0, 1), (0, 2)]);
}

#[test]
fn match_metadata_is_stable_across_replay() {
    let r = seq(["a", "b"]);
    let set = match_exactly(&r, words(&["a", "b"]));
    let m: &Match = set.first().unwrap();
    let tree = set.runner().tree(m);
    assert!(Regex::same(tree.origin().regex(), &r));
    assert_eq!(tree.origin().start(), m.start());
    assert_eq!(tree.origin().end(), m.end());
}
