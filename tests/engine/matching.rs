//! Integration tests for whole-input matching.
//!
//! Exercises every combinator through the whole-input drivers and checks
//! the replayed match values.

use wicker::engine::dsl::{choice, eq, maybe, of_type, one_more, pred, seq, zero_more};
use wicker::engine::{match_exactly, matches_anywhere, matches_at_end, matches_from_start};
use wicker::foundation::{Tree, Type, Value};

fn words(texts: &[&str]) -> Vec<Value> {
    texts.iter().map(|&s| Value::from(s)).collect()
}

fn exact_tree(regex: &std::sync::Arc<wicker::engine::Regex>, texts: &[&str]) -> Option<Tree> {
    match_exactly(regex, words(texts))
        .first_tree()
        .map(wicker::engine::MatchTree::into_value)
}

// =============================================================================
// Leaves
// =============================================================================

#[test]
fn equality_leaf() {
    let r = eq("a");
    assert_eq!(exact_tree(&r, &["a"]), Some(Tree::leaf("a")));
    assert_eq!(exact_tree(&r, &["b"]), None);
    assert_eq!(exact_tree(&r, &[]), None);
    assert_eq!(exact_tree(&r, &["a", "a"]), None);
}

#[test]
fn predicate_leaf() {
    let short = pred("short", |v| v.as_str().is_some_and(|s| s.len() <= 2));
    assert_eq!(exact_tree(&short, &["ab"]), Some(Tree::leaf("ab")));
    assert_eq!(exact_tree(&short, &["abc"]), None);
}

#[test]
fn typed_leaf() {
    let int = of_type(Type::Int);
    assert!(!match_exactly(&int, [Value::Int(5)]).is_empty());
    assert!(match_exactly(&int, [Value::Float(5.0)]).is_empty());
    assert!(match_exactly(&int, [Value::from("5")]).is_empty());
}

// =============================================================================
// Combinators
// =============================================================================

#[test]
fn seq_builds_a_list() {
    let r = seq(["a", "b", "c"]);
    assert_eq!(
        exact_tree(&r, &["a", "b", "c"]),
        Some(Tree::list([
            Tree::leaf("a"),
            Tree::leaf("b"),
            Tree::leaf("c")
        ]))
    );
    assert_eq!(exact_tree(&r, &["a", "b"]), None);
    assert_eq!(exact_tree(&r, &["a", "x", "c"]), None);
    assert_eq!(exact_tree(&r, &["x", "x", "x"]), None);
}

#[test]
fn choice_records_the_alternative() {
    let r = choice(["a", "b"]);
    assert_eq!(exact_tree(&r, &["a"]), Some(Tree::branch(0, Tree::leaf("a"))));
    assert_eq!(exact_tree(&r, &["b"]), Some(Tree::branch(1, Tree::leaf("b"))));
    assert_eq!(exact_tree(&r, &["c"]), None);
    assert_eq!(exact_tree(&r, &[]), None);
}

#[test]
fn maybe_yields_value_or_absent() {
    let r = maybe(eq("a"));
    assert_eq!(exact_tree(&r, &["a"]), Some(Tree::leaf("a")));
    assert_eq!(exact_tree(&r, &[]), Some(Tree::Absent));
    assert_eq!(exact_tree(&r, &["b"]), None);
}

#[test]
fn zero_more_yields_a_possibly_empty_list() {
    let r = zero_more(eq("a"));
    assert_eq!(exact_tree(&r, &[]), Some(Tree::list([])));
    assert_eq!(
        exact_tree(&r, &["a", "a"]),
        Some(Tree::list([Tree::leaf("a"), Tree::leaf("a")]))
    );
    assert_eq!(exact_tree(&r, &["a", "b"]), None);
}

#[test]
fn one_more_requires_at_least_one() {
    let r = one_more(eq("a"));
    assert_eq!(exact_tree(&r, &[]), None);
    assert_eq!(exact_tree(&r, &["a"]), Some(Tree::list([Tree::leaf("a")])));
    assert_eq!(
        exact_tree(&r, &["a", "a", "a"]),
        Some(Tree::list([
            Tree::leaf("a"),
            Tree::leaf("a"),
            Tree::leaf("a")
        ]))
    );
    assert_eq!(exact_tree(&r, &["a", "b"]), None);
}

#[test]
fn nested_combinators() {
    // (a | (b c))* d?
    let r = seq([
        zero_more(choice([eq("a"), seq(["b", "c"])])),
        maybe(eq("d")),
    ]);
    assert_eq!(
        exact_tree(&r, &["a", "b", "c", "d"]),
        Some(Tree::list([
            Tree::list([
                Tree::branch(0, Tree::leaf("a")),
                Tree::branch(
                    1,
                    Tree::list([Tree::leaf("b"), Tree::leaf("c")])
                ),
            ]),
            Tree::leaf("d"),
        ]))
    );
    assert_eq!(
        exact_tree(&r, &[]),
        Some(Tree::list([Tree::list([]), Tree::Absent]))
    );
}

// =============================================================================
// Anchoring Modes
// =============================================================================

#[test]
fn from_start_accepts_prefixes() {
    let r = one_more(eq("a"));
    let set = matches_from_start(&r, words(&["a", "a", "b"]));
    let ends: Vec<usize> = set.iter().map(wicker::engine::Match::end).collect();
    assert_eq!(ends, vec![1, 2]);
}

#[test]
fn at_end_accepts_suffixes() {
    let r = one_more(eq("a"));
    let set = matches_at_end(&r, words(&["b", "a", "a"]));
    let starts: Vec<usize> = set.iter().map(wicker::engine::Match::start).collect();
    assert_eq!(starts, vec![1, 2]);
}

#[test]
fn anywhere_accepts_infixes() {
    let r = seq(["a", "b"]);
    let set = matches_anywhere(&r, words(&["x", "a", "b", "a", "b"]));
    let spans: Vec<(usize, usize)> = set.iter().map(|m| (m.start(), m.end())).collect();
    assert_eq!(spans, vec![(1, 3), (3, 5)]);
}
