//! Property tests for exact retraction.
//!
//! A runner that consumes, retracts, and re-consumes must be
//! indistinguishable from one that saw the final input directly.

use std::sync::Arc;

use proptest::prelude::*;
use wicker::engine::dsl::{choice, eq, one_more, seq};
use wicker::engine::{Regex, Runner};
use wicker::foundation::Value;

fn pattern() -> Arc<Regex> {
    // One or more of: "a", or the pair "b" "c".
    one_more(choice([eq("a"), seq(["b", "c"])]))
}

fn tokens(texts: &[&str]) -> Vec<Value> {
    texts.iter().map(|&s| Value::from(s)).collect()
}

/// Every match span visible anywhere in the runner's history.
fn all_spans(runner: &Runner) -> Vec<(usize, usize)> {
    (0..=runner.pos())
        .flat_map(|p| {
            runner
                .matches_at(p)
                .iter()
                .map(|m| (m.start(), m.end()))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn token_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["a", "b", "c"])
}

proptest! {
    #[test]
    fn retraction_matches_a_fresh_run(
        prefix in prop::collection::vec(token_strategy(), 0..12),
        edit in prop::collection::vec(token_strategy(), 0..6),
        cut in 0usize..8,
    ) {
        let regex = pattern();
        let cut = cut.min(prefix.len());

        let mut incremental = Runner::new();
        incremental.add(&regex);
        incremental.advance_all(tokens(&prefix));
        incremental.clear_last(cut).unwrap();
        incremental.advance_all(tokens(&edit));

        let mut fresh = Runner::new();
        fresh.add(&regex);
        fresh.advance_all(tokens(&prefix[..prefix.len() - cut]));
        fresh.advance_all(tokens(&edit));

        prop_assert_eq!(incremental.pos(), fresh.pos());
        prop_assert_eq!(incremental.input(), fresh.input());
        prop_assert_eq!(all_spans(&incremental), all_spans(&fresh));
    }

    #[test]
    fn retraction_preserves_replayed_values(
        prefix in prop::collection::vec(token_strategy(), 1..10),
        cut in 1usize..6,
    ) {
        let regex = pattern();
        let cut = cut.min(prefix.len());

        let mut incremental = Runner::new();
        incremental.add(&regex);
        incremental.advance_all(tokens(&prefix));
        incremental.clear_last(cut).unwrap();
        incremental.advance_all(tokens(&prefix[prefix.len() - cut..]));

        let mut fresh = Runner::new();
        fresh.add(&regex);
        fresh.advance_all(tokens(&prefix));

        let lhs = incremental.matches().first_tree().map(|t| t.into_value());
        let rhs = fresh.matches().first_tree().map(|t| t.into_value());
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn full_retraction_resets_cleanly(
        items in prop::collection::vec(token_strategy(), 0..10),
    ) {
        let regex = pattern();

        let mut runner = Runner::new();
        runner.add(&regex);
        runner.advance_all(tokens(&items));
        runner.clear_last(runner.pos()).unwrap();

        prop_assert_eq!(runner.pos(), 0);
        prop_assert!(runner.input().is_empty());
        // The pre-input registration survives a full rewind.
        runner.advance(Value::from("a"));
        prop_assert!(!runner.matches().is_empty());
    }
}
