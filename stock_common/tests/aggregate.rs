use stock_common::error::TimestampKind;
use stock_common::{AggregateResult, LastUpdate, Quote, TopList, aggregate};

fn a() -> Quote {
    Quote::new("A", "2020-02-03T00:00:00", 1.0)
}
fn b() -> Quote {
    Quote::new("B", "2020-02-02T00:00:00", 0.5)
}
fn c() -> Quote {
    Quote::new("C", "2020-02-03T00:00:00", 0.0)
}
fn e() -> Quote {
    Quote::new("E", "2020-02-03T00:00:00", -0.5)
}

fn more(a: &f64, b: &f64) -> bool {
    a > b
}

fn history() -> Vec<LastUpdate> {
    ["A", "B", "D", "E"]
        .iter()
        .map(|code| LastUpdate::new(code, "2020-02-02 00:00:00"))
        .collect()
}

#[test]
fn empty_history_returns_all_quotes_as_new_and_active() {
    let actual = aggregate(&[a(), b(), c()], &[], 5).unwrap();

    assert_eq!(actual.active, vec![a(), b(), c()]);
    assert_eq!(actual.new, vec![a(), b(), c()]);
    assert!(actual.stale.is_empty());
}

#[test]
fn empty_history_still_ranks_active_quotes() {
    let actual = aggregate(&[a(), b(), c(), e()], &[], 5).unwrap();

    assert_eq!(actual.top_gainers, vec!["A", "B"]);
    assert_eq!(actual.top_losers, vec!["E"]);
}

#[test]
fn new_active_and_stale_quotes_are_split_and_ranked() {
    let expected = AggregateResult {
        active: vec![a(), c(), e()],
        new: vec![c()],
        stale: vec![b()],
        top_gainers: vec!["A".to_string()],
        top_losers: vec!["E".to_string()],
    };

    let actual = aggregate(&[a(), b(), c(), e()], &history(), 5).unwrap();

    assert_eq!(actual, expected);
}

#[test]
fn stale_quotes_are_never_ranked() {
    let stale_gainer = Quote::new("B", "2020-02-01T00:00:00", 9.0);

    let actual = aggregate(&[stale_gainer, a()], &history(), 5).unwrap();

    assert_eq!(actual.top_gainers, vec!["A"]);
}

#[test]
fn rank_lists_are_bounded_and_disjoint() {
    let quotes: Vec<Quote> = (0..20)
        .map(|i| Quote::new(&format!("S{i}"), "2020-02-03T00:00:00", (i as f64) - 10.0))
        .collect();

    for k in [0, 1, 3, 25] {
        let actual = aggregate(&quotes, &history(), k).unwrap();
        assert!(actual.top_gainers.len() <= k);
        assert!(actual.top_losers.len() <= k);
        assert!(!actual.top_gainers.contains(&"S10".to_string()));
        assert!(
            actual
                .top_gainers
                .iter()
                .all(|code| !actual.top_losers.contains(code))
        );
    }

    let actual = aggregate(&quotes, &history(), 3).unwrap();
    assert_eq!(actual.top_gainers, vec!["S19", "S18", "S17"]);
    assert_eq!(actual.top_losers, vec!["S0", "S1", "S2"]);
}

#[test]
fn classification_error_is_propagated_with_partial_result() {
    let broken = Quote::new("E", "2020-02-03", -0.5);

    let err = aggregate(&[a(), b(), c(), broken], &history(), 5).unwrap_err();

    assert_eq!(err.partial.active, vec![a(), c()]);
    assert_eq!(err.partial.stale, vec![b()]);
    assert_eq!(err.partial.new, vec![c()]);
    assert_eq!(err.source.code, "E");
    assert_eq!(err.source.kind, TimestampKind::Quote);
}

#[test]
fn repeated_runs_are_deterministic() {
    let quotes = vec![a(), Quote::new("F", "2020-02-03T00:00:00", 1.0), e(), c()];

    let first = aggregate(&quotes, &history(), 1).unwrap();
    let second = aggregate(&quotes, &history(), 1).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.top_gainers, vec!["A"]);
}

#[test]
fn top_list_evicts_the_worst_on_overflow() {
    let mut tl: TopList<f64> = TopList::new(5, more);
    for gain in [3.0, 2.7, 2.0, 1.3, 1.0, 1.5] {
        tl.add(gain);
    }
    assert_eq!(tl.elements(), &[3.0, 2.7, 2.0, 1.5, 1.3]);
}

#[test]
fn top_list_with_zero_capacity_stays_empty() {
    let mut tl: TopList<f64> = TopList::new(0, more);
    assert!(!tl.add(1.0));
    assert!(tl.elements().is_empty());
}
