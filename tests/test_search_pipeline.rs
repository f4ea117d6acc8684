//! End-to-end tests for the match → rank → snippet pipeline.

use chatsherlock_demo::models::{Conversation, Corpus, Message, Role};
use chatsherlock_demo::repositories::DemoCorpusRepository;
use chatsherlock_demo::search::{build_snippet, highlight, search, Query, ELLIPSIS, MARK_CLOSE, MARK_OPEN};
use chatsherlock_demo::{Persona, SearchError};

fn conversation(id: &str, title: &str, bodies: &[&str]) -> Conversation {
    let messages = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            Message::new(role, *body)
        })
        .collect();
    Conversation::new(id, title, messages)
}

fn corpus(conversations: Vec<Conversation>) -> Corpus {
    Corpus::new("Test Dataset", conversations).unwrap()
}

/// Snippet text with markup and ellipses removed.
fn plain(markup: &str) -> String {
    markup
        .replace(MARK_OPEN, "")
        .replace(MARK_CLOSE, "")
        .replace(ELLIPSIS, "")
}

#[test]
fn test_blank_query_yields_no_results() {
    let corpus = corpus(vec![conversation("1", "Anything", &["at all"])]);
    assert!(search(&corpus, "", 60).unwrap().is_empty());
    assert!(search(&corpus, "   \t ", 60).unwrap().is_empty());
}

#[test]
fn test_zero_matches_is_not_an_error() {
    let corpus = corpus(vec![conversation("1", "Penguins", &["colony counts"])]);
    let results = search(&corpus, "zzz-not-present", 60).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_title_match_snippet_and_count() {
    let corpus = corpus(vec![conversation(
        "1",
        "Penguin Drone Survey Protocol",
        &[
            "Can you outline a drone survey protocol for the colony?",
            "Here is a drone survey protocol with flight altitudes.",
        ],
    )]);

    let results = search(&corpus, "drone", 60).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].match_count, 3);
    assert_eq!(
        results[0].snippet_markup,
        "Penguin <mark>Drone</mark> Survey Protocol"
    );
}

#[test]
fn test_body_match_snippet_comes_from_bodies() {
    let corpus = corpus(vec![conversation(
        "1",
        "Field notes",
        &["We saw a leopard seal near the colony."],
    )]);

    let results = search(&corpus, "leopard", 60).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].snippet_markup,
        "We saw a <mark>leopard</mark> seal near the colony."
    );
}

#[test]
fn test_ranking_by_count_descending() {
    let corpus = corpus(vec![
        conversation("low", "Budget", &["grant grant"]),
        conversation("high", "Grant plan", &["grant grant", "grant grant"]),
    ]);

    let ids: Vec<_> = search(&corpus, "grant", 60)
        .unwrap()
        .into_iter()
        .map(|r| (r.conversation_id, r.match_count))
        .collect();
    assert_eq!(ids, vec![("high".to_string(), 5), ("low".to_string(), 2)]);
}

#[test]
fn test_ranking_is_stable_for_ties() {
    let corpus = corpus(vec![
        conversation("a", "One", &["tie"]),
        conversation("b", "Two", &["tie"]),
        conversation("c", "Three", &["tie tie"]),
        conversation("d", "Four", &["tie"]),
    ]);

    let ids: Vec<_> = search(&corpus, "tie", 60)
        .unwrap()
        .into_iter()
        .map(|r| r.conversation_id)
        .collect();
    assert_eq!(ids, vec!["c", "a", "b", "d"]);
}

#[test]
fn test_case_insensitive_match_preserves_casing() {
    let corpus = corpus(vec![conversation("1", "Notes", &["the penguin colony"])]);

    let results = search(&corpus, "PENGUIN", 60).unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].snippet_markup.contains("<mark>penguin</mark>"));
}

#[test]
fn test_metacharacters_are_literal() {
    let corpus = corpus(vec![
        conversation("cpp", "Languages", &["I write C++ and C daily"]),
        conversation("dot", "Pattern", &["axb is not a.b"]),
    ]);

    let results = search(&corpus, "C++", 60).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].conversation_id, "cpp");
    assert_eq!(results[0].match_count, 1);

    let results = search(&corpus, "a.b", 60).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].match_count, 1);

    assert!(search(&corpus, "(unclosed", 60).unwrap().is_empty());
}

#[test]
fn test_every_result_counts_at_least_one() {
    let repo = DemoCorpusRepository::new();
    for persona in Persona::ALL {
        let corpus = repo.corpus(persona).unwrap();
        for query in ["the", "a", "e", "ing"] {
            for result in search(&corpus, query, 60).unwrap() {
                assert!(result.match_count >= 1);
                assert!(corpus.conversation(&result.conversation_id).is_some());
            }
        }
    }
}

#[test]
fn test_search_is_deterministic() {
    let corpus = DemoCorpusRepository::new()
        .corpus(Persona::Consultant)
        .unwrap();
    let first = search(&corpus, "subsidiary", 60).unwrap();
    let second = search(&corpus, "subsidiary", 60).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_snippet_bounds_and_ellipses() {
    let filler = "x".repeat(200);
    let source = format!("{} needle {}", filler, filler);
    let query = Query::parse("needle").unwrap();

    for radius in [5, 20, 60] {
        let snippet = build_snippet(&source, &query, radius);
        assert!(snippet.starts_with(ELLIPSIS));
        assert!(snippet.ends_with(ELLIPSIS));
        assert!(snippet.contains("<mark>needle</mark>"));
        assert!(plain(&snippet).chars().count() <= 2 * radius + "needle".len());
    }

    let snippet = build_snippet("needle at the start", &query, 60);
    assert!(!snippet.starts_with(ELLIPSIS));
    assert!(!snippet.ends_with(ELLIPSIS));
}

#[test]
fn test_snippet_counts_characters_not_bytes() {
    let source = format!("{}drone{}", "é".repeat(30), "ü".repeat(30));
    let query = Query::parse("drone").unwrap();

    let snippet = build_snippet(&source, &query, 10);
    assert_eq!(
        snippet,
        format!("{}{}<mark>drone</mark>{}{}", ELLIPSIS, "é".repeat(10), "ü".repeat(10), ELLIPSIS)
    );
}

#[test]
fn test_highlight_empty_query_is_identity() {
    let text = "Nothing <b>changes</b> here.";
    assert_eq!(highlight(text, &Query::parse("  ").unwrap()), text);
}

#[test]
fn test_highlight_marks_every_occurrence() {
    let query = Query::parse("reef").unwrap();
    assert_eq!(
        highlight("Reef walk, outer reef, REEF shark", &query),
        "<mark>Reef</mark> walk, outer <mark>reef</mark>, <mark>REEF</mark> shark"
    );
}

#[test]
fn test_overlong_query_rejected() {
    let corpus = corpus(vec![conversation("1", "Title", &["body"])]);
    let query = "q".repeat(501);
    assert!(matches!(
        search(&corpus, &query, 60),
        Err(SearchError::InvalidQuery(_))
    ));
}
