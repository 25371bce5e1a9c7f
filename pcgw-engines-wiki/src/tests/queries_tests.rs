use std::cell::RefCell;
use std::collections::VecDeque;

use super::*;

/// Hands out canned bodies in order and remembers each request.
#[derive(Default)]
struct FakeTransport {
    bodies: RefCell<VecDeque<String>>,
    requests: RefCell<Vec<(Endpoint, Vec<(String, String)>)>>,
}

impl FakeTransport {
    fn with_bodies(bodies: &[&str]) -> Self {
        Self {
            bodies: RefCell::new(bodies.iter().map(|b| b.to_string()).collect()),
            ..Self::default()
        }
    }

    fn param(&self, request: usize, key: &str) -> Option<String> {
        self.requests.borrow()[request]
            .1
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl Transport for FakeTransport {
    fn get_text(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<String, WikiError> {
        self.requests.borrow_mut().push((
            endpoint,
            params.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));
        Ok(self.bodies.borrow_mut().pop_front().unwrap_or_default())
    }
}

// -- Engine listing --

const ENGINES_PAGE: &str = r#"{
    "batchcomplete": "",
    "query": {"pages": {
        "300": {"pageid": 300, "ns": 3000, "title": "Engine:Unity"},
        "129401": {"pageid": 129401, "ns": 3000, "title": "Engine:Broken"},
        "12": {"pageid": 12, "ns": 3000, "title": "Engine:Unreal Engine 3"}
    }}
}"#;

#[test]
fn test_strip_engine_prefix() {
    assert_eq!(strip_engine_prefix("Engine:Unity"), "Unity");
    assert_eq!(strip_engine_prefix("Unity"), "Unity");
    // a prefix strip, not a character-set strip
    assert_eq!(strip_engine_prefix("Engine:Enigma"), "Enigma");
    assert_eq!(strip_engine_prefix("Engine:Engine:X"), "Engine:X");
}

#[test]
fn test_engine_listing_keeps_api_order() {
    let transport = FakeTransport::with_bodies(&[ENGINES_PAGE]);
    let engines = fetch_engines(&transport, 500).unwrap();
    let titles: Vec<&str> = engines.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Unity", "Unreal Engine 3"]);
    assert_eq!(engines[0].id, "300");
}

#[test]
fn test_denylisted_engine_never_listed() {
    let transport = FakeTransport::with_bodies(&[ENGINES_PAGE]);
    let engines = fetch_engines(&transport, 500).unwrap();
    assert!(engines.iter().all(|e| e.id != "129401"));
    assert!(engines.iter().all(|e| e.title != "Broken"));
}

#[test]
fn test_denylist_does_not_shorten_pages() {
    // Two full pages of 2; the denied record sits in the first one.
    let page1 = r#"{"continue": {"gcmcontinue": "page|ABC|12", "continue": "gcmcontinue||"},
        "query": {"pages": {
            "129401": {"pageid": 129401, "title": "Engine:Broken"},
            "1": {"pageid": 1, "title": "Engine:A"}
        }}}"#;
    let page2 = r#"{"query": {"pages": {
            "2": {"pageid": 2, "title": "Engine:B"},
            "3": {"pageid": 3, "title": "Engine:C"}
        }}}"#;
    let transport = FakeTransport::with_bodies(&[page1, page2]);
    let engines = fetch_engines(&transport, 2).unwrap();
    let titles: Vec<&str> = engines.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);

    // The continuation token was sent back on the second request.
    assert_eq!(transport.param(1, "gcmcontinue").as_deref(), Some("page|ABC|12"));
    assert_eq!(transport.param(1, "continue").as_deref(), Some("gcmcontinue||"));
    // Third page requested without a token comes back empty without a request.
    assert_eq!(transport.requests.borrow().len(), 2);
}

#[test]
fn test_engine_listing_request_params() {
    let transport = FakeTransport::with_bodies(&[ENGINES_PAGE]);
    fetch_engines(&transport, 500).unwrap();
    let requests = transport.requests.borrow();
    assert_eq!(requests[0].0, Endpoint::Api);
    drop(requests);
    assert_eq!(transport.param(0, "generator").as_deref(), Some("categorymembers"));
    assert_eq!(transport.param(0, "gcmtitle").as_deref(), Some("Category:Engines"));
    assert_eq!(transport.param(0, "gcmlimit").as_deref(), Some("500"));
}

#[test]
fn test_empty_category() {
    let transport = FakeTransport::with_bodies(&[r#"{"batchcomplete": ""}"#]);
    assert!(fetch_engines(&transport, 500).unwrap().is_empty());
}

#[test]
fn test_engine_listing_empty_body() {
    let transport = FakeTransport::with_bodies(&[""]);
    assert!(fetch_engines(&transport, 500).unwrap().is_empty());
    assert_eq!(transport.requests.borrow().len(), 1);
}

#[test]
fn test_engine_listing_malformed_body_is_error() {
    let transport = FakeTransport::with_bodies(&["<html>Service unavailable</html>"]);
    match fetch_engines(&transport, 500) {
        Err(WikiError::MalformedResponse { query, excerpt, .. }) => {
            assert_eq!(query, "engine listing");
            assert!(excerpt.starts_with("<html>"));
        }
        other => panic!("expected malformed response, got {other:?}"),
    }
}

#[test]
fn test_api_error_payload() {
    let transport = FakeTransport::with_bodies(&[
        r#"{"error": {"code": "ratelimited", "info": "Slow down"}}"#,
    ]);
    match fetch_engines(&transport, 500) {
        Err(WikiError::Api { code, info }) => {
            assert_eq!(code, "ratelimited");
            assert_eq!(info, "Slow down");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

// -- Joined games --

#[test]
fn test_joined_games_fields() {
    let body = r#"{"cargoquery": [
        {"title": {"Page": "Foo", "Engine": "Engine:Unreal Engine 3", "Build": "3.5", "Released": "2018-05-04;2018-05-04;2018-05-04"}},
        {"title": {"Page": "Bar", "Engine": "Engine:Godot", "Build": "", "Released": ""}},
        {"title": {"Page": "Baz", "Engine": "Engine:Unity", "Build": null, "Released": null}}
    ]}"#;
    let transport = FakeTransport::with_bodies(&[body]);
    let games = fetch_games_joined(&transport, 500).unwrap();
    assert_eq!(games.len(), 3);

    assert_eq!(games[0], Game::new("Foo", "Unreal Engine 3", Some("3.5".to_string()), "2018"));
    assert_eq!(games[1], Game::new("Bar", "Godot", None, ""));
    assert_eq!(games[2], Game::new("Baz", "Unity", None, ""));
}

#[test]
fn test_joined_games_paging() {
    let full = r#"{"cargoquery": [
        {"title": {"Page": "A", "Engine": "Engine:X", "Build": "", "Released": "2001-01-01"}},
        {"title": {"Page": "B", "Engine": "Engine:X", "Build": "", "Released": "2002-01-01"}}
    ]}"#;
    let short = r#"{"cargoquery": [
        {"title": {"Page": "C", "Engine": "Engine:Y", "Build": "", "Released": "2003-01-01"}}
    ]}"#;
    let transport = FakeTransport::with_bodies(&[full, short]);
    let games = fetch_games_joined(&transport, 2).unwrap();
    let titles: Vec<&str> = games.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert_eq!(transport.param(0, "offset").as_deref(), Some("0"));
    assert_eq!(transport.param(1, "offset").as_deref(), Some("2"));
    assert_eq!(transport.param(1, "limit").as_deref(), Some("2"));
}

#[test]
fn test_joined_games_malformed_body_is_error() {
    let transport = FakeTransport::with_bodies(&["<html>Service unavailable</html>"]);
    let err = fetch_games_joined(&transport, 500).unwrap_err();
    match err {
        WikiError::MalformedResponse { query, excerpt, .. } => {
            assert_eq!(query, "joined game listing");
            assert!(excerpt.starts_with("<html>"));
        }
        other => panic!("expected malformed response, got {other:?}"),
    }
}

#[test]
fn test_joined_games_wrong_shape_is_error() {
    let transport = FakeTransport::with_bodies(&[r#"{"something": "else"}"#]);
    assert!(matches!(
        fetch_games_joined(&transport, 500),
        Err(WikiError::MalformedResponse { .. })
    ));
}

// -- Per-engine games --

const ASK_PAGE: &str = r#"{
    "printrequests": [],
    "results": {
        "Half-Life 2": {
            "printouts": {"Release date": [{"timestamp": "1100563200", "raw": "1/2004/11/16"}]},
            "fulltext": "Half-Life 2",
            "fullurl": "https://www.pcgamingwiki.com/wiki/Half-Life_2"
        },
        "Portal": {
            "printouts": {"Release date": []},
            "fulltext": "Portal"
        }
    },
    "rows": 2
}"#;

#[test]
fn test_games_by_engine() {
    let transport = FakeTransport::with_bodies(&[ASK_PAGE]);
    let games = fetch_games_for_engine(&transport, "Source", 500).unwrap();
    assert_eq!(
        games,
        vec![
            Game::new("Half-Life 2", "Source", None, "2004"),
            Game::new("Portal", "Source", None, ""),
        ]
    );

    assert_eq!(transport.requests.borrow()[0].0, Endpoint::Index);
    assert_eq!(
        transport.param(0, "q").as_deref(),
        Some("[[Category:Games]] [[Uses engine::Engine:Source]]")
    );
    assert_eq!(transport.param(0, "title").as_deref(), Some("Special:Ask"));
}

#[test]
fn test_games_by_engine_empty_body() {
    let transport = FakeTransport::with_bodies(&[""]);
    assert!(fetch_games_for_engine(&transport, "Nothing", 500).unwrap().is_empty());
    assert_eq!(transport.requests.borrow().len(), 1);
}

#[test]
fn test_games_by_engine_empty_array_results() {
    let transport = FakeTransport::with_bodies(&[r#"{"printrequests": [], "results": [], "rows": 0}"#]);
    assert!(fetch_games_for_engine(&transport, "Nothing", 500).unwrap().is_empty());
}

#[test]
fn test_games_by_engine_non_empty_array_results_is_error() {
    let transport = FakeTransport::with_bodies(&[
        r#"{"results": [{"fulltext": "Half-Life 2", "printouts": {}}]}"#,
    ]);
    match fetch_games_for_engine(&transport, "Source", 500) {
        Err(WikiError::MalformedResponse { query, message, .. }) => {
            assert_eq!(query, "per-engine game listing");
            assert!(message.contains("non-empty array"));
        }
        other => panic!("expected malformed response, got {other:?}"),
    }
}

#[test]
fn test_games_by_engine_truncated_json_is_error() {
    let transport = FakeTransport::with_bodies(&[r#"{"results": {"Half-Life 2": {"fulltext""#]);
    assert!(matches!(
        fetch_games_for_engine(&transport, "Source", 500),
        Err(WikiError::MalformedResponse { .. })
    ));
}

#[test]
fn test_per_engine_reports_each_engine() {
    let engines = vec![
        Engine {
            id: "1".to_string(),
            title: "Source".to_string(),
        },
        Engine {
            id: "2".to_string(),
            title: "Nothing".to_string(),
        },
    ];
    let transport = FakeTransport::with_bodies(&[ASK_PAGE, ""]);
    let mut seen = Vec::new();
    let games = fetch_games_per_engine(&transport, &engines, 500, |engine, count| {
        seen.push((engine.title.clone(), count));
    })
    .unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(
        seen,
        vec![("Source".to_string(), 2), ("Nothing".to_string(), 0)]
    );
}

#[test]
fn test_game_query_parse() {
    assert_eq!("joined".parse::<GameQuery>().unwrap(), GameQuery::Joined);
    assert_eq!("Per-Engine".parse::<GameQuery>().unwrap(), GameQuery::PerEngine);
    assert!("both".parse::<GameQuery>().is_err());
    assert_eq!(GameQuery::default(), GameQuery::Joined);
}
