use std::sync::Arc;
use std::time::Duration;

use bricky_client::test_support::ScriptedTransport;
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

use super::*;
use crate::testing::{FakeSearch, client};

fn setup() -> (Arc<ScriptedTransport>, Arc<FakeSearch>, Autocomplete<Arc<ScriptedTransport>>, Disposer) {
	let transport = Arc::new(ScriptedTransport::new());
	let view = Arc::new(FakeSearch::default());
	let (autocomplete, disposer) = Autocomplete::setup(client(&transport), view.clone());
	(transport, view, autocomplete, disposer)
}

#[test]
fn test_slugify() {
	assert_eq!(slugify("Star Wars"), "star-wars");
	assert_eq!(slugify("  Harry Potter & Friends "), "harry-potter-friends");
	assert_eq!(slugify("Technic -- Advanced"), "technic-advanced");
	assert_eq!(slugify("Ninjago!"), "ninjago");
	assert_eq!(category_url("City Sets"), "/?category=city-sets");
}

#[test]
fn test_sections_put_categories_first() {
	let suggestions = SearchSuggestions {
		products: vec!["Millennium Falcon".into()],
		categories: vec!["Star Wars".into()],
	};
	let grouped = sections(&suggestions);

	assert_eq!(
		grouped.iter().map(|s| s.kind.title()).collect::<Vec<_>>(),
		vec!["Categories", "Products"]
	);
	assert!(sections(&SearchSuggestions::default()).is_empty());
}

#[tokio::test]
async fn test_short_query_closes_without_request() {
	let (transport, view, autocomplete, _disposer) = setup();

	assert_eq!(autocomplete.input(" a ").await, Lookup::TooShort);
	assert_eq!(transport.request_count(), 0);
	assert_eq!(view.shown(), None);
}

#[tokio::test]
async fn test_suggestions_are_rendered() {
	let (transport, view, autocomplete, _disposer) = setup();
	transport.push_json(
		200,
		r#"{"suggestions": {"products": ["Castle", "Castle Guard"], "categories": ["Castles"]}}"#,
	);

	assert_eq!(autocomplete.input(" cas").await, Lookup::Shown(3));

	let request = &transport.requests()[0];
	assert!(request.query.contains(&("q".to_string(), "cas".to_string())));
	let shown = view.shown().unwrap();
	assert_eq!(shown[0].kind, SuggestionKind::Category);
	assert_eq!(shown[1].items, vec!["Castle".to_string(), "Castle Guard".into()]);
}

#[tokio::test]
async fn test_empty_and_failed_lookups_keep_dropdown_closed() {
	let (transport, view, autocomplete, _disposer) = setup();
	transport
		.push_json(200, r#"{"products": [], "categories": []}"#)
		.push_json(500, "oops");

	assert_eq!(autocomplete.input("zzz").await, Lookup::Empty);
	assert_eq!(autocomplete.input("zzzz").await, Lookup::Failed);
	assert_eq!(view.shown(), None);
}

#[tokio::test]
async fn test_slow_response_for_older_prefix_is_dropped() {
	let (transport, view, autocomplete, _disposer) = setup();
	let slow = Arc::new(Notify::new());
	transport
		.push_gated(slow.clone(), 200, r#"{"products": ["Cat"], "categories": []}"#)
		.push_json(200, r#"{"products": ["Castle"], "categories": []}"#);

	let first = autocomplete.input("ca");
	let second = async {
		tokio::task::yield_now().await;
		let lookup = autocomplete.input("cas").await;
		slow.notify_one();
		lookup
	};
	let (first, second) = tokio::join!(first, second);

	assert_eq!((first, second), (Lookup::Stale, Lookup::Shown(1)));
	assert_eq!(view.shown().unwrap()[0].items, vec!["Castle".to_string()]);
}

#[tokio::test]
async fn test_choosing_fills_query_and_submits() {
	let (_transport, view, autocomplete, _disposer) = setup();

	autocomplete.choose("Castle Guard");

	assert_eq!(view.query(), "Castle Guard");
	assert_eq!(view.submits(), 1);
	assert_eq!(view.shown(), None);
}

#[tokio::test(start_paused = true)]
async fn test_blur_closes_after_delay() {
	let (transport, view, autocomplete, _disposer) = setup();
	transport.push_json(200, r#"{"products": ["Castle"], "categories": []}"#);
	autocomplete.input("castle").await;

	autocomplete.blur();
	assert!(view.shown().is_some());
	tokio::time::sleep(Duration::from_millis(250)).await;

	assert_eq!(view.shown(), None);
}
