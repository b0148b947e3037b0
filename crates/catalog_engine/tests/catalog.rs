use std::sync::{Arc, Once};

use catalog_core::{
    update, AppState, BookSummary, CatalogEndpoints, DetailState, Effect, Msg, QueryBuilder,
    ViewState, SEARCH_FAILED_MESSAGE, SUBJECT_FAILED_MESSAGE, UNKNOWN_AUTHOR,
};
use catalog_engine::{
    DetailFetcher, EffectExecutor, EngineConfig, FailureKind, FetchError, FetchSettings,
    ListingFetcher, ReqwestHttpClient,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn http() -> Arc<ReqwestHttpClient> {
    Arc::new(ReqwestHttpClient::new(FetchSettings::default()).expect("client builds"))
}

fn queries(server: &MockServer) -> QueryBuilder {
    QueryBuilder::new(CatalogEndpoints::with_base(&server.uri()).unwrap())
}

fn executor(server: &MockServer) -> EffectExecutor {
    let config = EngineConfig::with_base(&server.uri()).unwrap();
    EffectExecutor::from_config(&config).expect("executor builds")
}

/// Runs every effect through the executor and feeds the resolutions back into `update`.
async fn settle(
    executor: &EffectExecutor,
    mut state: AppState,
    effects: Vec<Effect>,
) -> AppState {
    for effect in effects {
        let msg = executor.execute(effect).await;
        let (next, follow_up) = update(state, msg);
        assert!(follow_up.is_empty());
        state = next;
    }
    state
}

fn dune_doc() -> serde_json::Value {
    json!({
        "title": "Dune",
        "author_name": ["Frank Herbert"],
        "key": "/works/OL123W",
        "cover_i": 999,
        "first_publish_year": 1965
    })
}

#[tokio::test]
async fn title_search_loads_normalized_books() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("title", "Dune"))
        .and(query_param("limit", "10"))
        .and(query_param_is_missing("author"))
        .and(query_param_is_missing("subject"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"docs": [dune_doc()]})))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::with_endpoints(CatalogEndpoints::with_base(&server.uri()).unwrap());
    let (state, _) = update(state, Msg::TitleChanged("Dune".to_string()));
    let (state, effects) = update(state, Msg::SearchSubmitted);
    assert_eq!(state.search().current_state(), &ViewState::Loading);

    let state = settle(&executor(&server), state, effects).await;

    assert_eq!(
        state.search().current_state(),
        &ViewState::Loaded(vec![BookSummary {
            id: Some("OL123W".to_string()),
            title: "Dune".to_string(),
            author_names: vec!["Frank Herbert".to_string()],
            cover_image_id: Some("999".to_string()),
            first_publish_year: Some(1965),
        }])
    );
}

#[tokio::test]
async fn empty_docs_load_an_empty_list() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"docs": []})))
        .mount(&server)
        .await;

    let state = AppState::with_endpoints(CatalogEndpoints::with_base(&server.uri()).unwrap());
    let (state, _) = update(state, Msg::TitleChanged("Dune".to_string()));
    let (state, effects) = update(state, Msg::SearchSubmitted);
    let state = settle(&executor(&server), state, effects).await;

    assert_eq!(state.search().current_state(), &ViewState::Loaded(Vec::new()));
}

#[tokio::test]
async fn server_error_fails_the_search() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let state = AppState::with_endpoints(CatalogEndpoints::with_base(&server.uri()).unwrap());
    let (state, _) = update(state, Msg::AuthorChanged("Herbert".to_string()));
    let (state, effects) = update(state, Msg::SearchSubmitted);
    let state = settle(&executor(&server), state, effects).await;

    assert_eq!(
        state.search().current_state(),
        &ViewState::Failed(SEARCH_FAILED_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn malformed_listing_bodies_become_empty_lists() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/subjects/fiction.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "fiction"})))
        .mount(&server)
        .await;

    let listing = ListingFetcher::new(http());
    let builder = queries(&server);
    let search_url = builder.build(&catalog_core::SearchCriteria::new().with_title("x"));

    assert_eq!(listing.fetch_search(&search_url).await, Ok(Vec::new()));
    assert_eq!(
        listing
            .fetch_subject(&builder.subject_listing("fiction"))
            .await,
        Ok(Vec::new())
    );
}

#[tokio::test]
async fn subject_listing_normalizes_works() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/subjects/fantasy.json"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "fantasy",
            "works": [
                {
                    "key": "/works/OL27448W",
                    "title": "The Lord of the Rings",
                    "authors": [{"key": "/authors/OL26320A", "name": "J.R.R. Tolkien"}],
                    "cover_id": 14625765,
                    "first_publish_year": 1954
                },
                {"title": "Anonymous Tales"}
            ]
        })))
        .mount(&server)
        .await;

    let state = AppState::with_endpoints(CatalogEndpoints::with_base(&server.uri()).unwrap());
    let (state, effects) = update(state, Msg::SubjectSelected("fantasy".to_string()));
    assert_eq!(state.subjects().active_subject(), Some("fantasy"));
    assert!(state.subjects().current_state().is_loading());

    let state = settle(&executor(&server), state, effects).await;

    let items = state.subjects().current_state().items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_deref(), Some("OL27448W"));
    assert_eq!(items[0].author_names, vec!["J.R.R. Tolkien".to_string()]);
    assert_eq!(items[0].cover_image_id.as_deref(), Some("14625765"));
    assert_eq!(items[1].id, None);
    assert_eq!(items[1].author_names, vec![UNKNOWN_AUTHOR.to_string()]);
}

#[tokio::test]
async fn subject_failure_uses_subject_message() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/subjects/history.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let state = AppState::with_endpoints(CatalogEndpoints::with_base(&server.uri()).unwrap());
    let (state, effects) = update(state, Msg::SubjectSelected("history".to_string()));
    let state = settle(&executor(&server), state, effects).await;

    assert_eq!(
        state.subjects().current_state(),
        &ViewState::Failed(SUBJECT_FAILED_MESSAGE.to_string())
    );
    assert_eq!(state.subjects().active_subject(), Some("history"));
}

#[tokio::test]
async fn detail_404_is_not_found() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/bogus.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = DetailFetcher::new(http(), queries(&server));

    assert_eq!(
        fetcher.fetch_detail("bogus").await,
        Err(FetchError::NotFound {
            id: "bogus".to_string()
        })
    );
}

#[tokio::test]
async fn detail_server_error_is_transport() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/OL1W.json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let fetcher = DetailFetcher::new(http(), queries(&server));
    let err = fetcher.fetch_detail("OL1W").await.unwrap_err();

    assert_eq!(err.kind(), Some(&FailureKind::HttpStatus(502)));
}

#[tokio::test]
async fn detail_with_broken_json_is_transport() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/OL1W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .mount(&server)
        .await;

    let fetcher = DetailFetcher::new(http(), queries(&server));
    let err = fetcher.fetch_detail("OL1W").await.unwrap_err();

    assert_eq!(err.kind(), Some(&FailureKind::MalformedBody));
}

#[tokio::test]
async fn detail_flow_loads_wrapped_description() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/OL893415W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "/works/OL893415W",
            "title": "Dune",
            "authors": [{"author": {"key": "/authors/OL79034A"}, "type": {"key": "/type/author_role"}}],
            "covers": [11481354],
            "description": {"type": "/type/text", "value": "Set on the desert planet Arrakis."},
            "subjects": ["Science fiction"]
        })))
        .mount(&server)
        .await;

    let state = AppState::with_endpoints(CatalogEndpoints::with_base(&server.uri()).unwrap());
    let (state, effects) = update(state, Msg::DetailRequested("OL893415W".to_string()));
    let state = settle(&executor(&server), state, effects).await;

    let detail = state.detail().current_state().detail().expect("detail loaded");
    assert_eq!(detail.id, "OL893415W");
    assert_eq!(detail.description, "Set on the desert planet Arrakis.");
    assert_eq!(detail.author_names, vec![UNKNOWN_AUTHOR.to_string()]);
    assert_eq!(detail.cover_image_ids, vec![11481354]);
}

#[tokio::test]
async fn detail_flow_reports_not_found() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/bogus.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let state = AppState::with_endpoints(CatalogEndpoints::with_base(&server.uri()).unwrap());
    let (state, effects) = update(state, Msg::DetailRequested("bogus".to_string()));
    let state = settle(&executor(&server), state, effects).await;

    assert_eq!(
        state.detail().current_state(),
        &DetailState::NotFound {
            id: "bogus".to_string()
        }
    );
}
