use std::collections::BTreeSet;

use super::*;
use crate::Error;

const SEARCH_BODY: &str = r#"{
    "error": "OK", "limit": 10, "offset": 0,
    "number_of_page_results": 2, "number_of_total_results": 27, "status_code": 1,
    "results": [
        {"id": 17441, "name": "Bangai-O", "aliases": "Bakuretsu Muteki Bangai-O",
         "original_release_date": "1999-09-03", "platforms": null},
        {"id": 20632, "name": "Bangai-O Spirits", "aliases": null}
    ],
    "version": "1.0"
}"#;

#[test]
fn resource_paths_and_params() {
    assert_eq!(VideosPage::default().path(), "api/videos");
    assert!(VideosPage::default().query_params().is_empty());

    let lookup = GameLookup::new("3030-56733");
    assert_eq!(lookup.path(), "api/game/3030-56733");
    assert!(lookup.query_params().is_empty());

    let search = GameSearchPage::new("Bangai-O");
    assert_eq!(search.path(), "api/search");
    let params: BTreeSet<(&str, String)> = search.query_params().into_iter().collect();
    assert_eq!(
        params,
        BTreeSet::from([
            ("query", "Bangai-O".to_string()),
            ("resources", "game".to_string()),
        ])
    );
}

#[test]
fn search_parse_replaces_header_and_payload() {
    let mut search = GameSearchPage::new("Bangai-O");
    search.parse(SEARCH_BODY.as_bytes()).unwrap();

    assert_eq!(search.page.limit, 10);
    assert_eq!(search.page.max_results, 27);
    assert_eq!(search.games.len(), 2);
    assert_eq!(search.games[0].alias_list(), vec!["Bakuretsu Muteki Bangai-O"]);
    assert!(search.games[0].platforms.is_empty());
    assert_eq!(search.games[0].original_release_date.as_str(), "1999-09-03");
    assert!(!search.is_complete());
    // Transient state survives the swap.
    assert_eq!(search.query(), "Bangai-O");
}

#[test]
fn malformed_body_leaves_previous_state_intact() {
    let mut search = GameSearchPage::new("Bangai-O");
    search.parse(SEARCH_BODY.as_bytes()).unwrap();
    search.advance_offset().unwrap();
    let before_page = search.page.clone();
    let before_names: Vec<String> = search.games.iter().map(|g| g.name.clone()).collect();

    let err = search.parse(b"{\"results\": [ not json").unwrap_err();

    assert!(err.is_decode());
    assert_eq!(search.page, before_page);
    assert_eq!(search.current_offset(), 10);
    let after_names: Vec<String> = search.games.iter().map(|g| g.name.clone()).collect();
    assert_eq!(after_names, before_names);
}

#[test]
fn parse_never_merges_stale_payload() {
    let mut videos = VideosPage::default();
    videos
        .parse(br#"{"limit":2,"offset":0,"number_of_total_results":3,"status_code":1,
                   "results":[{"id":1,"name":"a"},{"id":2,"name":"b"}]}"#)
        .unwrap();
    videos
        .parse(br#"{"limit":2,"offset":2,"number_of_total_results":3,"status_code":1,
                   "results":[{"id":3,"name":"c"}]}"#)
        .unwrap();

    assert_eq!(videos.videos.len(), 1);
    assert_eq!(videos.videos[0].id, 3);
    assert_eq!(videos.page.offset, 2);
}

#[test]
fn missing_game_is_none() {
    let mut lookup = GameLookup::new("3030-1");
    lookup
        .parse(br#"{"error":"Object Not Found","limit":0,"offset":0,
                   "number_of_page_results":0,"number_of_total_results":0,
                   "status_code":101,"results":[]}"#)
        .unwrap();
    assert!(lookup.game.is_none());
    assert_eq!(lookup.page.status(), ApiStatus::NotFound);
}

#[test]
fn videos_start_at_requested_offset() {
    let videos = VideosPage::starting_at(200);
    assert_eq!(videos.current_offset(), 200);
    assert_eq!(videos.page.limit, VIDEOS_PAGE_LIMIT);
}

#[test]
fn exhausted_search_cannot_advance() {
    let mut search = GameSearchPage::new("x");
    search.page = ResponsePage {
        limit: 10,
        offset: 27,
        max_results: 27,
        ..ResponsePage::default()
    };
    assert!(search.is_complete());
    assert!(matches!(
        search.advance_offset(),
        Err(Error::Exhausted { offset: 27, total: 27 })
    ));
}
