use chrono::{Datelike, Timelike};
use gbomb_api::types::Channel;
use gbomb_api::{GameLookup, GameSearchPage, Pageable, VideosPage};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_game_full() {
    let mut lookup = GameLookup::new("3030-56733");
    lookup.parse(load_fixture("game.json").as_bytes()).unwrap();

    let game = lookup.game.as_ref().unwrap();
    assert_eq!(game.api_detail_url, "https://www.giantbomb.com/api/game/3030-56733/");
    assert_eq!(game.name, "Super Mario Odyssey");
    assert_eq!(game.id, 56733);
    assert_eq!(game.videos.len(), 3);
    assert_eq!(game.images.len(), 2);
    assert_eq!(game.image_tags[0].total, 154);
    assert_eq!(game.original_game_rating[0].tag.name, "ESRB: E10+");
    assert_eq!(game.platforms[0].name(), "Nintendo Switch");
    assert_eq!(game.platform_abbreviations(), vec!["NSW"]);
    assert_eq!(game.alias_list(), vec!["SMO", "Mario Odyssey"]);
    assert!(game.characters.is_empty());
    assert!(game.similar_games.is_empty());
    assert_eq!(game.expected_release_year, None);

    assert_eq!(game.original_release_date.to_string(), "2017-10-27");
    let released = game.original_release_date.time();
    assert_eq!((released.year(), released.month(), released.day()), (2017, 10, 27));
    assert_eq!(game.date_added.time().hour(), 1);
}

#[test]
fn deserialize_search_page() {
    let mut search = GameSearchPage::new("Bangai-O");
    search.parse(load_fixture("game_search.json").as_bytes()).unwrap();

    assert_eq!(search.games.len(), 3);
    assert_eq!(search.games[0].aliases.as_deref(), Some("Bakuretsu Muteki Bangai-O"));
    assert_eq!(search.games[0].platform_abbreviations(), vec!["N64", "DC"]);
    assert!(search.games[1].aliases.is_none());
    assert!(search.games[2].platforms.is_empty());
    assert_eq!(search.page.limit, 10);
    assert_eq!(search.page.page_results, 3);
    assert_eq!(search.page.max_results, 27);
    assert!(!search.is_complete());
}

#[test]
fn deserialize_videos_page() {
    let mut videos = VideosPage::starting_at(0);
    videos.parse(load_fixture("videos.json").as_bytes()).unwrap();

    assert_eq!(videos.videos.len(), 2);
    let ql = &videos.videos[0];
    assert_eq!(ql.name, "Quick Look: Super Mario Odyssey");
    assert_eq!(ql.best_quality_url(), Some("https://giantbomb-pdl.akamaized.net/video/ql_smo_hd.mp4"));
    assert!(ql.on_youtube());
    assert_eq!(ql.length().as_secs(), 3725);
    assert_eq!(ql.video_show.as_ref().unwrap().title, "Quick Looks");
    assert_eq!(ql.associations[0].id, 56733);
    assert_eq!(ql.publish_date.time().hour(), 12);

    let premium = &videos.videos[1];
    assert!(premium.premium);
    assert!(premium.associations.is_empty());
    assert!(premium.video_categories.is_empty());
    assert!(!premium.on_youtube());
    assert_eq!(premium.best_quality_url(), Some("https://giantbomb-pdl.akamaized.net/video/stream_low.mp4"));
    // Doubled quotes from upstream are stripped.
    assert_eq!(premium.publish_date.as_str(), "2017-10-28");

    assert!(videos.is_complete());
}

#[test]
fn deserialize_feed() {
    let channel = Channel::from_xml(load_fixture("bombcast_feed.xml").as_bytes()).unwrap();

    assert_eq!(channel.title, "Giant Bombcast");
    assert_eq!(channel.entries.len(), 3);

    let latest = &channel.entries[0];
    assert_eq!(latest.title, "Giant Bombcast 676: Reluctant Heroes");
    assert_eq!(latest.pub_date, "Tue, 09 Feb 2021 14:52:00 PST");
    assert_eq!(
        latest.link(),
        "https://dts.podtrac.com/redirect.mp3/www.giantbomb.com/podcasts/download/3246/audio.mp3"
    );
    let published = latest.publish_time().unwrap();
    assert_eq!(published.offset().local_minus_utc(), -8 * 3600);
    assert_eq!((published.day(), published.hour(), published.minute()), (9, 14, 52));

    assert!(channel.entries[2].link().contains("/download/3231/"));
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let mut search = GameSearchPage::new("x");
    let err = search.parse(br#"{"results": not valid json}"#).unwrap_err();
    assert!(err.is_decode());
}
