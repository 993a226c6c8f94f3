use std::time::Duration;

use gbomb_api::types::{Channel, FeedEntry, Game, Video};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct VideoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Show")]
    show: String,
    #[tabled(rename = "Length")]
    length: String,
    #[tabled(rename = "Premium")]
    premium: String,
}

#[derive(Tabled, Serialize)]
struct GameRow {
    #[tabled(rename = "GUID")]
    guid: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Released")]
    released: String,
    #[tabled(rename = "Platforms")]
    platforms: String,
}

#[derive(Tabled, Serialize)]
struct EpisodeRow {
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Download")]
    link: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

// -- Row builders --

fn build_video_rows(videos: &[Video]) -> Vec<VideoRow> {
    videos
        .iter()
        .map(|v| VideoRow {
            id: v.id,
            published: v.publish_date.to_string(),
            name: v.name.clone(),
            show: v
                .video_show
                .as_ref()
                .map(|s| s.title.clone())
                .or_else(|| v.video_type.clone())
                .unwrap_or_default(),
            length: format_length(v.length()),
            premium: if v.premium { "yes" } else { "" }.to_string(),
        })
        .collect()
}

fn build_game_rows(games: &[Game]) -> Vec<GameRow> {
    games
        .iter()
        .map(|g| GameRow {
            guid: g.guid.clone(),
            name: g.name.clone(),
            released: release_date(g),
            platforms: g.platform_abbreviations().join(", "),
        })
        .collect()
}

fn build_episode_rows(entries: &[FeedEntry]) -> Vec<EpisodeRow> {
    entries
        .iter()
        .map(|e| EpisodeRow {
            published: e
                .publish_time()
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| e.pub_date.clone()),
            title: e.title.clone(),
            link: e.link().to_string(),
        })
        .collect()
}

fn build_game_fields(game: &Game) -> Vec<FieldRow> {
    let mut rows = vec![
        FieldRow {
            field: "GUID",
            value: game.guid.clone(),
        },
        FieldRow {
            field: "Name",
            value: game.name.clone(),
        },
        FieldRow {
            field: "Released",
            value: release_date(game),
        },
        FieldRow {
            field: "Platforms",
            value: game
                .platforms
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(", "),
        },
        FieldRow {
            field: "Aliases",
            value: game.alias_list().join(", "),
        },
        FieldRow {
            field: "Developers",
            value: tag_names(game.developers.iter().map(|t| t.tag.name.as_str())),
        },
        FieldRow {
            field: "Publishers",
            value: tag_names(game.publishers.iter().map(|t| t.tag.name.as_str())),
        },
        FieldRow {
            field: "Genres",
            value: tag_names(game.genres.iter().map(|t| t.tag.name.as_str())),
        },
        FieldRow {
            field: "Videos",
            value: game.videos.len().to_string(),
        },
    ];
    if let Some(deck) = game.deck.as_deref().filter(|d| !d.is_empty()) {
        rows.push(FieldRow {
            field: "Deck",
            value: deck.to_string(),
        });
    }
    rows.push(FieldRow {
        field: "Link",
        value: game.site_detail_url.clone(),
    });
    rows
}

// -- Table output --

pub fn print_videos_table(videos: &[Video]) {
    println!("{}", Table::new(build_video_rows(videos)));
}

pub fn print_games_table(games: &[Game]) {
    println!("{}", Table::new(build_game_rows(games)));
}

pub fn print_game_detail(game: &Game) {
    let mut table = Table::new(build_game_fields(game));
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn print_channel_table(channel: &Channel) {
    println!("{}", channel.title);
    println!("{}", Table::new(build_episode_rows(&channel.entries)));
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn release_date(game: &Game) -> String {
    if !game.original_release_date.is_empty() {
        return game.original_release_date.time().format("%Y-%m-%d").to_string();
    }
    match (
        game.expected_release_year,
        game.expected_release_month,
        game.expected_release_day,
    ) {
        (Some(y), Some(m), Some(d)) => format!("{:04}-{:02}-{:02} (expected)", y, m, d),
        (Some(y), Some(m), None) => format!("{:04}-{:02} (expected)", y, m),
        (Some(y), None, _) => format!("{} (expected)", y),
        _ => String::new(),
    }
}

fn tag_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

fn format_length(length: Duration) -> String {
    let secs = length.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbomb_api::{GameLookup, GameSearchPage, VideosPage};

    fn load_videos_fixture() -> Vec<Video> {
        let json_str = include_str!("../../gbomb_api/tests/fixtures/videos.json");
        serde_json::from_str::<VideosPage>(json_str).unwrap().videos
    }

    fn load_search_fixture() -> Vec<Game> {
        let json_str = include_str!("../../gbomb_api/tests/fixtures/game_search.json");
        serde_json::from_str::<GameSearchPage>(json_str).unwrap().games
    }

    fn load_game_fixture() -> Game {
        let json_str = include_str!("../../gbomb_api/tests/fixtures/game.json");
        serde_json::from_str::<GameLookup>(json_str)
            .unwrap()
            .game
            .unwrap()
    }

    // -- format_length tests --

    #[test]
    fn test_format_length_hours() {
        assert_eq!(format_length(Duration::from_secs(3725)), "1:02:05");
    }

    #[test]
    fn test_format_length_minutes() {
        assert_eq!(format_length(Duration::from_secs(600)), "10:00");
        assert_eq!(format_length(Duration::ZERO), "0:00");
    }

    // -- Row builder tests --

    #[test]
    fn test_build_video_rows_mapping() {
        let rows = build_video_rows(&load_videos_fixture());
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.id, 16404);
        assert_eq!(row.published, "2017-10-27 12:00:00");
        assert_eq!(row.name, "Quick Look: Super Mario Odyssey");
        assert_eq!(row.show, "Quick Looks");
        assert_eq!(row.length, "1:02:05");
        assert_eq!(row.premium, "");

        let premium = &rows[1];
        assert_eq!(premium.published, "2017-10-28");
        assert_eq!(premium.show, "");
        assert_eq!(premium.premium, "yes");
    }

    #[test]
    fn test_build_game_rows_mapping() {
        let rows = build_game_rows(&load_search_fixture());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Bangai-O");
        assert_eq!(rows[0].released, "1999-09-03");
        assert_eq!(rows[0].platforms, "N64, DC");
        assert_eq!(rows[2].released, "2011-04-20");
    }

    #[test]
    fn test_build_game_fields() {
        let rows = build_game_fields(&load_game_fixture());
        let value = |field: &str| {
            rows.iter()
                .find(|r| r.field == field)
                .map(|r| r.value.clone())
                .unwrap()
        };
        assert_eq!(value("Name"), "Super Mario Odyssey");
        assert_eq!(value("Released"), "2017-10-27");
        assert_eq!(value("Aliases"), "SMO, Mario Odyssey");
        assert_eq!(value("Videos"), "3");
    }

    #[test]
    fn test_expected_release_date() {
        let game = Game {
            expected_release_year: Some(2025),
            expected_release_month: Some(3),
            ..Game::default()
        };
        assert_eq!(release_date(&game), "2025-03 (expected)");
        assert_eq!(release_date(&Game::default()), "");
    }

    #[test]
    fn test_build_episode_rows() {
        let xml = include_str!("../../gbomb_api/tests/fixtures/bombcast_feed.xml");
        let channel = Channel::from_xml(xml.as_bytes()).unwrap();
        let rows = build_episode_rows(&channel.entries);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].title, "Giant Bombcast 676: Reluctant Heroes");
        assert_eq!(rows[0].published, "2021-02-09 14:52");
        assert!(rows[0].link.ends_with("/podcasts/download/3246/audio.mp3"));
    }

    #[test]
    fn test_unparsable_pub_date_shown_verbatim() {
        let entry = FeedEntry::new(
            "Bonus".to_string(),
            "sometime".to_string(),
            "podcast-12".to_string(),
        )
        .unwrap();
        let rows = build_episode_rows(&[entry]);
        assert_eq!(rows[0].published, "sometime");
    }
}
