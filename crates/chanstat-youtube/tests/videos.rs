//! Integration tests for uploads pagination, statistics batching, comments
//! and the 30-day average, using wiremock.

use std::collections::HashSet;

use chanstat_youtube::{average_views_last_30_days, YoutubeClient, YoutubeError};
use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHANNEL_ID: &str = "UC_x5XG1OV2P6uZZ5FSM9Ttw";
const UPLOADS: &str = "UU_x5XG1OV2P6uZZ5FSM9Ttw";

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 5, base_url)
        .expect("client construction should not fail")
}

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

fn playlist_item(video_id: &str, published_at: &str) -> serde_json::Value {
    json!({
        "snippet": {"title": format!("Video {video_id}"), "publishedAt": published_at},
        "contentDetails": {"videoId": video_id}
    })
}

fn video_item(video_id: &str, duration: &str, views: &str) -> serde_json::Value {
    json!({
        "id": video_id,
        "snippet": {"title": format!("Video {video_id}"), "thumbnails": {}},
        "contentDetails": {"duration": duration},
        "statistics": {"viewCount": views, "likeCount": "1", "commentCount": "0"}
    })
}

/// Mounts the `channels?part=contentDetails` lookup for [`CHANNEL_ID`].
async fn mount_uploads_lookup(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("part", "contentDetails"))
        .and(query_param("id", CHANNEL_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": CHANNEL_ID, "contentDetails": {"relatedPlaylists": {"uploads": UPLOADS}}}]
        })))
        .mount(server)
        .await;
}

/// Mounts a `videos` lookup that answers any ID batch with `items`.
async fn mount_video_details(server: &MockServer, items: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_videos_paginates_until_requested_count() {
    let server = MockServer::start().await;
    mount_uploads_lookup(&server).await;

    let first_page: Vec<_> = (0..50)
        .map(|i| playlist_item(&format!("a{i}"), &days_ago(1)))
        .collect();
    let second_page: Vec<_> = (0..10)
        .map(|i| playlist_item(&format!("b{i}"), &days_ago(2)))
        .collect();

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", UPLOADS))
        .and(query_param("maxResults", "50"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": first_page,
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("pageToken", "page-2"))
        .and(query_param("maxResults", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": second_page,
            "nextPageToken": "page-3"
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_video_details(&server, Vec::new()).await;

    let client = test_client(&server.uri());
    let videos = client.fetch_videos(CHANNEL_ID, 60).await.unwrap();

    assert_eq!(videos.len(), 60);
    let unique: HashSet<&str> = videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(unique.len(), 60, "video IDs must not repeat");
    assert_eq!(videos[0].id, "a0");
    assert_eq!(videos[59].id, "b9");
}

#[tokio::test]
async fn fetch_videos_stops_when_playlist_is_exhausted() {
    let server = MockServer::start().await;
    mount_uploads_lookup(&server).await;

    let items: Vec<_> = (0..20)
        .map(|i| playlist_item(&format!("v{i}"), &days_ago(i)))
        .collect();
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("maxResults", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .expect(1)
        .mount(&server)
        .await;
    mount_video_details(&server, Vec::new()).await;

    let client = test_client(&server.uri());
    let videos = client.fetch_videos(CHANNEL_ID, 30).await.unwrap();
    assert_eq!(videos.len(), 20);
}

#[tokio::test]
async fn fetch_videos_merges_statistics_by_id_in_playlist_order() {
    let server = MockServer::start().await;
    mount_uploads_lookup(&server).await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                playlist_item("first", &days_ago(1)),
                playlist_item("second", &days_ago(2)),
                playlist_item("third", &days_ago(3))
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "first,second,third"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                video_item("third", "PT3M", "30"),
                video_item("first", "PT1M", "10")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client.fetch_videos(CHANNEL_ID, 3).await.unwrap();

    let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
    assert_eq!(videos[0].view_count, Some(10));
    assert_eq!(videos[0].duration.as_deref(), Some("PT1M"));
    assert!(videos[1].view_count.is_none());
    assert!(videos[1].duration.is_none());
    assert_eq!(videos[2].view_count, Some(30));
}

#[tokio::test]
async fn fetch_videos_without_uploads_playlist_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client.fetch_videos(CHANNEL_ID, 10).await.unwrap();
    assert!(videos.is_empty());
}

#[tokio::test]
async fn empty_playlist_skips_statistics_request() {
    let server = MockServer::start().await;
    mount_uploads_lookup(&server).await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.fetch_videos(CHANNEL_ID, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_video_details_parses_video() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "dQw4w9WgXcQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "dQw4w9WgXcQ",
                "snippet": {
                    "title": "Never Gonna Give You Up",
                    "description": "Official video",
                    "publishedAt": "2009-10-25T06:57:33Z"
                },
                "contentDetails": {"duration": "PT3M33S"},
                "statistics": {"viewCount": "1600000000", "likeCount": "18000000", "commentCount": "2300000"}
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let video = client.fetch_video_details("dQw4w9WgXcQ").await.unwrap();
    assert_eq!(video.title.as_deref(), Some("Never Gonna Give You Up"));
    assert_eq!(video.view_count, Some(1_600_000_000));
    assert_eq!(video.comment_count, Some(2_300_000));
    assert!((video.duration_minutes() - 3.55).abs() < 1e-9);
    assert!(video.published_at.is_some());
}

#[tokio::test]
async fn fetch_video_details_missing_is_not_found() {
    let server = MockServer::start().await;
    mount_video_details(&server, Vec::new()).await;

    let client = test_client(&server.uri());
    let result = client.fetch_video_details("missing").await;
    assert!(matches!(result, Err(YoutubeError::NotFound(_))));
}

#[tokio::test]
async fn fetch_comments_pages_with_hundred_item_cap() {
    let server = MockServer::start().await;

    let comment = |id: String| {
        json!({
            "id": id,
            "snippet": {"topLevelComment": {"snippet": {
                "authorDisplayName": "viewer",
                "textDisplay": "nice",
                "likeCount": 2,
                "publishedAt": "2024-01-01T00:00:00Z"
            }}}
        })
    };
    let first: Vec<_> = (0..100).map(|i| comment(format!("c{i}"))).collect();
    let second: Vec<_> = (100..130).map(|i| comment(format!("c{i}"))).collect();

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("videoId", "vid"))
        .and(query_param("maxResults", "100"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": first,
            "nextPageToken": "next"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("pageToken", "next"))
        .and(query_param("maxResults", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": second })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let comments = client.fetch_comments("vid", 150).await.unwrap();
    assert_eq!(comments.len(), 130);
    assert_eq!(comments[0].author.as_deref(), Some("viewer"));
    assert_eq!(comments[129].id, "c129");
}

#[tokio::test]
async fn search_channel_videos_enriches_hits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("channelId", CHANNEL_ID))
        .and(query_param("q", "rust"))
        .and(query_param("type", "video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "r1"},
                 "snippet": {"title": "Rust in 100 seconds", "publishedAt": days_ago(3)}},
                {"id": {"kind": "youtube#playlist", "playlistId": "PL1"},
                 "snippet": {"title": "A playlist"}}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [video_item("r1", "PT2M", "5000")]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client
        .search_channel_videos(CHANNEL_ID, "rust", 10)
        .await
        .unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].title.as_deref(), Some("Rust in 100 seconds"));
    assert_eq!(videos[0].view_count, Some(5000));
}

#[tokio::test]
async fn fetch_video_statistics_filters_and_truncates() {
    let server = MockServer::start().await;
    mount_uploads_lookup(&server).await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("maxResults", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                playlist_item("long-new", &days_ago(1)),
                playlist_item("short-new", &days_ago(2)),
                playlist_item("long-old", &days_ago(400)),
                playlist_item("long-mid", &days_ago(100))
            ]
        })))
        .mount(&server)
        .await;
    mount_video_details(
        &server,
        vec![
            video_item("long-new", "PT12M", "100"),
            video_item("short-new", "PT50S", "200"),
            video_item("long-old", "PT12M", "300"),
            video_item("long-mid", "PT4M", "400"),
        ],
    )
    .await;

    let client = test_client(&server.uri());
    let stats = client
        .fetch_video_statistics(CHANNEL_ID, 2, 6, 3)
        .await
        .unwrap();
    let ids: Vec<&str> = stats.iter().map(|s| s.video_id.as_str()).collect();
    assert_eq!(ids, vec!["long-new", "long-mid"]);
    assert_eq!(stats[1].view_count, Some(400));
}

#[tokio::test]
async fn fetch_video_statistics_at_25_sends_one_full_details_batch() {
    let server = MockServer::start().await;
    mount_uploads_lookup(&server).await;
    let items: Vec<_> = (0..50)
        .map(|i| playlist_item(&format!("v{i}"), &days_ago(1)))
        .collect();
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("maxResults", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .fetch_video_statistics(CHANNEL_ID, 25, 6, 0)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let ids = requests
        .iter()
        .filter(|r| r.url.path() == "/videos")
        .find_map(|r| r.url.query_pairs().find(|(k, _)| k == "id"))
        .map(|(_, v)| v.split(',').count());
    assert_eq!(ids, Some(50));
}

#[tokio::test]
async fn average_views_uses_recent_long_videos() {
    let server = MockServer::start().await;
    mount_uploads_lookup(&server).await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                playlist_item("a", &days_ago(1)),
                playlist_item("b", &days_ago(5)),
                playlist_item("short", &days_ago(6)),
                playlist_item("old", &days_ago(45))
            ]
        })))
        .mount(&server)
        .await;
    mount_video_details(
        &server,
        vec![
            video_item("a", "PT10M", "1000"),
            video_item("b", "PT1H", "3000"),
            video_item("short", "PT59S", "999999"),
            video_item("old", "PT20M", "888888"),
        ],
    )
    .await;

    let client = test_client(&server.uri());
    let avg = average_views_last_30_days(&client, CHANNEL_ID, 3, 50)
        .await
        .unwrap();
    assert!((avg - 2000.0).abs() < f64::EPSILON, "got {avg}");
}
