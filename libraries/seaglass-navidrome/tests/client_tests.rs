//! Tests for the Navidrome client against a mock server.
//!
//! These cover both API surfaces: native search/browse with bearer
//! auth and `x-total-count` pagination, and the Subsonic REST
//! envelope with its error-code mapping.

use seaglass_navidrome::{NavidromeClient, NavidromeError, ServerConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NavidromeClient {
    let config = ServerConfig::new(server.uri(), "alice", "secret");
    NavidromeClient::new(config).expect("valid config")
}

fn login_mock() -> Mock {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "native_token",
            "name": "alice"
        })))
}

fn subsonic_ok(payload: serde_json::Value) -> serde_json::Value {
    let mut body = serde_json::json!({ "status": "ok" });
    if let (Some(obj), Some(extra)) = (body.as_object_mut(), payload.as_object()) {
        for (k, v) in extra {
            obj.insert(k.clone(), v.clone());
        }
    }
    serde_json::json!({ "subsonic-response": body })
}

fn subsonic_failed(code: i64, message: &str) -> serde_json::Value {
    serde_json::json!({
        "subsonic-response": {
            "status": "failed",
            "error": { "code": code, "message": message }
        }
    })
}

// =============================================================================
// Native Search
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_search_songs_maps_and_paginates() {
        let server = MockServer::start().await;
        login_mock().mount(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/song"))
            .and(query_param("title", "yesterday"))
            .and(query_param("_start", "0"))
            .and(query_param("_end", "50"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-total-count", "2")
                    .set_body_json(serde_json::json!([
                        {
                            "id": "song1",
                            "title": "Yesterday",
                            "artist": "The Beatles",
                            "album": "Help!",
                            "duration": 125.4,
                            "suffix": "flac",
                            "hasCoverArt": true
                        },
                        {
                            "id": "song2",
                            "title": "Yesterday Once More",
                            "artist": "Carpenters",
                            "album": "Now & Then",
                            "duration": 238.0,
                            "suffix": "mp3"
                        }
                    ])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client.search_songs("yesterday", 1, 50).await.unwrap();

        assert!(page.is_end);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, "song1");
        assert_eq!(page.data[0].duration_secs, Some(125));
        assert_eq!(page.data[0].suffix.as_deref(), Some("flac"));
        assert_eq!(page.data[1].artist, "Carpenters");
    }

    #[tokio::test]
    async fn test_search_songs_not_end_when_more_rows_exist() {
        let server = MockServer::start().await;
        login_mock().mount(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/song"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-total-count", "120")
                    .set_body_json(serde_json::json!([
                        { "id": "song1", "title": "A" }
                    ])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client.search_songs("a", 1, 50).await.unwrap();
        assert!(!page.is_end);
    }

    #[tokio::test]
    async fn test_search_songs_empty_result_is_ok() {
        let server = MockServer::start().await;
        login_mock().mount(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/song"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-total-count", "0")
                    .set_body_json(serde_json::json!([])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client.search_songs("no such song", 1, 50).await.unwrap();
        assert!(page.is_end);
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn test_native_token_is_cached_across_calls() {
        let server = MockServer::start().await;
        login_mock().expect(1).mount(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/song"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-total-count", "0")
                    .set_body_json(serde_json::json!([])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.search_songs("one", 1, 50).await.unwrap();
        client.search_songs("two", 1, 50).await.unwrap();
        // Mock expectation: exactly one login despite two searches.
    }

    #[tokio::test]
    async fn test_native_server_error_maps_to_server_error() {
        let server = MockServer::start().await;
        login_mock().mount(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/song"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.search_songs("a", 1, 50).await.unwrap_err();
        match err {
            NavidromeError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("boom"));
            }
            e => panic!("Expected ServerError, got: {e:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_failure_maps_to_auth_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.search_songs("a", 1, 50).await.unwrap_err();
        match err {
            NavidromeError::AuthFailed(_) => {}
            e => panic!("Expected AuthFailed, got: {e:?}"),
        }
    }
}

// =============================================================================
// Subsonic Envelope
// =============================================================================

mod subsonic {
    use super::*;

    #[tokio::test]
    async fn test_auth_params_are_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getPlaylists"))
            .and(query_param("u", "alice"))
            .and(query_param("c", "seaglass"))
            .and(query_param("f", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subsonic_ok(
                serde_json::json!({ "playlists": { "playlist": [] } }),
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let playlists = client.list_playlists().await.unwrap();
        assert!(playlists.is_empty());
    }

    #[tokio::test]
    async fn test_error_code_40_maps_to_auth_failed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getPlaylists"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(subsonic_failed(40, "Wrong username or password")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.list_playlists().await.unwrap_err() {
            NavidromeError::AuthFailed(_) => {}
            e => panic!("Expected AuthFailed, got: {e:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_code_70_on_get_song_maps_to_invalid_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getSong"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(subsonic_failed(70, "Data not found")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.get_song("stale-id").await.unwrap_err() {
            NavidromeError::InvalidId(_) => {}
            e => panic!("Expected InvalidId, got: {e:?}"),
        }
    }

    #[tokio::test]
    async fn test_other_error_codes_map_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getPlaylists"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(subsonic_failed(10, "Missing parameter")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.list_playlists().await.unwrap_err() {
            NavidromeError::Api { code, message } => {
                assert_eq!(code, 10);
                assert!(message.contains("Missing"));
            }
            e => panic!("Expected Api error, got: {e:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_song_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getSong"))
            .and(query_param("id", "song1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subsonic_ok(
                serde_json::json!({
                    "song": {
                        "id": "song1",
                        "title": "Yesterday",
                        "artist": "The Beatles",
                        "duration": 125
                    }
                }),
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let song = client.get_song("song1").await.unwrap();
        assert_eq!(song.id, "song1");
        assert_eq!(song.title.as_deref(), Some("Yesterday"));
    }
}

// =============================================================================
// Playlists
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_create_playlist_with_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/createPlaylist"))
            .and(query_param("name", "Imported"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subsonic_ok(
                serde_json::json!({ "playlist": { "id": "pl-1", "name": "Imported" } }),
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.create_playlist("Imported").await.as_deref(), Some("pl-1"));
    }

    #[tokio::test]
    async fn test_create_playlist_recovers_id_by_listing() {
        let server = MockServer::start().await;

        // Older servers answer with a bare ok status.
        Mock::given(method("GET"))
            .and(path("/rest/createPlaylist"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(subsonic_ok(serde_json::json!({}))),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/getPlaylists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subsonic_ok(
                serde_json::json!({
                    "playlists": {
                        "playlist": [
                            { "id": "pl-7", "name": "Imported" },
                            { "id": "pl-8", "name": "Other" }
                        ]
                    }
                }),
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.create_playlist("Imported").await.as_deref(), Some("pl-7"));
    }

    #[tokio::test]
    async fn test_create_playlist_failure_yields_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/createPlaylist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subsonic_failed(0, "nope")))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.create_playlist("Imported").await.is_none());
    }

    #[tokio::test]
    async fn test_add_tracks_success_and_empty_input() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/updatePlaylist"))
            .and(query_param("playlistId", "pl-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(subsonic_ok(serde_json::json!({}))),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let ids = vec!["a".to_string(), "b".to_string()];
        assert!(client.add_tracks("pl-1", &ids).await);
        assert!(!client.add_tracks("pl-1", &[]).await);
        assert!(!client.add_tracks("", &ids).await);
    }

    #[tokio::test]
    async fn test_delete_playlist() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/deletePlaylist"))
            .and(query_param("id", "pl-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(subsonic_ok(serde_json::json!({}))),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.delete_playlist("pl-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_playlist_tracks_use_media_file_id() {
        let server = MockServer::start().await;
        login_mock().mount(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/playlist/pl-1/tracks"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-total-count", "1")
                    .set_body_json(serde_json::json!([
                        {
                            "id": "row-9",
                            "mediaFileId": "song-42",
                            "title": "Yesterday",
                            "artist": "The Beatles",
                            "duration": 125.0
                        }
                    ])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let tracks = client.playlist_tracks("pl-1").await.unwrap();
        assert_eq!(tracks.len(), 1);
        // The catalog id is the media file, not the playlist row.
        assert_eq!(tracks[0].id, "song-42");
    }

    #[tokio::test]
    async fn test_find_playlist_by_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getPlaylists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subsonic_ok(
                serde_json::json!({
                    "playlists": {
                        "playlist": [
                            { "id": "pl-1", "name": "Road Trip" },
                            { "id": "pl-2", "name": "Focus" }
                        ]
                    }
                }),
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let found = client.find_playlist_by_name("Focus").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some("pl-2".to_string()));
        assert!(client.find_playlist_by_name("Missing").await.unwrap().is_none());
    }
}

// =============================================================================
// Lyrics & Scrobble
// =============================================================================

mod lyrics {
    use super::*;

    #[tokio::test]
    async fn test_embedded_lyrics_converted_to_lrc() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getLyricsBySongId"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subsonic_ok(
                serde_json::json!({
                    "lyricsList": {
                        "structuredLyrics": [
                            {
                                "synced": true,
                                "line": [
                                    { "start": 1000, "value": "hello" },
                                    { "start": 2500, "value": "world" }
                                ]
                            }
                        ]
                    }
                }),
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let lrc = client.song_lyrics("song1").await.unwrap().unwrap();
        assert_eq!(lrc, "[00:01.00]hello\n[00:02.50]world");
    }

    #[tokio::test]
    async fn test_missing_lyrics_yield_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getLyricsBySongId"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(subsonic_ok(serde_json::json!({}))),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.song_lyrics("song1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fallback_lyrics_filters_placeholder_artist() {
        let server = MockServer::start().await;

        // The placeholder artist must not reach the lyrics API.
        Mock::given(method("GET"))
            .and(path("/lyrics"))
            .and(query_param("title", "Yesterday"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("[00:01.00]some lyrics body here"),
            )
            .mount(&server)
            .await;

        let config = ServerConfig::new("http://music.invalid", "alice", "secret")
            .with_lyrics_api(server.uri());
        let client = NavidromeClient::new(config).unwrap();

        let lyrics = client
            .fallback_lyrics("Yesterday", Some("Unknown Artist"), None)
            .await
            .unwrap();
        assert!(lyrics.unwrap().contains("some lyrics"));

        let requests = server.received_requests().await.unwrap();
        assert!(requests
            .iter()
            .all(|r| !r.url.query().unwrap_or("").contains("artist")));
    }

    #[tokio::test]
    async fn test_fallback_lyrics_not_found_body_yields_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/lyrics"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Lyrics not found for song"))
            .mount(&server)
            .await;

        let config = ServerConfig::new("http://music.invalid", "alice", "secret")
            .with_lyrics_api(server.uri());
        let client = NavidromeClient::new(config).unwrap();

        assert!(client
            .fallback_lyrics("Yesterday", None, None)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_scrobble_swallows_failures() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/scrobble"))
            .and(query_param("id", "song1"))
            .and(query_param("submission", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subsonic_ok(serde_json::json!({}))))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.scrobble("song1", true).await);
    }

    #[tokio::test]
    async fn test_scrobble_failure_returns_false() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/scrobble"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subsonic_failed(0, "nope")))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(!client.scrobble("song1", false).await);
    }
}
