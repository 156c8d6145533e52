//! Integration tests for the crawl pipeline
//!
//! These tests use wiremock to stand in for the wiki and run the full
//! floor-to-JSON pipeline over real HTTP.

use shelf_scrape::config::{default_floors, Config, CrawlerConfig, WikiConfig};
use shelf_scrape::crawler::{build_http_client, fetch_url, HttpFetcher, Pipeline};
use shelf_scrape::output::render_books;
use shelf_scrape::ShelfError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock wiki
fn create_test_config(base_url: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_concurrent_fetches: 4,
            max_attempts: 3,
            base_delay_ms: 0,
            max_delay_ms: 0,
            request_timeout_secs: 5,
        },
        wiki: WikiConfig {
            base_url: base_url.to_string(),
            ..WikiConfig::default()
        },
        ..Config::default()
    }
}

fn pipeline(config: &Config) -> Pipeline<HttpFetcher> {
    let client = build_http_client(&config.user_agent, &config.crawler)
        .expect("Failed to build client");
    Pipeline::new(config, HttpFetcher::new(client), default_floors())
        .expect("Failed to build pipeline")
}

async fn serve(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn book_page(title: &str, locations: &[&str]) -> String {
    let items: String = locations
        .iter()
        .map(|l| format!("<li>{}</li>", l))
        .collect();
    format!(
        r#"<html><body><h1 class="page-header__title">{}</h1>
        <div class="mw-parser-output"><p>Lore.</p><h2>Acquisition</h2><ul>{}</ul>
        <h2>Trivia</h2><p>Not a location</p></div></body></html>"#,
        title, items
    )
}

fn table(hrefs: &[&str]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|h| format!(r#"<tr><td><a href="{}">link</a></td><td>desc</td></tr>"#, h))
        .collect();
    format!(r#"<table class="article-table"><tbody>{}</tbody></table>"#, rows)
}

/// Mounts the three floors and their books
///
/// First floor: 2 shelves (3 books) then a table (1 book).
/// Second floor: table with 2 books, the book index and a file link.
/// Third floor: table with 1 book.
async fn mount_library(server: &MockServer) {
    serve(
        server,
        "/wiki/First_Floor",
        format!(
            r#"<html><body><h1>First Floor</h1><div class="mw-parser-output">
            <p>Shelves of the first floor.</p>
            <ul><li><a href="/wiki/Ashen_Ledger">Ashen Ledger</a></li>
                <li><a href="/wiki/Tidal_Almanac">Tidal Almanac</a>
                    <a href="/wiki/File:Tidal_Almanac.png">cover</a></li></ul>
            <ul><li><a href="/wiki/Codex_of_Echoes">Codex of Echoes</a></li></ul>
            {}
            </div></body></html>"#,
            table(&["/wiki/Gazetteer_of_Lost_Rooms"])
        ),
    )
    .await;

    serve(
        server,
        "/wiki/Second_Floor",
        format!(
            "<html><body><h1>Second Floor</h1>{}</body></html>",
            table(&[
                "/wiki/Book_Index",
                "/wiki/Mariners_Log",
                "/wiki/File:Map.jpg",
                "/wiki/Salt_Psalter",
            ])
        ),
    )
    .await;

    serve(
        server,
        "/wiki/Third_Floor",
        format!(
            "<html><body><h1>Third Floor</h1>{}</body></html>",
            table(&["/wiki/Last_Lexicon"])
        ),
    )
    .await;

    serve(
        server,
        "/wiki/Ashen_Ledger",
        book_page("Ashen Ledger", &["Reading room", "Vault"]),
    )
    .await;
    serve(
        server,
        "/wiki/Tidal_Almanac",
        book_page("Tidal Almanac", &["Harbor market"]),
    )
    .await;
    serve(
        server,
        "/wiki/Codex_of_Echoes",
        r#"<html><body><h1>Codex of Echoes</h1><div class="mw-parser-output">
        <h2>Acquisition</h2><figure><figcaption>Cover art</figcaption></figure>
        <p>Echo chamber</p></div></body></html>"#
            .to_string(),
    )
    .await;
    serve(
        server,
        "/wiki/Gazetteer_of_Lost_Rooms",
        book_page("Gazetteer of Lost Rooms", &["Map alcove"]),
    )
    .await;
    serve(
        server,
        "/wiki/Mariners_Log",
        book_page("Mariner's Log", &["Dock ledger"]),
    )
    .await;
    serve(
        server,
        "/wiki/Salt_Psalter",
        book_page("Salt Psalter", &["Chapel", "Crypt"]),
    )
    .await;
    serve(
        server,
        "/wiki/Last_Lexicon",
        book_page("Last Lexicon", &["Observatory"]),
    )
    .await;
    serve(
        server,
        "/wiki/Book_Index",
        book_page("Book Index", &["Everywhere"]),
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_in_floor_order() {
    let mock_server = MockServer::start().await;
    mount_library(&mock_server).await;

    let config = create_test_config(&mock_server.uri());
    let books = pipeline(&config).run().await.expect("Crawl failed");

    let titles: Vec<&str> = books.iter().map(|b| b.title()).collect();
    assert_eq!(
        titles,
        vec![
            "Ashen Ledger",
            "Tidal Almanac",
            "Codex of Echoes",
            "Gazetteer of Lost Rooms",
            "Mariner's Log",
            "Salt Psalter",
            "Last Lexicon",
        ]
    );

    assert_eq!(books[0].locations(), ["Reading room", "Vault"]);
    // The override skips the figure that precedes the real block
    assert_eq!(books[2].locations(), ["Echo chamber"]);
    assert_eq!(books[5].locations(), ["Chapel", "Crypt"]);

    // The book index and file pages are never requested
    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording disabled");
    assert!(requests.iter().all(|r| r.url.path() != "/wiki/Book_Index"));
    assert!(requests.iter().all(|r| !r.url.path().contains('.')));
}

#[tokio::test]
async fn test_crawl_is_idempotent() {
    let mock_server = MockServer::start().await;
    mount_library(&mock_server).await;

    let config = create_test_config(&mock_server.uri());

    let first = pipeline(&config).run().await.expect("First crawl failed");
    let second = pipeline(&config).run().await.expect("Second crawl failed");

    let first_json = render_books(&first, false).unwrap();
    let second_json = render_books(&second, false).unwrap();
    assert_eq!(first_json.as_bytes(), second_json.as_bytes());
}

#[tokio::test]
async fn test_corrupted_page_retried_once() {
    let mock_server = MockServer::start().await;

    // Mounted first, so it answers the first request only
    Mock::given(method("GET"))
        .and(path("/wiki/Last_Lexicon"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body><h1>Last Lex"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_library(&mock_server).await;

    let config = create_test_config(&mock_server.uri());
    let books = pipeline(&config).run().await.expect("Crawl failed");

    let last = books.last().expect("No books");
    assert_eq!(last.title(), "Last Lexicon");
    assert_eq!(last.locations(), ["Observatory"]);

    let requests = mock_server.received_requests().await.unwrap();
    let lexicon_requests = requests
        .iter()
        .filter(|r| r.url.path() == "/wiki/Last_Lexicon")
        .count();
    assert_eq!(lexicon_requests, 2);
}

#[tokio::test]
async fn test_server_error_then_recovery() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Third_Floor"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    mount_library(&mock_server).await;

    let config = create_test_config(&mock_server.uri());
    let books = pipeline(&config).run().await.expect("Crawl failed");
    assert_eq!(books.len(), 7);
}

#[tokio::test]
async fn test_missing_floor_gives_up() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/First_Floor"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let result = pipeline(&config).run().await;

    match result {
        Err(ShelfError::RetriesExhausted {
            target, attempts, ..
        }) => {
            assert_eq!(target, "First Floor");
            assert_eq!(attempts, 3);
        }
        other => panic!("Expected RetriesExhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_url_status_mapping() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/wiki/Ashen_Ledger", "<p>ok</p>".to_string()).await;

    let config = create_test_config(&mock_server.uri());
    let client = build_http_client(&config.user_agent, &config.crawler).unwrap();

    let body = fetch_url(&client, &format!("{}/wiki/Ashen_Ledger", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "<p>ok</p>");

    let missing = fetch_url(&client, &format!("{}/wiki/Nowhere", mock_server.uri())).await;
    assert!(matches!(
        missing,
        Err(ShelfError::HttpStatus { status: 404, .. })
    ));
}
