use std::sync::Arc;

use chrono::Utc;
use mockito::Server;
use rocket::http::Status;
use rocket::local::asynchronous::Client as RocketClient;

use pressbox::config::Config;
use pressbox::ingestion;
use pressbox::pipeline::{self, ArticleResult};
use pressbox::server::{build_rocket, AppState};

/// Long enough that the feed body is used as-is, no article page fetch.
fn long_body(quoted: bool) -> String {
    let quote_para = if quoted {
        "<p>Gary O'Neil said \u{201C}the performance was everything we asked for\u{201D} afterwards.</p>"
    } else {
        "<p>A second paragraph of plain running commentary without any quotation in it.</p>"
    };
    format!(
        "<p>{}</p>{}",
        "Match report filler text. ".repeat(30),
        quote_para
    )
}

fn feed_xml(base: &str) -> String {
    let mut items = String::new();

    // 1: full content:encoded with a quote, no page fetch needed
    items.push_str(&format!(
        "<item><title>One</title><link>{base}/a1</link>\
         <content:encoded><![CDATA[{}]]></content:encoded></item>",
        long_body(true)
    ));
    // 2: teaser only, article page carries the quotes
    items.push_str(&format!(
        "<item><title>Two</title><link>{base}/a2</link>\
         <description>teaser</description></item>"
    ));
    // 3: empty content and a dead article link
    items.push_str(&format!(
        "<item><title>Three</title><link>{base}/a3</link>\
         <description></description></item>"
    ));
    // 4: full body, no quotes anywhere
    items.push_str(&format!(
        "<item><title>Four</title><link>{base}/a4</link>\
         <content:encoded><![CDATA[{}]]></content:encoded></item>",
        long_body(false)
    ));
    // 5: teaser only, article page has curly quotes
    items.push_str(&format!(
        "<item><title>Five</title><link>{base}/a5</link>\
         <description>teaser</description></item>"
    ));

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <rss version=\"2.0\" xmlns:content=\"http://purl.org/rss/1.0/modules/content/\">\
         <channel><title>Football news</title>{items}</channel></rss>"
    )
}

const ARTICLE_TWO: &str = "<html><body>\
    <p>The head coach faced the press after the defeat on Tuesday evening.</p>\
    <p>He explained, \"We lost our shape for twenty minutes and it cost us.\"</p>\
    </body></html>";

const ARTICLE_FIVE: &str = "<html><body>\
    <p>Mario Lemina noted \u{201C}the dressing room is still together\u{201D} on his way out.</p>\
    </body></html>";

async fn mock_site(server: &mut Server) {
    let base = server.url();
    server
        .mock("GET", "/feed")
        .with_header("content-type", "application/rss+xml")
        .with_body(feed_xml(&base))
        .create_async()
        .await;
    server
        .mock("GET", "/a2")
        .with_body(ARTICLE_TWO)
        .create_async()
        .await;
    server
        .mock("GET", "/a3")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", "/a5")
        .with_body(ARTICLE_FIVE)
        .create_async()
        .await;
}

fn config_for(base: &str, extraction: &str) -> Config {
    toml::from_str(&format!(
        r#"
        [feed]
        url = "{base}/feed"
        max_articles = 5
        user_agent = "pressbox-test"

        [fetch]
        timeout_seconds = 5

        [extraction]
        {extraction}
    "#
    ))
    .expect("parse test config")
}

#[tokio::test]
async fn test_feed_to_results_paragraph_mode() {
    let mut server = Server::new_async().await;
    mock_site(&mut server).await;
    let config = config_for(&server.url(), "mode = \"paragraph\"\noutput = \"quotes\"");

    let client = ingestion::build_client("pressbox-test", 5).expect("client");
    let feed = ingestion::fetch_feed(&client, &config.feed.url)
        .await
        .expect("fetch feed");
    assert_eq!(feed.entries.len(), 5);

    let inputs = ingestion::collect_articles(&client, &feed, config.feed.max_articles()).await;
    assert_eq!(inputs.len(), 5, "no entry may be dropped");

    let results = pipeline::process_articles(&inputs, &config.extraction);
    assert_eq!(results.len(), 5);

    // Output ordering follows feed order
    let headlines: Vec<&str> = results.iter().map(|r| r.headline.as_str()).collect();
    assert_eq!(headlines, vec!["One", "Two", "Three", "Four", "Five"]);

    let quotes = |i: usize| results[i].quotes.as_ref().unwrap();
    assert_eq!(quotes(0).len(), 1);
    assert!(quotes(0)[0].contains("everything we asked for"));
    assert_eq!(quotes(1).len(), 1);
    assert!(quotes(1)[0].contains("lost our shape"));
    // Dead link, empty content: kept with an empty list
    assert!(quotes(2).is_empty());
    // Full body without quotes: kept with an empty list
    assert!(quotes(3).is_empty());
    assert_eq!(quotes(4).len(), 1);
    assert!(quotes(4)[0].contains("dressing room"));
}

#[tokio::test]
async fn test_feed_to_results_span_mode_with_speakers() {
    let mut server = Server::new_async().await;
    mock_site(&mut server).await;
    let config = config_for(
        &server.url(),
        "mode = \"span\"\noutput = \"quotes\"\nattribute_speakers = true",
    );

    let client = ingestion::build_client("pressbox-test", 5).expect("client");
    let feed = ingestion::fetch_feed(&client, &config.feed.url)
        .await
        .expect("fetch feed");
    let inputs = ingestion::collect_articles(&client, &feed, 5).await;
    let results = pipeline::process_articles(&inputs, &config.extraction);

    let quotes = |i: usize| results[i].quotes.as_ref().unwrap();
    assert_eq!(
        quotes(0),
        &vec!["Gary O'Neil: the performance was everything we asked for".to_string()]
    );
    assert_eq!(
        quotes(1),
        &vec!["He: We lost our shape for twenty minutes and it cost us.".to_string()]
    );
    assert_eq!(
        quotes(4),
        &vec!["Mario Lemina: the dressing room is still together".to_string()]
    );
}

#[tokio::test]
async fn test_summary_mode_fallback_for_quoteless_article() {
    let mut server = Server::new_async().await;
    mock_site(&mut server).await;
    let config = config_for(
        &server.url(),
        "mode = \"paragraph\"\noutput = \"summary\"\nsummary_limit = 300",
    );

    let client = ingestion::build_client("pressbox-test", 5).expect("client");
    let feed = ingestion::fetch_feed(&client, &config.feed.url)
        .await
        .expect("fetch feed");
    let inputs = ingestion::collect_articles(&client, &feed, 5).await;
    let results = pipeline::process_articles(&inputs, &config.extraction);

    // Article four: summary present, no "Quotes:" suffix
    let four = results[3].summary.as_ref().unwrap();
    assert!(four.len() <= 303);
    assert!(!four.contains("Quotes: "));
    // Article three had nothing at all: fixed placeholder
    assert_eq!(results[2].summary.as_deref(), Some("Summary not available."));
    // Article one: summary with attributed quote appended
    let one = results[0].summary.as_ref().unwrap();
    assert!(one.contains("Quotes: "));
    assert!(one.contains("(Gary O'Neil)"));
}

#[tokio::test]
async fn test_http_api_end_to_end() {
    let mut server = Server::new_async().await;
    mock_site(&mut server).await;
    let config = config_for(&server.url(), "mode = \"paragraph\"\noutput = \"quotes\"");

    let state = AppState {
        started_at: Utc::now(),
        config: Arc::new(config),
        client: reqwest::Client::new(),
    };
    let client = RocketClient::tracked(build_rocket(state)).await.expect("rocket");

    let resp = client.get("/api/articles").dispatch().await;
    assert_eq!(resp.status(), Status::Ok);
    assert_eq!(
        resp.content_type().map(|c| c.to_string()).as_deref(),
        Some("application/json")
    );
    let body: Vec<ArticleResult> =
        serde_json::from_str(&resp.into_string().await.unwrap()).unwrap();
    assert_eq!(body.len(), 5);
    assert_eq!(body[0].headline, "One");
    assert!(body[2].quotes.as_ref().unwrap().is_empty());
}
