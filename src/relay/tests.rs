use std::sync::Mutex;

use async_trait::async_trait;
use mockito::{Matcher, Server, ServerGuard};

use super::*;
use crate::auth::Token;
use crate::giphy::{GifCache, GiphyClient};

const CHANNEL: u64 = 42;
const BOT: u64 = 1;
const USER: u64 = 2;

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<(u64, String)>>,
}

impl RecordingSink {
    fn replies(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(channel, text)| {
                assert_eq!(*channel, CHANNEL);
                text.clone()
            })
            .collect()
    }
}

#[async_trait]
impl ChatSink for RecordingSink {
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((channel_id, text.to_string()));
        Ok(())
    }
}

struct Harness {
    jenkins: ServerGuard,
    giphy: ServerGuard,
    relay: Relay,
}

impl Harness {
    async fn new() -> Self {
        let jenkins = Server::new_async().await;
        let giphy = Server::new_async().await;

        let client = JenkinsClient::new(&jenkins.url(), "jenkins", Token::from("t")).unwrap();
        let gifs = GifResolver::new(
            GiphyClient::new(&giphy.url(), Token::from("key")).unwrap(),
            GifCache::default(),
        );
        let relay = Relay::new(client, gifs, Interpreter::default(), Glyphs::default());
        relay.set_identity(BOT);

        Self {
            jenkins,
            giphy,
            relay,
        }
    }

    async fn send(&self, author_id: u64, text: &str) -> Vec<String> {
        let sink = RecordingSink::default();
        let message = InboundMessage {
            author_id,
            channel_id: CHANNEL,
            text: text.to_string(),
        };
        self.relay.on_message(&sink, &message).await;
        sink.replies()
    }
}

fn gif_body(url: &str) -> String {
    serde_json::json!({
        "data": [{"id": "x1", "images": {"original": {"url": url}}}]
    })
    .to_string()
}

#[tokio::test]
async fn test_own_messages_are_ignored() {
    let harness = Harness::new().await;

    assert!(harness.send(BOT, "!help").await.is_empty());
    assert_eq!(harness.send(USER, "!help").await, vec![HELP_TEXT.to_string()]);
}

#[tokio::test]
async fn test_unrecognized_text_gets_no_reply() {
    let mut harness = Harness::new().await;
    let any = harness
        .jenkins
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    assert!(harness.send(USER, "good morning").await.is_empty());
    any.assert_async().await;
}

#[tokio::test]
async fn test_list_jobs_survives_failed_status_lookup() {
    let mut harness = Harness::new().await;
    let _jobs = harness
        .jenkins
        .mock("GET", "/api/json")
        .match_query(Matcher::Any)
        .with_body(r#"{"jobs": [{"name": "build"}, {"name": "fresh"}, {"name": "broken"}]}"#)
        .create_async()
        .await;
    let _build = harness
        .jenkins
        .mock("GET", "/job/build/lastBuild/api/json")
        .with_body(r#"{"result": "SUCCESS"}"#)
        .create_async()
        .await;
    let _fresh = harness
        .jenkins
        .mock("GET", "/job/fresh/lastBuild/api/json")
        .with_status(404)
        .create_async()
        .await;
    let _broken = harness
        .jenkins
        .mock("GET", "/job/broken/lastBuild/api/json")
        .with_body("<html>")
        .create_async()
        .await;

    let replies = harness.send(USER, "!list").await;
    assert_eq!(
        replies,
        vec!["Jenkins Job List:\n✅ **build**\n⚪ **fresh**\n⚪ **broken**\n".to_string()]
    );
}

#[tokio::test]
async fn test_list_jobs_failure() {
    let mut harness = Harness::new().await;
    let _jobs = harness
        .jenkins
        .mock("GET", "/api/json")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let replies = harness.send(USER, "!list").await;
    assert_eq!(
        replies,
        vec![
            "Error fetching Jenkins job list: HTTP request failed with status: 401 (Unauthorized)"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_run_reports_failure_after_fallback() {
    let mut harness = Harness::new().await;
    let _build = harness
        .jenkins
        .mock("POST", "/job/deploy/build")
        .with_status(500)
        .create_async()
        .await;
    let _with_params = harness
        .jenkins
        .mock("POST", "/job/deploy/buildWithParameters")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let replies = harness.send(USER, "!run deploy").await;
    assert_eq!(
        replies,
        vec![
            "Error triggering Jenkins pipeline 'deploy': HTTP request failed with status: 404 (Not Found)"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_run_success() {
    let mut harness = Harness::new().await;
    let _build = harness
        .jenkins
        .mock("POST", "/job/deploy/build")
        .with_status(201)
        .create_async()
        .await;

    assert_eq!(
        harness.send(USER, "!run deploy").await,
        vec!["Jenkins pipeline 'deploy' triggered successfully!".to_string()]
    );
}

#[tokio::test]
async fn test_runparams_triggers_with_every_value() {
    let mut harness = Harness::new().await;
    let trigger = harness
        .jenkins
        .mock("POST", "/job/Job1/buildWithParameters")
        .match_query(Matcher::Regex("^foo=bar&foo=baz&env=prod$".into()))
        .with_status(201)
        .expect(1)
        .create_async()
        .await;

    let replies = harness
        .send(USER, "!runparams\nJob1\nfoo bar\nfoo baz\n\nenv prod")
        .await;

    trigger.assert_async().await;
    assert_eq!(
        replies,
        vec!["Jenkins pipeline 'Job1' triggered successfully!".to_string()]
    );
}

#[tokio::test]
async fn test_runparams_format_error_makes_no_request() {
    let mut harness = Harness::new().await;
    let any = harness
        .jenkins
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let replies = harness.send(USER, "!runparams\nJob1\nfoo").await;

    any.assert_async().await;
    assert_eq!(
        replies,
        vec!["Error handling !runparams: invalid message format: invalid parameter format: 'foo'"
            .to_string()]
    );
}

#[tokio::test]
async fn test_proceed_resolves_pending_input() {
    let mut harness = Harness::new().await;
    let _last = harness
        .jenkins
        .mock("GET", "/job/deploy/lastBuild/api/json")
        .with_body(r#"{"id": "12", "inProgress": true}"#)
        .create_async()
        .await;
    let _pending = harness
        .jenkins
        .mock("GET", "/job/deploy/12/wfapi/pendingInputActions")
        .with_body(r#"[{"id": "Gate1"}]"#)
        .create_async()
        .await;
    let proceed = harness
        .jenkins
        .mock("POST", "/job/deploy/12/input/Gate1/proceedEmpty")
        .expect(1)
        .create_async()
        .await;

    let replies = harness.send(USER, "!proceed deploy").await;

    proceed.assert_async().await;
    assert_eq!(
        replies,
        vec!["Jenkins pipeline 'deploy' proceeded successfully!".to_string()]
    );
}

#[tokio::test]
async fn test_abort_without_pending_input() {
    let mut harness = Harness::new().await;
    let _last = harness
        .jenkins
        .mock("GET", "/job/deploy/lastBuild/api/json")
        .with_body(r#"{"id": "12"}"#)
        .create_async()
        .await;
    let _pending = harness
        .jenkins
        .mock("GET", "/job/deploy/12/wfapi/pendingInputActions")
        .with_body("[]")
        .create_async()
        .await;

    assert_eq!(
        harness.send(USER, "!abort deploy").await,
        vec!["Error aborting Jenkins pipeline 'deploy': no pending input for 'deploy' build #12"
            .to_string()]
    );
}

#[tokio::test]
async fn test_parameters_of_last_build() {
    let mut harness = Harness::new().await;
    let _last = harness
        .jenkins
        .mock("GET", "/job/deploy/lastBuild/api/json")
        .with_body(r#"{"id": "3"}"#)
        .create_async()
        .await;
    let _history = harness
        .jenkins
        .mock("GET", "/job/deploy/api/json")
        .match_query(Matcher::UrlEncoded(
            "tree".into(),
            "builds[actions[parameters[name,value]],number]".into(),
        ))
        .with_body(
            r#"{"builds": [{"number": 3, "actions": [{"parameters": [{"name": "BRANCH", "value": "main"}]}]}]}"#,
        )
        .create_async()
        .await;

    assert_eq!(
        harness.send(USER, "!parameters deploy").await,
        vec!["Parameters from previous run:\n\n**BRANCH:** \nmain".to_string()]
    );
}

#[tokio::test]
async fn test_usage_replies() {
    let harness = Harness::new().await;

    assert_eq!(
        harness.send(USER, "!proceed").await,
        vec!["Usage: !proceed <pipeline_name>".to_string()]
    );
    assert_eq!(
        harness.send(USER, "!gif  ").await,
        vec!["Usage: !gif <search_term>".to_string()]
    );
}

#[tokio::test]
async fn test_gif_search() {
    let mut harness = Harness::new().await;
    let _search = harness
        .giphy
        .mock("GET", "/v1/gifs/search")
        .match_query(Matcher::UrlEncoded("q".into(), "party parrot".into()))
        .with_body(gif_body("https://gifs.test/parrot.gif"))
        .create_async()
        .await;

    assert_eq!(
        harness.send(USER, "!gif party parrot").await,
        vec!["https://gifs.test/parrot.gif".to_string()]
    );
}

#[tokio::test]
async fn test_gif_search_failure() {
    let mut harness = Harness::new().await;
    let _search = harness
        .giphy
        .mock("GET", "/v1/gifs/search")
        .match_query(Matcher::Any)
        .with_status(403)
        .create_async()
        .await;

    assert_eq!(
        harness.send(USER, "!gif cats").await,
        vec!["Couldn't fetch GIF for 'cats': HTTP request failed with status: 403 (Forbidden)"
            .to_string()]
    );
}

#[tokio::test]
async fn test_easter_egg_acknowledges_before_gif() {
    let mut harness = Harness::new().await;
    let _search = harness
        .giphy
        .mock("GET", "/v1/gifs/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "steak".into()),
            Matcher::UrlEncoded("limit".into(), "50".into()),
        ]))
        .with_body(gif_body("https://gifs.test/steak.gif"))
        .create_async()
        .await;

    assert_eq!(
        harness.send(USER, "is it !steak o'clock").await,
        vec!["time".to_string(), "https://gifs.test/steak.gif".to_string()]
    );
}

#[tokio::test]
async fn test_easter_egg_gif_failure_only_acknowledges() {
    let mut harness = Harness::new().await;
    let _search = harness
        .giphy
        .mock("GET", "/v1/gifs/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    assert_eq!(harness.send(USER, "!croikey").await, vec!["mayte".to_string()]);
}
