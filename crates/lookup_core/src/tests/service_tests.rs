use super::*;
use axum::{extract::Path, http::StatusCode as HttpStatus, response::IntoResponse, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

async fn dictionary_entry(Path(word): Path<String>) -> axum::response::Response {
    match word.as_str() {
        "lexicon" => Json(json!([
            {
                "word": "lexicon",
                "meanings": [
                    {
                        "partOfSpeech": "noun",
                        "definitions": [
                            { "definition": "a dictionary" },
                            { "definition": "a vocabulary" }
                        ]
                    }
                ]
            }
        ]))
        .into_response(),
        "ice cream" => Json(json!([
            {
                "word": "ice cream",
                "meanings": [
                    {
                        "partOfSpeech": "noun",
                        "definitions": [{ "definition": "a frozen dessert" }]
                    }
                ]
            }
        ]))
        .into_response(),
        "hollow" => Json(json!([])).into_response(),
        "garbled" => (HttpStatus::OK, "not json").into_response(),
        "overload" => (HttpStatus::SERVICE_UNAVAILABLE, "try later").into_response(),
        _ => (
            HttpStatus::NOT_FOUND,
            Json(json!({
                "title": "No Definitions Found",
                "message": "Sorry pal, we couldn't find definitions for the word you were looking for.",
                "resolution": "You can try the search again at later time or head to the web instead."
            })),
        )
            .into_response(),
    }
}

async fn spawn_dictionary_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/entries/en/:word", axum::routing::get(dictionary_entry));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/entries/en")
}

#[tokio::test]
async fn returns_word_with_definitions_in_order() {
    let base_url = spawn_dictionary_server().await;
    let service = HttpLookupService::new(&base_url).expect("service");

    let word = service.lookup("lexicon").await.expect("lookup");

    assert_eq!(word.text, "lexicon");
    assert_eq!(
        word.definitions,
        vec!["a dictionary".to_string(), "a vocabulary".to_string()]
    );
}

#[tokio::test]
async fn trims_and_percent_encodes_the_word() {
    let base_url = spawn_dictionary_server().await;
    let service = HttpLookupService::new(&format!("{base_url}/")).expect("service");

    let word = service.lookup("  ice cream ").await.expect("lookup");

    assert_eq!(word.text, "ice cream");
}

#[tokio::test]
async fn missing_word_is_not_found() {
    let base_url = spawn_dictionary_server().await;
    let service = HttpLookupService::new(&base_url).expect("service");

    let err = service.lookup("qwzx").await.expect_err("missing word");

    assert_eq!(err, LookupError::not_found("qwzx"));
}

#[tokio::test]
async fn empty_entry_list_is_not_found() {
    let base_url = spawn_dictionary_server().await;
    let service = HttpLookupService::new(&base_url).expect("service");

    let err = service.lookup("hollow").await.expect_err("empty entries");

    assert!(err.is_not_found());
}

#[tokio::test]
async fn blank_word_is_not_found_without_request() {
    let service = HttpLookupService::new("http://127.0.0.1:9/entries/en").expect("service");

    let err = service.lookup("   ").await.expect_err("blank word");

    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_errors_and_bad_bodies_are_transport_errors() {
    let base_url = spawn_dictionary_server().await;
    let service = HttpLookupService::new(&base_url).expect("service");

    for word in ["overload", "garbled"] {
        let err = service.lookup(word).await.expect_err("transport failure");
        assert!(matches!(err, LookupError::Transport(_)), "{word}: {err}");
    }
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let service = HttpLookupService::new(&format!("http://{addr}/entries/en")).expect("service");

    let err = service.lookup("lexicon").await.expect_err("refused");

    assert!(matches!(err, LookupError::Transport(_)));
}

#[test]
fn rejects_base_urls_that_cannot_carry_a_path() {
    assert!(HttpLookupService::new("not a url").is_err());
    assert!(HttpLookupService::new("mailto:words@example.com").is_err());
}
