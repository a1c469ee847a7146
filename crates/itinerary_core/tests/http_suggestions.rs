use itinerary_core::{
    AutoConfirm, EditorConfig, HttpSuggestionProvider, Itinerary, ItineraryStore,
    MemorySlotStorage, SuggestionError, SuggestionProvider, SuggestionRequest, SuggestionSource,
};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Serves exactly one HTTP response on a loopback port and hands back the raw request.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().expect("flush response");
        request
    });
    (endpoint(addr), handle)
}

fn read_request(stream: &mut impl Read) -> String {
    let mut raw = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let read = stream.read(&mut chunk).expect("read request");
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&raw);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let body_len = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if raw.len() >= header_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&raw).into_owned()
}

fn endpoint(addr: SocketAddr) -> String {
    format!("http://{addr}/suggest")
}

fn request_for_day_one() -> SuggestionRequest {
    SuggestionRequest {
        day_index: 0,
        date: "Day 1".to_string(),
        context: Itinerary::starter(),
    }
}

#[test]
fn ok_response_yields_suggestions_and_posts_json() {
    let (url, server) = serve_once("200 OK", r#"{"suggestions":["a"]}"#);
    let provider = HttpSuggestionProvider::new(&url, TIMEOUT).unwrap();

    let suggestions = provider.suggest(&request_for_day_one()).unwrap();
    assert_eq!(suggestions, vec!["a".to_string()]);

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /suggest HTTP/1.1\r\n"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(request.contains(r#""dayIndex":0"#));
    assert!(request.contains(r#""date":"Day 1""#));
    assert!(request.contains(r#""context":[{"#));
}

#[test]
fn server_error_status_is_reported() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
    let provider = HttpSuggestionProvider::new(&url, TIMEOUT).unwrap();

    let err = provider.suggest(&request_for_day_one()).unwrap_err();
    assert_eq!(err, SuggestionError::Status(500));
    server.join().unwrap();
}

#[test]
fn non_conforming_ok_body_is_malformed() {
    let (url, server) = serve_once("200 OK", r#"{"ideas":["a"]}"#);
    let provider = HttpSuggestionProvider::new(&url, TIMEOUT).unwrap();

    let err = provider.suggest(&request_for_day_one()).unwrap_err();
    assert!(matches!(err, SuggestionError::MalformedBody(_)), "got {err}");
    server.join().unwrap();
}

#[test]
fn refused_connection_is_a_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let provider = HttpSuggestionProvider::new(&endpoint(addr), TIMEOUT).unwrap();

    let err = provider.suggest(&request_for_day_one()).unwrap_err();
    assert!(matches!(err, SuggestionError::Transport(_)), "got {err}");
}

#[test]
fn store_falls_back_when_service_answers_non_ok() {
    let (url, server) = serve_once("503 Service Unavailable", "");
    let provider = HttpSuggestionProvider::new(&url, TIMEOUT).unwrap();
    let mut store =
        ItineraryStore::open(MemorySlotStorage::new(), AutoConfirm, EditorConfig::default());

    let outcome = store.suggest(0, &provider).expect("day 0 exists");

    assert_eq!(outcome.source, SuggestionSource::LocalFallback);
    assert_eq!(outcome.added, 3);
    assert_eq!(store.itinerary().day(0).unwrap().activities.len(), 4);
    assert!(!store.is_suggesting());
    server.join().unwrap();
}
