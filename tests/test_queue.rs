use std::io::{self, Write as _};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt as _, BufReader, ReadBuf};

use venue_checkin::{Client, Endpoints, Error};

fn client() -> Client {
    let endpoints = Endpoints::new("http://127.0.0.1:9/v2", "token").unwrap();
    Client::new(endpoints, Duration::from_secs(5)).unwrap()
}

fn near(request: &venue_checkin::SearchRequest) -> Option<String> {
    request
        .request
        .url()
        .query_pairs()
        .find(|(key, _)| key == "near")
        .map(|(_, value)| value.into_owned())
}

#[tokio::test]
async fn test_one_request_per_line_in_order() {
    let client = client();
    let (tx, mut rx) = venue_checkin::channel();

    let input: &[u8] = b"Brooklyn, NY\nQueens, NY\r\nStaten Island, NY\n";
    let count = venue_checkin::enqueue(input, &client, tx).await.unwrap();
    assert_eq!(count, 3);

    let mut locations = Vec::new();

    while let Some(request) = rx.recv().await {
        assert_eq!(*request.request.method(), reqwest::Method::GET);
        assert_eq!(near(&request).as_deref(), Some(request.location.as_str()));
        locations.push(request.location);
    }

    assert_eq!(locations, ["Brooklyn, NY", "Queens, NY", "Staten Island, NY"]);
}

#[tokio::test]
async fn test_blank_lines_pass_through() {
    let client = client();
    let (tx, mut rx) = venue_checkin::channel();

    let input: &[u8] = b"Brooklyn, NY\n\nQueens, NY";
    let count = venue_checkin::enqueue(input, &client, tx).await.unwrap();
    assert_eq!(count, 3);

    let mut locations = Vec::new();

    while let Some(request) = rx.recv().await {
        locations.push(request.location);
    }

    assert_eq!(locations, ["Brooklyn, NY", "", "Queens, NY"]);
}

#[tokio::test]
async fn test_non_utf8_line_is_searched() {
    let client = client();
    let (tx, mut rx) = venue_checkin::channel();

    let input: &[u8] = b"Brooklyn, NY\nZ\xfcrich\nQueens, NY\n";
    let count = venue_checkin::enqueue(input, &client, tx).await.unwrap();
    assert_eq!(count, 3);

    let mut requests = Vec::new();

    while let Some(request) = rx.recv().await {
        requests.push(request);
    }

    let locations = requests.iter().map(|r| r.location.as_str()).collect::<Vec<_>>();
    assert_eq!(locations, ["Brooklyn, NY", "Z\u{fffd}rich", "Queens, NY"]);

    // The raw byte goes out percent-encoded.
    let query = requests[1].request.url().query().unwrap_or_default();
    assert!(query.contains("&near=Z%FCrich&"), "{}", query);
}

/// Fails every read.
struct Broken;

impl AsyncRead for Broken {
    fn poll_read(
        self: Pin<&mut Self>,
        _: &mut Context<'_>,
        _: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, "disk gone")))
    }
}

#[tokio::test]
async fn test_read_error_is_fatal() {
    let client = client();
    let (tx, mut rx) = venue_checkin::channel();

    let input = BufReader::new((&b"Brooklyn, NY\n"[..]).chain(Broken));
    let error = venue_checkin::enqueue(input, &client, tx).await.unwrap_err();
    assert!(matches!(error, Error::Read(..)), "{:?}", error);

    // The queue is closed after what was read before the error.
    assert_eq!(rx.recv().await.map(|r| r.location).as_deref(), Some("Brooklyn, NY"));
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_stops_when_consumer_is_gone() {
    let client = client();
    let (tx, rx) = venue_checkin::channel();
    drop(rx);

    let input: &[u8] = b"Brooklyn, NY\nQueens, NY\n";
    let count = venue_checkin::enqueue(input, &client, tx).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_input_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Brooklyn, NY").unwrap();
    writeln!(file, "Queens, NY").unwrap();
    file.flush().unwrap();

    let client = client();
    let (tx, mut rx) = venue_checkin::channel();

    let input = venue_checkin::open_input(file.path()).await.unwrap();
    let count = venue_checkin::enqueue(input, &client, tx).await.unwrap();
    assert_eq!(count, 2);

    assert_eq!(rx.recv().await.map(|r| r.location).as_deref(), Some("Brooklyn, NY"));
    assert_eq!(rx.recv().await.map(|r| r.location).as_deref(), Some("Queens, NY"));
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");

    match venue_checkin::open_input(&path).await {
        Err(Error::Open { path: actual, .. }) => assert_eq!(actual, path),
        other => panic!("expected open error, got {:?}", other.map(|_| ())),
    }
}
