/// Integration tests for EventReader over in-memory byte streams.
use bytes::Bytes;
use futures_util::StreamExt;
use modelstream::error::StreamError;
use modelstream::sse::EventReader;
use modelstream::traits::{ByteStream, HttpError};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct Tick {
    n: u32,
}

fn body(chunks: &[&'static str]) -> ByteStream {
    let items: Vec<Result<Bytes, HttpError>> =
        chunks.iter().map(|c| Ok(Bytes::from_static(c.as_bytes()))).collect();
    Box::pin(futures::stream::iter(items))
}

#[tokio::test]
async fn test_values_in_order_then_done() {
    let mut reader: EventReader<Tick> = EventReader::new(body(&[
        "data: {\"n\":1}\n",
        "\n: comment\n",
        "data: {\"n\":2}\r\n\r\n",
        "data: [DONE]\n",
    ]));

    assert_eq!(reader.read().await.unwrap(), Some(Tick { n: 1 }));
    assert_eq!(reader.read().await.unwrap(), Some(Tick { n: 2 }));
    assert_eq!(reader.read().await.unwrap(), None);
    assert_eq!(reader.read().await.unwrap(), None);
    assert!(reader.is_done());
    reader.close();
}

#[tokio::test]
async fn test_byte_at_a_time_matches_whole_body() {
    const WHOLE: &str = "data: {\"n\":7}\n\ndata: {\"n\":8}\n\ndata: [DONE]\n";
    let singles: Vec<&'static str> = (0..WHOLE.len()).map(|i| &WHOLE[i..i + 1]).collect();

    let whole: Vec<Tick> = EventReader::new(body(&[WHOLE]))
        .into_stream()
        .map(|r| r.unwrap())
        .collect()
        .await;
    let split: Vec<Tick> = EventReader::new(body(&singles))
        .into_stream()
        .map(|r| r.unwrap())
        .collect()
        .await;

    assert_eq!(whole, vec![Tick { n: 7 }, Tick { n: 8 }]);
    assert_eq!(whole, split);
}

#[tokio::test]
async fn test_unexpected_event_field() {
    let mut reader: EventReader<Tick> =
        EventReader::new(body(&["event: ping\n", "data: {\"n\":1}\n"]));

    let err = reader.read().await.unwrap_err();
    assert_eq!(err.to_string(), "unexpected event type: event");
}

#[tokio::test]
async fn test_invalid_json_after_good_value() {
    let mut reader: EventReader<Tick> =
        EventReader::new(body(&["data: {\"n\":1}\n", "data: {\"n\":\n"]));

    assert_eq!(reader.read().await.unwrap(), Some(Tick { n: 1 }));
    assert!(matches!(
        reader.read().await,
        Err(StreamError::InvalidJson(_))
    ));
}

#[tokio::test]
async fn test_into_stream_yields_error_once() {
    let items: Vec<Result<Bytes, HttpError>> = vec![
        Ok(Bytes::from_static(b"data: {\"n\":3}\n")),
        Err(HttpError::Io("reset by peer".to_string())),
    ];
    let reader: EventReader<Tick> = EventReader::new(Box::pin(futures::stream::iter(items)));

    let results: Vec<Result<Tick, StreamError>> = reader.into_stream().collect().await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap(), &Tick { n: 3 });
    assert_eq!(
        results[1].as_ref().unwrap_err().to_string(),
        "IO error: reset by peer"
    );
}

#[tokio::test]
async fn test_non_utf8_comment_between_values() {
    let items: Vec<Result<Bytes, HttpError>> = vec![
        Ok(Bytes::from_static(b"data: {\"n\":1}\n")),
        Ok(Bytes::from_static(b": caf\xe9\n")),
        Ok(Bytes::from_static(b"data: {\"n\":2}\n\ndata: [DONE]\n")),
    ];
    let reader: EventReader<Tick> = EventReader::new(Box::pin(futures::stream::iter(items)));

    let values: Vec<Tick> = reader.into_stream().map(|r| r.unwrap()).collect().await;
    assert_eq!(values, vec![Tick { n: 1 }, Tick { n: 2 }]);
}

#[tokio::test]
async fn test_runaway_line_is_rejected() {
    let chunk = Bytes::from(vec![b'a'; 64 * 1024]);
    let items: Vec<Result<Bytes, HttpError>> = std::iter::repeat(chunk)
        .take(32)
        .map(Ok)
        .collect();
    let mut reader: EventReader<Tick> = EventReader::new(Box::pin(futures::stream::iter(items)));

    let err = reader.read().await.unwrap_err();
    assert!(matches!(err, StreamError::LineTooLong { .. }));
    assert!(!err.is_truncation());
}
