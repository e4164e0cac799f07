//! Response body types
//!
//! Every handler returns the same boxed body so buffered replies and file
//! streams can share one `Response` type.

use futures::TryStreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// Body type of every response the server produces
pub type ResponseBody = UnsyncBoxBody<Bytes, std::io::Error>;

/// Buffered body
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Body with no bytes (HEAD, 304, 416)
pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Stream a reader in chunks of at most `chunk_size` bytes
///
/// The next chunk is read only when hyper polls for it, so a slow client
/// holds at most one chunk in memory. Dropping the body drops the reader.
pub fn reader_stream<R>(reader: R, chunk_size: usize) -> ResponseBody
where
    R: AsyncRead + Send + 'static,
{
    let stream = ReaderStream::with_capacity(reader, chunk_size).map_ok(Frame::data);
    StreamBody::new(stream).boxed_unsync()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::body::Body;

    #[tokio::test]
    async fn test_full_body() {
        let body = full("hello");
        let bytes = body.collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn test_empty_body() {
        let body = empty();
        assert!(body.is_end_stream());
        let bytes = body.collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_reader_stream_chunks() {
        let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let mut body = reader_stream(std::io::Cursor::new(data.clone()), 1024);

        let mut collected = Vec::new();
        let mut frames = 0;
        while let Some(frame) = body.frame().await {
            let chunk = frame.unwrap().into_data().unwrap();
            assert!(chunk.len() <= 1024);
            collected.extend_from_slice(&chunk);
            frames += 1;
        }
        assert_eq!(collected, data);
        assert!(frames >= 10);
    }
}
