use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};

/// The body of a successful archive download. Nothing is buffered ahead of time; the bytes are
/// pulled from the connection as the stream is polled. Dropping it closes the connection.
pub struct ArchiveStream(reqwest::Response);

impl ArchiveStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self(response)
    }

    /// Length advertised by the remote, the platform usually doesn't know this ahead of time
    /// since archives are built on the fly.
    pub fn content_length(&self) -> Option<u64> {
        self.0.content_length()
    }

    pub fn into_stream(self) -> BoxStream<'static, Result<Bytes, reqwest::Error>> {
        self.0.bytes_stream().boxed()
    }
}

impl std::fmt::Debug for ArchiveStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveStream")
            .field("status", &self.0.status())
            .field("content_length", &self.0.content_length())
            .finish()
    }
}
