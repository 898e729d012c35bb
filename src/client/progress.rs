use async_stream::stream;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use super::state::UploadProgress;

const CHUNK_SIZE: usize = 64 * 1024;

/// Turns a reader into the byte stream fed to the transport, invoking
/// `on_progress` with cumulative totals as each chunk is handed over.
///
/// The callback fires before the chunk is yielded, so the 100% report
/// coincides with the final chunk leaving the reader rather than
/// trailing the request's completion.
pub fn progress_stream<R, F>(
    reader: R,
    total: u64,
    mut on_progress: F,
) -> impl Stream<Item = std::io::Result<Bytes>> + Send
where
    R: AsyncRead + Send + Unpin,
    F: FnMut(UploadProgress) + Send,
{
    stream! {
        let mut loaded: u64 = 0;
        let mut chunks = ReaderStream::with_capacity(reader, CHUNK_SIZE);
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    loaded += bytes.len() as u64;
                    on_progress(UploadProgress::new(loaded, total));
                    yield Ok(bytes);
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }
    }
}
