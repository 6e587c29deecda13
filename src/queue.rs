//! The producer side of the pipeline: one prepared search per input line.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::client::Client;
use crate::error::Error;

/// A prepared search for a single location.
#[derive(Debug)]
pub struct SearchRequest {
    /// The location exactly as it was read from the input.
    pub location: String,
    /// The outbound GET request.
    pub request: reqwest::Request,
}

/// Sending half of the request queue.
pub type Sender = mpsc::UnboundedSender<SearchRequest>;
/// Receiving half of the request queue.
pub type Receiver = mpsc::UnboundedReceiver<SearchRequest>;

/// Construct a new unbounded request queue.
pub fn channel() -> (Sender, Receiver) {
    mpsc::unbounded_channel()
}

/// Open the input file of locations.
pub async fn open_input(path: impl AsRef<Path>) -> Result<BufReader<File>, Error> {
    let path = path.as_ref();

    match File::open(path).await {
        Ok(file) => Ok(BufReader::new(file)),
        Err(source) => Err(Error::Open {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Read `input` line by line and enqueue one search per line in input order.
///
/// Line endings are stripped but lines are otherwise passed through untouched,
/// including blank ones and ones which are not valid UTF-8. Only a failure to
/// read is an error. The queue is closed when this returns since it owns
/// the sender. If the receiving side has already gone away the remaining input
/// is left unread.
///
/// Returns the number of enqueued searches.
pub async fn enqueue<R>(input: R, client: &Client, tx: Sender) -> Result<usize, Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.split(b'\n');
    let mut count = 0usize;

    while let Some(mut line) = lines.next_segment().await.map_err(Error::Read)? {
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        let request = client.search_request(&line)?;

        if tx.send(request).is_err() {
            tracing::debug!(count, "worker stopped, no longer reading input");
            return Ok(count);
        }

        count += 1;
    }

    tracing::debug!(count, "all input enqueued");
    Ok(count)
}
