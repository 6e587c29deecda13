use tokio::io::AsyncBufRead;

use crate::client::Client;
use crate::error::Error;
use crate::limiter::Throttle;
use crate::queue;
use crate::worker::{Summary, Worker};

/// Run the producer and the worker concurrently until the input is exhausted
/// and processed, the check-in ceiling is reached, or either side fails.
///
/// The first error cancels the other side.
pub async fn run<R, T>(input: R, client: &Client, worker: &mut Worker<T>) -> Result<Summary, Error>
where
    R: AsyncBufRead + Unpin,
    T: Throttle,
{
    let (tx, rx) = queue::channel();

    let (enqueued, summary) = tokio::try_join!(queue::enqueue(input, client, tx), worker.run(rx))?;

    tracing::debug!(enqueued, "pipeline finished");
    Ok(summary)
}
