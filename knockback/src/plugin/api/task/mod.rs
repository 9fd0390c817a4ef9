use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

#[async_trait::async_trait]
pub trait TaskHandler: Send + Sync + 'static {
    async fn run(&self);
}

/// Runs `handler` every `interval` until `token` is cancelled.
///
/// Cancellation wakes the task right away; a run is never started after the token fired.
pub fn start_loop<H>(interval: Duration, handler: Arc<H>, token: CancellationToken) -> JoinHandle<()>
where
    H: TaskHandler,
{
    tokio::spawn(run_task_timer(interval, handler, token))
}

async fn run_task_timer<H>(interval: Duration, handler: Arc<H>, token: CancellationToken)
where
    H: TaskHandler,
{
    loop {
        tokio::select! {
            () = token.cancelled() => break,
            () = sleep(interval) => {}
        }

        if token.is_cancelled() {
            break;
        }
        handler.run().await;
    }
}
