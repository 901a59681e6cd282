use std::future::Future;
use std::time::Duration;

/// Run `op` up to `attempts` times with exponentially doubling delay between
/// attempts. The closure receives the 1-based attempt number. The last
/// attempt's error is surfaced once attempts are exhausted.
pub async fn with_backoff<T, E, F, Fut>(
    attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut delay = base_delay;
    for attempt in 1..attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                log::debug!("Attempt {attempt}/{attempts} failed, retrying in {delay:?}: {e}");
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }
    }
    op(attempts).await
}
