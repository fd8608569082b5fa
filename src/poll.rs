use std::future::Future;

use crate::error::PageError;
use crate::options::PollPolicy;
use crate::page::PageDriver;

/// Run `check` until it reports `true` or the policy's time budget is spent.
///
/// Sleeps go through [`PageDriver::wait`]. Returns `Ok(false)` when the budget
/// runs out; callers treat that as "proceed anyway", the same outcome a fixed
/// delay would have had.
pub async fn poll_until<F, Fut>(
    page: &dyn PageDriver,
    policy: &PollPolicy,
    mut check: F,
) -> Result<bool, PageError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, PageError>>,
{
    if check().await? {
        return Ok(true);
    }
    for step in policy.intervals() {
        page.wait(step).await?;
        if check().await? {
            return Ok(true);
        }
    }
    tracing::debug!(timeout = ?policy.timeout, "poll budget spent without a match");
    Ok(false)
}
