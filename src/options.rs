use std::time::Duration;

use crate::engine::Engine;
use crate::keys::Modifier;

/// Delay after a keyboard clipboard shortcut whose effect cannot be observed.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(100);

/// Id of the hidden textarea used to shuttle text through the clipboard.
pub const DEFAULT_SCRATCH_ID: &str = "__clipboard_temp__";

/// Bounded polling with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Upper bound on total time spent waiting between checks.
    pub timeout: Duration,
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub backoff: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(100),
            initial_interval: Duration::from_millis(10),
            max_interval: Duration::from_millis(50),
            backoff: 2,
        }
    }
}

impl PollPolicy {
    /// Sleep intervals a poll may take, in order, until the timeout is spent.
    pub fn intervals(&self) -> impl Iterator<Item = Duration> + '_ {
        let mut waited = Duration::ZERO;
        let mut next = self.initial_interval.max(Duration::from_millis(1));
        std::iter::from_fn(move || {
            if waited >= self.timeout {
                return None;
            }
            let step = next.min(self.timeout - waited);
            waited += step;
            next = (next * self.backoff.max(1)).min(self.max_interval.max(next));
            Some(step)
        })
    }
}

#[derive(Debug, Clone)]
pub struct ClipboardOptions {
    pub settle: Duration,
    pub poll: PollPolicy,
    pub modifier: Modifier,
    pub scratch_id: String,
    /// Skip engine detection and use this family.
    pub engine: Option<Engine>,
}

impl Default for ClipboardOptions {
    fn default() -> Self {
        Self {
            settle: DEFAULT_SETTLE,
            poll: PollPolicy::default(),
            modifier: Modifier::platform(),
            scratch_id: DEFAULT_SCRATCH_ID.to_string(),
            engine: None,
        }
    }
}

impl ClipboardOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Upper bound for polls waiting on an observable effect.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.poll.timeout = timeout;
        self
    }

    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn with_scratch_id(mut self, id: impl Into<String>) -> Self {
        self.scratch_id = id.into();
        self
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = Some(engine);
        self
    }

    pub(crate) fn scratch_selector(&self) -> String {
        format!("#{}", self.scratch_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_default_options() {
        let options = ClipboardOptions::default();
        assert_eq!(options.settle, ms(100));
        assert_eq!(options.poll.timeout, ms(100));
        assert_eq!(options.modifier, Modifier::platform());
        assert_eq!(options.scratch_selector(), "#__clipboard_temp__");
        assert_eq!(options.engine, None);
    }

    #[test]
    fn test_builder_overrides() {
        let options = ClipboardOptions::new()
            .with_settle(ms(5))
            .with_timeout(ms(250))
            .with_modifier(Modifier::Meta)
            .with_scratch_id("scratch")
            .with_engine(Engine::Firefox);
        assert_eq!(options.settle, ms(5));
        assert_eq!(options.poll.timeout, ms(250));
        assert_eq!(options.modifier, Modifier::Meta);
        assert_eq!(options.scratch_selector(), "#scratch");
        assert_eq!(options.engine, Some(Engine::Firefox));
    }

    #[test]
    fn test_default_intervals_back_off_and_stop_at_timeout() {
        let policy = PollPolicy::default();
        let steps: Vec<_> = policy.intervals().collect();
        assert_eq!(steps, vec![ms(10), ms(20), ms(40), ms(30)]);
        assert_eq!(steps.iter().sum::<Duration>(), ms(100));
    }

    #[test]
    fn test_intervals_capped_by_max_interval() {
        let policy = PollPolicy {
            timeout: ms(200),
            initial_interval: ms(40),
            max_interval: ms(50),
            backoff: 2,
        };
        let steps: Vec<_> = policy.intervals().collect();
        assert_eq!(steps, vec![ms(40), ms(50), ms(50), ms(50), ms(10)]);
    }

    #[test]
    fn test_zero_timeout_never_sleeps() {
        let policy = PollPolicy {
            timeout: Duration::ZERO,
            ..PollPolicy::default()
        };
        assert_eq!(policy.intervals().count(), 0);
    }
}
