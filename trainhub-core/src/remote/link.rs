//! Remote connection lifecycle
//!
//! ```text
//!        search ok                    query: Disconnected
//! Idle ────────────► Connected(handle) ───────────────────► Idle
//!  │ ▲                                                     (retry later)
//!  └─┘ search Timeout, retry after retry_interval_ms
//! ```
//!
//! The first search happens on the first poll. Only timeouts and
//! disconnects are absorbed; every other remote failure is returned.

use trainhub_hal::{ButtonSet, Color, RemoteAcquirer, RemoteError, RemoteHandle};

use crate::config::RemoteTiming;

/// Connection state; the handle exists only while connected
pub enum LinkState<H> {
    Idle,
    Connected(H),
}

/// Outcome of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionEvent {
    /// Not connected, nothing happened
    #[default]
    None,
    /// Connected; carries the buttons currently held (empty right after binding)
    Connected(ButtonSet),
    /// The remote went away this poll
    Lost,
}

/// Owns the remote connection and its retry bookkeeping
pub struct RemoteLink<A: RemoteAcquirer> {
    acquirer: A,
    state: LinkState<A::Handle>,
    last_attempt: Option<u64>,
    timing: RemoteTiming,
    indicator: Color,
}

impl<A: RemoteAcquirer> RemoteLink<A> {
    /// Create an idle link
    ///
    /// `indicator` is shown on the remote once it is bound.
    pub fn new(acquirer: A, timing: RemoteTiming, indicator: Color) -> Self {
        Self {
            acquirer,
            state: LinkState::Idle,
            last_attempt: None,
            timing,
            indicator,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, LinkState::Connected(_))
    }

    pub fn state(&self) -> &LinkState<A::Handle> {
        &self.state
    }

    /// Name of the bound remote
    pub fn remote_name(&self) -> Option<&str> {
        match &self.state {
            LinkState::Connected(handle) => Some(handle.name()),
            LinkState::Idle => None,
        }
    }

    /// Time of the last failed search or of the last disconnect
    pub fn last_attempt(&self) -> Option<u64> {
        self.last_attempt
    }

    pub fn acquirer(&self) -> &A {
        &self.acquirer
    }

    /// Whether an idle link would search at `now_ms`
    pub fn search_due(&self, now_ms: u64) -> bool {
        match self.last_attempt {
            None => true,
            Some(last) => {
                now_ms.saturating_sub(last) >= u64::from(self.timing.retry_interval_ms)
            }
        }
    }

    /// Advance the connection by one poll
    pub async fn poll(&mut self, now_ms: u64) -> Result<ConnectionEvent, RemoteError> {
        if let LinkState::Connected(handle) = &mut self.state {
            let result = handle.pressed_buttons().await;
            return match result {
                Ok(pressed) => Ok(ConnectionEvent::Connected(pressed)),
                Err(RemoteError::Disconnected) => {
                    self.state = LinkState::Idle;
                    self.last_attempt = Some(now_ms);
                    Ok(ConnectionEvent::Lost)
                }
                Err(e) => Err(e),
            };
        }

        if !self.search_due(now_ms) {
            return Ok(ConnectionEvent::None);
        }

        match self.acquirer.acquire(self.timing.search_timeout_ms).await {
            Ok(mut handle) => match handle.set_indicator(self.indicator).await {
                Ok(()) => {
                    self.state = LinkState::Connected(handle);
                    Ok(ConnectionEvent::Connected(ButtonSet::EMPTY))
                }
                // Gone again before it could be greeted; retry later
                Err(RemoteError::Disconnected) => {
                    self.last_attempt = Some(now_ms);
                    Ok(ConnectionEvent::None)
                }
                Err(e) => Err(e),
            },
            Err(RemoteError::Timeout) => {
                self.last_attempt = Some(now_ms);
                Ok(ConnectionEvent::None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRemote;
    use embassy_futures::block_on;
    use trainhub_hal::RemoteButton;

    fn link(remote: &ScriptedRemote) -> RemoteLink<ScriptedRemote> {
        RemoteLink::new(remote.clone(), RemoteTiming::default(), Color::Green)
    }

    #[test]
    fn test_first_poll_searches() {
        let remote = ScriptedRemote::new();
        remote.script().searches.push_back(Ok(()));
        let mut link = link(&remote);

        let event = block_on(link.poll(0)).unwrap();
        assert_eq!(event, ConnectionEvent::Connected(ButtonSet::EMPTY));
        assert!(link.is_connected());
        assert_eq!(link.remote_name(), Some("test remote"));

        let script = remote.script();
        assert_eq!(script.search_calls, 1);
        assert_eq!(script.last_search_timeout, Some(2000));
        assert_eq!(script.indicator, Some(Color::Green));
        assert_eq!(script.query_calls, 0);
    }

    #[test]
    fn test_timeout_backs_off() {
        let remote = ScriptedRemote::new();
        let mut link = link(&remote);

        assert_eq!(block_on(link.poll(0)), Ok(ConnectionEvent::None));
        assert!(!link.is_connected());
        assert_eq!(link.last_attempt(), Some(0));

        for t in (100..10_000).step_by(100) {
            assert_eq!(block_on(link.poll(t)), Ok(ConnectionEvent::None));
        }
        assert_eq!(remote.script().search_calls, 1);

        remote.script().searches.push_back(Ok(()));
        assert_eq!(
            block_on(link.poll(10_000)),
            Ok(ConnectionEvent::Connected(ButtonSet::EMPTY))
        );
        assert_eq!(remote.script().search_calls, 2);
    }

    #[test]
    fn test_connected_reports_pressed() {
        let remote = ScriptedRemote::new();
        remote.script().searches.push_back(Ok(()));
        let mut link = link(&remote);
        block_on(link.poll(0)).unwrap();

        let held = ButtonSet::from_buttons(&[RemoteButton::RightPlus]);
        remote.script().queries.push_back(Ok(held));
        assert_eq!(block_on(link.poll(100)), Ok(ConnectionEvent::Connected(held)));
        assert_eq!(
            block_on(link.poll(200)),
            Ok(ConnectionEvent::Connected(ButtonSet::EMPTY))
        );
    }

    #[test]
    fn test_disconnect_goes_idle_and_waits() {
        let remote = ScriptedRemote::new();
        remote.script().searches.push_back(Ok(()));
        let mut link = link(&remote);
        block_on(link.poll(0)).unwrap();

        remote
            .script()
            .queries
            .push_back(Err(RemoteError::Disconnected));
        assert_eq!(block_on(link.poll(500)), Ok(ConnectionEvent::Lost));
        assert!(!link.is_connected());
        assert_eq!(link.remote_name(), None);

        remote.script().searches.push_back(Ok(()));
        assert_eq!(block_on(link.poll(10_499)), Ok(ConnectionEvent::None));
        assert_eq!(remote.script().search_calls, 1);
        assert_eq!(
            block_on(link.poll(10_500)),
            Ok(ConnectionEvent::Connected(ButtonSet::EMPTY))
        );
    }

    #[test]
    fn test_not_found_is_fatal() {
        let remote = ScriptedRemote::new();
        remote.script().searches.push_back(Err(RemoteError::NotFound));
        let mut link = link(&remote);
        assert_eq!(block_on(link.poll(0)), Err(RemoteError::NotFound));
    }

    #[test]
    fn test_query_failure_other_than_disconnect_is_fatal() {
        let remote = ScriptedRemote::new();
        remote.script().searches.push_back(Ok(()));
        let mut link = link(&remote);
        block_on(link.poll(0)).unwrap();

        remote.script().queries.push_back(Err(RemoteError::Fatal(7)));
        assert_eq!(block_on(link.poll(100)), Err(RemoteError::Fatal(7)));
    }

    #[test]
    fn test_indicator_disconnect_counts_as_failed_search() {
        let remote = ScriptedRemote::new();
        {
            let mut script = remote.script();
            script.searches.push_back(Ok(()));
            script.indicator_error = Some(RemoteError::Disconnected);
        }
        let mut link = link(&remote);
        assert_eq!(block_on(link.poll(0)), Ok(ConnectionEvent::None));
        assert!(!link.is_connected());
        assert_eq!(link.last_attempt(), Some(0));
    }

    #[test]
    fn test_indicator_uses_configured_color() {
        let remote = ScriptedRemote::new();
        remote.script().searches.push_back(Ok(()));
        let mut link = RemoteLink::new(remote.clone(), RemoteTiming::default(), Color::Blue);
        block_on(link.poll(0)).unwrap();
        assert_eq!(remote.script().indicator, Some(Color::Blue));
    }
}
