//! Dashboard poller — fetches snapshots on a fixed cadence and re-renders
//! the dashboard view.
//!
//! Each poll is independent: a failed fetch or a non-success response leaves
//! every slot of the view exactly as the previous successful poll left it,
//! and the next tick is the only retry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use groupboard_domain::error::GroupBoardError;
use groupboard_domain::recency::RecencyPolicy;
use groupboard_domain::snapshot::GroupSnapshot;
use groupboard_domain::time::{Timestamp, format_clock, to_unix_seconds};

use crate::page::PageSlots;
use crate::ports::{Clock, DashboardSource, DashboardView, SystemClock};
use crate::render;

/// Poll cadence used when none is configured, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// [`DEFAULT_POLL_INTERVAL_MS`] as a [`Duration`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

/// What a single [`DashboardPoller::poll`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The view was re-rendered with this many groups.
    Rendered { groups: usize },
    /// The response did not carry the success sentinel; nothing changed.
    Skipped { status: String },
    /// Fetching, decoding, or writing the view failed; nothing changed.
    Failed,
    /// Another poll was still in flight; nothing was fetched.
    Busy,
}

/// Clears the in-flight flag when the poll finishes, however it finishes.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Polls a [`DashboardSource`] and renders into a [`DashboardView`].
///
/// The recency policy is owned by the poller, so policies with state (the
/// max-seen reference) persist across polls of this poller only.
pub struct DashboardPoller<S, V, R, C = SystemClock> {
    source: S,
    view: V,
    recency: Mutex<R>,
    clock: C,
    in_flight: AtomicBool,
}

impl<S, V, R> DashboardPoller<S, V, R, SystemClock>
where
    S: DashboardSource,
    V: DashboardView,
    R: RecencyPolicy,
{
    /// Create a poller reading the system clock.
    pub fn new(source: S, view: V, recency: R) -> Self {
        Self::with_clock(source, view, recency, SystemClock)
    }
}

impl<S, V, R, C> DashboardPoller<S, V, R, C>
where
    S: DashboardSource,
    V: DashboardView,
    R: RecencyPolicy,
    C: Clock,
{
    /// Create a poller with an explicit clock.
    pub fn with_clock(source: S, view: V, recency: R, clock: C) -> Self {
        Self {
            source,
            view,
            recency: Mutex::new(recency),
            clock,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Borrow the view this poller renders into.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Fetch once and, on success, re-render the view.
    ///
    /// Never returns an error: failures are logged and leave the view
    /// untouched.
    pub async fn poll(&self) -> PollOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("previous dashboard poll still in flight, skipping");
            return PollOutcome::Busy;
        };

        let response = match self.source.fetch().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(%err, "error updating dashboard");
                return PollOutcome::Failed;
            }
        };

        if !response.is_success() {
            tracing::debug!(status = %response.status, "dashboard response not successful, ignoring");
            return PollOutcome::Skipped {
                status: response.status,
            };
        }

        let groups = response.data.len();
        match self.apply(&response.data) {
            Ok(()) => {
                tracing::debug!(groups, "dashboard updated");
                PollOutcome::Rendered { groups }
            }
            Err(err) => {
                tracing::error!(%err, "failed to write dashboard view");
                PollOutcome::Failed
            }
        }
    }

    /// Replace the groups container with one card per group.
    ///
    /// # Errors
    ///
    /// Returns [`GroupBoardError::View`] if the view cannot be written.
    pub fn render(&self, groups: &[GroupSnapshot]) -> Result<(), GroupBoardError> {
        let html = self.cards(groups, self.clock.now())?;
        self.view.replace_groups(html)
    }

    fn cards(&self, groups: &[GroupSnapshot], now: Timestamp) -> Result<String, GroupBoardError> {
        let mut recency = self.recency.lock().unwrap_or_else(PoisonError::into_inner);
        render::render_groups(groups, &mut *recency, to_unix_seconds(now))
    }

    /// Publish cards and summary of one successful poll as a single update.
    fn apply(&self, groups: &[GroupSnapshot]) -> Result<(), GroupBoardError> {
        let now = self.clock.now();
        let slots = PageSlots {
            update_time: format_clock(now),
            total_groups: groups.len(),
            groups_html: self.cards(groups, now)?,
        };
        self.view.apply(slots)
    }

    /// Poll immediately, then every `period`, forever.
    ///
    /// Missed ticks are skipped rather than bunched up. Stop the loop by
    /// dropping or aborting the future.
    pub async fn run(&self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(period_ms = period.as_millis(), "dashboard poller started");
        loop {
            ticker.tick().await;
            let outcome = self.poll().await;
            tracing::trace!(?outcome, "dashboard poll finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use groupboard_domain::dashboard::DashboardResponse;
    use groupboard_domain::recency::{ReferenceRecency, WallClockRecency};
    use groupboard_domain::time::from_unix_seconds;
    use tokio::sync::Notify;

    use crate::page::InMemoryPage;
    use crate::render::NO_DATA_PLACEHOLDER;

    #[derive(Debug)]
    struct StubError;

    impl std::fmt::Display for StubError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl std::error::Error for StubError {}

    enum Reply {
        Ok(DashboardResponse),
        Fail,
    }

    /// Replays scripted replies; fails once the script is exhausted.
    #[derive(Default)]
    struct ScriptedSource {
        replies: Mutex<VecDeque<Reply>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DashboardSource for ScriptedSource {
        fn fetch(
            &self,
        ) -> impl Future<Output = Result<DashboardResponse, GroupBoardError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.replies.lock().unwrap().pop_front();
            async move {
                match reply {
                    Some(Reply::Ok(response)) => Ok(response),
                    Some(Reply::Fail) | None => Err(GroupBoardError::Transport(Box::new(StubError))),
                }
            }
        }
    }

    /// Blocks every fetch until released.
    struct GatedSource {
        gate: Arc<Notify>,
    }

    impl DashboardSource for GatedSource {
        async fn fetch(&self) -> Result<DashboardResponse, GroupBoardError> {
            self.gate.notified().await;
            Ok(DashboardResponse::success(vec![], "now"))
        }
    }

    struct FixedClock(Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    fn clock_at(secs: f64) -> FixedClock {
        FixedClock(from_unix_seconds(secs).unwrap())
    }

    fn group(id: &str, timestamp: f64) -> GroupSnapshot {
        GroupSnapshot::builder()
            .group_id(id)
            .timestamp(timestamp)
            .sensor("temperature", 20.0)
            .build()
            .unwrap()
    }

    fn success(groups: Vec<GroupSnapshot>) -> Reply {
        Reply::Ok(DashboardResponse::success(groups, "now"))
    }

    fn poller(
        replies: Vec<Reply>,
    ) -> DashboardPoller<ScriptedSource, InMemoryPage, WallClockRecency, FixedClock> {
        DashboardPoller::with_clock(
            ScriptedSource::new(replies),
            InMemoryPage::new(),
            WallClockRecency,
            clock_at(1_000.0),
        )
    }

    #[tokio::test]
    async fn should_render_groups_and_summary_on_success() {
        let poller = poller(vec![success(vec![group("group_1", 990.0), group("group_2", 800.0)])]);

        let outcome = poller.poll().await;

        assert_eq!(outcome, PollOutcome::Rendered { groups: 2 });
        let slots = poller.view().slots();
        assert_eq!(slots.total_groups, 2);
        assert_eq!(slots.update_time, "00:16:40");
        assert_eq!(slots.groups_html.matches(r#"class="group-card "#).count(), 2);
        assert!(slots.groups_html.contains(">ONLINE<"));
        assert!(slots.groups_html.contains(">OFFLINE<"));
    }

    #[tokio::test]
    async fn should_render_placeholder_for_empty_success() {
        let poller = poller(vec![success(vec![])]);

        assert_eq!(poller.poll().await, PollOutcome::Rendered { groups: 0 });
        let slots = poller.view().slots();
        assert_eq!(slots.groups_html, NO_DATA_PLACEHOLDER);
        assert_eq!(slots.total_groups, 0);
        assert_eq!(slots.update_time, "00:16:40");
    }

    /// Records how the poller talks to its view.
    #[derive(Default)]
    struct RecordingView {
        page: InMemoryPage,
        slot_writes: AtomicUsize,
        applies: AtomicUsize,
        reject: bool,
    }

    impl RecordingView {
        fn refuse(&self) -> Result<(), GroupBoardError> {
            if self.reject {
                Err(GroupBoardError::View(Box::new(StubError)))
            } else {
                Ok(())
            }
        }
    }

    impl DashboardView for RecordingView {
        fn set_update_time(&self, text: &str) -> Result<(), GroupBoardError> {
            self.slot_writes.fetch_add(1, Ordering::SeqCst);
            self.page.set_update_time(text)
        }

        fn set_total_groups(&self, count: usize) -> Result<(), GroupBoardError> {
            self.slot_writes.fetch_add(1, Ordering::SeqCst);
            self.page.set_total_groups(count)
        }

        fn replace_groups(&self, html: String) -> Result<(), GroupBoardError> {
            self.slot_writes.fetch_add(1, Ordering::SeqCst);
            self.page.replace_groups(html)
        }

        fn apply(&self, slots: PageSlots) -> Result<(), GroupBoardError> {
            self.applies.fetch_add(1, Ordering::SeqCst);
            self.refuse()?;
            self.page.apply(slots)
        }
    }

    #[tokio::test]
    async fn should_publish_each_poll_as_one_view_update() {
        let poller = DashboardPoller::with_clock(
            ScriptedSource::new(vec![success(vec![group("group_1", 990.0)])]),
            RecordingView::default(),
            WallClockRecency,
            clock_at(1_000.0),
        );

        assert_eq!(poller.poll().await, PollOutcome::Rendered { groups: 1 });

        let view = poller.view();
        assert_eq!(view.applies.load(Ordering::SeqCst), 1);
        assert_eq!(view.slot_writes.load(Ordering::SeqCst), 0);
        let slots = view.page.slots();
        assert_eq!(slots.update_time, "00:16:40");
        assert_eq!(slots.total_groups, 1);
        assert!(slots.groups_html.contains("GROUP_1"));
    }

    #[tokio::test]
    async fn should_report_failure_when_view_rejects_update() {
        let poller = DashboardPoller::with_clock(
            ScriptedSource::new(vec![success(vec![group("group_1", 990.0)])]),
            RecordingView {
                reject: true,
                ..RecordingView::default()
            },
            WallClockRecency,
            clock_at(1_000.0),
        );

        assert_eq!(poller.poll().await, PollOutcome::Failed);
        assert_eq!(poller.view().page.slots(), PageSlots::default());
    }

    #[test]
    fn should_render_cards_into_groups_slot_only() {
        let poller = poller(vec![]);

        poller.render(&[group("group_4", 990.0)]).unwrap();

        let slots = poller.view().slots();
        assert!(slots.groups_html.contains("GROUP_4"));
        assert_eq!(slots.update_time, PageSlots::default().update_time);
        assert_eq!(slots.total_groups, 0);
    }

    #[tokio::test]
    async fn should_leave_view_unchanged_when_fetch_fails() {
        let poller = poller(vec![success(vec![group("group_1", 990.0)]), Reply::Fail]);
        poller.poll().await;
        let before = poller.view().slots();

        let outcome = poller.poll().await;

        assert_eq!(outcome, PollOutcome::Failed);
        assert_eq!(poller.view().slots(), before);
        assert_eq!(before.total_groups, 1);
    }

    #[tokio::test]
    async fn should_leave_view_unchanged_when_status_not_success() {
        let not_success = DashboardResponse {
            status: "error".to_string(),
            data: vec![group("group_9", 990.0)],
            last_updated: None,
        };
        let poller = poller(vec![success(vec![group("group_1", 990.0)]), Reply::Ok(not_success)]);
        poller.poll().await;
        let before = poller.view().slots();

        let outcome = poller.poll().await;

        assert_eq!(
            outcome,
            PollOutcome::Skipped {
                status: "error".to_string()
            }
        );
        assert_eq!(poller.view().slots(), before);
        assert!(!before.groups_html.contains("GROUP_9"));
    }

    #[tokio::test]
    async fn should_not_touch_initial_view_when_first_poll_fails() {
        let poller = poller(vec![Reply::Fail]);
        assert_eq!(poller.poll().await, PollOutcome::Failed);
        assert_eq!(poller.view().slots(), PageSlots::default());
    }

    #[tokio::test]
    async fn should_replace_previous_render_entirely() {
        let poller = poller(vec![
            success(vec![group("group_1", 990.0), group("group_2", 990.0)]),
            success(vec![group("group_3", 990.0)]),
        ]);
        poller.poll().await;
        poller.poll().await;

        let slots = poller.view().slots();
        assert_eq!(slots.total_groups, 1);
        assert!(slots.groups_html.contains("GROUP_3"));
        assert!(!slots.groups_html.contains("GROUP_1"));
    }

    #[tokio::test]
    async fn should_keep_reference_across_polls() {
        let poller = DashboardPoller::with_clock(
            ScriptedSource::new(vec![
                success(vec![group("group_1", 100.0)]),
                success(vec![group("group_2", 200.0)]),
                success(vec![group("group_3", 50.0), group("group_2", 200.0)]),
            ]),
            InMemoryPage::new(),
            ReferenceRecency::default(),
            clock_at(1_000_000.0),
        );
        poller.poll().await;
        poller.poll().await;
        poller.poll().await;

        let html = poller.view().slots().groups_html;
        let (stale, fresh) = html.split_at(html.find("GROUP_2").unwrap());
        assert!(stale.contains(">OFFLINE<"));
        assert!(fresh.contains(">ONLINE<"));
        assert_eq!(
            poller.recency.lock().unwrap().reference(),
            Some(200.0)
        );
    }

    #[tokio::test]
    async fn should_report_busy_while_poll_in_flight() {
        let gate = Arc::new(Notify::new());
        let poller = DashboardPoller::new(
            GatedSource {
                gate: Arc::clone(&gate),
            },
            InMemoryPage::new(),
            WallClockRecency,
        );

        let first = poller.poll();
        tokio::pin!(first);
        // Drive the first poll until it parks on the gate.
        assert!(futures_poll_once(first.as_mut()).await.is_none());

        assert_eq!(poller.poll().await, PollOutcome::Busy);

        gate.notify_one();
        assert_eq!(first.await, PollOutcome::Rendered { groups: 0 });
        assert!(!poller.in_flight.load(Ordering::SeqCst));
    }

    async fn futures_poll_once<F: Future + Unpin>(fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            out = fut => Some(out),
            () = std::future::ready(()) => None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_after_failures() {
        let poller = poller(vec![]);

        let _ = tokio::time::timeout(
            Duration::from_millis(3_500),
            poller.run(Duration::from_secs(1)),
        )
        .await;

        assert!(poller.source.calls() >= 3);
        assert_eq!(poller.view().slots(), PageSlots::default());
    }

    #[tokio::test(start_paused = true)]
    async fn should_poll_immediately_when_started() {
        let poller = poller(vec![success(vec![group("group_1", 990.0)])]);

        let _ = tokio::time::timeout(
            Duration::from_millis(10),
            poller.run(Duration::from_secs(1)),
        )
        .await;

        assert_eq!(poller.source.calls(), 1);
        assert_eq!(poller.view().slots().total_groups, 1);
    }
}
