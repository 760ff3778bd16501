//! The signal controller: timer-driven, approval-gated transitions.

use crate::builder::SignalControllerBuilder;
use crate::config::{OverlapPolicy, SignalConfig};
use crate::core::{SignalState, StateHistory, StateTransition};
use crate::effects::approval::ApprovalGate;
use crate::effects::transition::TransitionOutcome;
use crate::presentation::Presentation;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Owned handle to the recurring tick task.
///
/// Dropping the handle cancels future ticks. Transitions already spawned
/// by earlier ticks are separate tasks and keep running.
#[derive(Debug)]
struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Signal {
    state: SignalState,
    history: StateHistory,
}

struct Shared {
    config: SignalConfig,
    gate: Arc<dyn ApprovalGate>,
    presentation: Arc<dyn Presentation>,
    signal: Mutex<Signal>,
    timer: Mutex<Option<TimerHandle>>,
    attempts: AtomicU64,
    in_flight: AtomicUsize,
    idle: Notify,
}

impl Shared {
    fn render(&self, state: SignalState) {
        self.presentation.render(state.lamps());
    }
}

/// Counts a transition as in flight for as long as it lives.
///
/// The ticker claims the slot before spawning, so a tick never observes a
/// spawned-but-unpolled transition as idle.
struct InFlight {
    shared: Arc<Shared>,
}

impl InFlight {
    fn enter(shared: &Arc<Shared>) -> Self {
        shared.in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            shared: Arc::clone(shared),
        }
    }

    /// Claim the slot only if nothing else is in flight.
    fn enter_alone(shared: &Arc<Shared>) -> Option<Self> {
        shared
            .in_flight
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self {
                shared: Arc::clone(shared),
            })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.shared.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.shared.idle.notify_waiters();
        }
    }
}

/// Traffic signal that cycles `RED -> YELLOW -> GREEN -> RED`, asking an
/// [`ApprovalGate`] before every step.
///
/// `SignalController` is a cheap handle; clones share the same signal, so
/// the operator-input side can hold its own reference.
///
/// # Example
///
/// ```rust
/// use signal_light::core::{LampStates, SignalState};
/// use signal_light::presentation::Presentation;
/// use signal_light::SignalController;
///
/// struct Quiet;
///
/// impl Presentation for Quiet {
///     fn render(&self, _lamps: LampStates) {}
/// }
///
/// let controller = SignalController::builder()
///     .presentation(Quiet)
///     .build()
///     .unwrap();
///
/// assert_eq!(controller.state(), SignalState::Red);
/// assert!(!controller.is_running());
/// ```
#[derive(Clone)]
pub struct SignalController {
    shared: Arc<Shared>,
}

impl SignalController {
    pub fn builder() -> SignalControllerBuilder {
        SignalControllerBuilder::new()
    }

    pub(crate) fn new(
        config: SignalConfig,
        gate: Arc<dyn ApprovalGate>,
        presentation: Arc<dyn Presentation>,
    ) -> Self {
        let controller = Self {
            shared: Arc::new(Shared {
                config,
                gate,
                presentation,
                signal: Mutex::new(Signal {
                    state: SignalState::Red,
                    history: StateHistory::new(),
                }),
                timer: Mutex::new(None),
                attempts: AtomicU64::new(0),
                in_flight: AtomicUsize::new(0),
                idle: Notify::new(),
            }),
        };
        controller.initialize();
        controller
    }

    /// Put the signal on RED and show it. History is kept.
    pub fn initialize(&self) {
        self.shared.signal.lock().state = SignalState::Red;
        self.shared.render(SignalState::Red);
    }

    /// Hand the current lamp view to the presentation layer.
    pub fn notify_presentation(&self) {
        let state = self.state();
        self.shared.render(state);
    }

    pub fn state(&self) -> SignalState {
        self.shared.signal.lock().state
    }

    /// Snapshot of every committed transition so far.
    pub fn history(&self) -> StateHistory {
        self.shared.signal.lock().history.clone()
    }

    pub fn config(&self) -> &SignalConfig {
        &self.shared.config
    }

    pub fn is_running(&self) -> bool {
        self.shared.timer.lock().is_some()
    }

    /// Transitions currently waiting on approval.
    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.load(Ordering::SeqCst)
    }

    /// Resolves once no transition is waiting on approval.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.shared.idle.notified();
            if self.in_flight() == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Attempt one gated step of the cycle.
    ///
    /// Waits for the approval gate, then advances from whatever state is
    /// current at that moment. A rejected or failed approval leaves the
    /// signal untouched; failures are logged here and go no further.
    pub async fn transition(&self) -> TransitionOutcome {
        let claim = InFlight::enter(&self.shared);
        self.transition_claimed(claim).await
    }

    async fn transition_claimed(&self, _claim: InFlight) -> TransitionOutcome {
        let attempt = self.shared.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        let from = self.state();
        info!(attempt, "Attempting to transition from {from}");
        self.notify_presentation();

        let approval = self.shared.gate.request_approval(from).await;

        // Overlapping attempts may have moved the signal while this one waited.
        let outcome = {
            let mut signal = self.shared.signal.lock();
            let outcome = TransitionOutcome::from_approval(signal.state, approval);
            if let TransitionOutcome::Advanced { from, to } = outcome {
                signal.state = to;
                signal.history = signal.history.record(StateTransition {
                    from,
                    to,
                    timestamp: Utc::now(),
                    attempt,
                });
            }
            outcome
        };

        match &outcome {
            TransitionOutcome::Advanced { to, .. } => {
                info!(attempt, "Transitioned to: {to}");
                self.shared.render(*to);
            }
            TransitionOutcome::Rejected { state } => {
                warn!(attempt, state = %state, "Approval denied, transition rejected");
            }
            TransitionOutcome::Failed { state, error } => {
                error!(attempt, state = %state, %error, "Error during approval request");
            }
        }
        outcome
    }

    /// Begin attempting a transition every `tick_interval`.
    ///
    /// The first tick fires one interval after this call. Calling `start`
    /// while already running only logs.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime, since the ticker is
    /// spawned onto the current one.
    pub fn start(&self) {
        let mut timer = self.shared.timer.lock();
        if timer.is_some() {
            info!("Traffic light already running");
            return;
        }

        let period = self.shared.config.tick_interval;
        let task = tokio::spawn(run_ticks(Arc::downgrade(&self.shared), period));
        *timer = Some(TimerHandle { task });
        info!(interval = ?period, "Traffic light started");
    }

    /// Cancel future ticks. In-flight transitions still complete.
    pub fn stop(&self) {
        let timer = self.shared.timer.lock().take();
        match timer {
            Some(timer) => {
                timer.cancel();
                info!("Traffic light stopped");
            }
            None => info!("Traffic light is not running"),
        }
    }
}

impl std::fmt::Debug for SignalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalController")
            .field("state", &self.state())
            .field("running", &self.is_running())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// Ticker loop. Holds only a weak reference so a dropped controller takes
/// its timer down with it.
async fn run_ticks(shared: Weak<Shared>, period: Duration) {
    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;
        let Some(strong) = shared.upgrade() else {
            break;
        };
        let claim = match strong.config.overlap {
            OverlapPolicy::Allow => InFlight::enter(&strong),
            OverlapPolicy::Skip => match InFlight::enter_alone(&strong) {
                Some(claim) => claim,
                None => {
                    debug!(
                        in_flight = strong.in_flight.load(Ordering::SeqCst),
                        "Transition still awaiting approval, skipping tick"
                    );
                    continue;
                }
            },
        };
        let controller = SignalController { shared: strong };

        // Fire and forget: the ticker never waits on a transition.
        tokio::spawn(async move {
            controller.transition_claimed(claim).await;
        });
    }
}
