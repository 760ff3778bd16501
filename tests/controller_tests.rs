//! Timer-driven behavior of the signal controller.
//!
//! Most tests run on paused Tokio time, so the 5 s tick and 1 s approval
//! cadence advance instantly and deterministically. The skip-policy race
//! check runs on a real multi-thread runtime.

use async_trait::async_trait;
use parking_lot::Mutex;
use signal_light::config::{OverlapPolicy, SignalConfig};
use signal_light::core::{LampStates, SignalState};
use signal_light::effects::SimulatedApproval;
use signal_light::presentation::Presentation;
use signal_light::{ApprovalError, ApprovalGate, SignalController, StopListener, StopReason};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::time::sleep;

#[derive(Clone, Default)]
struct Recorder {
    frames: Arc<Mutex<Vec<LampStates>>>,
}

impl Recorder {
    fn len(&self) -> usize {
        self.frames.lock().len()
    }

    fn last_active(&self) -> Option<SignalState> {
        self.frames.lock().last().and_then(|lamps| lamps.active())
    }
}

impl Presentation for Recorder {
    fn render(&self, lamps: LampStates) {
        self.frames.lock().push(lamps);
    }
}

/// Waits like the simulated gate, then gives a fixed answer.
struct Delayed {
    delay: Duration,
    answer: Result<bool, ApprovalError>,
}

#[async_trait]
impl ApprovalGate for Delayed {
    async fn request_approval(&self, _from: SignalState) -> Result<bool, ApprovalError> {
        sleep(self.delay).await;
        self.answer.clone()
    }
}

fn reference_controller() -> (SignalController, Recorder) {
    let recorder = Recorder::default();
    let controller = SignalController::builder()
        .presentation(recorder.clone())
        .build()
        .unwrap();
    (controller, recorder)
}

fn controller_with(config: SignalConfig, gate: impl ApprovalGate + 'static) -> SignalController {
    SignalController::builder()
        .config(config)
        .approval(gate)
        .presentation(Recorder::default())
        .build()
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn first_tick_fires_after_one_interval() {
    let (controller, recorder) = reference_controller();
    controller.start();

    sleep(Duration::from_millis(4_900)).await;
    assert_eq!(controller.in_flight(), 0);
    assert_eq!(recorder.len(), 1);

    // tick at 5 s, approval resolves at 6 s
    sleep(Duration::from_millis(500)).await;
    assert_eq!(controller.in_flight(), 1);
    assert_eq!(controller.state(), SignalState::Red);

    sleep(Duration::from_millis(1_000)).await;
    assert_eq!(controller.in_flight(), 0);
    assert_eq!(controller.state(), SignalState::Yellow);
    assert_eq!(recorder.last_active(), Some(SignalState::Yellow));

    controller.stop();
}

#[tokio::test(start_paused = true)]
async fn running_signal_cycles_back_to_red() {
    let (controller, _recorder) = reference_controller();
    controller.start();

    // ticks at 5, 10, 15 s; last approval resolves at 16 s
    sleep(Duration::from_millis(16_500)).await;
    controller.stop();

    assert_eq!(
        controller.history().get_path(),
        vec![
            SignalState::Red,
            SignalState::Yellow,
            SignalState::Green,
            SignalState::Red,
        ]
    );
    assert_eq!(controller.state(), SignalState::Red);
}

#[tokio::test(start_paused = true)]
async fn stop_prevents_further_transitions() {
    let (controller, recorder) = reference_controller();
    controller.start();

    sleep(Duration::from_millis(6_500)).await;
    controller.stop();
    assert!(!controller.is_running());

    let frames = recorder.len();
    let state = controller.state();

    sleep(Duration::from_secs(60)).await;

    assert_eq!(recorder.len(), frames);
    assert_eq!(controller.state(), state);
    assert_eq!(controller.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_does_not_cancel_in_flight_transition() {
    let (controller, _recorder) = reference_controller();
    controller.start();

    sleep(Duration::from_millis(5_500)).await;
    assert_eq!(controller.in_flight(), 1);
    controller.stop();

    controller.wait_idle().await;

    assert_eq!(controller.state(), SignalState::Yellow);
    assert_eq!(controller.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn start_after_stop_resumes_ticking() {
    let (controller, _recorder) = reference_controller();

    controller.start();
    controller.stop();
    controller.start();
    assert!(controller.is_running());

    sleep(Duration::from_millis(6_500)).await;
    controller.stop();

    assert_eq!(controller.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn rejecting_gate_never_moves_the_signal() {
    let controller = controller_with(
        SignalConfig::default(),
        Delayed {
            delay: Duration::from_secs(1),
            answer: Ok(false),
        },
    );
    controller.start();

    sleep(Duration::from_secs(30)).await;
    controller.stop();

    assert_eq!(controller.state(), SignalState::Red);
    assert!(controller.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failing_gate_keeps_timer_running() {
    let controller = controller_with(
        SignalConfig::default(),
        Delayed {
            delay: Duration::from_secs(1),
            answer: Err(ApprovalError::Unavailable("offline".to_string())),
        },
    );
    controller.start();

    sleep(Duration::from_secs(30)).await;

    assert!(controller.is_running());
    assert_eq!(controller.state(), SignalState::Red);
    controller.stop();
}

#[tokio::test(start_paused = true)]
async fn allow_policy_overlaps_slow_approvals() {
    let config = SignalConfig::default()
        .with_tick_interval(Duration::from_secs(1))
        .with_overlap(OverlapPolicy::Allow);
    let controller = controller_with(config, SimulatedApproval::new(Duration::from_secs(3)));
    controller.start();

    // ticks at 1, 2 and 3 s are all still waiting on approval
    sleep(Duration::from_millis(3_500)).await;
    assert_eq!(controller.in_flight(), 3);
    controller.stop();

    controller.wait_idle().await;
    assert_eq!(controller.history().len(), 3);
    assert_eq!(controller.state(), SignalState::Red);
}

#[tokio::test(start_paused = true)]
async fn skip_policy_ignores_ticks_while_in_flight() {
    let config = SignalConfig::default()
        .with_tick_interval(Duration::from_secs(1))
        .with_overlap(OverlapPolicy::Skip);
    let controller = controller_with(config, SimulatedApproval::new(Duration::from_secs(3)));
    controller.start();

    sleep(Duration::from_millis(3_500)).await;
    assert_eq!(controller.in_flight(), 1);
    controller.stop();

    controller.wait_idle().await;
    assert_eq!(controller.history().len(), 1);
    assert_eq!(controller.state(), SignalState::Yellow);
}

#[tokio::test(start_paused = true)]
async fn stop_command_from_operator_halts_the_signal() {
    let (controller, _recorder) = reference_controller();
    controller.start();
    let listener = StopListener::new(controller.clone());

    sleep(Duration::from_millis(6_500)).await;
    let reason = listener
        .listen(BufReader::new(&b"s\n"[..]))
        .await
        .unwrap();
    assert_eq!(reason, StopReason::Command);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(controller.state(), SignalState::Yellow);
    assert!(!controller.is_running());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn skip_policy_never_runs_two_transitions_at_once() {
    let config = SignalConfig::default()
        .with_tick_interval(Duration::from_millis(1))
        .with_overlap(OverlapPolicy::Skip);
    let controller = controller_with(config, SimulatedApproval::new(Duration::from_millis(50)));
    controller.start();

    // Sample from a plain thread so the worker keeps ticking meanwhile.
    let sampled = controller.clone();
    let max_in_flight = tokio::task::spawn_blocking(move || {
        let deadline = std::time::Instant::now() + Duration::from_millis(300);
        let mut max = 0;
        while std::time::Instant::now() < deadline {
            max = max.max(sampled.in_flight());
            std::thread::sleep(Duration::from_micros(100));
        }
        max
    })
    .await
    .unwrap();

    controller.stop();
    controller.wait_idle().await;

    assert!(max_in_flight <= 1, "saw {max_in_flight} transitions in flight");
    assert!(!controller.history().is_empty());
}
