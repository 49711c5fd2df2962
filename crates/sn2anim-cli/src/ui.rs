use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use sn2anim::engine::progress::{Progress, ProgressCallback};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

#[derive(Debug)]
pub enum UiEvent {
    Progress(Progress),
}

pub struct UiManager {
    mp: Arc<MultiProgress>,
    state: BarState,
    event_receiver: mpsc::Receiver<UiEvent>,
    shutdown_receiver: watch::Receiver<bool>,
    _sentinel_bar: ProgressBar,
}

#[derive(Default)]
struct BarState {
    active_bar: Option<ProgressBar>,
    base_message: String,
}

impl UiManager {
    pub fn new() -> (Self, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (event_sender, event_receiver) = mpsc::channel(1024);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let mp = Arc::new(MultiProgress::new());
        mp.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        let _sentinel_bar = mp.add(ProgressBar::hidden());
        let manager = Self {
            mp,
            state: BarState::default(),
            event_receiver,
            shutdown_receiver,
            _sentinel_bar,
        };

        (manager, event_sender, shutdown_sender)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(event) = self.event_receiver.recv() => {
                    self.handle_event(event);
                }
                result = self.shutdown_receiver.changed() => {
                    if result.is_err() || *self.shutdown_receiver.borrow() {
                        break;
                    }
                }
            }
        }
        while let Ok(event) = self.event_receiver.try_recv() {
            self.handle_event(event);
        }
        self._sentinel_bar.finish_and_clear();
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Progress(progress) => self.handle_progress(progress),
        }
    }

    fn handle_progress(&mut self, progress: Progress) {
        match progress {
            Progress::PhaseStart { name } => {
                if let Some(bar) = self.state.active_bar.take() {
                    bar.finish_and_clear();
                }

                let pb = self.mp.add(ProgressBar::new_spinner());
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                pb.set_style(Self::spinner_style());
                pb.set_message(name.to_string());

                self.state.active_bar = Some(pb);
                self.state.base_message = name.to_string();
            }
            Progress::PhaseFinish => {
                if let Some(bar) = self.state.active_bar.take() {
                    bar.finish_and_clear();
                }

                let final_message = format!("✓ {}", self.state.base_message);
                self.mp.println(final_message).ok();

                self.state.base_message.clear();
            }
            Progress::TaskStart { total_steps } => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.set_style(Self::bar_style());
                    bar.set_length(total_steps);
                    bar.set_position(0);
                    bar.disable_steady_tick();
                }
            }
            Progress::TaskAdvance { position } => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.set_position(position);
                    bar.set_message(self.state.base_message.clone());
                }
            }
            Progress::Countdown { remaining } => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    let message = if remaining > 0 {
                        format!("{} (transition state, resuming in {}s)", self.state.base_message, remaining)
                    } else {
                        self.state.base_message.clone()
                    };
                    bar.set_message(message);
                }
            }
            Progress::TaskFinish => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.finish();
                }
            }
            Progress::Message(msg) => {
                self.mp.println(format!("  {}", msg)).ok();
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<45} [{bar:40.cyan/blue}] {pos:>3}% ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "elapsed",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.elapsed().as_secs_f64());
                },
            )
            .progress_chars("━╸ ")
    }
}

#[derive(Clone)]
pub struct CliProgressHandler {
    sender: mpsc::Sender<UiEvent>,
}

impl CliProgressHandler {
    pub fn new(sender: mpsc::Sender<UiEvent>) -> Self {
        Self { sender }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let sender = self.sender.clone();
        Box::new(move |progress: Progress| {
            if let Err(e) = sender.try_send(UiEvent::Progress(progress)) {
                warn!("Failed to send progress update to UI channel: {}", e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn setup_manager() -> UiManager {
        let (manager, _, _) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        manager
    }

    fn start_phase(manager: &mut UiManager, name: &'static str) {
        manager.handle_event(UiEvent::Progress(Progress::PhaseStart { name }));
    }

    #[test]
    fn handle_phase_start_creates_new_spinner() {
        let mut manager = setup_manager();
        assert!(manager.state.active_bar.is_none());

        start_phase(&mut manager, "Playback");

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Playback");
        assert_eq!(manager.state.base_message, "Playback");
    }

    #[test]
    fn handle_phase_start_replaces_existing_bar() {
        let mut manager = setup_manager();
        start_phase(&mut manager, "First Phase");
        start_phase(&mut manager, "Second Phase");

        let second_bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(second_bar.message(), "Second Phase");
        assert_eq!(manager.state.base_message, "Second Phase");
    }

    #[test]
    fn handle_phase_finish_clears_active_bar() {
        let mut manager = setup_manager();
        start_phase(&mut manager, "Playback");

        manager.handle_event(UiEvent::Progress(Progress::PhaseFinish));

        assert!(manager.state.active_bar.is_none());
        assert!(manager.state.base_message.is_empty());
    }

    #[test]
    fn task_start_and_advance_move_the_bar() {
        let mut manager = setup_manager();
        start_phase(&mut manager, "Playback");
        manager.handle_event(UiEvent::Progress(Progress::TaskStart { total_steps: 100 }));

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.length(), Some(100));
        assert_eq!(bar.position(), 0);

        manager.handle_event(UiEvent::Progress(Progress::TaskAdvance { position: 42 }));
        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.position(), 42);
    }

    #[test]
    fn countdown_updates_message_until_it_reaches_zero() {
        let mut manager = setup_manager();
        start_phase(&mut manager, "Playback");

        manager.handle_event(UiEvent::Progress(Progress::Countdown { remaining: 2 }));
        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Playback (transition state, resuming in 2s)");

        manager.handle_event(UiEvent::Progress(Progress::Countdown { remaining: 0 }));
        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Playback");
    }

    #[test]
    fn handle_task_finish_completes_bar() {
        let mut manager = setup_manager();
        start_phase(&mut manager, "Playback");
        manager.handle_event(UiEvent::Progress(Progress::TaskStart { total_steps: 100 }));

        manager.handle_event(UiEvent::Progress(Progress::TaskFinish));

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert!(bar.is_finished());
    }

    #[tokio::test]
    async fn cli_progress_handler_sends_progress_event() {
        let (sender, mut receiver) = mpsc::channel(1);
        let handler = CliProgressHandler::new(sender);
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Testing" });

        let event = receiver.recv().await.unwrap();
        let UiEvent::Progress(Progress::PhaseStart { name }) = event else {
            panic!("Incorrect event received");
        };
        assert_eq!(name, "Testing");
    }

    #[tokio::test]
    async fn manager_exits_on_shutdown_signal() {
        let (manager, sender, shutdown) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        let handle = tokio::spawn(manager.run());

        sender
            .send(UiEvent::Progress(Progress::Message(
                "drained before exit".to_string(),
            )))
            .await
            .unwrap();
        shutdown.send(true).unwrap();
        handle.await.unwrap();
    }

    #[test]
    fn message_event_leaves_active_bar_running() {
        let mut manager = setup_manager();
        start_phase(&mut manager, "Playback");
        manager.handle_event(UiEvent::Progress(Progress::TaskStart { total_steps: 100 }));
        manager.handle_event(UiEvent::Progress(Progress::TaskAdvance { position: 12 }));

        manager.handle_event(UiEvent::Progress(Progress::Message(
            "Stopped after 100 frames at progress 12.500 (frame limit).".to_string(),
        )));

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert!(!bar.is_finished());
        assert_eq!(bar.position(), 12);
        assert_eq!(manager.state.base_message, "Playback");
    }
}
