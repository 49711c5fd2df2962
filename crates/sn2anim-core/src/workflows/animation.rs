use super::frame::{Frame, build_frame, build_frame_at_progress};
use crate::core::energy::{EnergyPoint, EnergyProfile, EnergySample};
use crate::core::projection::Camera;
use crate::core::rules::DisplayToggles;
use crate::core::rules::annotations::is_high_energy;
use crate::engine::config::{PlaybackConfig, SceneConfig};
use crate::engine::controller::{PlaybackController, TickOutcome};
use crate::engine::error::EngineError;
use crate::engine::observer::{Observer, SubscriptionId};
use crate::engine::state::{PlaybackSnapshot, PlaybackState};
use crate::engine::timer::{CountdownToken, FrameToken};
use tracing::debug;

/// Everything a rendering surface needs: playback control, per-frame payloads and the energy
/// curve.
///
/// The controller is the only mutable part; frames and energies are derived from its progress.
pub struct ReactionAnimation {
    controller: PlaybackController,
    sample: EnergySample,
    camera: Camera,
    toggles: DisplayToggles,
}

impl ReactionAnimation {
    pub fn new(
        playback: PlaybackConfig,
        scene: SceneConfig,
        profile: &EnergyProfile,
    ) -> Result<Self, EngineError> {
        scene.validate()?;
        let camera = scene.camera()?;
        let controller = PlaybackController::new(playback)?;
        let sample = EnergySample::generate(profile);
        debug!(
            peak_progress = sample.peak().progress,
            peak_energy = sample.peak().energy,
            "Energy sample generated."
        );
        Ok(Self {
            controller,
            sample,
            camera,
            toggles: scene.toggles,
        })
    }

    /// Reference playback, camera and energy profile.
    pub fn reference() -> Result<Self, EngineError> {
        Self::new(
            PlaybackConfig::default(),
            SceneConfig::default(),
            &EnergyProfile::REFERENCE,
        )
    }

    pub fn frame_at(&self, t: f64) -> Frame {
        build_frame(t, self.toggles, &self.camera)
    }

    /// The frame at the controller's progress, reporting that progress unchanged.
    pub fn current_frame(&self) -> Frame {
        build_frame_at_progress(self.controller.progress(), self.toggles, &self.camera)
    }

    /// Sampled energy at an integer progress value.
    pub fn energy_at(&self, progress: u32) -> f64 {
        self.sample.energy_at(progress)
    }

    /// Sampled energy at the current progress.
    pub fn current_energy(&self) -> f64 {
        self.sample.energy_at_progress(self.controller.progress())
    }

    pub fn is_high_energy(&self) -> bool {
        is_high_energy(self.current_energy())
    }

    pub fn energy_series(&self) -> &[EnergyPoint] {
        self.sample.series()
    }

    pub fn energy_sample(&self) -> &EnergySample {
        &self.sample
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn toggles(&self) -> DisplayToggles {
        self.toggles
    }

    pub fn set_show_arrows(&mut self, enabled: bool) {
        self.toggles.show_arrows = enabled;
    }

    pub fn set_show_distances(&mut self, enabled: bool) {
        self.toggles.show_distances = enabled;
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn progress(&self) -> f64 {
        self.controller.progress()
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.snapshot()
    }

    pub fn play(&mut self) {
        self.controller.play();
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn resume(&mut self) {
        self.controller.resume();
    }

    pub fn toggle_play(&mut self) {
        self.controller.toggle_play();
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn seek(&mut self, value: f64) {
        self.controller.seek(value);
    }

    pub fn set_auto_pause(&mut self, enabled: bool) {
        self.controller.set_auto_pause(enabled);
    }

    pub fn toggle_auto_pause(&mut self) {
        self.controller.toggle_auto_pause();
    }

    pub fn teardown(&mut self) {
        self.controller.teardown();
    }

    pub fn frame_token(&self) -> Option<FrameToken> {
        self.controller.frame_token()
    }

    pub fn countdown_token(&self) -> Option<CountdownToken> {
        self.controller.countdown_token()
    }

    pub fn on_frame(&mut self, token: FrameToken) -> TickOutcome {
        self.controller.on_frame(token)
    }

    pub fn on_countdown(&mut self, token: CountdownToken) -> TickOutcome {
        self.controller.on_countdown(token)
    }

    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        self.controller.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.controller.unsubscribe(id)
    }
}
