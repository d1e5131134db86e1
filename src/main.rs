//! Heads or Tails entry point
//!
//! Native builds have no camera, so this drives a session against the
//! headless engine: find the floor, tap to place the coin, swipe up to flip.
//! Pass a settings JSON path as the first argument to override tunables.

#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::{Vec2, Vec3};

    use heads_or_tails::consts::*;
    use heads_or_tails::gesture::StrokeTracker;
    use heads_or_tails::sim::{Coin, LimitedReason, TrackingState};
    use heads_or_tails::{HeadlessEngine, Session, SessionEvent, Settings, SettingsError};

    /// Frame interval of the simulated display (60 Hz)
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a flip after this many frames
    const MAX_FRAMES: u32 = 600;

    /// Demo instance holding all state
    struct Demo {
        session: Session,
        engine: HeadlessEngine,
        gestures: StrokeTracker,
        accumulator: f32,
        /// Simulated wall clock (seconds) for gesture timing
        clock: f64,
    }

    impl Demo {
        fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
            let engine = HeadlessEngine::new().with_asset(&settings.coin);
            let gestures = StrokeTracker::new(settings.gestures);
            Ok(Self {
                session: Session::new(settings, seed)?,
                engine,
                gestures,
                accumulator: 0.0,
                clock: 0.0,
            })
        }

        fn send(&mut self, event: SessionEvent) {
            self.session.handle(&mut self.engine, event);
        }

        /// Press at `from`, release at `to` after `secs`, and forward whatever
        /// gesture that forms
        fn stroke(&mut self, from: Vec2, to: Vec2, secs: f64) {
            self.gestures.pointer_down(from, self.clock);
            self.clock += secs;
            match self.gestures.pointer_up(to, self.clock) {
                Some(gesture) => self.send(gesture.into()),
                None => log::debug!("Stroke formed no gesture"),
            }
        }

        /// Run session ticks for one frame; returns a flip result if one landed
        fn update(&mut self, dt: f32) -> Option<Coin> {
            let dt = dt.min(0.1);
            self.accumulator += dt;
            self.clock += dt as f64;

            let mut landed = None;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.engine.advance(SIM_DT);
                if let Some(coin) = self.session.tick() {
                    landed = Some(coin);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            landed
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        env_logger::init();
        log::info!("Heads or Tails (headless) starting...");

        let path = std::env::args_os().nth(1).map(PathBuf::from);
        let settings = Settings::load(path.as_deref());
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Session seed: {}", seed);

        let mut demo = match Demo::new(settings, seed) {
            Ok(demo) => demo,
            Err(e) => {
                log::error!("Cannot start session: {}", e);
                return;
            }
        };
        let center = demo.engine.camera.center();

        demo.send(SessionEvent::Appear);
        demo.send(SessionEvent::TrackingChanged(TrackingState::Limited(
            LimitedReason::Initializing,
        )));
        demo.update(FRAME_DT);

        let floor = demo.engine.detect_plane(Vec3::new(0.0, 0.0, -1.4), 2.0, 2.0);
        demo.send(SessionEvent::AnchorAdded(floor));
        demo.send(SessionEvent::TrackingChanged(TrackingState::Normal));
        if let Some(message) = demo.session.hud().feedback {
            println!("{}", message);
        }

        // Tap the middle of the screen to drop the coin on the floor
        demo.stroke(center, center + Vec2::new(2.0, 0.0), 0.08);
        if demo.session.placed().is_none() {
            log::error!("Coin could not be placed");
            return;
        }

        // Swipe up to flip
        let swipe_start = center + Vec2::new(0.0, 200.0);
        demo.stroke(swipe_start, swipe_start - Vec2::new(0.0, 400.0), 0.15);

        let mut result = None;
        for _ in 0..MAX_FRAMES {
            if let Some(coin) = demo.update(FRAME_DT) {
                result = Some(coin);
                break;
            }
        }

        match result {
            Some(coin) => println!("{}", coin),
            None => log::warn!("Coin never landed"),
        }

        match serde_json::to_string_pretty(&demo.session.snapshot()) {
            Ok(json) => log::info!("Final state:\n{}", json),
            Err(e) => log::warn!("Failed to serialize session: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native_demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly; there is no standalone binary
}
