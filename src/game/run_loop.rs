// Frame-synchronous game loop: capture, detect, score, report, sleep
use super::session::GameSession;
use super::types::{SessionCommand, TickReport};
use crate::camera::FrameSource;
use crate::shapes::ShapeLibrary;
use crate::vision::PieceDetector;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Ticks per second; 0 runs unthrottled
    pub target_fps: u32,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            max_ticks: None,
        }
    }
}

impl LoopConfig {
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.target_fps > 0).then(|| Duration::from_secs_f64(1.0 / self.target_fps as f64))
    }
}

/// Run ticks until the callback sends `Stop` or the tick limit is reached.
///
/// `on_tick` stands in for the renderer: it sees every report and may hand
/// back one command, applied before the next tick starts. Returns the number
/// of ticks run.
pub fn run_game<S, F>(
    detector: &mut PieceDetector<S>,
    library: &ShapeLibrary,
    session: &mut GameSession,
    config: &LoopConfig,
    mut on_tick: F,
) -> u64
where
    S: FrameSource,
    F: FnMut(&TickReport) -> Option<SessionCommand>,
{
    let interval = config.frame_interval();
    let mut next_deadline = Instant::now();
    let mut ticks = 0u64;

    loop {
        if let Some(max) = config.max_ticks
            && ticks >= max
        {
            log::debug!("Tick limit {} reached", max);
            break;
        }

        let report = session.tick(Instant::now(), detector, library);
        ticks += 1;

        if let Some(command) = on_tick(&report)
            && !session.apply(command, Instant::now())
        {
            log::info!("🛑 Stop requested after {} ticks", ticks);
            break;
        }

        if let Some(interval) = interval {
            next_deadline += interval;
            let now = Instant::now();
            if next_deadline > now {
                std::thread::sleep(next_deadline - now);
            } else {
                // Running late: start the next tick now without trying to catch up
                next_deadline = now;
            }
        }
    }

    ticks
}
