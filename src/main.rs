mod args;

use args::{Args, Mode};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tangram_vision::camera::ImageSequenceSource;
use tangram_vision::game::{
    GameSession, LoopConfig, Matcher, SessionCommand, SessionConfig, SessionStatus, TickReport,
    run_game,
};
use tangram_vision::shapes::{LibraryOrigin, ShapeDirSource, ShapeLibrary, ShapeSource};
use tangram_vision::vision::{ColorCalibration, DetectionConfig, FrameAnalyzer, PieceDetector};
use tangram_vision::{TangramError, TangramResult};

const DEFAULT_SHAPES_DIR: &str = "shapes.d";
/// Consecutive failed captures after which the frame source counts as finished
const MAX_MISSED_FRAMES: u32 = 30;

fn main() -> ExitCode {
    let Some(args) = Args::parse() else {
        return ExitCode::SUCCESS;
    };
    init_logging(args.debug_mode);

    let library = load_library(&args);

    match &args.mode {
        Mode::ListShapes => {
            list_shapes(&library);
            ExitCode::SUCCESS
        }
        Mode::ExportShapes(path) => match library.save_to(path) {
            Ok(()) => {
                println!("✅ Exported {} shape(s) to {}", library.len(), path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("❌ Export failed: {e}");
                ExitCode::FAILURE
            }
        },
        Mode::Play => match play(&args, &library) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e @ TangramError::CameraUnavailable { .. }) => {
                println!("❌ {e}");
                println!("   Pass --frames=PATH with a frame image or a directory of frames");
                ExitCode::from(2)
            }
            Err(e) => {
                println!("❌ {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn load_library(args: &Args) -> ShapeLibrary {
    let shapes_dir = args.shapes_dir.clone().or_else(|| {
        let fallback = Path::new(DEFAULT_SHAPES_DIR);
        fallback.is_dir().then(|| fallback.to_path_buf())
    });
    let source = shapes_dir.map(ShapeDirSource::new);
    let library = ShapeLibrary::load(
        source.as_ref().map(|s| s as &dyn ShapeSource),
        &args.shapes_file,
    );

    for skipped in library.skipped() {
        println!("⚠️ Skipped shape '{}': {}", skipped.name, skipped.reason);
    }
    library
}

fn list_shapes(library: &ShapeLibrary) {
    let origin = match library.origin() {
        LibraryOrigin::Source(description) => description.clone(),
        LibraryOrigin::File(path) => path.display().to_string(),
        LibraryOrigin::Builtin => "built-in set".to_string(),
    };
    println!("📚 {} shape(s) from {}", library.len(), origin);
    for name in library.list_names() {
        if let Some(shape) = library.get(&name) {
            println!(
                "    {:<12} {:<24} {:?} ({} pieces)",
                name,
                shape.name,
                shape.difficulty,
                shape.pieces.len()
            );
        }
    }
}

fn play(args: &Args, library: &ShapeLibrary) -> TangramResult<()> {
    let frames = args
        .frames
        .clone()
        .ok_or_else(|| TangramError::CameraUnavailable {
            description: "no camera configured".to_string(),
        })?;

    let calibration = ColorCalibration::load(&args.calibration_file)?;
    let detection_config = match args.resolution {
        Some((width, height)) => DetectionConfig::for_resolution(width, height),
        None => DetectionConfig::default(),
    };
    log::debug!("Detection config: {:?}", detection_config);

    let source = ImageSequenceSource::new(&frames, args.looping);
    let mut detector = PieceDetector::open(source, FrameAnalyzer::new(calibration, detection_config))?;

    let session_config = SessionConfig {
        start_shape: args
            .start_shape
            .clone()
            .or_else(|| SessionConfig::default().start_shape),
        ..SessionConfig::default()
    };
    if let Some(wanted) = &session_config.start_shape
        && library.get(wanted).is_none()
    {
        println!("⚠️ Shape '{}' not in library, starting with the first one", wanted);
    }
    let mut session = GameSession::new(library, Matcher::default(), session_config, Instant::now());

    let loop_config = LoopConfig {
        target_fps: args.target_fps,
        max_ticks: args.max_ticks,
    };

    println!(
        "🧩 Playing '{}' from {} at {} fps",
        session.current_shape().unwrap_or("-"),
        frames.display(),
        args.target_fps
    );

    let mut solved_tick: Option<u64> = None;
    let mut missed_frames = 0u32;
    let ticks = run_game(&mut detector, library, &mut session, &loop_config, |report| {
        print_tick(report);
        if report.captured || report.status == SessionStatus::Paused {
            missed_frames = 0;
        } else {
            missed_frames += 1;
            if missed_frames >= MAX_MISSED_FRAMES {
                println!("📷 No frames for {} ticks, stopping", missed_frames);
                return Some(SessionCommand::Stop);
            }
        }
        if report.status == SessionStatus::TimeUp {
            println!("⏰ Time's up! Final score {:.1}", report.score());
            return Some(SessionCommand::Stop);
        }
        if report.victory && solved_tick.is_none() {
            println!("🎉 GREAT JOB! '{}' solved at tick {}", report.shape, report.tick);
            solved_tick = Some(report.tick);
        }
        None
    });

    println!("✅ Finished after {} tick(s), {} frame(s) read", ticks, detector.frames_read());
    detector.shutdown();
    Ok(())
}

fn print_tick(report: &TickReport) {
    println!("{}", format_tick(report));
}

fn format_tick(report: &TickReport) -> String {
    let remaining = report.remaining.as_secs();
    let clock = format!("{}:{:02}", remaining / 60, remaining % 60);
    if report.status == SessionStatus::Paused {
        return format!(
            "#{:<5} ⏸️ paused at {:.1}% {} {}",
            report.tick,
            report.score(),
            report.shape,
            clock
        );
    }
    if !report.captured {
        return format!("#{:<5} 📷 no frame, score 0.0", report.tick);
    }
    let matched: Vec<&str> = report.outcome.matched.iter().map(|c| c.as_str()).collect();
    format!(
        "#{:<5} {:>5.1}% {} {} pieces={} matched=[{}]",
        report.tick,
        report.score(),
        report.shape,
        clock,
        report.detected.len(),
        matched.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tangram_vision::game::MatchOutcome;
    use tangram_vision::vision::DetectedPieces;

    fn report(status: SessionStatus, captured: bool, score: f64) -> TickReport {
        TickReport {
            tick: 7,
            shape: "swan".to_string(),
            status,
            detected: DetectedPieces::new(),
            outcome: MatchOutcome {
                score,
                ..MatchOutcome::default()
            },
            captured,
            remaining: Duration::from_secs(95),
            victory: false,
        }
    }

    #[test]
    fn test_paused_tick_shows_last_score() {
        let line = format_tick(&report(SessionStatus::Paused, false, 64.5));
        assert!(line.contains("paused"), "{line}");
        assert!(line.contains("64.5"), "{line}");
        assert!(!line.contains("no frame"), "{line}");
    }

    #[test]
    fn test_missed_frame_line() {
        let line = format_tick(&report(SessionStatus::Running, false, 0.0));
        assert!(line.contains("no frame"), "{line}");
    }

    #[test]
    fn test_running_tick_line() {
        let line = format_tick(&report(SessionStatus::Running, true, 82.0));
        assert!(line.contains(" 82.0%"), "{line}");
        assert!(line.contains("1:35"), "{line}");
    }
}
