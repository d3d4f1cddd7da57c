use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Play,
    ListShapes,
    ExportShapes(PathBuf),
}

#[derive(Debug)]
pub struct Args {
    pub mode: Mode,
    pub debug_mode: bool,
    pub frames: Option<PathBuf>,
    pub looping: bool,
    pub shapes_file: PathBuf,
    pub shapes_dir: Option<PathBuf>,
    pub calibration_file: PathBuf,
    pub start_shape: Option<String>,
    pub target_fps: u32,
    pub max_ticks: Option<u64>,
    pub resolution: Option<(u32, u32)>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            mode: Mode::Play,
            debug_mode: false,
            frames: None,
            looping: false,
            shapes_file: PathBuf::from(tangram_vision::shapes::DEFAULT_SHAPE_FILE),
            shapes_dir: None,
            calibration_file: PathBuf::from(tangram_vision::vision::DEFAULT_CALIBRATION_FILE),
            start_shape: None,
            target_fps: 30,
            max_ticks: None,
            resolution: None,
        }
    }
}

impl Args {
    pub fn parse() -> Option<Self> {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse flags (program name already stripped). None means exit now.
    pub fn parse_from(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut parsed = Args::default();

        for arg in args {
            if arg == "--help" || arg == "-h" {
                print_help();
                return None;
            } else if arg == "--version" || arg == "-v" {
                println!("Tangram Vision v{}", env!("CARGO_PKG_VERSION"));
                return None;
            } else if arg == "--debug" {
                parsed.debug_mode = true;
            } else if arg == "--loop" {
                parsed.looping = true;
            } else if arg == "--list-shapes" {
                parsed.mode = Mode::ListShapes;
            } else if let Some(val) = arg.strip_prefix("--export-shapes=") {
                parsed.mode = Mode::ExportShapes(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--frames=") {
                parsed.frames = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--shapes=") {
                parsed.shapes_file = PathBuf::from(val);
            } else if let Some(val) = arg.strip_prefix("--shapes-dir=") {
                parsed.shapes_dir = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--calibration=") {
                parsed.calibration_file = PathBuf::from(val);
            } else if let Some(val) = arg.strip_prefix("--shape=") {
                parsed.start_shape = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--fps=") {
                match val.parse::<u32>() {
                    Ok(fps) => parsed.target_fps = fps,
                    Err(_) => {
                        eprintln!("❌ Invalid fps value: {}", val);
                        return None;
                    }
                }
            } else if let Some(val) = arg.strip_prefix("--ticks=") {
                match val.parse::<u64>() {
                    Ok(ticks) => parsed.max_ticks = Some(ticks),
                    Err(_) => {
                        eprintln!("❌ Invalid ticks value: {}", val);
                        return None;
                    }
                }
            } else if let Some(val) = arg.strip_prefix("--resolution=") {
                match parse_resolution(val) {
                    Some(size) => parsed.resolution = Some(size),
                    None => {
                        eprintln!("❌ Invalid resolution '{}', expected WIDTHxHEIGHT", val);
                        return None;
                    }
                }
            } else {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return None;
            }
        }

        Some(parsed)
    }
}

fn parse_resolution(val: &str) -> Option<(u32, u32)> {
    let (w, h) = val.split_once(['x', 'X'])?;
    let w = w.trim().parse::<u32>().ok()?;
    let h = h.trim().parse::<u32>().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

fn print_help() {
    println!("🧩 Tangram Vision - piece detection and shape scoring");
    println!();
    println!("USAGE:");
    println!("    tangram-vision [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --frames=PATH        Frame image or directory of frames to play");
    println!("    --loop               Restart the frame directory when it runs out");
    println!("    --shapes=FILE        Shape library file (default: shapes.json)");
    println!("    --shapes-dir=DIR     Directory of <name>.json shapes (default: shapes.d if present)");
    println!("    --calibration=FILE   HSV calibration file (default: color_calibration.json)");
    println!("    --shape=NAME         Shape to start with (default: swan)");
    println!("    --fps=N              Target ticks per second, 0 = unthrottled (default: 30)");
    println!("    --ticks=N            Stop after N ticks");
    println!("    --resolution=WxH     Scale area thresholds for this frame size");
    println!("    --list-shapes        List the loaded shapes and exit");
    println!("    --export-shapes=FILE Write the loaded library to FILE and exit");
    println!("    --debug              Enable debug logging");
    println!("    --help, -h           Show this help message");
    println!("    --version, -v        Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    tangram-vision --frames=recording/ --shape=cat");
    println!("    tangram-vision --frames=table.png --ticks=1 --debug");
    println!("    tangram-vision --list-shapes");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Option<Args> {
        Args::parse_from(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.mode, Mode::Play);
        assert_eq!(args.target_fps, 30);
        assert_eq!(args.shapes_file, PathBuf::from("shapes.json"));
        assert!(args.frames.is_none());
    }

    #[test]
    fn test_flags() {
        let args = parse(&[
            "--frames=rec",
            "--shape=cat",
            "--fps=0",
            "--ticks=12",
            "--loop",
            "--resolution=1280x960",
            "--debug",
        ])
        .unwrap();
        assert_eq!(args.frames, Some(PathBuf::from("rec")));
        assert_eq!(args.start_shape.as_deref(), Some("cat"));
        assert_eq!(args.target_fps, 0);
        assert_eq!(args.max_ticks, Some(12));
        assert!(args.looping);
        assert!(args.debug_mode);
        assert_eq!(args.resolution, Some((1280, 960)));
    }

    #[test]
    fn test_modes() {
        assert_eq!(parse(&["--list-shapes"]).unwrap().mode, Mode::ListShapes);
        assert_eq!(
            parse(&["--export-shapes=out.json"]).unwrap().mode,
            Mode::ExportShapes(PathBuf::from("out.json"))
        );
    }

    #[test]
    fn test_bad_values_exit() {
        assert!(parse(&["--fps=fast"]).is_none());
        assert!(parse(&["--resolution=640"]).is_none());
        assert!(parse(&["--bogus"]).is_none());
    }
}
