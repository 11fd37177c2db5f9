/// bpview - rotating wireframe preview of a vehicle blueprint
///
/// Usage: bpview [file.blueprint] [--size N] [--frames N] [--faces N]
///               [--gif PATH] [--png-dir DIR] [--no-play]
///
/// Without a file, a built-in sample vehicle is shown.
/// Controls:
///   - Space: Toggle auto-spin
///   - Left/Right (A/D): Step one frame
///   - Q/ESC: Quit
use std::env;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bpview_core::{bake, bake_file, BakedScene, PreviewConfig, PreviewError, Scene, WireframeRenderer};
use bpview_terminal::{demo, export, render_with_progress, TerminalApp};

struct Options {
    input: Option<PathBuf>,
    config: PreviewConfig,
    gif: Option<PathBuf>,
    png_dir: Option<PathBuf>,
    play: bool,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} [file.blueprint] [--size N] [--frames N] [--faces N] [--gif PATH] [--png-dir DIR] [--no-play]",
        program
    )
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        input: None,
        config: PreviewConfig::default(),
        gif: None,
        png_dir: None,
        play: true,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        let number = |v: &String| {
            v.parse::<usize>()
                .map_err(|_| format!("{} expects a number, got {:?}", flag, v))
        };

        match flag {
            "--size" => {
                let size = number(value()?)?;
                options.config.size = u32::try_from(size).map_err(|_| "--size is too large".to_string())?;
                i += 2;
            }
            "--frames" => {
                options.config.frame_count = number(value()?)?;
                i += 2;
            }
            "--faces" => {
                options.config.target_faces = number(value()?)?;
                i += 2;
            }
            "--gif" => {
                options.gif = Some(PathBuf::from(value()?));
                i += 2;
            }
            "--png-dir" => {
                options.png_dir = Some(PathBuf::from(value()?));
                i += 2;
            }
            "--no-play" => {
                options.play = false;
                i += 1;
            }
            other if other.starts_with("--") => return Err(format!("Unknown option {}", other)),
            path => {
                options.input = Some(PathBuf::from(path));
                i += 1;
            }
        }
    }

    Ok(options)
}

fn load(input: Option<&Path>) -> Result<BakedScene, PreviewError> {
    match input {
        Some(path) => {
            tracing::info!("Loading blueprint {}", path.display());
            bake_file(path)
        }
        None => {
            tracing::info!("No blueprint given, using the built-in sample");
            let scene = Scene::from_document(demo::demo_scene())?;
            Ok(bake(&scene)?)
        }
    }
}

fn run(options: &Options) -> io::Result<ExitCode> {
    let baked = match load(options.input.as_deref()) {
        Ok(baked) => baked,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if baked.is_empty() {
        eprintln!("No geometry found.");
        return Ok(ExitCode::from(2));
    }

    let renderer = WireframeRenderer::from_baked(&baked, &options.config);

    let Some(frames) = render_with_progress(&renderer)? else {
        return Ok(ExitCode::SUCCESS);
    };

    if let Some(path) = &options.gif {
        export::write_gif(&frames, path)?;
        println!("Saved animation to {}", path.display());
    }
    if let Some(dir) = &options.png_dir {
        let written = export::write_pngs(&frames, dir)?;
        println!("Saved {} frames to {}", written.len(), dir.display());
    }

    if options.play {
        let title = options
            .input
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sample vehicle".to_string());

        let mut app = TerminalApp::new(frames, title)?;
        app.run()?;
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bpview=info,bpview_core=info,bpview_terminal=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("bpview");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", usage(program));
            return ExitCode::FAILURE;
        }
    };

    match run(&options) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
