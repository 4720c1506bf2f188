use std::path::PathBuf;

use tracing::{error, info};
use wirestl::prelude::*;

const USAGE: &str = "usage: wirestl [model.stl] [--screenshot out.png]";

#[derive(Debug, Default)]
struct Args {
    model: Option<PathBuf>,
    screenshot: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--screenshot" => {
                let out = iter.next().ok_or_else(|| USAGE.to_string())?;
                args.screenshot = Some(PathBuf::from(out));
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ if args.model.is_none() && !arg.starts_with("--") => {
                args.model = Some(PathBuf::from(arg));
            }
            _ => return Err(format!("unexpected argument '{arg}'\n{USAGE}")),
        }
    }
    Ok(args)
}

fn build_session(args: &Args, config: RenderConfig) -> Result<Session, String> {
    match &args.model {
        Some(path) => Session::init(path, config).map_err(|e| {
            error!("Failed to load {}: {e}", path.display());
            e.to_string()
        }),
        None => {
            info!("No model given, showing the built-in cube");
            Ok(Session::new(WireframeModel::cube(1.0), config))
        }
    }
}

fn run_interactive(mut session: Session) -> Result<(), String> {
    let config = *session.config();
    let mut window = Window::new("wirestl", config.width, config.height)?;
    let mut limiter = FrameLimiter::new(&window);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                session.resize(w, h);
            }
            WindowEvent::None => {}
        }

        let input = window.input_state();
        let delta_time = limiter.wait_and_get_delta(&window);
        let frame = session.tick(delta_time, &input);
        window.present(frame.as_bytes())?;
    }

    info!("Exiting");
    Ok(())
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wirestl=info".into()),
        )
        .init();

    let args = parse_args()?;
    let config = RenderConfig::default();
    let mut session = build_session(&args, config)?;

    match &args.screenshot {
        Some(out) => {
            session.render().save_png(out).map_err(|e| {
                error!("Failed to write {}: {e}", out.display());
                e.to_string()
            })?;
            info!("Wrote {}", out.display());
            Ok(())
        }
        None => run_interactive(session),
    }
}
