/// cubeview terminal - Rotating Cube
///
/// Controls:
///   - S / X: Start / stop rotation
///   - + / -: Zoom in / out
///   - Mouse drag: Orbit (right button pans), wheel zooms
///   - Q/ESC: Quit
use clap::Parser;
use cubeview_terminal::cli::Args;
use cubeview_terminal::{TerminalApp, TerminalError};

fn main() -> Result<(), TerminalError> {
    // Logs go to stderr; set RUST_LOG and redirect to read them
    env_logger::init();

    let args = Args::parse();
    let config = args.scene_config()?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut app = TerminalApp::new(&config, args.frame_time())?;
    app.run()?;

    println!("Stopped after {} frames.", app.frames_drawn());
    Ok(())
}
