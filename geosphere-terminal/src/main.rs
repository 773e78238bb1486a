/// Geosphere Terminal - Rotating geodesic sphere
///
/// Renders a subdivided icosahedron with the painter's algorithm.
/// Controls:
///   - x/X, Up/Down: rotate about X
///   - y/Y, Right/Left: rotate about Y
///   - z/Z: rotate about Z
///   - 0: reset orientation
///   - Q/ESC: quit

use anyhow::Result;
use geosphere_core::{Mesh, SceneConfig};
use geosphere_terminal::{logging, Logger, TerminalApp};

fn main() -> Result<()> {
    Logger::init()?;
    println!("Geosphere Terminal Renderer - Loading...");

    let config = SceneConfig::default();
    let mesh = Mesh::icosphere(config.subdivision_depth)?;
    log::info!(
        "mesh ready: {} faces at depth {}",
        mesh.len(),
        config.subdivision_depth
    );

    println!("Starting terminal renderer (press Q to quit, log in {})...", logging::LOG_FILE);
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh, config)?;
    app.run()?;

    println!("Thank you for using Geosphere Terminal Renderer!");
    Ok(())
}
