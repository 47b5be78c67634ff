// src/main.rs

//! Demo driver: runs the bouncing-circle renderer against a headless
//! surface for a couple of seconds, exercising one full
//! available -> resized -> destroyed lifecycle.

use anyhow::Result;
use log::info;
use softframe::config::CONFIG;
use softframe::{BouncingCircle, HeadlessSurface, Surface, SurfaceController};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting softframe demo...");

    let config = CONFIG.clone();
    // Padded stride, as real host buffers often have.
    let surface = Arc::new(HeadlessSurface::with_stride(800, 600, 832));
    let scene = Arc::new(BouncingCircle::new(config.scene.clone()));
    let mut controller = SurfaceController::new(scene, config.render.clone());

    controller.on_surface_available(Arc::clone(&surface) as Arc<dyn Surface>);
    std::thread::sleep(Duration::from_secs(1));

    surface.resize(1024, 768);
    controller.on_surface_resized(1024, 768);
    std::thread::sleep(Duration::from_secs(1));

    controller.on_surface_destroyed();

    info!(
        "Demo finished: {} frames presented",
        surface.presented_frames()
    );
    Ok(())
}
