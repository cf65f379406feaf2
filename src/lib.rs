pub mod cli;
pub mod clipboard;
pub mod codec;
mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod session;
pub mod state;
pub mod worker;
pub use error::{AppError, AppResult};

use std::sync::Arc;

use crate::cli::CliArgs;
use crate::clipboard::{ClipboardSource, WlClipboardBackend};
use crate::input::PointerEvent;
use crate::render::Compositor;
use crate::session::Workspace;

/// Entrypoint used by the binary: paste, blur the requested regions, copy back.
pub fn run(args: CliArgs) -> AppResult<()> {
    logging::init();
    tracing::info!("starting blurpaste");

    let mut config = config::load_app_config();
    if let Some(sigma) = args.sigma {
        config.blur_sigma = sigma;
    }

    let backend = WlClipboardBackend;
    let mut workspace = Workspace::new(
        Compositor::new(config.compositor_style()),
        config.panel_layout(),
        Arc::new(backend),
    );

    workspace.paste(backend.read_items()?);
    let mut first_error = None;
    let mut opened = Vec::new();
    for outcome in workspace.wait_for_pastes() {
        match outcome {
            Ok(id) => opened.push(id),
            Err(err) if first_error.is_none() => first_error = Some(err),
            Err(_) => {}
        }
    }
    let Some(&id) = opened.first() else {
        return Err(first_error.map_or(AppError::NoImage, AppError::from));
    };

    let origin = workspace
        .session(id)
        .map(|session| session.canvas_bounds().origin())
        .ok_or(session::SessionError::NotFound(id))?;
    for drag in &args.drags {
        let (x0, y0) = (origin.x + drag.from.0, origin.y + drag.from.1);
        let (x1, y1) = (origin.x + drag.to.0, origin.y + drag.to.1);
        workspace.dispatch_pointer(PointerEvent::down(x0, y0));
        workspace.dispatch_pointer(PointerEvent::moved(x1, y1));
        workspace.dispatch_pointer(PointerEvent::up(x1, y1));
    }
    workspace.on_vsync();

    let report = workspace
        .export(id)?
        .wait()
        .ok_or(session::ExportError::WorkerLost { session: id })??;
    tracing::info!(
        session = %report.session,
        width = report.width,
        height = report.height,
        bytes = report.encoded_len,
        "copied blurred image to clipboard"
    );

    workspace.close(id)?;
    Ok(())
}
