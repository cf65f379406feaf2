use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

const WL_PASTE_COMMAND: &str = "wl-paste";
const WL_COPY_COMMAND: &str = "wl-copy";
const MIME_IMAGE_PREFIX: &str = "image/";
pub const MIME_IMAGE_PNG: &str = "image/png";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to run clipboard command: {command}")]
    CommandIo {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("clipboard command {command} failed: {message}")]
    CommandFailed { command: String, message: String },
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

/// One pasted payload and the MIME type it was offered as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ClipboardItem {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }
}

pub trait ClipboardSource {
    fn read_items(&self) -> ClipboardResult<Vec<ClipboardItem>>;
}

/// Write side of the clipboard. Exports run on a worker thread.
pub trait ClipboardSink: Send + Sync {
    fn write(&self, mime_type: &str, bytes: &[u8]) -> ClipboardResult<()>;
}

/// Wayland clipboard through the `wl-clipboard` tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct WlClipboardBackend;

impl ClipboardSource for WlClipboardBackend {
    fn read_items(&self) -> ClipboardResult<Vec<ClipboardItem>> {
        let listing = run_command(WL_PASTE_COMMAND, &["--list-types"])?;
        let listing = String::from_utf8_lossy(&listing);
        let Some(mime_type) = preferred_image_type(&listing) else {
            tracing::info!("clipboard offers no image data");
            return Ok(Vec::new());
        };

        let bytes = run_command(WL_PASTE_COMMAND, &["--no-newline", "--type", mime_type])?;
        tracing::debug!(mime_type, len = bytes.len(), "read image from clipboard");
        Ok(vec![ClipboardItem::new(mime_type, bytes)])
    }
}

impl ClipboardSink for WlClipboardBackend {
    fn write(&self, mime_type: &str, bytes: &[u8]) -> ClipboardResult<()> {
        run_command_with_stdin(WL_COPY_COMMAND, &["--type", mime_type], bytes)
    }
}

fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .trim()
        .to_ascii_lowercase()
        .starts_with(MIME_IMAGE_PREFIX)
}

/// Picks `image/png` when offered, otherwise the first `image/*` type.
fn preferred_image_type(listing: &str) -> Option<&str> {
    let mut image_types = listing
        .lines()
        .map(str::trim)
        .filter(|mime_type| is_image_mime(mime_type));
    let first = image_types.next()?;
    if first.eq_ignore_ascii_case(MIME_IMAGE_PNG) {
        return Some(first);
    }
    Some(
        image_types
            .find(|mime_type| mime_type.eq_ignore_ascii_case(MIME_IMAGE_PNG))
            .unwrap_or(first),
    )
}

fn run_command(command: &str, args: &[&str]) -> ClipboardResult<Vec<u8>> {
    let output = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|err| ClipboardError::CommandIo {
            command: command.to_string(),
            source: err,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClipboardError::CommandFailed {
            command: command.to_string(),
            message: format!("exit status: {}; stderr: {}", output.status, stderr.trim()),
        });
    }

    Ok(output.stdout)
}

/// Pipes `payload` into `command`. Output streams are discarded since wl-copy
/// forks a server that keeps them open after the foreground process exits.
fn run_command_with_stdin(command: &str, args: &[&str], payload: &[u8]) -> ClipboardResult<()> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| ClipboardError::CommandIo {
            command: command.to_string(),
            source: err,
        })?;

    let Some(mut stdin) = child.stdin.take() else {
        cleanup_command_child(&mut child);
        return Err(ClipboardError::CommandFailed {
            command: command.to_string(),
            message: "command stdin unavailable".to_string(),
        });
    };
    if let Err(err) = stdin.write_all(payload) {
        cleanup_command_child(&mut child);
        return Err(ClipboardError::CommandIo {
            command: command.to_string(),
            source: err,
        });
    }
    drop(stdin);

    let status = child.wait().map_err(|err| ClipboardError::CommandIo {
        command: command.to_string(),
        source: err,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed {
            command: command.to_string(),
            message: format!("command exited with status: {status}"),
        })
    }
}

fn cleanup_command_child(child: &mut std::process::Child) {
    let _ = child.kill();
    let _ = child.wait();
}
