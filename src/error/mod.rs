use crate::clipboard::ClipboardError;
use crate::session::{ExportError, PasteError, SessionError};
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Paste(#[from] PasteError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("clipboard holds no decodable image")]
    NoImage,
}
