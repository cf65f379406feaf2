//! Headless driver: paste from the clipboard, replay drags, copy the result back.

use std::fmt;
use std::str::FromStr;

use clap::Parser;

/// Blur regions of the clipboard image and copy it back as PNG.
#[derive(Parser, Debug)]
#[command(name = "blurpaste", version, about)]
pub struct CliArgs {
    /// Region to blur, as canvas-local drag corners `X0,Y0,X1,Y1`. Repeatable.
    #[arg(short, long = "drag", value_name = "X0,Y0,X1,Y1")]
    pub drags: Vec<DragSpec>,

    /// Blur radius override (pixels).
    #[arg(long)]
    pub sigma: Option<f32>,
}

/// One pointer-drag gesture from `from` to `to` in canvas-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSpec {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSpecError(String);

impl fmt::Display for DragSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected X0,Y0,X1,Y1 but got `{}`", self.0)
    }
}

impl std::error::Error for DragSpecError {}

impl FromStr for DragSpec {
    type Err = DragSpecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DragSpecError(value.to_string());
        let coords = value
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        match coords.as_slice() {
            [x0, y0, x1, y1] if coords.iter().all(|c| c.is_finite()) => Ok(Self {
                from: (*x0, *y0),
                to: (*x1, *y1),
            }),
            _ => Err(invalid()),
        }
    }
}
