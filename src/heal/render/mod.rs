mod interactive;
mod json;
mod quiet;
mod table;

pub use interactive::*;
pub use json::*;
pub use quiet::*;
pub use table::*;

use std::io::Write;

use super::session::SessionOutcome;
use super::stats::HealStats;
use crate::admin::HealTaskStatus;
use crate::errors::HealError;

/// Output strategy of a heal monitoring session.
///
/// `render` runs once per poll cycle after the cycle's items were folded into
/// `stats`, `prepare_next` before the following cycle and `finish` exactly
/// once when the heal sequence reached a terminal state.
pub trait Renderer: Send {
    fn render(&mut self, stats: &HealStats, status: &HealTaskStatus) -> Result<(), HealError>;

    fn prepare_next(&mut self) -> Result<(), HealError> {
        Ok(())
    }

    fn finish(&mut self, stats: &HealStats, outcome: &SessionOutcome) -> Result<(), HealError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Interactive,
    Quiet,
    Json,
}

impl RenderMode {
    /// `json` wins over `quiet`; neither selects the interactive display.
    pub fn from_flags(quiet: bool, json: bool) -> RenderMode {
        if json {
            RenderMode::Json
        } else if quiet {
            RenderMode::Quiet
        } else {
            RenderMode::Interactive
        }
    }

    pub fn renderer(self, out: Box<dyn Write + Send>) -> Box<dyn Renderer> {
        match self {
            RenderMode::Interactive => Box::new(InteractiveRenderer::new(out)),
            RenderMode::Quiet => Box::new(QuietRenderer::new(out)),
            RenderMode::Json => Box::new(JsonRenderer::new(out)),
        }
    }
}

pub(crate) fn stopped_message(detail: &str) -> String {
    format!("Heal had an error - {}", detail)
}
