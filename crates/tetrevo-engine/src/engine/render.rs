use crate::core::{Board, Placement, StoneKind};

use super::SessionState;

/// Read-only snapshot of a session handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub board: &'a Board,
    pub falling: Placement,
    pub next: StoneKind,
    pub score: usize,
    pub level: usize,
    pub lines: usize,
    pub state: SessionState,
}

/// Receiver of rendered frames.
///
/// The session never reads anything back from a sink.
pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>);
}

impl<F> RenderSink for F
where
    F: FnMut(&Frame<'_>),
{
    fn render(&mut self, frame: &Frame<'_>) {
        self(frame);
    }
}
