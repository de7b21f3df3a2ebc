use std::fmt::Write as _;

use tetrevo_engine::{Frame, RenderSink};

/// Renders frames as plain text: a status line, then the board with the
/// falling stone drawn in.
#[derive(Debug, Default)]
pub struct TextRenderer {
    buffer: String,
}

impl TextRenderer {
    /// Returns the text of the last rendered frame.
    pub fn text(&self) -> &str {
        &self.buffer
    }
}

impl RenderSink for TextRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.buffer.clear();
        let board = frame.falling.commit_to(frame.board);
        // Writing to a String cannot fail.
        let _ = writeln!(
            self.buffer,
            "score {}  level {}  lines {}  next {}  ({:?})",
            frame.score,
            frame.level,
            frame.lines,
            frame.next.as_char(),
            frame.state,
        );
        let _ = writeln!(self.buffer, "{board}");
    }
}

#[cfg(test)]
mod tests {
    use tetrevo_engine::{GameSession, PieceSeed, TickConfig};

    use super::*;

    #[test]
    fn test_renders_status_and_board() {
        let session = GameSession::new(PieceSeed::from(1), TickConfig::default());
        let mut renderer = TextRenderer::default();
        session.render(&mut renderer);

        let mut lines = renderer.text().lines();
        let status = lines.next().unwrap();
        assert!(status.starts_with("score 0  level 1  lines 0"));
        assert!(status.ends_with("(Playing)"));
        let rows: Vec<_> = lines.collect();
        assert_eq!(rows.len(), 22);
        // The falling stone spawns in the top row.
        assert!(rows[0].chars().any(|c| c != '.'));
    }
}
