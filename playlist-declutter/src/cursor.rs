use crate::format::Line;

/// Forward-only cursor over a line sequence with one line of lookahead.
pub struct LineCursor<'s, 'a> {
    lines: &'s [Line<'a>],
    position: usize,
}

impl<'s, 'a> LineCursor<'s, 'a> {
    pub fn new(lines: &'s [Line<'a>]) -> Self {
        Self { lines, position: 0 }
    }

    pub fn peek(&self) -> Option<Line<'a>> {
        self.peek_at(0)
    }

    /// Line `offset` positions after the current one
    pub fn peek_at(&self, offset: usize) -> Option<Line<'a>> {
        self.lines.get(self.position + offset).copied()
    }

    pub fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.lines.len());
    }
}
