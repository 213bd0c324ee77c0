use crate::host::Renderer;
use crate::window::Panel;
use std::io::Write;

/// Prints panels as plain text, skipping frames identical to the previous
/// one so the active cadence does not flood the terminal.
pub struct TextRenderer<W: Write> {
    out: W,
    last: Vec<Panel>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_panels(&mut self, panels: &[Panel]) -> std::io::Result<()> {
        for panel in panels {
            writeln!(self.out, "== {} ==", panel.title)?;
            for line in &panel.lines {
                writeln!(self.out, "  {line}")?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn clear(&mut self) {
        if !self.last.is_empty() {
            let _ = writeln!(self.out, "-- overlay hidden --");
            let _ = self.out.flush();
        }
        self.last.clear();
    }

    fn present(&mut self, panels: &[Panel]) {
        if panels == self.last.as_slice() {
            return;
        }
        if let Err(err) = self.write_panels(panels) {
            tracing::warn!(%err, "failed to write frame");
        }
        self.last = panels.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(title: &str, line: &str) -> Panel {
        Panel {
            title: title.into(),
            lines: vec![line.into()],
        }
    }

    #[test]
    fn identical_frames_are_written_once() {
        let mut renderer = TextRenderer::new(Vec::new());
        let frame = vec![panel("Power", "> Sleep")];
        renderer.present(&frame);
        renderer.present(&frame);
        renderer.clear();
        renderer.clear();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "== Power ==\n  > Sleep\n-- overlay hidden --\n");
    }
}
