//! FieldView: maps a session [`Snapshot`] onto a [`Canvas`].
//!
//! Pure; no I/O. Each field cell is drawn two columns wide to compensate for the
//! usual terminal glyph aspect ratio.

use crate::canvas::{Canvas, Rect, Rgb, Style};
use crate::core::Snapshot;
use crate::types::{GameStatus, ShapeTag};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PALETTE: [Rgb; 7] = [
    Rgb::new(0, 240, 240),
    Rgb::new(240, 160, 0),
    Rgb::new(240, 240, 0),
    Rgb::new(240, 0, 0),
    Rgb::new(0, 240, 0),
    Rgb::new(0, 0, 240),
    Rgb::new(160, 0, 240),
];

const WELL: Style = Style::new(Rgb::new(70, 70, 80), Rgb::new(25, 25, 35));
const BORDER: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

/// Width reserved right of the well for the score panel.
const PANEL_WIDTH: u16 = 16;

/// Color for a shape tag; tags beyond the palette cycle through it.
pub fn tag_color(tag: ShapeTag) -> Rgb {
    PALETTE[(tag.max(1) as usize - 1) % PALETTE.len()]
}

#[derive(Debug, Clone, Copy)]
pub struct FieldView {
    cell_w: u16,
}

impl Default for FieldView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl FieldView {
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut canvas);
        canvas
    }

    /// Render into a reused canvas.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, canvas: &mut Canvas) {
        canvas.reset(viewport.width, viewport.height, Style::PLAIN);

        let frame_w = snap.width.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = snap.height.saturating_add(2);
        let layout = canvas.area().centered(frame_w.saturating_add(PANEL_WIDTH), frame_h);
        let frame = Rect::new(layout.x, layout.y, frame_w, frame_h);
        let well = frame.inner();

        canvas.frame(frame, BORDER);
        canvas.fill(well, ' ', WELL);
        self.draw_cells(snap, well, canvas);
        draw_panel(snap, frame, canvas);

        if snap.status == GameStatus::GameOver {
            let y = frame.y + frame.h / 2;
            canvas.text_centered(frame, y, " GAME OVER ", Style::PLAIN.bold());
        }
    }

    fn draw_cells(&self, snap: &Snapshot, well: Rect, canvas: &mut Canvas) {
        for row in 0..snap.height {
            let y = well.y.saturating_add(row);
            for col in 0..snap.width {
                let x = well.x.saturating_add(col.saturating_mul(self.cell_w));
                match snap.visible(row as i16, col as i16) {
                    Some(tag) => {
                        let block = WELL.with_fg(tag_color(tag)).bold();
                        canvas.fill(Rect::new(x, y, self.cell_w, 1), '█', block);
                    }
                    None => canvas.paint(x, y, '·', WELL),
                }
            }
        }
    }
}

fn draw_panel(snap: &Snapshot, frame: Rect, canvas: &mut Canvas) {
    let x = frame.right().saturating_add(2);
    let next = snap.next.as_ref().map_or("-", |id| id.as_str());
    let lines = [
        format!("SCORE {}", snap.score),
        format!("LINES {}", snap.lines),
        format!("LEVEL {}", snap.level),
        format!("NEXT  {next}"),
    ];
    for (i, line) in (0u16..).zip(lines.iter()) {
        canvas.text(x, frame.y + 1 + 2 * i, line, Style::PLAIN);
    }
}
