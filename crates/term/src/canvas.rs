//! Character canvas the field view paints into and the renderer flushes.
//!
//! Coordinates are terminal columns and rows. Every write is clipped, so layout code
//! can paint a field larger than the terminal without bounds checks of its own.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Style {
    pub const PLAIN: Style = Style::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0));

    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Same background, different ink.
    pub const fn with_fg(self, fg: Rgb) -> Self {
        Self { fg, ..self }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::PLAIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

const BLANK: Glyph = Glyph {
    ch: ' ',
    style: Style::PLAIN,
};

/// Axis-aligned area on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of size `w`×`h` centered in `self` (clamped to the top-left corner).
    pub fn centered(&self, w: u16, h: u16) -> Rect {
        Rect::new(
            self.x + self.w.saturating_sub(w) / 2,
            self.y + self.h.saturating_sub(h) / 2,
            w,
            h,
        )
    }

    /// Area inside a one-cell frame.
    pub fn inner(&self) -> Rect {
        Rect::new(
            self.x.saturating_add(1),
            self.y.saturating_add(1),
            self.w.saturating_sub(2),
            self.h.saturating_sub(2),
        )
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Match the terminal size and blank everything with `style`.
    pub fn reset(&mut self, width: u16, height: u16, style: Style) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs.resize(
            usize::from(width) * usize::from(height),
            Glyph { ch: ' ', style },
        );
    }

    pub fn glyph(&self, x: u16, y: u16) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }

    pub fn paint(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = usize::from(y) * usize::from(self.width) + usize::from(x);
        if let Some(glyph) = self.glyphs.get_mut(idx) {
            *glyph = Glyph { ch, style };
        }
    }

    /// Write `text` starting at `(x, y)`; returns the column after the last character.
    pub fn text(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            self.paint(col, y, ch, style);
            col = col.saturating_add(1);
        }
        col
    }

    /// Write `text` horizontally centered in `area` on row `y`.
    pub fn text_centered(&mut self, area: Rect, y: u16, text: &str, style: Style) {
        let len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        self.text(area.centered(len, 1).x, y, text, style);
    }

    pub fn fill(&mut self, area: Rect, ch: char, style: Style) {
        for y in area.y..area.y.saturating_add(area.h) {
            for x in area.x..area.right() {
                self.paint(x, y, ch, style);
            }
        }
    }

    /// Single-line box around `area` (the frame occupies `area`'s outermost cells).
    pub fn frame(&mut self, area: Rect, style: Style) {
        if area.w < 2 || area.h < 2 {
            return;
        }
        let (left, top) = (area.x, area.y);
        let right = area.x + area.w - 1;
        let bottom = area.y + area.h - 1;
        for x in left + 1..right {
            self.paint(x, top, '─', style);
            self.paint(x, bottom, '─', style);
        }
        for y in top + 1..bottom {
            self.paint(left, y, '│', style);
            self.paint(right, y, '│', style);
        }
        self.paint(left, top, '┌', style);
        self.paint(right, top, '┐', style);
        self.paint(left, bottom, '└', style);
        self.paint(right, bottom, '┘', style);
    }

    /// Text content of row `y`.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.glyph(x, y))
            .map(|g| g.ch)
            .collect()
    }
}
