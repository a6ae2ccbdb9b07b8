//! ScoreView: maps a `MatchSnapshot` (plus the shell's dialog state) into a
//! terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{MatchSnapshot, Mode};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Side;

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

/// Modal dialog drawn over the scoring screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    None,
    DeadEnd,
    /// Ends listed newest first; `cursor` indexes that list.
    History { cursor: usize },
    ConfirmExit,
}

/// Everything the view needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    /// `None` while the variant is being chosen.
    pub snapshot: Option<&'a MatchSnapshot>,
    pub dialog: Dialog,
    /// Transient notification line.
    pub status: Option<&'a str>,
}

const BG: Rgb = Rgb::new(0, 0, 0);
const UP_FG: Rgb = Rgb::new(90, 200, 230);
const DOWN_FG: Rgb = Rgb::new(240, 170, 70);
const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BG);
const HINT: CellStyle = CellStyle::new(Rgb::new(150, 150, 150), BG);
const DIALOG: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(25, 25, 35));

/// 3x5 block digits for the big totals.
const BIG_DIGITS: [[&str; 5]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    [" █ ", "██ ", " █ ", " █ ", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

const BIG_H: u16 = 5;

/// Terminal view of the scorer.
#[derive(Debug, Default)]
pub struct ScoreView;

impl ScoreView {
    pub fn new() -> Self {
        Self
    }

    /// Render a frame into an existing framebuffer.
    pub fn render_into(&self, screen: &Screen<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT.into_cell(' '));

        match screen.snapshot {
            None => self.draw_variant_select(fb, viewport),
            Some(snap) => self.draw_match(fb, snap, viewport),
        }

        if let Some(snap) = screen.snapshot {
            match screen.dialog {
                Dialog::None => {}
                Dialog::DeadEnd => {
                    let line = format!("Record end {} as 0 - 0", snap.end_number);
                    self.draw_dialog(
                        fb,
                        viewport,
                        "DEAD END?",
                        &[line.as_str(), "", "Enter confirm  r reset  Esc back"],
                    );
                }
                Dialog::History { cursor } => self.draw_history(fb, snap, cursor, viewport),
                Dialog::ConfirmExit => self.draw_dialog(
                    fb,
                    viewport,
                    "EXIT APP",
                    &[
                        "Are you sure you want to exit?",
                        "Scores will be lost.",
                        "",
                        "Enter confirm  Esc cancel",
                    ],
                ),
            }
        }

        if let Some(status) = screen.status {
            if viewport.height > 0 {
                fb.put_str_centered(0, viewport.width, viewport.height - 1, status, TEXT.bold());
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: &Screen<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, viewport, &mut fb);
        fb
    }

    fn draw_variant_select(&self, fb: &mut FrameBuffer, vp: Viewport) {
        let mid = vp.height / 2;
        let w = vp.width;
        fb.put_str_centered(0, w, mid.saturating_sub(3), "BOWLS SCORER", TEXT.bold());
        fb.put_str_centered(0, w, mid.saturating_sub(1), "[1] Singles", CellStyle::new(UP_FG, BG));
        fb.put_str_centered(0, w, mid, "[2] Doubles", CellStyle::new(DOWN_FG, BG));
        fb.put_str_centered(0, w, mid + 2, "q exit", HINT);
    }

    fn draw_match(&self, fb: &mut FrameBuffer, snap: &MatchSnapshot, vp: Viewport) {
        self.draw_header(fb, snap, vp);

        // Rows: header, two panels, hint line, status line.
        let body_h = vp.height.saturating_sub(3);
        let panel_h = body_h / 2;
        self.draw_panel(fb, snap, Side::Up, 1, panel_h, vp);
        self.draw_panel(fb, snap, Side::Down, 1 + panel_h, body_h - panel_h, vp);

        if vp.height >= 2 {
            fb.put_str_centered(0, vp.width, vp.height - 2, hint_line(snap.mode), HINT);
        }

        if snap.mode == Mode::GameOver {
            let result = result_line(snap);
            self.draw_dialog(fb, vp, "GAME OVER", &[result.as_str(), "", "n new game  q exit"]);
        }
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &MatchSnapshot, vp: Viewport) {
        fb.put_str(1, 0, "BOWLS", TEXT.bold());
        fb.put_str(8, 0, snap.variant.as_str(), TEXT);
        fb.put_str(17, 0, "End", TEXT);
        fb.put_u32(21, 0, snap.focus_end(), TEXT.bold());

        let label = match snap.mode {
            Mode::EditingEnd(_) => "EDIT",
            Mode::AddingEnd(_) => "ADD",
            Mode::ScoringEnd => "SCORING",
            Mode::GameOver => "FINAL",
            Mode::Idle => "",
        };
        let x = vp.width.saturating_sub(label.chars().count() as u16 + 1);
        fb.put_str(x, 0, label, TEXT.bold());
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &MatchSnapshot, side: Side, y: u16, h: u16, vp: Viewport) {
        if h < 3 || vp.width < 4 {
            return;
        }
        let fg = match side {
            Side::Up => UP_FG,
            Side::Down => DOWN_FG,
        };
        let style = CellStyle::new(fg, BG);
        fb.draw_box(0, y, vp.width, h, style);
        let label = match side {
            Side::Up => " UP ",
            Side::Down => " DOWN ",
        };
        fb.put_str(2, y, label, style.bold());

        let (value, detail) = match snap.mode {
            Mode::EditingEnd(_) | Mode::AddingEnd(_) => {
                let v = u32::from(snap.scratch(side));
                (v, format!("total {}", snap.total(side)))
            }
            _ => {
                let end = snap.in_progress(side);
                let detail = if end > 0 {
                    format!("this end +{}  bowls {}/{}", end, snap.bowls, snap.variant.max_bowls_per_end())
                } else {
                    String::new()
                };
                (snap.projected_total(side), detail)
            }
        };

        let inner_h = h - 2;
        let inner_w = vp.width - 2;
        let text = value.to_string();
        let big_w = (text.len() as u16) * 4 - 1;

        if inner_h > BIG_H && inner_w >= big_w {
            let top = y + 1 + (inner_h - BIG_H - 1) / 2;
            let left = 1 + (inner_w - big_w) / 2;
            draw_big_number(fb, left, top, &text, style.bold());
            fb.put_str_centered(1, inner_w, top + BIG_H, &detail, style);
        } else {
            let mid = y + 1 + inner_h / 2;
            fb.put_str_centered(1, inner_w, mid.saturating_sub(1).max(y + 1), &text, style.bold());
            if inner_h >= 2 {
                fb.put_str_centered(1, inner_w, mid, &detail, style);
            }
        }
    }

    fn draw_history(&self, fb: &mut FrameBuffer, snap: &MatchSnapshot, cursor: usize, vp: Viewport) {
        let mut lines: Vec<String> = Vec::with_capacity(snap.history.len());
        let mut up_total = 0u32;
        let mut down_total = 0u32;
        for r in &snap.history {
            up_total += u32::from(r.up);
            down_total += u32::from(r.down);
            lines.push(format!(
                "End {:>2}  {} - {}  ({} - {})",
                r.end, r.up, r.down, up_total, down_total
            ));
        }
        lines.reverse();

        let rows = vp.height.saturating_sub(8).max(1) as usize;
        let first = cursor.saturating_sub(rows - 1).min(lines.len().saturating_sub(rows));
        let mut body: Vec<String> = Vec::with_capacity(rows + 2);
        if lines.is_empty() {
            body.push("No ends yet".to_string());
        }
        for (i, line) in lines.iter().enumerate().skip(first).take(rows) {
            let marker = if i == cursor { '>' } else { ' ' };
            body.push(format!("{marker} {line}"));
        }
        body.push(String::new());
        body.push("Enter edit  a add before  Esc close".to_string());

        let refs: Vec<&str> = body.iter().map(String::as_str).collect();
        self.draw_dialog(fb, vp, "HISTORY", &refs);
    }

    fn draw_dialog(&self, fb: &mut FrameBuffer, vp: Viewport, title: &str, lines: &[&str]) {
        let content_w = lines
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(title.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        let w = (content_w + 4).min(vp.width);
        let h = (lines.len() as u16 + 4).min(vp.height);
        let x = vp.width.saturating_sub(w) / 2;
        let y = vp.height.saturating_sub(h) / 2;

        fb.fill_rect(x, y, w, h, ' ', DIALOG);
        fb.draw_box(x, y, w, h, DIALOG);
        fb.put_str_centered(x, w, y + 1, title, DIALOG.bold());
        for (i, line) in lines.iter().enumerate() {
            let ly = y + 2 + i as u16;
            if ly + 1 >= y + h {
                break;
            }
            let style = if line.starts_with('>') { DIALOG.bold() } else { DIALOG };
            fb.put_str(x + 2, ly, line, style);
        }
    }
}

fn draw_big_number(fb: &mut FrameBuffer, x: u16, y: u16, digits: &str, style: CellStyle) {
    for (i, ch) in digits.chars().enumerate() {
        let Some(d) = ch.to_digit(10) else {
            continue;
        };
        let gx = x + (i as u16) * 4;
        for (row, pattern) in BIG_DIGITS[d as usize].iter().enumerate() {
            for (col, c) in pattern.chars().enumerate() {
                if c != ' ' {
                    fb.put_char(gx + col as u16, y + row as u16, c, style);
                }
            }
        }
    }
}

fn hint_line(mode: Mode) -> &'static str {
    match mode {
        Mode::Idle => "↑/↓ score  Shift remove  d dead end  h history  f finish  q exit",
        Mode::ScoringEnd => "↑/↓ score  Shift remove  Enter end  r reset  d dead end  q exit",
        Mode::EditingEnd(_) => "↑/↓ set score  Shift remove  Enter save  a add before  Esc cancel",
        Mode::AddingEnd(_) => "↑/↓ set score  Shift remove  Enter save  Esc cancel",
        Mode::GameOver => "n new game  q exit",
    }
}

/// Winner first, as announced at the end of a match.
pub fn result_line(snap: &MatchSnapshot) -> String {
    match snap.winner {
        Some(Side::Up) => format!("Up wins {} - {}", snap.up_total, snap.down_total),
        Some(Side::Down) => format!("Down wins {} - {}", snap.down_total, snap.up_total),
        None => format!("Drawn {} - {}", snap.up_total, snap.down_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_digit_glyphs_are_three_wide() {
        for glyph in BIG_DIGITS.iter() {
            for row in glyph.iter() {
                assert_eq!(row.chars().count(), 3);
            }
        }
    }

    #[test]
    fn big_number_draws_blocks() {
        let mut fb = FrameBuffer::new(8, 5);
        draw_big_number(&mut fb, 0, 0, "17", CellStyle::default());
        assert_eq!(fb.row_text(0), " █  ███ ");
        assert_eq!(fb.row_text(4), "███   █ ");
    }
}
