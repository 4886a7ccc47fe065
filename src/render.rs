//! Bordered text rendering of grid snapshots for terminals.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::snapshot::GridSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    fn ansi(self) -> &'static str {
        match self {
            Color::Black => "\x1b[30m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
        }
    }
}

const RESET: &str = "\x1b[0m";

fn default_color() -> bool {
    true
}

fn default_cell_width() -> usize {
    3
}

fn default_species_colors() -> Vec<Color> {
    vec![Color::White, Color::Cyan]
}

fn default_wall_color() -> Color {
    Color::White
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default = "default_cell_width")]
    pub cell_width: usize,
    /// Indexed by species id; species past the end fall back to the wall color.
    #[serde(default = "default_species_colors")]
    pub species_colors: Vec<Color>,
    #[serde(default = "default_wall_color")]
    pub wall_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            cell_width: default_cell_width(),
            species_colors: default_species_colors(),
            wall_color: default_wall_color(),
        }
    }
}

impl RenderConfig {
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }
}

pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// One glyph per tile in coordinate order; blank for empty tiles.
    pub fn cells(&self, snapshot: &GridSnapshot) -> Vec<char> {
        snapshot
            .markers()
            .into_iter()
            .map(|marker| marker.unwrap_or(' '))
            .collect()
    }

    pub fn render(&self, snapshot: &GridSnapshot) -> String {
        let width = self.config.cell_width.max(1);
        let wall = |glyph: char| self.paint(self.config.wall_color, glyph);
        let border = {
            let mut line = String::new();
            for _ in 0..snapshot.dim_x {
                line.push_str(&wall('+'));
                for _ in 0..width {
                    line.push_str(&wall('-'));
                }
            }
            line.push_str(&wall('+'));
            line.push('\n');
            line
        };

        let mut out = String::new();
        let _ = writeln!(out, "current step: {}", snapshot.step);
        for column in 0..snapshot.dim_x {
            let _ = write!(out, "{}{:^width$}", wall('|'), column + 1);
        }
        out.push_str(&wall('|'));
        out.push('\n');
        out.push_str(&border);

        for row in 0..snapshot.dim_y {
            out.push_str(&wall('|'));
            for column in 0..snapshot.dim_x {
                let tile = &snapshot.tiles[column + row * snapshot.dim_x];
                let glyph = match &tile.dominant {
                    Some(dominant) => {
                        let color = self
                            .config
                            .species_colors
                            .get(dominant.species_id.index())
                            .copied()
                            .unwrap_or(self.config.wall_color);
                        self.paint(color, dominant.marker)
                    }
                    None => " ".to_string(),
                };
                let pad = width.saturating_sub(1);
                let left = pad / 2;
                let _ = write!(
                    out,
                    "{}{}{}{}",
                    " ".repeat(left),
                    glyph,
                    " ".repeat(pad - left),
                    wall('|')
                );
            }
            let _ = writeln!(out, " {}", row + 1);
            out.push_str(&border);
        }
        if self.config.color {
            out.push_str(RESET);
        }
        out
    }

    fn paint(&self, color: Color, glyph: char) -> String {
        if self.config.color {
            format!("{}{}", color.ansi(), glyph)
        } else {
            glyph.to_string()
        }
    }
}
