//! Display and output formatting utilities

use crate::automaton::{Cell, Grid, Schedule, StepReport};
use std::io::{IsTerminal, Write};
use std::time::{Duration, Instant};

/// Console rendering of grids and phase tables
pub struct GridFormatter;

impl GridFormatter {
    fn glyph(cell: Cell) -> char {
        match cell {
            Cell::Background => '·',
            Cell::Foreground => '█',
            Cell::FarForeground => '▒',
        }
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1) * 3);
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                output.push(Self::glyph(grid.get(x, y)));
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for y in 0..grid.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.width() {
                let glyph = Self::glyph(grid.get(x, y));
                output.push(glyph);
                output.push(glyph);
            }
            output.push('\n');
        }

        output
    }

    /// Per-value cell counts
    pub fn format_cell_statistics(grid: &Grid) -> String {
        let total = (grid.width() * grid.height()) as f64;
        let mut output = String::from("Cell Statistics:\n");
        for (label, cell) in [
            ("Background", Cell::Background),
            ("Foreground", Cell::Foreground),
            ("Far foreground", Cell::FarForeground),
        ] {
            let count = grid.count(cell);
            output.push_str(&format!(
                "  {:<15} {:5} ({:.1}%)\n",
                format!("{}:", label),
                count,
                count as f64 / total * 100.0
            ));
        }
        output
    }

    /// Format the phase table
    pub fn format_phase_table(schedule: &Schedule) -> String {
        let mut output = String::new();

        output.push_str("Phase Table:\n");
        output.push_str("Name                 | Start | End   | Effect\n");
        output.push_str("---------------------|-------|-------|------------------------------\n");

        for window in &schedule.windows {
            let end = window.end.map_or_else(|| "∞".to_string(), |end| end.to_string());
            output.push_str(&format!(
                "{:20} | {:5} | {:5} | {}\n",
                window.name, window.start, end, window.effect
            ));
        }

        output
    }
}

/// Single-line frame counter for `run`, redrawn at most every `REDRAW_INTERVAL`
pub struct FrameProgress {
    total: u64,
    done: u64,
    phases: String,
    last_draw: Instant,
    started: Instant,
}

const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

impl FrameProgress {
    pub fn new(total: u64) -> Self {
        let now = Instant::now();
        Self {
            total,
            done: 0,
            phases: String::from("idle"),
            last_draw: now,
            started: now,
        }
    }

    /// Count a finished step and remember which phases it ran
    pub fn record(&mut self, report: &StepReport) {
        self.done = (self.done + 1).min(self.total);
        self.phases = if report.phases.is_empty() {
            String::from("idle")
        } else {
            report.phases.join("+")
        };

        if self.last_draw.elapsed() >= REDRAW_INTERVAL {
            print!("\r{:<60}", self.line());
            std::io::stdout().flush().ok();
            self.last_draw = Instant::now();
        }
    }

    fn line(&self) -> String {
        format!("Frame {:>4}/{} [{}]", self.done, self.total, self.phases)
    }

    pub fn finish(&self) {
        let seconds = self.started.elapsed().as_secs_f64();
        let rate = if seconds > 0.0 { self.done as f64 / seconds } else { 0.0 };
        println!("\r{:<60}", format!("{} frames in {:.1}s ({:.0} fps)", self.done, seconds, rate));
    }
}

/// ANSI colouring for status lines, disabled by `NO_COLOR` or when stdout is not a terminal
pub struct ColorOutput;

impl ColorOutput {
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::parse_grid_from_string;

    #[test]
    fn test_grid_formatting() {
        let grid = parse_grid_from_string("012\n210\n").unwrap();

        let compact = GridFormatter::format_grid_compact(&grid);
        assert_eq!(compact, "·█▒\n▒█·\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ▒▒██··"));
    }

    #[test]
    fn test_cell_statistics() {
        let grid = parse_grid_from_string("0122\n").unwrap();
        let stats = GridFormatter::format_cell_statistics(&grid);
        assert!(stats.contains("Far foreground:"));
        assert!(stats.contains("(50.0%)"));
    }

    #[test]
    fn test_phase_table() {
        let table = GridFormatter::format_phase_table(&Schedule::default());
        assert!(table.contains("slow_decay"));
        assert!(table.contains("logo_regrowth"));
        assert!(table.contains("∞"));
        assert_eq!(table.lines().count(), 3 + 7);
    }

    #[test]
    fn test_frame_progress() {
        let mut progress = FrameProgress::new(2);
        assert_eq!(progress.line(), "Frame    0/2 [idle]");

        let mut report = StepReport {
            frame: 0,
            phase_time: 0,
            phases: vec!["seed".to_string(), "background_regrowth".to_string()],
            changed_cells: 1,
            logo_loaded: true,
        };
        progress.record(&report);
        assert_eq!(progress.line(), "Frame    1/2 [seed+background_regrowth]");

        report.phases.clear();
        progress.record(&report);
        progress.record(&report);
        assert_eq!(progress.line(), "Frame    2/2 [idle]");
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Blue);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
        assert!(ColorOutput::warning("careful").contains("careful"));
    }
}
