use std::io::Write;

use colored::{Color, Colorize};

use super::{stopped_message, Renderer, Table};
use crate::admin::HealTaskStatus;
use crate::errors::HealError;
use crate::heal::color::HealthColor;
use crate::heal::indicator::{Indicator, Spinner};
use crate::heal::item::HealItem;
use crate::heal::session::SessionOutcome;
use crate::heal::stats::HealStats;
use crate::utils;

pub const LINE_WIDTH: usize = 80;
const SCANNED_PREFIX: &str = "Scanned: ";
const WAITING_FOR_STATUS: &str = "** waiting for status from server **";

// Two status lines plus the table's borders and four rows.
pub const REDRAW_LINES: usize = 8;
const REWIND_LINE: &str = "\x1b[1A\x1b[2K";

const DISPLAY_ORDER: [HealthColor; 4] = [
    HealthColor::Green,
    HealthColor::Yellow,
    HealthColor::Red,
    HealthColor::Grey,
];

fn print_color(color: HealthColor) -> Color {
    match color {
        HealthColor::Green => Color::Green,
        HealthColor::Yellow => Color::Yellow,
        HealthColor::Red => Color::Red,
        HealthColor::Grey => Color::White,
    }
}

/// Redraws a live progress panel in place on every poll cycle.
pub struct InteractiveRenderer {
    out: Box<dyn Write + Send>,
    indicator: Box<dyn Indicator>,
    table: Table,
}

impl InteractiveRenderer {
    pub fn new(out: Box<dyn Write + Send>) -> InteractiveRenderer {
        InteractiveRenderer::with_indicator(out, Box::new(Spinner::new()))
    }

    pub fn with_indicator(
        out: Box<dyn Write + Send>,
        indicator: Box<dyn Indicator>,
    ) -> InteractiveRenderer {
        InteractiveRenderer {
            out,
            indicator,
            table: Table::new(
                DISPLAY_ORDER.iter().map(|c| print_color(*c)).collect(),
                vec![false, true, true],
                4,
            ),
        }
    }

    fn panel(&mut self, stats: &HealStats) -> String {
        let scanned = match &stats.last_item {
            // The rewind assumes a fixed line count, so line breaks in names are flattened.
            Some(item) => utils::line_trunc(
                &HealItem::new(item)
                    .entity_string()
                    .replace(&['\n', '\r'][..], " "),
                LINE_WIDTH - SCANNED_PREFIX.len(),
            ),
            None => WAITING_FOR_STATUS.to_owned(),
        };
        let spinner = self.indicator.next_indicator().to_string();

        let (percents, bars) = stats.percentages_and_bars();
        let rows: Vec<Vec<String>> = DISPLAY_ORDER
            .iter()
            .map(|color| {
                vec![
                    color.to_string(),
                    utils::comma(stats.color_count(*color) as i64),
                    format!("{:5.1}% {}", percents[color], bars[color]),
                ]
            })
            .collect();

        format!(
            " {}  {}\n    {}\n{}",
            spinner.bold(),
            scanned,
            stats.healed_summary(),
            self.table.render(&rows)
        )
    }
}

impl Renderer for InteractiveRenderer {
    fn render(&mut self, stats: &HealStats, _status: &HealTaskStatus) -> Result<(), HealError> {
        let panel = self.panel(stats);
        self.out.write_all(panel.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn prepare_next(&mut self) -> Result<(), HealError> {
        self.out.write_all(REWIND_LINE.repeat(REDRAW_LINES).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, _stats: &HealStats, outcome: &SessionOutcome) -> Result<(), HealError> {
        if let SessionOutcome::Stopped { detail } = outcome {
            writeln!(self.out, "{}", stopped_message(detail))?;
            self.out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heal::item::tests::object_item;
    use crate::heal::render::tests::SharedBuf;
    use crate::heal::stats::HealSessionParams;

    struct Fixed(char);

    impl Indicator for Fixed {
        fn next_indicator(&mut self) -> char {
            self.0
        }
    }

    fn renderer(buf: &SharedBuf) -> InteractiveRenderer {
        colored::control::set_override(false);
        InteractiveRenderer::with_indicator(Box::new(buf.clone()), Box::new(Fixed('*')))
    }

    #[test]
    fn test_render_waiting() {
        let buf = SharedBuf::default();
        let mut r = renderer(&buf);
        let stats = HealStats::new(HealSessionParams::default());
        r.render(&stats, &HealTaskStatus::default()).unwrap();
        let out = buf.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), REDRAW_LINES);
        assert_eq!(lines[0], " *  ** waiting for status from server **");
        assert_eq!(lines[1], "    0/0 objects; 0 B in 0s");
        assert!(lines[2].starts_with("    ┌"));
        assert!(lines[3].starts_with("    │ Green  │ 0 │   0.0% "));
        assert!(lines[6].starts_with("    │ Grey   │"));
        assert!(lines[7].starts_with("    └"));
    }

    #[test]
    fn test_render_progress() {
        let buf = SharedBuf::default();
        let mut r = renderer(&buf);
        let mut stats = HealStats::new(HealSessionParams::default());
        stats.update(&object_item(1024, 2, 3, 2, 4)).unwrap();
        r.render(&stats, &HealTaskStatus::default()).unwrap();
        let out = buf.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " *  photos/2021/cat.png");
        assert_eq!(lines[1], "    1/1 objects; 1024 B in 0s");
        assert_eq!(
            lines[4],
            format!("    │ Yellow │ 1 │ 100.0% {} │", "█".repeat(12))
        );
    }

    #[test]
    fn test_long_entity_is_truncated() {
        let buf = SharedBuf::default();
        let mut r = renderer(&buf);
        let mut stats = HealStats::new(HealSessionParams::default());
        let mut item = object_item(1, 2, 2, 4, 4);
        item.object = "o".repeat(200);
        stats.update(&item).unwrap();
        r.render(&stats, &HealTaskStatus::default()).unwrap();
        let first = buf.contents().lines().next().unwrap().to_owned();
        assert_eq!(first.chars().count(), " *  ".len() + LINE_WIDTH - SCANNED_PREFIX.len());
    }

    #[test]
    fn test_line_breaks_in_entity_keep_panel_height() {
        let buf = SharedBuf::default();
        let mut r = renderer(&buf);
        let mut stats = HealStats::new(HealSessionParams::default());
        let mut item = object_item(1, 2, 2, 4, 4);
        item.object = "a\nb\r\nc".to_owned();
        stats.update(&item).unwrap();
        r.render(&stats, &HealTaskStatus::default()).unwrap();
        let out = buf.contents();
        assert_eq!(out.lines().count(), REDRAW_LINES);
        assert!(out.lines().next().unwrap().ends_with("a b  c"));
    }

    #[test]
    fn test_prepare_next_rewinds_panel() {
        let buf = SharedBuf::default();
        let mut r = renderer(&buf);
        r.prepare_next().unwrap();
        assert_eq!(buf.contents(), "\x1b[1A\x1b[2K".repeat(8));
    }

    #[test]
    fn test_finish() {
        let buf = SharedBuf::default();
        let mut r = renderer(&buf);
        let stats = HealStats::new(HealSessionParams::default());
        r.finish(&stats, &SessionOutcome::Finished).unwrap();
        assert_eq!(buf.contents(), "");
        r.finish(
            &stats,
            &SessionOutcome::Stopped {
                detail: "disk failure".to_owned(),
            },
        )
        .unwrap();
        assert_eq!(buf.contents(), "Heal had an error - disk failure\n");
    }
}
