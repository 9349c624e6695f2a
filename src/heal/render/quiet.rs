use std::io::Write;

use colored::Colorize;

use super::{stopped_message, Renderer};
use crate::admin::{HealItemType, HealTaskStatus};
use crate::errors::HealError;
use crate::heal::item::HealItem;
use crate::heal::session::SessionOutcome;
use crate::heal::stats::HealStats;

/// Appends one line per healed item and a closing summary line.
pub struct QuietRenderer {
    out: Box<dyn Write + Send>,
}

impl QuietRenderer {
    pub fn new(out: Box<dyn Write + Send>) -> QuietRenderer {
        QuietRenderer { out }
    }
}

pub(crate) fn item_line(item: &HealItem) -> Result<String, HealError> {
    let change = item.color_change()?;
    let transition = format!(
        "[{:<6} -> {:>6}] ",
        change.before.to_string(),
        change.after.to_string()
    );
    let result = item.result_string();
    let line = match item.item_type {
        HealItemType::Metadata | HealItemType::BucketMetadata => {
            format!("{}{}", transition, format!("** {} **", result).bold())
        }
        _ => format!("{}{}", transition, result),
    };
    Ok(line)
}

impl Renderer for QuietRenderer {
    fn render(&mut self, _stats: &HealStats, status: &HealTaskStatus) -> Result<(), HealError> {
        for item in status.items.iter() {
            let line = item_line(&HealItem::new(item))?;
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, stats: &HealStats, outcome: &SessionOutcome) -> Result<(), HealError> {
        if let SessionOutcome::Stopped { detail } = outcome {
            writeln!(self.out, "{}", stopped_message(detail))?;
        }
        writeln!(self.out, "Healed:\t{}", stats.healed_summary())?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heal::item::tests::{object_item, replicated_item};
    use crate::heal::render::tests::SharedBuf;
    use crate::heal::stats::HealSessionParams;

    #[test]
    fn test_render_items() {
        colored::control::set_override(false);
        let buf = SharedBuf::default();
        let mut r = QuietRenderer::new(Box::new(buf.clone()));
        let status = HealTaskStatus {
            items: vec![
                object_item(1024, 2, 3, 2, 4),
                replicated_item(HealItemType::Metadata, 8, 4, 7),
                replicated_item(HealItemType::Bucket, 8, 8, 8),
            ],
            ..Default::default()
        };
        let stats = HealStats::new(HealSessionParams::default());
        r.render(&stats, &status).unwrap();
        assert_eq!(
            buf.contents(),
            "[Red    -> Yellow] photos/2021/cat.png\n\
             [Grey   -> Yellow] ** system:disk-format **\n\
             [Green  ->  Green] photos\n"
        );
    }

    #[test]
    fn test_render_propagates_classification_error() {
        let buf = SharedBuf::default();
        let mut r = QuietRenderer::new(Box::new(buf.clone()));
        let status = HealTaskStatus {
            items: vec![object_item(1, 4, 0, 4, 4)],
            ..Default::default()
        };
        let stats = HealStats::new(HealSessionParams::default());
        assert!(r.render(&stats, &status).unwrap_err().is_classification());
    }

    #[test]
    fn test_finish() {
        let buf = SharedBuf::default();
        let mut r = QuietRenderer::new(Box::new(buf.clone()));
        let mut stats = HealStats::new(HealSessionParams::default());
        stats.update(&object_item(1536, 2, 3, 2, 4)).unwrap();
        r.finish(
            &stats,
            &SessionOutcome::Stopped {
                detail: "disk failure".to_owned(),
            },
        )
        .unwrap();
        assert_eq!(
            buf.contents(),
            "Heal had an error - disk failure\nHealed:\t1/1 objects; 1 KiB in 0s\n"
        );
    }
}
