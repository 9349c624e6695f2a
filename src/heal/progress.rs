use std::collections::BTreeMap;

use super::color::HealthColor;
use super::stats::HealStats;
use crate::utils;

pub const BAR_LEN: usize = 12;
pub const BAR_CHAR: char = '█';
pub const EMPTY_BAR_CHAR: char = ' ';

/// Display texts for scanned objects, scanned size and elapsed time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressSummary {
    pub objects: String,
    pub size: String,
    pub duration: String,
}

impl HealStats {
    pub fn progress_summary(&self) -> ProgressSummary {
        ProgressSummary {
            objects: utils::comma(self.objects_scanned as i64),
            size: utils::format_binary_size(self.bytes_scanned),
            duration: utils::format_duration(self.heal_duration),
        }
    }

    /// `healed/total objects; size in duration`
    pub fn healed_summary(&self) -> String {
        let progress = self.progress_summary();
        format!(
            "{}/{} objects; {} in {}",
            utils::comma(self.objects_healed as i64),
            progress.objects,
            progress.size,
            progress.duration
        )
    }

    /// Share of scanned items per health color, with a fixed width bar.
    ///
    /// Bars round up, so any color that was seen gets at least one cell.
    pub fn percentages_and_bars(
        &self,
    ) -> (BTreeMap<HealthColor, f64>, BTreeMap<HealthColor, String>) {
        let mut percents = BTreeMap::new();
        let mut bars = BTreeMap::new();
        for color in HealthColor::ALL.iter() {
            let count = self.color_count(*color);
            let (percent, filled) = if self.items_scanned == 0 {
                (0.0, 0)
            } else {
                (
                    count as f64 * 100.0 / self.items_scanned as f64,
                    utils::ceil_frac(BAR_LEN as u64 * count, self.items_scanned) as usize,
                )
            };
            let filled = filled.min(BAR_LEN);
            let bar: String = std::iter::repeat(BAR_CHAR)
                .take(filled)
                .chain(std::iter::repeat(EMPTY_BAR_CHAR).take(BAR_LEN - filled))
                .collect();
            percents.insert(*color, percent);
            bars.insert(*color, bar);
        }
        (percents, bars)
    }
}
