use std::collections::BTreeMap;
use std::time::Duration;

use derivative::Derivative;

use super::color::HealthColor;
use super::item::HealItem;
use crate::admin::{HealItemType, HealOpts, HealResultItem};
use crate::errors::HealError;
use crate::utils::{self, DateTimeExt};

/// What a monitoring session watches; fixed for the session's lifetime.
#[derive(Clone, Debug, Default)]
pub struct HealSessionParams {
    pub bucket: String,
    pub prefix: String,
    pub client_token: String,
    pub force_start: bool,
    pub opts: HealOpts,
}

/// Running statistics accumulated over all heal results of one session.
///
/// Counters only grow; the session owns the only instance and is its only
/// writer.
#[derive(Debug, Derivative)]
#[derivative(Default)]
pub struct HealStats {
    pub params: HealSessionParams,

    #[derivative(Default(value = "utils::now()"))]
    started: utils::DateTime,
    // Total time since heal start
    pub heal_duration: Duration,

    pub bytes_scanned: u64,
    // Objects are the data bearing subset of all items.
    pub objects_scanned: u64,
    pub items_scanned: u64,
    pub objects_healed: u64,
    pub items_healed: u64,

    // Online drives after the heal -> number of items with that many.
    pub objects_by_online_drives: BTreeMap<usize, u64>,
    // Health color after the heal -> number of items.
    pub health_cols: BTreeMap<HealthColor, u64>,

    pub last_item: Option<HealResultItem>,
}

impl HealStats {
    pub fn new(params: HealSessionParams) -> HealStats {
        HealStats::with_start(params, utils::now())
    }

    pub fn with_start(params: HealSessionParams, started: utils::DateTime) -> HealStats {
        HealStats {
            params,
            started,
            ..Default::default()
        }
    }

    pub fn started(&self) -> utils::DateTime {
        self.started
    }

    /// Adopts the start time the cluster reports for the heal sequence.
    pub fn sync_start_time(&mut self, started: utils::DateTime) {
        self.started = started;
    }

    pub fn update_duration(&mut self, now: utils::DateTime) {
        self.heal_duration = now.elapsed_since(self.started);
    }

    /// Folds one heal result into the statistics.
    ///
    /// Counters are updated before the item is classified, so they stay
    /// applied when classification fails.
    pub fn update(&mut self, item: &HealResultItem) -> Result<(), HealError> {
        let is_object = item.item_type == HealItemType::Object;
        if is_object {
            // Objects whose size could not be found have -1 size.
            if item.object_size >= 0 {
                self.bytes_scanned += item.object_size as u64;
            }
            self.objects_scanned += 1;
        }
        self.items_scanned += 1;

        let (before_up, after_up) = item.online_counts();
        if after_up > before_up {
            if is_object {
                self.objects_healed += 1;
            }
            self.items_healed += 1;
        }
        *self.objects_by_online_drives.entry(after_up).or_default() += 1;
        self.last_item = Some(item.clone());

        let after = HealItem::new(item).color_change()?.after;
        *self.health_cols.entry(after).or_default() += 1;
        Ok(())
    }

    pub fn color_count(&self, color: HealthColor) -> u64 {
        self.health_cols.get(&color).copied().unwrap_or(0)
    }
}
