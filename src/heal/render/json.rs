use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use super::Renderer;
use crate::admin::{HealItemType, HealTaskStatus};
use crate::errors::HealError;
use crate::heal::item::{Change, HealItem};
use crate::heal::session::SessionOutcome;
use crate::heal::stats::HealStats;
use crate::utils;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Serialize, Debug, PartialEq)]
pub struct HealRecord {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "type")]
    pub typ: String,
    pub name: String,
    pub health: Change<&'static str>,
    pub drives: BTreeMap<String, Change<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl HealRecord {
    pub fn new(item: &HealItem) -> Result<HealRecord, HealError> {
        let change = item.color_change()?;
        let (typ, name) = item.type_and_name();
        Ok(HealRecord {
            status: STATUS_SUCCESS,
            error: None,
            typ,
            name,
            health: Change {
                before: change.before.as_lower_str(),
                after: change.after.as_lower_str(),
            },
            drives: item.drive_changes(),
            size: match item.item_type {
                HealItemType::Object => Some(item.object_size),
                _ => None,
            },
        })
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SummaryRecord {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "type")]
    pub typ: &'static str,
    pub objects_scanned: u64,
    pub objects_healed: u64,
    pub items_scanned: u64,
    pub items_healed: u64,
    pub size: u64,
    // seconds
    pub duration: u64,
}

impl SummaryRecord {
    pub fn new(stats: &HealStats, outcome: &SessionOutcome) -> SummaryRecord {
        let (status, error) = match outcome {
            SessionOutcome::Finished => (STATUS_SUCCESS, None),
            SessionOutcome::Stopped { detail } => (STATUS_ERROR, Some(detail.clone())),
        };
        SummaryRecord {
            status,
            error,
            typ: "summary",
            objects_scanned: stats.objects_scanned,
            objects_healed: stats.objects_healed,
            items_scanned: stats.items_scanned,
            items_healed: stats.items_healed,
            size: stats.bytes_scanned,
            duration: utils::round_secs(stats.heal_duration),
        }
    }
}

/// Streams one JSON document per line.
pub struct JsonRenderer {
    out: Box<dyn Write + Send>,
}

impl JsonRenderer {
    pub fn new(out: Box<dyn Write + Send>) -> JsonRenderer {
        JsonRenderer { out }
    }

    fn emit<T: Serialize>(&mut self, record: &T) -> Result<(), HealError> {
        let line = serde_json::to_string(record)?;
        writeln!(self.out, "{}", line)?;
        Ok(())
    }
}

impl Renderer for JsonRenderer {
    fn render(&mut self, _stats: &HealStats, status: &HealTaskStatus) -> Result<(), HealError> {
        for item in status.items.iter() {
            let record = HealRecord::new(&HealItem::new(item))?;
            self.emit(&record)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, stats: &HealStats, outcome: &SessionOutcome) -> Result<(), HealError> {
        self.emit(&SummaryRecord::new(stats, outcome))?;
        self.out.flush()?;
        Ok(())
    }
}
