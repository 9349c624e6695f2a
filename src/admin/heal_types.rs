use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{Display, EnumString};

use crate::utils;

// Drive states reported by the cluster for every drive touched by a heal.
pub const DRIVE_STATE_OK: &str = "ok";
pub const DRIVE_STATE_OFFLINE: &str = "offline";
pub const DRIVE_STATE_CORRUPT: &str = "corrupt";
pub const DRIVE_STATE_MISSING: &str = "missing";
pub const DRIVE_STATE_PATH_NOT_FOUND: &str = "path-not-found";
pub const DRIVE_STATE_UNFORMATTED: &str = "unformatted";

// Summary values of a heal sequence.
pub const HEAL_SUMMARY_FINISHED: &str = "finished";
pub const HEAL_SUMMARY_STOPPED: &str = "stopped";
pub const HEAL_SUMMARY_RUNNING: &str = "running";

#[derive(Clone, Copy, Debug, Display, EnumString, PartialEq, Eq)]
pub enum HealItemType {
    #[strum(serialize = "metadata")]
    Metadata,
    #[strum(serialize = "bucket")]
    Bucket,
    #[strum(serialize = "bucket-metadata")]
    BucketMetadata,
    #[strum(serialize = "object")]
    Object,
    // Any type this client does not know about yet.
    #[strum(serialize = "unknown")]
    Unknown,
}

impl Default for HealItemType {
    fn default() -> Self {
        HealItemType::Unknown
    }
}

impl Serialize for HealItemType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HealItemType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(HealItemType::Unknown))
    }
}

#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum HealScanMode {
    Unknown = 0,
    Normal = 1,
    Deep = 2,
}

impl Default for HealScanMode {
    fn default() -> Self {
        HealScanMode::Normal
    }
}

impl std::str::FromStr for HealScanMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(HealScanMode::Normal),
            "deep" => Ok(HealScanMode::Deep),
            _ => Err(anyhow::anyhow!("unknown scan mode '{}'", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HealOpts {
    #[serde(default)]
    pub recursive: bool,
    #[serde(rename = "dryRun", default)]
    pub dry_run: bool,
    #[serde(default)]
    pub remove: bool,
    #[serde(rename = "scanMode", default)]
    pub scan_mode: HealScanMode,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HealDriveInfo {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HealDrives {
    #[serde(default)]
    pub drives: Vec<HealDriveInfo>,
}

impl HealDrives {
    pub fn online(&self) -> usize {
        self.drives
            .iter()
            .filter(|d| d.state == DRIVE_STATE_OK)
            .count()
    }
}

/// One repair unit reported by a heal sequence.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HealResultItem {
    #[serde(rename = "resultId", default)]
    pub result_index: i64,
    #[serde(rename = "type", default)]
    pub item_type: HealItemType,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub detail: String,
    #[serde(rename = "parityBlocks", default)]
    pub parity_blocks: i64,
    #[serde(rename = "dataBlocks", default)]
    pub data_blocks: i64,
    #[serde(rename = "diskCount", default)]
    pub disk_count: i64,
    #[serde(rename = "setCount", default)]
    pub set_count: i64,
    #[serde(default)]
    pub before: HealDrives,
    #[serde(default)]
    pub after: HealDrives,
    /// Object size in bytes, `-1` when the cluster could not determine it.
    #[serde(rename = "objectSize", default)]
    pub object_size: i64,
}

impl HealResultItem {
    /// Number of online drives before and after the heal.
    pub fn online_counts(&self) -> (usize, usize) {
        (self.before.online(), self.after.online())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HealTaskStatus {
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "detail", default)]
    pub failure_detail: String,
    #[serde(rename = "startTime", default)]
    pub start_time: Option<utils::DateTime>,
    #[serde(rename = "settings", default)]
    pub heal_settings: HealOpts,
    #[serde(rename = "numDisks", default)]
    pub num_disks: i64,
    #[serde(default)]
    pub items: Vec<HealResultItem>,
}

impl HealTaskStatus {
    pub fn is_finished(&self) -> bool {
        self.summary == HEAL_SUMMARY_FINISHED
    }

    pub fn is_stopped(&self) -> bool {
        self.summary == HEAL_SUMMARY_STOPPED
    }
}

/// Returned by the cluster when a heal sequence is started (or stopped).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HealStartSuccess {
    #[serde(rename = "clientToken", default)]
    pub client_token: String,
    #[serde(rename = "clientAddress", default)]
    pub client_address: String,
    #[serde(rename = "startTime", default)]
    pub start_time: Option<utils::DateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heal_task_status_decode() {
        let body = r#"{
            "summary": "running",
            "detail": "",
            "startTime": "2021-07-01T10:00:00Z",
            "settings": {"recursive": true, "dryRun": false, "remove": false, "scanMode": 2},
            "numDisks": 4,
            "items": [{
                "resultId": 1,
                "type": "object",
                "bucket": "photos",
                "object": "2021/cat.png",
                "detail": "",
                "parityBlocks": 2,
                "dataBlocks": 2,
                "diskCount": 4,
                "setCount": 1,
                "before": {"drives": [
                    {"uuid": "a", "endpoint": "http://n1/d1", "state": "ok"},
                    {"uuid": "b", "endpoint": "http://n1/d2", "state": "missing"},
                    {"uuid": "c", "endpoint": "http://n2/d1", "state": "ok"},
                    {"uuid": "d", "endpoint": "http://n2/d2", "state": "offline"}
                ]},
                "after": {"drives": [
                    {"uuid": "a", "endpoint": "http://n1/d1", "state": "ok"},
                    {"uuid": "b", "endpoint": "http://n1/d2", "state": "ok"},
                    {"uuid": "c", "endpoint": "http://n2/d1", "state": "ok"},
                    {"uuid": "d", "endpoint": "http://n2/d2", "state": "offline"}
                ]},
                "objectSize": 1024
            }, {
                "resultId": 2,
                "type": "heal-v9-thing",
                "bucket": "photos"
            }]
        }"#;
        let status: HealTaskStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.summary, HEAL_SUMMARY_RUNNING);
        assert!(!status.is_finished() && !status.is_stopped());
        assert_eq!(status.heal_settings.scan_mode, HealScanMode::Deep);
        assert!(status.start_time.is_some());
        assert_eq!(status.items.len(), 2);
        assert_eq!(status.items[0].item_type, HealItemType::Object);
        assert_eq!(status.items[0].online_counts(), (2, 3));
        assert_eq!(status.items[1].item_type, HealItemType::Unknown);
        assert_eq!(status.items[1].online_counts(), (0, 0));
    }

    #[test]
    fn test_heal_opts_encode() {
        let opts = HealOpts {
            recursive: true,
            dry_run: true,
            remove: false,
            scan_mode: HealScanMode::Normal,
        };
        assert_eq!(
            serde_json::to_string(&opts).unwrap(),
            r#"{"recursive":true,"dryRun":true,"remove":false,"scanMode":1}"#
        );
    }

    #[test]
    fn test_heal_item_type_names() {
        assert_eq!(HealItemType::BucketMetadata.to_string(), "bucket-metadata");
        assert_eq!(
            "metadata".parse::<HealItemType>().unwrap(),
            HealItemType::Metadata
        );
        assert_eq!("deep".parse::<HealScanMode>().unwrap(), HealScanMode::Deep);
        assert!("shallow".parse::<HealScanMode>().is_err());
    }
}
