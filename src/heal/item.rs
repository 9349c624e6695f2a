use std::collections::BTreeMap;
use std::ops::Deref;

use serde::Serialize;

use super::color::{classify, HealthColor};
use crate::admin::{HealItemType, HealResultItem};
use crate::errors::HealError;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Change<T> {
    pub before: T,
    pub after: T,
}

/// Read-only view translating a raw heal result for classification and
/// display.
#[derive(Clone, Copy, Debug)]
pub struct HealItem<'a>(&'a HealResultItem);

impl<'a> Deref for HealItem<'a> {
    type Target = HealResultItem;

    fn deref(&self) -> &HealResultItem {
        self.0
    }
}

impl<'a> HealItem<'a> {
    pub fn new(item: &'a HealResultItem) -> HealItem<'a> {
        HealItem(item)
    }

    /// Bucket and server metadata are replicated on every drive rather than
    /// erasure coded.
    pub fn is_replicated(&self) -> bool {
        matches!(
            self.item_type,
            HealItemType::Metadata | HealItemType::Bucket
        )
    }

    /// Health colors before and after the heal, using the rule that fits the
    /// item type.
    pub fn color_change(&self) -> Result<Change<HealthColor>, HealError> {
        if self.is_replicated() {
            self.replicated_file_color_change()
        } else {
            self.object_color_change()
        }
    }

    pub fn object_color_change(&self) -> Result<Change<HealthColor>, HealError> {
        let (online_before, online_after) = self.online_counts();
        let before = classify(online_before as i64 - self.data_blocks, self.parity_blocks)?;
        let after = classify(online_after as i64 - self.data_blocks, self.parity_blocks)?;
        Ok(Change { before, after })
    }

    pub fn replicated_file_color_change(&self) -> Result<Change<HealthColor>, HealError> {
        let color = |online: usize| -> Result<HealthColor, HealError> {
            if self.set_count <= 0 {
                return Err(HealError::InvalidParity {
                    surplus: online as i64,
                    parity: 0,
                });
            }
            // Treat a replicated file like an erasure coded object whose data
            // shards are the read quorum of one set.
            let drives_per_set = self.disk_count / self.set_count;
            let quorum = drives_per_set / 2 + 1;
            let surplus = online as i64 / self.set_count - quorum;
            let parity = drives_per_set - quorum;
            classify(surplus, parity)
        };
        let (online_before, online_after) = self.online_counts();
        Ok(Change {
            before: color(online_before)?,
            after: color(online_after)?,
        })
    }

    pub fn type_and_name(&self) -> (String, String) {
        let name = format!("{}/{}", self.bucket, self.object);
        match self.item_type {
            HealItemType::Metadata => ("system".to_owned(), self.detail.clone()),
            HealItemType::BucketMetadata => {
                ("system".to_owned(), format!("bucket-metadata:{}", name))
            }
            HealItemType::Bucket => ("bucket".to_owned(), self.bucket.clone()),
            HealItemType::Object => ("object".to_owned(), name),
            HealItemType::Unknown => {
                let typ = format!("!! Unknown heal result record {:?} !!", self.0);
                (typ.clone(), typ)
            }
        }
    }

    /// Short description of what is being scanned.
    pub fn entity_string(&self) -> String {
        match self.item_type {
            HealItemType::Object => format!("{}/{}", self.bucket, self.object),
            HealItemType::Bucket => self.bucket.clone(),
            HealItemType::Metadata => "[server-config]".to_owned(),
            HealItemType::BucketMetadata => format!("[{}/{}]", self.bucket, self.object),
            HealItemType::Unknown => "** unexpected **".to_owned(),
        }
    }

    pub fn result_string(&self) -> String {
        let (typ, name) = self.type_and_name();
        match self.item_type {
            HealItemType::Metadata | HealItemType::BucketMetadata => format!("{}:{}", typ, name),
            _ => name,
        }
    }

    /// Drive states keyed by endpoint. Drives only reported after the heal
    /// are left out.
    pub fn drive_changes(&self) -> BTreeMap<String, Change<String>> {
        self.before
            .drives
            .iter()
            .map(|before| {
                let after = self
                    .after
                    .drives
                    .iter()
                    .find(|d| d.endpoint == before.endpoint)
                    .map(|d| d.state.clone())
                    .unwrap_or_default();
                (
                    before.endpoint.clone(),
                    Change {
                        before: before.state.clone(),
                        after,
                    },
                )
            })
            .collect()
    }
}
