use anyhow::bail;
use serde::{Deserialize, Serialize};

pub const ENDPOINT: &str = "endpoint";
pub const ACCESS_KEY: &str = "access_key";
pub const SECRET_KEY: &str = "secret_key";
pub const REGION_NAME: &str = "region";
pub const POLL_INTERVAL: &str = "poll_interval";
pub const LOG_LEVEL: &str = "log_level";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct KV {
    pub key: String,
    pub value: String,
}

#[derive(Default, Clone, Debug)]
pub struct KVS(pub Vec<KV>);

impl KVS {
    pub fn iter(&self) -> std::slice::Iter<'_, KV> {
        self.0.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|kv| kv.key.as_str()).collect()
    }

    // Sets a key value pair.
    pub fn set(&mut self, key: String, value: String) {
        match self.0.iter_mut().find(|kv| kv.key == key) {
            Some(kv) => {
                kv.value = value;
            }
            None => self.0.push(KV { key, value }),
        }
    }

    pub fn get(&self, key: &str) -> &str {
        self.lookup(key).unwrap_or("")
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|&kv| kv.key == key)
            .map(|kv| kv.value.as_str())
    }
}

// Rejects keys that the sub-system does not know about.
pub fn check_valid_keys(sub_sys: &str, kvs: &KVS, valid_kvs: &KVS) -> anyhow::Result<()> {
    let valid_keys = valid_kvs.keys();
    let unknown: Vec<&str> = kvs
        .iter()
        .map(|kv| kv.key.as_str())
        .filter(|key| !valid_keys.contains(key))
        .collect();
    if !unknown.is_empty() {
        bail!(
            "found invalid keys ({}) for '{}' sub-system",
            unknown.join(","),
            sub_sys
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kvs(pairs: &[(&str, &str)]) -> KVS {
        let mut kvs = KVS::default();
        for (k, v) in pairs {
            kvs.set(k.to_string(), v.to_string());
        }
        kvs
    }

    #[test]
    fn test_kvs_set_overwrites() {
        let mut kvs = kvs(&[(ENDPOINT, "http://a:9000"), (POLL_INTERVAL, "1s")]);
        kvs.set(POLL_INTERVAL.to_owned(), "2s".to_owned());
        assert_eq!(kvs.get(POLL_INTERVAL), "2s");
        assert_eq!(kvs.keys(), vec![ENDPOINT, POLL_INTERVAL]);
        assert_eq!(kvs.lookup(REGION_NAME), None);
        assert_eq!(kvs.get(REGION_NAME), "");
    }

    #[test]
    fn test_check_valid_keys() {
        let valid = kvs(&[(ENDPOINT, ""), (REGION_NAME, "")]);
        assert!(check_valid_keys("monitor", &kvs(&[(ENDPOINT, "x")]), &valid).is_ok());
        let err = check_valid_keys("monitor", &kvs(&[("bogus", "x")]), &valid).unwrap_err();
        assert_eq!(
            err.to_string(),
            "found invalid keys (bogus) for 'monitor' sub-system"
        );
    }
}
