use std::time::Duration;

use lazy_static::lazy_static;

use super::*;
use crate::auth::{AuthError, Credentials};
use crate::errors::{UiError, UiErrorItem};

pub const MONITOR_SUB_SYS: &str = "monitor";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:9000";
pub const DEFAULT_REGION: &str = "us-east-1";

lazy_static! {
    pub static ref DEFAULT_KVS: KVS = KVS(vec![
        KV {
            key: ENDPOINT.to_owned(),
            value: DEFAULT_ENDPOINT.to_owned(),
        },
        KV {
            key: ACCESS_KEY.to_owned(),
            value: "".to_owned(),
        },
        KV {
            key: SECRET_KEY.to_owned(),
            value: "".to_owned(),
        },
        KV {
            key: REGION_NAME.to_owned(),
            value: DEFAULT_REGION.to_owned(),
        },
        KV {
            key: POLL_INTERVAL.to_owned(),
            value: "1s".to_owned(),
        },
        KV {
            key: LOG_LEVEL.to_owned(),
            value: "warn".to_owned(),
        },
    ]);
    pub static ref HELP: HelpKVS = HelpKVS(vec![
        HelpKV {
            key: ENDPOINT.to_owned(),
            description: "admin endpoint of the storage cluster, e.g. http://127.0.0.1:9000"
                .to_owned(),
            optional: true,
            typ: "url".to_owned(),
        },
        HelpKV {
            key: ACCESS_KEY.to_owned(),
            description: "access key of an admin user".to_owned(),
            optional: false,
            typ: "string".to_owned(),
        },
        HelpKV {
            key: SECRET_KEY.to_owned(),
            description: "secret key of an admin user".to_owned(),
            optional: false,
            typ: "string".to_owned(),
        },
        HelpKV {
            key: REGION_NAME.to_owned(),
            description: "region used to sign admin requests".to_owned(),
            optional: true,
            typ: "string".to_owned(),
        },
        HelpKV {
            key: POLL_INTERVAL.to_owned(),
            description: "pause between two heal status requests. eg. 1s".to_owned(),
            optional: true,
            typ: "duration".to_owned(),
        },
        HelpKV {
            key: LOG_LEVEL.to_owned(),
            description: "diagnostics log level written to stderr. eg. debug".to_owned(),
            optional: true,
            typ: "level".to_owned(),
        },
    ]);
}

pub fn env_for_key(key: &str) -> String {
    let mut env = String::from(ENV_PREFIX);
    env.push_str(if key == REGION_NAME { "REGION" } else { key });
    env.to_uppercase()
}

/// Describes the environment variables for command line help.
pub fn env_help() -> String {
    let mut help = String::from("ENVIRONMENT VARIABLES:\n");
    for kv in HELP.iter() {
        let default = DEFAULT_KVS.get(&kv.key);
        help.push_str(&format!("    {:<24}{}", env_for_key(&kv.key), kv.description));
        if !default.is_empty() {
            help.push_str(&format!(" (default: {})", default));
        }
        if !kv.optional {
            help.push_str(" (required)");
        }
        help.push('\n');
    }
    help
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: url::Url,
    pub credentials: Credentials,
    pub region: String,
    pub poll_interval: Duration,
    pub log_level: slog::Level,
}

/// Resolves the monitor configuration. Explicitly given `kvs` (command line)
/// win over the environment, which wins over `DEFAULT_KVS`.
pub fn lookup_config(kvs: &KVS) -> anyhow::Result<Config> {
    check_valid_keys(MONITOR_SUB_SYS, kvs, &DEFAULT_KVS)?;
    lookup_config_with(kvs, |key| std::env::var(env_for_key(key)).ok())
}

pub(crate) fn lookup_config_with<F>(kvs: &KVS, env: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let value = |key: &str| -> String {
        kvs.lookup(key)
            .map(ToOwned::to_owned)
            .or_else(|| env(key))
            .unwrap_or_else(|| DEFAULT_KVS.get(key).to_owned())
    };

    let endpoint = value(ENDPOINT);
    let endpoint = url::Url::parse(&endpoint)
        .map_err(|e| UiError::InvalidEndpoint.error(e.into()))?;
    if !matches!(endpoint.scheme(), "http" | "https") || endpoint.host_str().is_none() {
        return Err(UiError::InvalidEndpoint
            .error(anyhow::anyhow!("unsupported endpoint '{}'", endpoint))
            .into());
    }

    let access_key = value(ACCESS_KEY);
    if access_key.is_empty() {
        return Err(UiErrorItem::from(UiError::MissingEnvCredentialAccessKey).into());
    }
    let secret_key = value(SECRET_KEY);
    if secret_key.is_empty() {
        return Err(UiErrorItem::from(UiError::MissingEnvCredentialSecretKey).into());
    }
    let credentials = Credentials::new(&access_key, &secret_key).map_err(|e: AuthError| {
        UiError::InvalidCredentials.error(e.into())
    })?;

    let poll_interval = value(POLL_INTERVAL);
    let poll_interval = humantime::parse_duration(&poll_interval)
        .map_err(|e| UiError::InvalidPollInterval.error(e.into()))
        .and_then(|interval| match interval.as_nanos() {
            0 => Err(UiError::InvalidPollInterval
                .msg(format!("Invalid poll interval '{}'", poll_interval))),
            _ => Ok(interval),
        })?;

    let log_level = value(LOG_LEVEL);
    let log_level = Some(log_level.as_str())
        // "off" is a level name to slog but not a level.
        .filter(|level| !level.eq_ignore_ascii_case("off"))
        .and_then(|level| level.parse::<slog::Level>().ok())
        .ok_or_else(|| UiError::InvalidLogLevel.msg(format!("Invalid log level '{}'", log_level)))?;

    Ok(Config {
        endpoint,
        credentials,
        region: value(REGION_NAME),
        poll_interval,
        log_level,
    })
}
