// Env prefix used for all envs in healmon
pub const ENV_PREFIX: &str = "HEALMON_";

// Top level common ENVs
pub const ENV_ENDPOINT: &str = "HEALMON_ENDPOINT";
pub const ENV_ACCESS_KEY: &str = "HEALMON_ACCESS_KEY";
pub const ENV_SECRET_KEY: &str = "HEALMON_SECRET_KEY";
pub const ENV_REGION_NAME: &str = "HEALMON_REGION";
pub const ENV_POLL_INTERVAL: &str = "HEALMON_POLL_INTERVAL";
pub const ENV_LOG_LEVEL: &str = "HEALMON_LOG_LEVEL";
