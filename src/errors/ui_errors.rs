use std::fmt;

use colored::*;
use const_format::formatcp;
use thiserror::Error;

use crate::config::*;

#[derive(Error, Clone, Debug, Default)]
pub struct UiErrorItem {
    msg: String,
    action: String,
    hint: String,
    detail: Option<String>,
}

#[derive(Error, Clone, Debug, Default)]
pub struct UiErrorItemConst {
    msg: &'static str,
    action: &'static str,
    hint: &'static str,
}

impl fmt::Display for UiErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail {
            Some(ref detail) => write!(f, "{}: {}", self.msg, detail),
            None => {
                if !self.msg.is_empty() {
                    write!(f, "{}", self.msg)
                } else {
                    write!(f, "<None>")
                }
            }
        }
    }
}

impl fmt::Display for UiErrorItemConst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.msg.is_empty() {
            write!(f, "{}", self.msg)
        } else {
            write!(f, "<None>")
        }
    }
}

impl UiErrorItem {
    pub fn msg(&self, msg: String) -> UiErrorItem {
        let mut e = self.clone();
        e.msg = msg;
        e
    }

    pub fn error(&self, err: anyhow::Error) -> UiErrorItem {
        let mut e = self.clone();
        e.detail = Some(err.to_string());
        e
    }

    /// Renders an error for the terminal. A `UiErrorItem` anywhere in the
    /// chain contributes its action and hint; other errors only their message.
    pub fn format(intro_msg: &str, err: &anyhow::Error, json: bool) -> String {
        let ui_err = match err.chain().find_map(|e| e.downcast_ref::<UiErrorItem>()) {
            Some(ui_err) => ui_err.clone(),
            None => UiErrorItem {
                msg: format!("{:#}", err),
                ..Default::default()
            },
        };
        if json {
            return match ui_err.detail {
                Some(ref detail) => format!("{}: {}", ui_err.msg, detail),
                None => ui_err.msg,
            };
        }

        let mut intro_msg = String::from(intro_msg);
        intro_msg.push_str(": ");
        let msg = if !ui_err.msg.is_empty() {
            (&ui_err.msg as &str).bold()
        } else {
            "<None>".bold()
        };
        intro_msg.push_str(&msg.to_string());
        if let Some(ref detail) = ui_err.detail {
            intro_msg.push_str(" (");
            intro_msg.push_str(detail);
            intro_msg.push(')');
        }
        let mut rendered = intro_msg.red().to_string();
        rendered.push('\n');
        if !ui_err.action.is_empty() {
            rendered.push_str("> ");
            rendered.push_str(&(&ui_err.action as &str).black().on_yellow().to_string());
            rendered.push('\n');
        }
        if !ui_err.hint.is_empty() {
            rendered.push_str(&"HINT:".bold().to_string());
            rendered.push_str("\n  ");
            rendered.push_str(&ui_err.hint);
        }
        rendered
    }
}

impl std::convert::From<&UiErrorItemConst> for UiErrorItem {
    fn from(item: &UiErrorItemConst) -> Self {
        UiErrorItem {
            msg: item.msg.to_string(),
            action: item.action.to_string(),
            hint: item.hint.to_string(),
            detail: None,
        }
    }
}

impl UiErrorItemConst {
    const fn new(msg: &'static str, action: &'static str, hint: &'static str) -> UiErrorItemConst {
        UiErrorItemConst { msg, action, hint }
    }

    pub fn msg(&self, msg: String) -> UiErrorItem {
        let mut e = UiErrorItem::from(self);
        e.msg = msg;
        e
    }
}

#[non_exhaustive]
pub enum UiError {
    InvalidCredentials,
    MissingEnvCredentialAccessKey,
    MissingEnvCredentialSecretKey,
    InvalidEndpoint,
    InvalidHealTarget,
    InvalidPollInterval,
    InvalidLogLevel,
    InvalidScanMode,
    HealStartFailed,
}

impl UiError {
    pub fn msg(&self, msg: String) -> UiErrorItem {
        self.value().msg(msg)
    }

    pub fn error(&self, err: anyhow::Error) -> UiErrorItem {
        UiErrorItem::from(self.value()).error(err)
    }

    pub fn value(&self) -> &'static UiErrorItemConst {
        match *self {
            UiError::InvalidCredentials => &INVALID_CREDENTIALS,
            UiError::MissingEnvCredentialAccessKey => &MISSING_ENV_CREDENTIAL_ACCESS_KEY,
            UiError::MissingEnvCredentialSecretKey => &MISSING_ENV_CREDENTIAL_SECRET_KEY,
            UiError::InvalidEndpoint => &INVALID_ENDPOINT,
            UiError::InvalidHealTarget => &INVALID_HEAL_TARGET,
            UiError::InvalidPollInterval => &INVALID_POLL_INTERVAL,
            UiError::InvalidLogLevel => &INVALID_LOG_LEVEL,
            UiError::InvalidScanMode => &INVALID_SCAN_MODE,
            UiError::HealStartFailed => &HEAL_START_FAILED,
        }
    }
}

impl From<UiError> for UiErrorItem {
    fn from(err: UiError) -> Self {
        UiErrorItem::from(err.value())
    }
}

const INVALID_CREDENTIALS: UiErrorItemConst = UiErrorItemConst::new(
    "Invalid credentials",
    "Please provide correct credentials",
    "Access key length should be at least 3, and secret key length at least 8 characters",
);

const MISSING_ENV_CREDENTIAL_ACCESS_KEY: UiErrorItemConst = UiErrorItemConst::new(
    formatcp!("Missing credential environment variable, \"{}\"", ENV_ACCESS_KEY),
    formatcp!("Environment variable \"{}\" is missing", ENV_ACCESS_KEY),
    formatcp!(
        "Admin access key and secret key are expected to be specified via environment variables {} and {} respectively",
        ENV_ACCESS_KEY,
        ENV_SECRET_KEY
    ),
);

const MISSING_ENV_CREDENTIAL_SECRET_KEY: UiErrorItemConst = UiErrorItemConst::new(
    formatcp!("Missing credential environment variable, \"{}\"", ENV_SECRET_KEY),
    formatcp!("Environment variable \"{}\" is missing", ENV_SECRET_KEY),
    formatcp!(
        "Admin access key and secret key are expected to be specified via environment variables {} and {} respectively",
        ENV_ACCESS_KEY,
        ENV_SECRET_KEY
    ),
);

const INVALID_ENDPOINT: UiErrorItemConst = UiErrorItemConst::new(
    "Invalid cluster endpoint",
    "Please check the passed value",
    formatcp!(
        "{}: Endpoint must be an absolute http:// or https:// URL, e.g. http://127.0.0.1:9000",
        ENV_ENDPOINT
    ),
);

const INVALID_HEAL_TARGET: UiErrorItemConst = UiErrorItemConst::new(
    "Invalid heal target",
    "Please check the passed value",
    "Heal target is of the form `bucket[/prefix]`, a prefix requires a bucket",
);

const INVALID_POLL_INTERVAL: UiErrorItemConst = UiErrorItemConst::new(
    "Invalid poll interval",
    "Please check the passed value",
    formatcp!(
        "{}: Poll interval is a duration such as `1s` or `500ms`",
        ENV_POLL_INTERVAL
    ),
);

const INVALID_LOG_LEVEL: UiErrorItemConst = UiErrorItemConst::new(
    "Invalid log level",
    "Please check the passed value",
    formatcp!(
        "{}: Valid levels are `critical`, `error`, `warn`, `info`, `debug` and `trace`",
        ENV_LOG_LEVEL
    ),
);

const INVALID_SCAN_MODE: UiErrorItemConst = UiErrorItemConst::new(
    "Invalid scan mode",
    "Please check the passed value",
    "Scan mode can only accept `normal` and `deep` values",
);

const HEAL_START_FAILED: UiErrorItemConst = UiErrorItemConst::new(
    "Failed to start heal sequence",
    "Please check that the cluster is reachable and the credentials have admin rights",
    "",
);
