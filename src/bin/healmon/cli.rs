use clap::{crate_authors, Arg, ArgMatches, Command};
use healmon::admin::{HealOpts, HealScanMode};
use healmon::config::*;
use healmon::errors::UiError;
use healmon::heal::RenderMode;

pub fn command<'a>(version_info: &'a str, env_help: &'a str) -> Command<'a> {
    Command::new("healmon")
        .about("Start and monitor a heal sequence of an object storage cluster")
        .author(crate_authors!())
        .version(version_info)
        .long_version(version_info)
        .after_help(env_help)
        .arg(
            Arg::new("target")
                .value_name("TARGET")
                .help("Heal target of the form bucket[/prefix], the whole cluster if omitted"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Heal recursively"),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Only inspect data, but do not mutate"),
        )
        .arg(
            Arg::new("remove")
                .long("remove")
                .help("Remove dangling objects in heal sequence"),
        )
        .arg(
            Arg::new("scan")
                .long("scan")
                .takes_value(true)
                .value_name("MODE")
                .help("Select the healing scan mode (normal/deep)"),
        )
        .arg(
            Arg::new("force-start")
                .short('f')
                .long("force-start")
                .help("Force start a new heal sequence"),
        )
        .arg(
            Arg::new("force-stop")
                .short('s')
                .long("force-stop")
                .help("Force stop a running heal sequence"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Print one line per healed item"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print JSON lines; takes precedence over --quiet"),
        )
        .arg(
            Arg::new(ENDPOINT)
                .long("endpoint")
                .takes_value(true)
                .value_name("URL")
                .help("Admin endpoint of the cluster"),
        )
        .arg(
            Arg::new(POLL_INTERVAL)
                .long("poll-interval")
                .takes_value(true)
                .value_name("DURATION")
                .help("Pause between two heal status requests"),
        )
        .arg(
            Arg::new(LOG_LEVEL)
                .long("log-level")
                .takes_value(true)
                .value_name("LEVEL")
                .help("Diagnostics log level written to stderr"),
        )
}

pub fn render_mode(matches: &ArgMatches) -> RenderMode {
    RenderMode::from_flags(matches.is_present("quiet"), matches.is_present("json"))
}

/// Splits `bucket[/prefix]` into bucket and prefix.
pub fn parse_target(target: &str) -> anyhow::Result<(String, String)> {
    let (bucket, prefix) = match target.split_once('/') {
        Some((bucket, prefix)) => (bucket, prefix),
        None => (target, ""),
    };
    if bucket.is_empty() && !prefix.is_empty() {
        return Err(UiError::InvalidHealTarget
            .msg(format!("Invalid heal target '{}'", target))
            .into());
    }
    Ok((bucket.to_owned(), prefix.to_owned()))
}

/// Configuration given on the command line; overrides the environment.
pub fn config_kvs(matches: &ArgMatches) -> KVS {
    let mut kvs = KVS::default();
    for key in &[ENDPOINT, POLL_INTERVAL, LOG_LEVEL] {
        if let Some(value) = matches.value_of(*key) {
            kvs.set(key.to_string(), value.to_owned());
        }
    }
    kvs
}

pub fn heal_opts(matches: &ArgMatches) -> anyhow::Result<HealOpts> {
    let scan_mode = match matches.value_of("scan") {
        Some(mode) => mode
            .parse::<HealScanMode>()
            .map_err(|e| UiError::InvalidScanMode.error(e))?,
        None => HealScanMode::Normal,
    };
    Ok(HealOpts {
        recursive: matches.is_present("recursive"),
        dry_run: matches.is_present("dry-run"),
        remove: matches.is_present("remove"),
        scan_mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches {
        command("test", "").try_get_matches_from(args).unwrap()
    }

    #[test]
    fn test_parse_target() {
        let cases = [
            ("", ("", "")),
            ("photos", ("photos", "")),
            ("photos/", ("photos", "")),
            ("photos/2021/cats", ("photos", "2021/cats")),
        ];
        for (target, (bucket, prefix)) in cases.iter() {
            assert_eq!(
                parse_target(target).unwrap(),
                (bucket.to_string(), prefix.to_string())
            );
        }
        assert!(parse_target("/2021").is_err());
    }

    #[test]
    fn test_heal_opts() {
        let m = matches(&["healmon", "photos", "-r", "--dry-run", "--scan", "deep"]);
        assert_eq!(
            heal_opts(&m).unwrap(),
            HealOpts {
                recursive: true,
                dry_run: true,
                remove: false,
                scan_mode: HealScanMode::Deep,
            }
        );
        let m = matches(&["healmon", "--scan", "shallow"]);
        let err = heal_opts(&m).unwrap_err();
        assert!(err.to_string().starts_with("Invalid scan mode"));
    }

    #[test]
    fn test_config_kvs_and_mode() {
        let m = matches(&["healmon", "-q", "--json", "--poll-interval", "2s"]);
        let kvs = config_kvs(&m);
        assert_eq!(kvs.lookup(POLL_INTERVAL), Some("2s"));
        assert_eq!(kvs.lookup(ENDPOINT), None);
        assert_eq!(render_mode(&m), RenderMode::Json);
        assert_eq!(render_mode(&matches(&["healmon"])), RenderMode::Interactive);
    }
}
