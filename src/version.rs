/// Returns the healmon version information.
pub fn healmon_version_info(build_time: Option<&str>) -> String {
    let fallback = "Unknown (env var does not exist when building)";
    format!(
        "\nRelease Version:   {}\
         \nGit Commit Hash:   {}\
         \nUTC Build Time:    {}\
         \nRust Version:      {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("HEALMON_BUILD_GIT_HASH").unwrap_or(fallback),
        build_time.unwrap_or(fallback),
        option_env!("HEALMON_BUILD_RUSTC_VERSION").unwrap_or(fallback),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let info = healmon_version_info(Some("2021-08-01T00:00:00Z"));
        assert!(info.contains(env!("CARGO_PKG_VERSION")));
        assert!(info.contains("UTC Build Time:    2021-08-01T00:00:00Z"));
    }
}
