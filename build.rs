fn main() {
    println!(
        "cargo:rustc-env=HEALMON_BUILD_TIME={}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
    );
}
