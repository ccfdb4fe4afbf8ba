fn main() {
    println!("cargo:rerun-if-env-changed=CRUMBS_GIT_HASH");

    let hash =
        std::env::var("CRUMBS_GIT_HASH").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| {
            std::process::Command::new("git")
                .args(["rev-parse", "--short", "HEAD"])
                .output()
                .ok()
                .filter(|o| o.status.success())
                .and_then(|o| String::from_utf8(o.stdout).ok())
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| "unknown".to_string())
        });

    println!("cargo:rustc-env=CRUMBS_GIT_HASH={hash}");
}
