fn main() {
    // Restamp whenever HEAD moves (commits, checkouts, tag switches)
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let short_hash = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_default();

    // An exact tag match marks a release build; everything else is a dev build
    let on_release_tag = std::process::Command::new("git")
        .args(["describe", "--exact-match", "--tags", "HEAD"])
        .output()
        .ok()
        .is_some_and(|out| out.status.success());

    println!("cargo:rustc-env=GIT_HASH={short_hash}");
    println!("cargo:rustc-env=ON_RELEASE_TAG={on_release_tag}");
}
