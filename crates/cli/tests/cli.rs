use assert_cmd::Command;

fn porter() -> Command {
    let mut cmd = Command::cargo_bin("porter").expect("porter binary is built");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PS2SDK")
        .env_remove("PS2DEV");
    cmd
}

fn ps2_ready() -> Command {
    let mut cmd = porter();
    cmd.env("PS2SDK", "/usr/local/ps2dev/ps2sdk")
        .env("PS2DEV", "/usr/local/ps2dev");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is utf-8")
}

#[test]
fn list_shows_every_platform() {
    let stdout = stdout_of(porter().arg("list"));
    assert!(stdout.contains("iphone"));
    assert!(stdout.contains("ps2"));
    assert!(stdout.contains("PS2SDK not defined in environment"));
}

#[test]
fn options_lists_platform_options_in_order() {
    let stdout = stdout_of(porter().args(["options", "iphone"]));
    let platform = stdout.find("IPHONEPLATFORM").expect("IPHONEPLATFORM listed");
    let lto = stdout.find("use_lto").expect("use_lto listed");
    assert!(platform < lto);
    assert!(stdout.contains("tools = no"));
}

#[test]
fn unknown_platform_fails() {
    porter().args(["options", "dreamcast"]).assert().failure();
}

#[test]
fn configure_fails_without_sdk() {
    let output = porter()
        .args(["configure", "ps2"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("stderr is utf-8");
    assert!(stderr.contains("PS2SDK"));
}

#[test]
fn configure_prints_json() {
    let stdout = stdout_of(ps2_ready().args([
        "configure",
        "ps2",
        "--target",
        "release",
        "--set",
        "debug_release=yes",
        "--json",
    ]));

    let config: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(config["target"], "release");
    assert_eq!(config["arch"], "mips64r5900el");
    assert_eq!(config["cc_flags"][0], "-g2");
    assert_eq!(config["modules"]["opus"], false);
}

#[test]
fn configure_reads_build_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("ps2.yml");
    std::fs::write(&path, "platform: ps2\ntarget: debug\n").expect("build file written");

    let stdout = stdout_of(ps2_ready().args(["configure", "ps2", "--json", "--file"]).arg(&path));
    let config: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(config["target"], "debug");
}

#[test]
fn build_file_for_another_platform_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("iphone.toml");
    std::fs::write(&path, "platform = \"iphone\"\n").expect("build file written");

    ps2_ready()
        .args(["configure", "ps2", "--file"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn bad_override_fails() {
    ps2_ready()
        .args(["configure", "ps2", "--set", "debug_release=sometimes"])
        .assert()
        .failure();
    ps2_ready()
        .args(["configure", "ps2", "--set", "ios_sim=yes"])
        .assert()
        .failure();
}

#[test]
fn schema_is_json() {
    let stdout = stdout_of(porter().arg("schema"));
    let schema: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(schema["properties"]["platform"].is_object());
}
