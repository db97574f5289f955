// fluxbitc-cli/tests/cli_integration.rs
//
// Runs the compiled `fluxbitc` binary against temporary configs. The unix
// tests install small shell scripts in place of ffprobe and ffmpeg.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PRESETS: &str = r#"
    "colors": { "amber": "0xFFBF00" },
    "fonts": { "tc": { "fontsize": 48, "fontcolor": "amber" } },
    "presets": {
        "default": {
            "description": "Timecode only",
            "items": [ { "timecode": "${timecode_start}", "rate": "${fps_rate}", "font": "tc" } ]
        }
    }
"#;

fn fluxbitc() -> Command {
    let mut cmd = Command::cargo_bin("fluxbitc").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("FLUXBITC_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_config(dir: &Path, path_section: &str) -> PathBuf {
    let config = dir.join("config.json");
    fs::write(&config, format!("{{ {path_section} {PRESETS} }}")).unwrap();
    config
}

fn write_input(dir: &Path) -> PathBuf {
    let input = dir.join("A001_C002.mov");
    fs::write(&input, b"fake media").unwrap();
    input
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    fluxbitc()
        .arg("-i")
        .arg(&input)
        .arg("--config")
        .arg(dir.path().join("nope.json"))
        .arg(dir.path().join("out.mov"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR: Config file"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");

    fluxbitc()
        .arg("-i")
        .arg(dir.path().join("missing.mov"))
        .arg("--config")
        .arg(&config)
        .arg(dir.path().join("out.mov"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR: Input file"));
}

#[test]
fn test_invalid_scale_is_usage_error() {
    fluxbitc()
        .args(["-i", "in.mov", "--scale", "4k", "out.mov"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("4k"));
}

#[test]
fn test_config_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    fluxbitc()
        .env("FLUXBITC_CONFIG", dir.path().join("env.json"))
        .arg("-i")
        .arg(&input)
        .arg(dir.path().join("out.mov"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("env.json"));
}

#[cfg(unix)]
mod with_stub_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const PROBE_JSON: &str = r#"{
  "streams": [
    { "index": 0, "codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080,
      "pix_fmt": "yuv420p", "r_frame_rate": "25/1", "avg_frame_rate": "25/1" },
    { "index": 1, "codec_type": "audio", "codec_name": "aac" }
  ],
  "format": { "filename": "A001_C002.mov", "format_name": "mov", "duration": "12.5" }
}"#;

    fn write_script(path: &Path, body: &str) {
        fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Installs stub tools; the ffmpeg stub writes its last argument and
    /// exits with `ffmpeg_exit`.
    fn setup(ffmpeg_exit: i32) -> (TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let ffprobe = dir.path().join("ffprobe");
        let ffmpeg = dir.path().join("ffmpeg");
        write_script(&ffprobe, &format!("cat <<'EOF'\n{PROBE_JSON}\nEOF"));
        write_script(
            &ffmpeg,
            &format!("for last; do :; done\necho encoded > \"$last\"\nexit {ffmpeg_exit}"),
        );

        let path_section = format!(
            r#""path": {{ "ffmpeg": "{}", "ffprobe": "{}" }},"#,
            ffmpeg.display(),
            ffprobe.display()
        );
        let config = write_config(dir.path(), &path_section);
        let input = write_input(dir.path());
        (dir, config, input)
    }

    #[test]
    fn test_dry_run_prints_command() {
        let (dir, config, input) = setup(0);
        let output = dir.path().join("proxy.mov");

        fluxbitc()
            .arg("-i")
            .arg(&input)
            .arg("--config")
            .arg(&config)
            .arg("--dry-run")
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("===== INITIALIZATION ====="))
            .stdout(predicate::str::contains("Timecode only"))
            .stdout(predicate::str::contains("-hide_banner -loglevel warning -stats"))
            .stdout(predicate::str::contains("-c:v prores_ks"))
            .stdout(predicate::str::contains("drawtext=timecode="))
            .stdout(predicate::str::contains("fontcolor=0xFFBF00"));

        assert!(!output.exists());
    }

    #[test]
    fn test_no_color_output_is_plain() {
        let (dir, config, input) = setup(0);

        fluxbitc()
            .arg("-i")
            .arg(&input)
            .arg("--config")
            .arg(&config)
            .arg(dir.path().join("proxy.mov"))
            .assert()
            .success()
            .stdout(predicate::str::contains("===== INITIALIZATION ====="))
            .stdout(predicate::str::contains("\x1b[").not())
            .stderr(predicate::str::contains("\x1b[").not());
    }

    #[test]
    fn test_successful_encode() {
        let (dir, config, input) = setup(0);
        let output = dir.path().join("proxy.mov");

        fluxbitc()
            .arg("-i")
            .arg(&input)
            .arg("--config")
            .arg(&config)
            .args(["-d", "vendor=ACME", "-y"])
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("Encode starting..."))
            .stdout(predicate::str::contains("Encode succeeded, your new file has been created at"))
            .stdout(predicate::str::contains("Output size"));

        assert_eq!(fs::read_to_string(&output).unwrap().trim(), "encoded");
    }

    #[test]
    fn test_ffmpeg_exit_code_is_propagated() {
        let (dir, config, input) = setup(3);

        fluxbitc()
            .arg("-i")
            .arg(&input)
            .arg("--config")
            .arg(&config)
            .arg(dir.path().join("proxy.mov"))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Encode FAILED!"));
    }

    #[test]
    fn test_bad_data_entry() {
        let (dir, config, input) = setup(0);

        fluxbitc()
            .arg("-i")
            .arg(&input)
            .arg("--config")
            .arg(&config)
            .args(["-d", "a=b=c"])
            .arg(dir.path().join("proxy.mov"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Badly formatted data entry 'a=b=c'"));
    }

    #[test]
    fn test_unknown_preset() {
        let (dir, config, input) = setup(0);

        fluxbitc()
            .arg("-i")
            .arg(&input)
            .arg("--config")
            .arg(&config)
            .args(["-p", "missing"])
            .arg(dir.path().join("proxy.mov"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("preset 'missing' does not exist"));
    }
}
