//! Shared E2E test helpers for `medconsult` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::Path;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables read by the config loader.
const CONFIG_ENV_VARS: &[&str] = &[
    "MEDCONSULT_DEBUG",
    "MEDCONSULT_BIND",
    "MEDCONSULT_STORAGE",
    "MEDCONSULT_STORAGE_PATH",
    "MEDCONSULT_DIRECTORY_SEED",
    "RUST_LOG",
];

/// Directory seed with one principal of each role.
pub const SEED: &str = r#"
[[principals]]
username = "admin"
role = "Admin"
token = "admin-token"

[[principals]]
username = "house"
first_name = "Gregory"
last_name = "House"
role = "Doctor"
token = "house-token"

[[principals]]
username = "ivanov"
first_name = "Ivan"
last_name = "Ivanov"
patronymic = "Petrovich"
role = "Patient"
token = "ivanov-token"

[[clinics]]
id = 1
name = "PPTH"
legal_address = "1 Main St"
physical_address = "1 Main St"

[[doctors]]
id = 1
username = "house"
specialization = "Diagnostics"
clinics = [1]

[[patients]]
id = 1
username = "ivanov"
phone = "+7 900 000 00 00"
email = "ivanov@example.com"
"#;

/// Build a Command for the `medconsult` binary isolated from the host.
///
/// `HOME` points into `home` so no global config is picked up, and the
/// project root is `home` too.
pub fn medconsult_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("medconsult");
    cmd.timeout(TIMEOUT_BASIC);
    for var in CONFIG_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home);
    cmd.args(["-C", home.to_str().expect("valid utf8")]);
    cmd
}

/// Writes [`SEED`] into `dir` and returns its path.
pub fn write_seed(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("directory.toml");
    std::fs::write(&path, SEED).expect("write seed");
    path
}
