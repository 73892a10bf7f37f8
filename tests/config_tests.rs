use std::env;

use pubtrack::Settings;
use serial_test::serial;

const VARS: [&str; 3] = ["PUBTRACK_INSTITUTION", "PUBTRACK_BIND", "PUBTRACK_MAX_UPLOAD_MB"];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();

    let settings = Settings::from_env();
    assert_eq!(settings.institution, "University of Chicago");
    assert_eq!(settings.bind_addr, "0.0.0.0:3000");
    assert_eq!(settings.max_upload_bytes, 32 * 1024 * 1024);
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_env();
    env::set_var("PUBTRACK_INSTITUTION", "  Northwestern University ");
    env::set_var("PUBTRACK_BIND", "127.0.0.1:8080");
    env::set_var("PUBTRACK_MAX_UPLOAD_MB", "4");

    let settings = Settings::from_env();
    clear_env();

    assert_eq!(settings.institution, "Northwestern University");
    assert_eq!(settings.bind_addr, "127.0.0.1:8080");
    assert_eq!(settings.max_upload_bytes, 4 * 1024 * 1024);
}

#[test]
#[serial]
fn test_blank_and_invalid_values_fall_back() {
    clear_env();
    env::set_var("PUBTRACK_INSTITUTION", "   ");
    env::set_var("PUBTRACK_MAX_UPLOAD_MB", "lots");

    let settings = Settings::from_env();
    clear_env();

    assert_eq!(settings.institution, "University of Chicago");
    assert_eq!(settings.max_upload_bytes, 32 * 1024 * 1024);
}
