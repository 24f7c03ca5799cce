use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn publisher() -> Command {
    Command::cargo_bin("contrib-publisher").unwrap()
}

#[test]
fn help_lists_leased_line_option() {
    publisher()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--zfp-over-leased-line"))
        .stdout(predicate::str::contains("--tls-trust-material"));
}

#[test]
fn invalid_leased_line_port_fails_before_connecting() {
    publisher()
        .args([
            "--zfp-over-leased-line",
            "8195",
            "--tls-client-credentials",
            "client.p12",
            "--tls-trust-material",
            "trust.p7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid leased-line port: 8195"))
        .stderr(predicate::str::contains("Connecting to port").not());
}

#[test]
fn leased_line_without_tls_fails() {
    publisher()
        .args(["--zfp-over-leased-line", "8194"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("require TLS"));
}

#[test]
fn leased_line_and_hosts_are_mutually_exclusive() {
    publisher()
        .args(["-a", "host1", "--zfp-over-leased-line", "8194"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn bad_auth_option_is_rejected() {
    publisher()
        .args(["--auth", "manual=app,ip,user"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid auth option"));
}

#[test]
fn unreadable_certificate_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let trust = dir.path().join("trust.p7");
    std::fs::File::create(&trust)
        .unwrap()
        .write_all(b"pkcs7")
        .unwrap();
    let missing = dir.path().join("missing.p12");

    publisher()
        .arg("--read-certificate-files")
        .arg("--tls-client-credentials")
        .arg(&missing)
        .arg("--tls-trust-material")
        .arg(&trust)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read TLS file"));
}

#[test]
fn read_certificate_files_then_port_check() {
    let dir = tempfile::tempdir().unwrap();
    let creds = dir.path().join("client.p12");
    let trust = dir.path().join("trust.p7");
    std::fs::write(&creds, b"pkcs12").unwrap();
    std::fs::write(&trust, b"pkcs7").unwrap();

    publisher()
        .arg("--read-certificate-files")
        .arg("--tls-client-credentials")
        .arg(&creds)
        .arg("--tls-trust-material")
        .arg(&trust)
        .args(["--zfp-over-leased-line", "1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TlsOptions enabled"))
        .stderr(predicate::str::contains("invalid leased-line port: 1234"));
}

#[test]
fn malformed_service_is_rejected() {
    publisher()
        .args(["-s", "mpfbapi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("//<namespace>/<service>"));
}
