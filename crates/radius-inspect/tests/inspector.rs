//! Inspecting captured exchanges from disk

use radius_codec::{calculate_message_authenticator, Code, Dictionary, Packet};
use radius_codec::auth::calculate_authenticator;
use radius_codec::message_auth::find_message_authenticator;
use radius_inspect::{InspectConfig, InspectError, Inspector};
use std::fs;
use tempfile::TempDir;

const SECRET: &str = "s3cret";

fn write_packet(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn test_capture_with_interleaved_transactions() {
    let dir = TempDir::new().unwrap();

    let mut start = Packet::new(Code::AccountingRequest, SECRET);
    start.identifier = 1;
    start.add("User-Name", "alice").unwrap();
    start.add("Filter-Id", "daa-2048-60").unwrap();
    let start_bytes = start.encode().unwrap();

    let mut login = Packet::new(Code::AccessRequest, SECRET);
    login.identifier = 2;
    login.add("User-Name", "bob").unwrap();
    login.add("User-Password", "hunter2").unwrap();
    let login_bytes = login.encode().unwrap();

    let mut accept = login.response(Code::AccessAccept);
    accept.add("Filter-Id", "daa-50000").unwrap();
    let accept_bytes = accept.encode().unwrap();
    // The Accounting-Request authenticator on the wire is computed, so the
    // reply is built from the packet as received.
    let received_start = Packet::parse(&start_bytes, SECRET.as_bytes(), Dictionary::builtin()).unwrap();
    let ack_bytes = received_start
        .response(Code::AccountingResponse)
        .encode()
        .unwrap();

    let files = [
        write_packet(&dir, "1-start.bin", &start_bytes),
        write_packet(&dir, "2-login.bin", &login_bytes),
        write_packet(&dir, "3-accept.bin", &accept_bytes),
        write_packet(&dir, "4-ack.bin", &ack_bytes),
    ];

    let inspector = Inspector::new(SECRET);
    let reports: Vec<_> = files
        .iter()
        .map(|path| inspector.inspect_file(path).unwrap())
        .collect();

    assert_eq!(reports[0].authentic, Some(true));
    assert_eq!(reports[0].speed.as_deref(), Some("2148"));

    assert_eq!(reports[1].authentic, None);
    assert!(reports[1]
        .attributes
        .contains(&("User-Password".to_string(), "hunter2".to_string())));

    assert_eq!(reports[2].code, Code::AccessAccept);
    assert_eq!(reports[2].authentic, Some(true));
    assert_eq!(reports[2].speed.as_deref(), Some("63240"));

    assert_eq!(reports[3].code, Code::AccountingResponse);
    assert_eq!(reports[3].authentic, Some(true));
    assert_eq!(inspector.pending(), 0);
}

#[test]
fn test_forged_reply_is_flagged() {
    let mut request = Packet::new(Code::AccessRequest, SECRET);
    request.identifier = 77;
    let request_bytes = request.encode().unwrap();

    let mut forged = request.response(Code::AccessAccept);
    forged.secret = b"guessed".to_vec();
    let forged_bytes = forged.encode().unwrap();

    let inspector = Inspector::new(SECRET);
    inspector.inspect(&request_bytes).unwrap();
    let report = inspector.inspect(&forged_bytes).unwrap();
    assert_eq!(report.authentic, Some(false));
}

#[test]
fn test_message_authenticator_is_reported() {
    let mut request = Packet::new(Code::AccessRequest, SECRET);
    request.add("User-Name", "carol").unwrap();
    request.add("Message-Authenticator", vec![0u8; 16]).unwrap();
    let mut bytes = request.encode().unwrap();
    let offset = find_message_authenticator(&bytes).unwrap();
    let mac = calculate_message_authenticator(&bytes, SECRET.as_bytes());
    bytes[offset..offset + 16].copy_from_slice(&mac);

    let inspector = Inspector::new(SECRET);
    let report = inspector.inspect(&bytes).unwrap();
    assert_eq!(report.message_authenticator, Some(true));
    assert!(report.to_string().contains("message-authenticator: [ok]"));

    bytes[offset] ^= 0xff;
    let report = Inspector::new(SECRET).inspect(&bytes).unwrap();
    assert_eq!(report.message_authenticator, Some(false));
}

#[test]
fn test_signed_accounting_request_is_reported_ok() {
    let mut request = Packet::new(Code::AccountingRequest, SECRET);
    request.add("User-Name", "erin").unwrap();
    request.add("Message-Authenticator", vec![0u8; 16]).unwrap();
    let mut bytes = request.encode().unwrap();

    // HMAC over a zeroed authenticator, then the Request Authenticator
    let offset = find_message_authenticator(&bytes).unwrap();
    bytes[4..20].fill(0);
    let mac = calculate_message_authenticator(&bytes, SECRET.as_bytes());
    bytes[offset..offset + 16].copy_from_slice(&mac);
    let authenticator =
        calculate_authenticator(&bytes[..4], &[0u8; 16], &bytes[20..], SECRET.as_bytes());
    bytes[4..20].copy_from_slice(&authenticator);

    let report = Inspector::new(SECRET).inspect(&bytes).unwrap();
    assert_eq!(report.authentic, Some(true));
    assert_eq!(report.message_authenticator, Some(true));
    assert!(!report.to_string().contains("FAILED"));
}

#[test]
fn test_config_drives_speed_lookup() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("inspect.json");
    fs::write(
        &config_path,
        format!(
            r#"{{
                "secret": "{}",
                "speed_attribute": "Filter-Id",
                "default_speed": "256",
                "speed_tiers": {{ "gold": "100000" }}
            }}"#,
            SECRET
        ),
    )
    .unwrap();
    let config = InspectConfig::from_file(&config_path).unwrap();
    let inspector = Inspector::from_config(&config);

    for (profile, expected) in [("gold", "100000"), ("daa-256", "286"), ("bronze", "256")] {
        let mut packet = Packet::new(Code::AccountingRequest, SECRET);
        packet.add("Filter-Id", profile).unwrap();
        let report = inspector.inspect(&packet.encode().unwrap()).unwrap();
        assert_eq!(report.speed.as_deref(), Some(expected));
    }
}

#[test]
fn test_missing_and_truncated_files() {
    let dir = TempDir::new().unwrap();
    let inspector = Inspector::new(SECRET);

    let missing = dir.path().join("missing.bin");
    assert!(matches!(
        inspector.inspect_file(&missing),
        Err(InspectError::Io { .. })
    ));

    let mut packet = Packet::new(Code::AccountingRequest, SECRET);
    packet.add("User-Name", "dave").unwrap();
    let bytes = packet.encode().unwrap();
    let truncated = write_packet(&dir, "truncated.bin", &bytes[..bytes.len() - 2]);
    assert!(matches!(
        inspector.inspect_file(&truncated),
        Err(InspectError::Packet(_))
    ));
}
