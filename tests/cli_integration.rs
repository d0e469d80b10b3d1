use std::fs;
use std::process::Command;

const REFERENCE_TX: &str = r#"{
    "chain_id": "9999999999999999999999999999999999999999999999999999999999999999",
    "transaction": {
        "expiration": "2018-06-11T12:00:00",
        "ref_block_num": 100,
        "ref_block_prefix": 1,
        "net_usage_words": 0,
        "max_cpu_usage_ms": 0,
        "delay_sec": 0,
        "context_free_actions": [],
        "actions": [{
            "account": "eosio.token",
            "name": "transfer",
            "authorization": [{"actor": "alice", "permission": "active"}],
            "data": {"from": "alice", "to": "bob", "quantity": "1.0000 EOS", "memo": "hi"}
        }],
        "transaction_extensions": []
    }
}"#;

const REFERENCE_DIGEST: &str = "6a4b9f80d395c7f1d6f393c7779498e46d5afb6d9bcb8b392c9297ed1074a05a";

fn write_reference_tx(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, REFERENCE_TX).expect("write transaction json");
    path
}

#[test]
fn cli_encode_prints_reference_digest() {
    let tx_path = write_reference_tx("eosledger_cli_encode.json");
    let binary = assert_cmd::cargo::cargo_bin!("eosledger");

    let output = Command::new(binary)
        .args(["encode", "--file", tx_path.to_str().unwrap()])
        .output()
        .expect("cli run succeeds");

    assert!(output.status.success(), "cli exited unsuccessfully: {:?}", output);
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
    assert!(stdout.contains(REFERENCE_DIGEST), "digest missing from: {}", stdout);
    assert!(stdout.contains("bytes:"));
}

#[test]
fn cli_frames_are_valid_apdus() {
    let tx_path = write_reference_tx("eosledger_cli_frames.json");
    let binary = assert_cmd::cargo::cargo_bin!("eosledger");

    let output = Command::new(binary)
        .args([
            "frames",
            "--file",
            tx_path.to_str().unwrap(),
            "--chunk-size",
            "121",
        ])
        .output()
        .expect("cli run succeeds");

    assert!(output.status.success(), "cli exited unsuccessfully: {:?}", output);
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");

    let frames: Vec<&str> = stdout
        .lines()
        .filter(|line| !line.starts_with("digest:"))
        .collect();
    // 149 payload bytes at chunk size 121 -> two frames
    assert_eq!(frames.len(), 2);

    let first = hex::decode(frames[0]).expect("frame is hex");
    assert_eq!(&first[..4], &[0xd4, 0x04, 0x00, 0x00]);
    assert_eq!(first[4] as usize, 20 + 1 + 121);

    let second = hex::decode(frames[1]).expect("frame is hex");
    assert_eq!(&second[..4], &[0xd4, 0x04, 0x80, 0x00]);
    assert_eq!(second[4] as usize, 149 - 121);
}

#[test]
fn cli_address_derivation() {
    let binary = assert_cmd::cargo::cargo_bin!("eosledger");
    let pubkey = "047b7a44ecade10fcf1d7fcbeaf72d65c9b8096d0846c68f4ea09d78305c3f66e6\
                  03e6890d3cc884abe7f76245b97fe37419f9fef6e85824698d66363e27d3b9f6";

    let output = Command::new(binary)
        .args(["address", "--public-key", pubkey])
        .output()
        .expect("cli run succeeds");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
    assert_eq!(
        stdout.trim(),
        "EOS5psRX9KXojGXGcz74HM3ZKVVYZCE2hdGnupvVL4n4qUCpBB6Fz"
    );
}

#[test]
fn cli_rejects_malformed_transaction() {
    let path = std::env::temp_dir().join("eosledger_cli_bad.json");
    fs::write(&path, "{\"chain_id\": \"00\"}").expect("write json");
    let binary = assert_cmd::cargo::cargo_bin!("eosledger");

    let output = Command::new(binary)
        .args(["encode", "--file", path.to_str().unwrap()])
        .output()
        .expect("cli run succeeds");

    assert!(!output.status.success());
}
