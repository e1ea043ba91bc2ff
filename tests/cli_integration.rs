//! Integration tests for the CLI front end.

#[cfg(feature = "cli")]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    const SPLICE_INSERT_PAYLOAD: &str =
        "/DAvAAAAAAAA///wFAVIAACPf+/+c2nALv4AUsz1AAAAAAAKAAhDVUVJAAABNWLbowo=";
    const TIME_SIGNAL_PAYLOAD: &str = "/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A==";

    #[test]
    fn test_cli_text_output() {
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        cmd.arg(SPLICE_INSERT_PAYLOAD)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Successfully parsed splice_info_section",
            ))
            .stdout(predicate::str::contains("Table ID: 252"))
            .stdout(predicate::str::contains("Splice Command: SpliceInsert"))
            .stdout(predicate::str::contains("Splice Event ID: 0x4800008f"))
            .stdout(predicate::str::contains("seconds"));
    }

    #[test]
    fn test_cli_json_output() {
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        let output = cmd
            .args(["-o", "json", SPLICE_INSERT_PAYLOAD])
            .output()
            .expect("Failed to execute CLI command");

        assert!(output.status.success(), "CLI command should succeed");

        let stdout = String::from_utf8(output.stdout).expect("Output should be valid UTF-8");
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["table_id"], 252);
        assert_eq!(json["data"]["tier"], "fff");
        assert_eq!(json["data"]["splice_command"]["type"], "SpliceInsert");
        assert_eq!(
            json["data"]["splice_command"]["splice_event_id"],
            1_207_959_695u32
        );
        assert_eq!(json["data"]["splice_descriptors"][0]["type"], "Generic");
    }

    #[test]
    fn test_cli_hex_input() {
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        cmd.args([
            "--hex",
            "fc3016000000000000fffff00505dead0001ff0000deadbeef",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Splice Event ID: 0xdead0001"))
        .stdout(predicate::str::contains("Splice Event Cancel: true"));
    }

    #[test]
    fn test_cli_warns_on_degraded_descriptor_loop() {
        // The loop length claims 32 bytes but the buffer ends early: the
        // section still decodes, and the degradation is visible on
        // stderr rather than silently shortening the descriptor list.
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        cmd.args(["--hex", "fc3012000000000000fffff001067f00200102aabb"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Successfully parsed splice_info_section",
            ))
            .stderr(predicate::str::contains("descriptor loop aborted"));
    }

    #[test]
    fn test_cli_handles_invalid_base64() {
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        cmd.arg("invalid_base64!")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error decoding base64 string"));
    }

    #[test]
    fn test_cli_handles_invalid_base64_json() {
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        let output = cmd
            .args(["-o", "json", "invalid_base64!"])
            .output()
            .expect("Failed to execute CLI command");

        assert!(!output.status.success(), "CLI command should fail");

        let stdout = String::from_utf8(output.stdout).expect("Output should be valid UTF-8");
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Error output should be valid JSON");
        assert_eq!(json["status"], "error");
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .contains("Error decoding base64 string")
        );
    }

    #[test]
    fn test_cli_continues_past_failing_payload() {
        // One bad payload is reported but the others still decode.
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        cmd.args(["not-base64!", TIME_SIGNAL_PAYLOAD])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error decoding base64 string"))
            .stdout(predicate::str::contains("Splice Command: TimeSignal"));
    }

    #[test]
    fn test_cli_rejects_unsupported_command_type() {
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        cmd.args(["--hex", "fc3011000000000000fffff000000000deadbeef"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not supported"));
    }

    #[test]
    fn test_cli_help() {
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        cmd.arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Decode SCTE-35 splice_info_section payloads from base64 or hex",
            ))
            .stdout(predicate::str::contains("Output format"));
    }

    #[test]
    fn test_cli_version() {
        let mut cmd = Command::cargo_bin("scte35-decoder").unwrap();
        cmd.arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("scte35-decoder"));
    }
}
