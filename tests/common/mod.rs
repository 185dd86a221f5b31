#![allow(dead_code)]

pub mod mock_source;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run agora commands in an isolated temp directory
pub struct AgoraTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl AgoraTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        // Find the binary - check both debug and release
        let binary_path = if cfg!(debug_assertions) {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/agora")
        } else {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/release/agora")
        };

        let binary_path = if std::path::Path::new(binary_path).exists() {
            binary_path.to_string()
        } else {
            env!("CARGO_BIN_EXE_agora").to_string()
        };

        AgoraTest {
            temp_dir,
            binary_path,
        }
    }

    /// Directory the draft store writes to
    pub fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("AGORA_DATA_DIR", self.data_dir())
            // Nothing listens here, so network commands fail fast
            .env("AGORA_API_URL", "http://127.0.0.1:9/v1")
            .env_remove("AGORA_ACCESS_TOKEN")
            .env_remove("AGORA_LOG")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute agora command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn read_config(&self) -> String {
        let path = self.temp_dir.path().join(".agora").join("config.yaml");
        fs::read_to_string(path).expect("Failed to read config file")
    }

    pub fn write_config(&self, content: &str) {
        let dir = self.temp_dir.path().join(".agora");
        fs::create_dir_all(&dir).expect("Failed to create .agora directory");
        fs::write(dir.join("config.yaml"), content).expect("Failed to write config file");
    }

    pub fn read_store(&self) -> String {
        fs::read_to_string(self.data_dir().join("local-storage.json"))
            .expect("Failed to read local storage file")
    }
}

impl Default for AgoraTest {
    fn default() -> Self {
        Self::new()
    }
}
