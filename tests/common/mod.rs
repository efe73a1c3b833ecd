#![allow(dead_code)]

pub mod mock_data;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the compiled `roster` binary
pub fn roster_binary() -> &'static str {
    env!("CARGO_BIN_EXE_roster")
}

/// Runs roster commands against an isolated config file
pub struct RosterTest {
    pub temp_dir: TempDir,
}

impl RosterTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        RosterTest { temp_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(roster_binary());
        cmd.args(args)
            .current_dir(self.temp_dir.path())
            .env("ROSTER_CONFIG", self.config_path())
            .env_remove("ROSTER_API_URL")
            .env_remove("ROSTER_TOKEN")
            .env_remove("ROSTER_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute roster command")
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

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("Failed to read config file")
    }
}
