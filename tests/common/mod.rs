#![allow(dead_code)]

use rand::distributions::Alphanumeric;
use rand::Rng;
use resmon_sql::{AccountObjectIdentifier, SchemaObjectIdentifier};
use std::process::{Command, Output};

pub fn random_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();
    format!("RM_{}", suffix.to_ascii_uppercase())
}

pub fn random_account_object_identifier() -> AccountObjectIdentifier {
    AccountObjectIdentifier::new(random_name())
}

pub fn random_schema_object_identifier() -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new(random_name(), random_name(), random_name())
}

/// Runs the `resmon-sql` binary and returns its output.
pub fn run_cli(args: &[&str]) -> anyhow::Result<Output> {
    let bin = env!("CARGO_BIN_EXE_resmon-sql");
    let output = Command::new(bin).args(args).env_remove("RUST_LOG").output()?;
    Ok(output)
}

/// Like [`run_cli`] but fails unless the binary exits successfully.
pub fn run_cli_ok(args: &[&str]) -> anyhow::Result<String> {
    let output = run_cli(args)?;
    if !output.status.success() {
        anyhow::bail!(
            "resmon-sql {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8(output.stdout)?)
}
