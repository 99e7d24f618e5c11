mod common;

use std::io::Write;

#[test]
fn verify_cli_renders_statements() -> anyhow::Result<()> {
    let out = common::run_cli_ok(&[
        "create",
        "--name",
        "MON",
        "--or-replace",
        "--credit-quota",
        "100",
        "--frequency",
        "monthly",
        "--notify-user",
        "A",
        "--notify-user",
        "B",
        "--trigger",
        "50:notify",
        "--trigger",
        "100:suspend",
    ])?;
    assert_eq!(
        out.trim_end(),
        "CREATE OR REPLACE RESOURCE MONITOR \"MON\" WITH CREDIT_QUOTA = 100 FREQUENCY = MONTHLY \
         NOTIFY_USERS = (\"A\", \"B\") TRIGGERS ON 50 PERCENT DO NOTIFY ON 100 PERCENT DO SUSPEND"
    );

    let out = common::run_cli_ok(&[
        "alter",
        "--name",
        "MON",
        "--credit-quota",
        "5",
        "--unset-end-timestamp",
    ])?;
    assert_eq!(
        out.trim_end(),
        "ALTER RESOURCE MONITOR \"MON\" SET CREDIT_QUOTA = 5 END_TIMESTAMP = null"
    );

    let out = common::run_cli_ok(&["drop", "--name", "MON", "--if-exists"])?;
    assert_eq!(out.trim_end(), "DROP RESOURCE MONITOR IF EXISTS \"MON\"");

    let out = common::run_cli_ok(&["show", "--like", "MON%"])?;
    assert_eq!(out.trim_end(), "SHOW RESOURCE MONITORS LIKE 'MON%'");
    Ok(())
}

#[test]
fn verify_cli_rejects_invalid_options() -> anyhow::Result<()> {
    let output = common::run_cli(&["alter", "--name", "MON"])?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least one of the fields [Set, Unset, Triggers]"));

    let output = common::run_cli(&["create", "--name", "MON", "--or-replace", "--if-not-exists"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn verify_cli_decodes() -> anyhow::Result<()> {
    let out = common::run_cli_ok(&["decode-triggers", "51%,63%,123%"])?;
    assert_eq!(out.trim_end(), "51,63,123");

    let output = common::run_cli(&["decode-triggers", "12,,34"])?;
    assert!(!output.status.success());

    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"[{{"name": "MON", "credit_quota": "10.00", "frequency": "WEEKLY",
            "suspend_at": "90%", "notify_at": "50%,75%", "notify_users": "A,B",
            "owner": "ADMIN", "comment": null}}]"#
    )?;
    let path = file.path().to_str().unwrap_or_default().to_string();
    let out = common::run_cli_ok(&["decode-rows", &path])?;
    let monitors: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(monitors[0]["name"], "MON");
    assert_eq!(monitors[0]["frequency"], "WEEKLY");
    assert_eq!(monitors[0]["suspend_at"], 90);
    assert_eq!(monitors[0]["notify_triggers"], serde_json::json!([50, 75]));
    assert_eq!(monitors[0]["notify_users"], serde_json::json!(["A", "B"]));
    Ok(())
}
