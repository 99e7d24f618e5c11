mod common;

use resmon_sql::*;

fn assert_invalid_identifier<T: Validate>(opts: &T) {
    match validate(opts) {
        Err(MonitorError::InvalidObjectIdentifier) => {}
        other => panic!("Expected invalid identifier, got {:?}", other),
    }
}

#[test]
fn verify_create() -> anyhow::Result<()> {
    let id = common::random_account_object_identifier();

    // Missing identifier wins over every other problem.
    assert_invalid_identifier(&CreateResourceMonitorOptions::default());
    assert_invalid_identifier(&CreateResourceMonitorOptions {
        or_replace: true,
        if_not_exists: true,
        ..Default::default()
    });

    let err = build_sql(&CreateResourceMonitorOptions {
        or_replace: true,
        if_not_exists: true,
        ..CreateResourceMonitorOptions::new(id.clone())
    })
    .unwrap_err();
    assert_eq!(
        err.violations(),
        &[Violation::MutuallyExclusive {
            group: "CreateResourceMonitorOptions",
            fields: vec!["OrReplace", "IfNotExists"],
        }]
    );

    assert_eq!(
        build_sql(&CreateResourceMonitorOptions::new(id.clone()))?,
        format!("CREATE RESOURCE MONITOR {}", id.fully_qualified_name())
    );

    let end_timestamp = "2021-01-01 00:00:00 +0000 UTC".to_string();
    let opts = CreateResourceMonitorOptions {
        or_replace: true,
        with: Some(ResourceMonitorWith {
            credit_quota: Some(100),
            frequency: Some(Frequency::Monthly),
            start_timestamp: Some("IMMEDIATELY".into()),
            end_timestamp: Some(end_timestamp.clone()),
            notify_users: Some(NotifyUsers::new(["FIRST_USER", "SECOND_USER"])),
            triggers: vec![
                TriggerDefinition::new(50, TriggerAction::SuspendImmediate),
                TriggerDefinition::new(100, TriggerAction::Notify),
            ],
        }),
        ..CreateResourceMonitorOptions::new(id.clone())
    };
    let expected = format!(
        "CREATE OR REPLACE RESOURCE MONITOR {} WITH CREDIT_QUOTA = 100 FREQUENCY = MONTHLY \
         START_TIMESTAMP = 'IMMEDIATELY' END_TIMESTAMP = '{}' \
         NOTIFY_USERS = (\"FIRST_USER\", \"SECOND_USER\") \
         TRIGGERS ON 50 PERCENT DO SUSPEND_IMMEDIATE ON 100 PERCENT DO NOTIFY",
        id.fully_qualified_name(),
        end_timestamp
    );
    assert_eq!(build_sql(&opts)?, expected);
    // Same value, same bytes.
    assert_eq!(build_sql(&opts.clone())?, expected);
    Ok(())
}

#[test]
fn verify_alter() -> anyhow::Result<()> {
    let id = common::random_account_object_identifier();
    let name = id.fully_qualified_name();

    assert_invalid_identifier(&AlterResourceMonitorOptions::default());

    let err = build_sql(&AlterResourceMonitorOptions::new(id.clone())).unwrap_err();
    assert_eq!(
        err.violations(),
        &[Violation::AtLeastOneOf {
            group: "AlterResourceMonitorOptions",
            fields: vec!["Set", "Unset", "Triggers"],
        }]
    );

    let err = build_sql(&AlterResourceMonitorOptions {
        set: Some(ResourceMonitorSet::default()),
        ..AlterResourceMonitorOptions::new(id.clone())
    })
    .unwrap_err();
    assert_eq!(
        err.violations(),
        &[Violation::AtLeastOneOf {
            group: "ResourceMonitorSet",
            fields: vec![
                "CreditQuota",
                "Frequency",
                "StartTimestamp",
                "EndTimestamp",
                "NotifyUsers"
            ],
        }]
    );

    let single = AlterResourceMonitorOptions {
        set: Some(ResourceMonitorSet {
            credit_quota: Some(50),
            ..Default::default()
        }),
        ..AlterResourceMonitorOptions::new(id.clone())
    };
    assert_eq!(
        build_sql(&single)?,
        format!("ALTER RESOURCE MONITOR {name} SET CREDIT_QUOTA = 50")
    );

    let users = AlterResourceMonitorOptions {
        set: Some(ResourceMonitorSet {
            notify_users: Some(NotifyUsers::new(["user1", "user2"])),
            ..Default::default()
        }),
        ..AlterResourceMonitorOptions::new(id.clone())
    };
    assert_eq!(
        build_sql(&users)?,
        format!("ALTER RESOURCE MONITOR {name} SET NOTIFY_USERS = (\"user1\", \"user2\")")
    );

    let start = "2023-01-01 00:00:00 +0000 UTC";
    let multiple = AlterResourceMonitorOptions {
        set: Some(ResourceMonitorSet {
            start_timestamp: Some(start.into()),
            frequency: Some(Frequency::Yearly),
            credit_quota: Some(50),
            ..Default::default()
        }),
        ..AlterResourceMonitorOptions::new(id.clone())
    };
    assert_eq!(
        build_sql(&multiple)?,
        format!(
            "ALTER RESOURCE MONITOR {name} SET CREDIT_QUOTA = 50 FREQUENCY = YEARLY START_TIMESTAMP = '{start}'"
        )
    );

    let unset = AlterResourceMonitorOptions {
        unset: Some(ResourceMonitorUnset {
            credit_quota: true,
            end_timestamp: true,
            ..Default::default()
        }),
        ..AlterResourceMonitorOptions::new(id.clone())
    };
    assert_eq!(
        build_sql(&unset)?,
        format!("ALTER RESOURCE MONITOR {name} SET CREDIT_QUOTA = null END_TIMESTAMP = null")
    );
    Ok(())
}

#[test]
fn verify_alter_reports_every_violation() {
    let opts = AlterResourceMonitorOptions {
        set: Some(ResourceMonitorSet {
            end_timestamp: Some("2030-01-01".into()),
            notify_users: Some(NotifyUsers::default()),
            ..Default::default()
        }),
        unset: Some(ResourceMonitorUnset {
            end_timestamp: true,
            ..Default::default()
        }),
        ..AlterResourceMonitorOptions::new(common::random_account_object_identifier())
    };
    let err = validate(&opts).unwrap_err();
    assert_eq!(
        err.violations(),
        &[
            Violation::MutuallyExclusive {
                group: "AlterResourceMonitorOptions",
                fields: vec!["Set.EndTimestamp", "Unset.EndTimestamp"],
            },
            Violation::Empty {
                group: "ResourceMonitorSet",
                field: "NotifyUsers",
            },
        ]
    );
    assert_eq!(err.to_string().lines().count(), 2);
}

#[test]
fn verify_drop() -> anyhow::Result<()> {
    let id = common::random_account_object_identifier();

    assert_invalid_identifier(&DropResourceMonitorOptions::default());
    assert_eq!(
        build_sql(&DropResourceMonitorOptions::new(id.clone()))?,
        format!("DROP RESOURCE MONITOR {}", id.fully_qualified_name())
    );
    assert_eq!(
        build_sql(&DropResourceMonitorOptions {
            if_exists: true,
            ..DropResourceMonitorOptions::new(id.clone())
        })?,
        format!("DROP RESOURCE MONITOR IF EXISTS {}", id.fully_qualified_name())
    );
    Ok(())
}

#[test]
fn verify_show() -> anyhow::Result<()> {
    let id = common::random_schema_object_identifier();

    assert_eq!(
        build_sql(&ShowResourceMonitorOptions::default())?,
        "SHOW RESOURCE MONITORS"
    );
    assert_eq!(
        build_sql(&ShowResourceMonitorOptions {
            like: Some(Like::new(id.name())),
        })?,
        format!("SHOW RESOURCE MONITORS LIKE '{}'", id.name())
    );
    Ok(())
}
