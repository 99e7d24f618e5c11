use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use resmon_sql::{
    extract_trigger_ints, AccountObjectIdentifier, AlterResourceMonitorOptions,
    CreateResourceMonitorOptions, DropResourceMonitorOptions, Frequency, Like, NotifyUsers,
    RecordingExecutor, ResourceMonitor, ResourceMonitorSet, ResourceMonitorUnset,
    ResourceMonitorWith, ResourceMonitors, Row, ShowResourceMonitorOptions, TriggerDefinition,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "resmon-sql", about = "Render and decode resource monitor SQL")]
struct Cli {
    /// Used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a CREATE RESOURCE MONITOR statement.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        or_replace: bool,
        #[arg(long)]
        if_not_exists: bool,
        #[command(flatten)]
        params: ParamArgs,
        /// PCT:ACTION, repeatable.
        #[arg(long = "trigger")]
        triggers: Vec<TriggerDefinition>,
    },
    /// Print an ALTER RESOURCE MONITOR statement.
    Alter {
        #[arg(long)]
        name: String,
        #[arg(long)]
        if_exists: bool,
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long)]
        unset_credit_quota: bool,
        #[arg(long)]
        unset_end_timestamp: bool,
        #[arg(long)]
        unset_notify_users: bool,
        /// PCT:ACTION, repeatable; replaces every existing trigger.
        #[arg(long = "trigger")]
        triggers: Vec<TriggerDefinition>,
    },
    /// Print a DROP RESOURCE MONITOR statement.
    Drop {
        #[arg(long)]
        name: String,
        #[arg(long)]
        if_exists: bool,
    },
    /// Print a SHOW RESOURCE MONITORS statement.
    Show {
        #[arg(long)]
        like: Option<String>,
    },
    /// Decode a threshold list such as `51%,63%`.
    DecodeTriggers { value: String },
    /// Decode a JSON array of SHOW RESOURCE MONITORS rows.
    DecodeRows { file: PathBuf },
}

#[derive(Debug, Args)]
struct ParamArgs {
    #[arg(long)]
    credit_quota: Option<i64>,
    #[arg(long)]
    frequency: Option<Frequency>,
    #[arg(long)]
    start_timestamp: Option<String>,
    #[arg(long)]
    end_timestamp: Option<String>,
    /// Repeatable.
    #[arg(long = "notify-user")]
    notify_users: Vec<String>,
}

impl ParamArgs {
    fn notify_users(&self) -> Option<NotifyUsers> {
        if self.notify_users.is_empty() {
            None
        } else {
            Some(NotifyUsers::new(self.notify_users.iter().cloned()))
        }
    }

    fn is_empty(&self) -> bool {
        self.credit_quota.is_none()
            && self.frequency.is_none()
            && self.start_timestamp.is_none()
            && self.end_timestamp.is_none()
            && self.notify_users.is_empty()
    }

    fn into_set(self) -> Option<ResourceMonitorSet> {
        if self.is_empty() {
            return None;
        }
        Some(ResourceMonitorSet {
            notify_users: self.notify_users(),
            credit_quota: self.credit_quota,
            frequency: self.frequency,
            start_timestamp: self.start_timestamp,
            end_timestamp: self.end_timestamp,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = ResourceMonitors::new(RecordingExecutor::new());

    match cli.command {
        Command::Create {
            name,
            or_replace,
            if_not_exists,
            params,
            triggers,
        } => {
            let with = if params.is_empty() && triggers.is_empty() {
                None
            } else {
                Some(ResourceMonitorWith {
                    notify_users: params.notify_users(),
                    credit_quota: params.credit_quota,
                    frequency: params.frequency,
                    start_timestamp: params.start_timestamp,
                    end_timestamp: params.end_timestamp,
                    triggers,
                })
            };
            client
                .create(&CreateResourceMonitorOptions {
                    name: AccountObjectIdentifier::new(name),
                    or_replace,
                    if_not_exists,
                    with,
                })
                .await?;
        }
        Command::Alter {
            name,
            if_exists,
            params,
            unset_credit_quota,
            unset_end_timestamp,
            unset_notify_users,
            triggers,
        } => {
            let unset = ResourceMonitorUnset {
                credit_quota: unset_credit_quota,
                end_timestamp: unset_end_timestamp,
                notify_users: unset_notify_users,
            };
            let unset = (unset != ResourceMonitorUnset::default()).then_some(unset);
            client
                .alter(&AlterResourceMonitorOptions {
                    name: AccountObjectIdentifier::new(name),
                    if_exists,
                    set: params.into_set(),
                    unset,
                    triggers,
                })
                .await?;
        }
        Command::Drop { name, if_exists } => {
            client
                .drop(&DropResourceMonitorOptions {
                    name: AccountObjectIdentifier::new(name),
                    if_exists,
                })
                .await?;
        }
        Command::Show { like } => {
            client
                .show(&ShowResourceMonitorOptions {
                    like: like.map(Like::new),
                })
                .await?;
        }
        Command::DecodeTriggers { value } => {
            let ints = extract_trigger_ints(Some(value.as_str()))?;
            let out: Vec<String> = ints.iter().map(|i| i.to_string()).collect();
            println!("{}", out.join(","));
            return Ok(());
        }
        Command::DecodeRows { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let rows: Vec<Row> = serde_json::from_str(&text).context("parsing rows")?;
            info!(rows = rows.len(), "decoding SHOW rows");
            let monitors = rows
                .iter()
                .map(ResourceMonitor::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", serde_json::to_string_pretty(&monitors)?);
            return Ok(());
        }
    }

    for sql in client.executor().statements() {
        println!("{sql}");
    }
    Ok(())
}
