use clap::{Parser, Subcommand};
use serde_json::Value;

use repick::config::Config;
use repick::nodes::{NodeContext, NodeRegistry};
use repick::{build_dict, telemetry};

#[derive(Parser)]
#[command(name = "repick")]
#[command(about = "Reactive parameter-selection nodes for workflow automation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a node by type
    Run {
        /// Node type (see `repick nodes list`)
        node_type: String,
        /// JSON node configuration
        #[arg(short, long, default_value = "{}")]
        config: String,
        /// JSON input data
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Build a dictionary from parallel key/value lists
    Dict {
        /// JSON array of keys
        #[arg(short, long)]
        keys: String,
        /// JSON array of values
        #[arg(short, long)]
        values: String,
    },
    /// Inspect available nodes
    Nodes {
        #[command(subcommand)]
        action: NodeActions,
    },
}

#[derive(Subcommand)]
enum NodeActions {
    /// List registered node types
    List,
}

#[tokio::main]
async fn main() {
    let config = Config::load();
    telemetry::init_tracing(&config.log.filter);

    let cli = Cli::parse();
    if let Err(e) = run(cli, &config).await {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&e.to_json()).unwrap_or_else(|_| e.to_string())
        );
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &Config) -> repick::Result<()> {
    match cli.command {
        Commands::Run {
            node_type,
            config: node_config,
            input,
        } => {
            let node_config: Value = serde_json::from_str(&node_config)?;
            let input = parse_json_input(input.as_deref())?;

            let registry = NodeRegistry::from_config(config);
            let execution_id = uuid::Uuid::new_v4().to_string();
            let ctx = NodeContext::new(&execution_id).with_input(input);

            let result = registry.execute(&node_type, &node_config, &ctx).await?;
            tracing::debug!(%execution_id, %node_type, "node executed");
            println!("{}", serde_json::to_string_pretty(&result.data)?);
        }
        Commands::Dict { keys, values } => {
            let keys = parse_json_array(&keys, "keys")?;
            let values = parse_json_array(&values, "values")?;

            let dict = build_dict(&keys, &values);
            println!("{}", serde_json::to_string_pretty(&Value::Object(dict))?);
        }
        Commands::Nodes { action } => match action {
            NodeActions::List => {
                let registry = NodeRegistry::from_config(config);
                let mut rows = registry.descriptions();
                rows.sort();
                for (name, description) in rows {
                    println!("{:<14} {}", name, description);
                }
            }
        },
    }

    Ok(())
}

fn parse_json_input(raw: Option<&str>) -> repick::Result<Value> {
    match raw {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(Value::Null),
    }
}

fn parse_json_array(raw: &str, name: &str) -> repick::Result<Vec<Value>> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(repick::Error::Config(format!(
            "--{} must be a JSON array",
            name
        ))),
    }
}
