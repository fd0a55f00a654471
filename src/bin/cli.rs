//! redpie CLI Client
//!
//! Command-line interface for talking to a RESP server.

use clap::{Parser, Subcommand};
use redpie::{Client, Config, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// redpie CLI
#[derive(Parser, Debug)]
#[command(name = "redpie-cli")]
#[command(about = "CLI for a RESP key-value/hash server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(short = 'H', long, default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "6379")]
    port: u16,

    /// Read timeout in milliseconds (0 waits forever)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Database index to SELECT before running the command
    #[arg(short = 'n', long)]
    db: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Set a field in a hash
    Hset {
        key: String,
        field: String,
        value: String,
    },

    /// Get a field from a hash
    Hget { key: String, field: String },

    /// List the fields of a hash
    Hkeys { key: String },

    /// List the fields and values of a hash
    Hgetall { key: String },

    /// Select a database by index
    Select { index: u32 },

    /// Save the dataset to disk
    Save,

    /// Remove all keys from the current database
    Flushdb,

    /// Number of keys in the current database
    Dbsize,

    /// Send any command and print the raw reply
    Raw {
        /// Command name
        command: String,

        /// Command arguments
        args: Vec<String>,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,redpie=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("(error) {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .read_timeout_ms(args.read_timeout_ms)
        .build();

    let mut client = Client::connect(&config)?;
    tracing::info!("Connected to {}", client.peer_addr());

    if let Some(index) = args.db {
        client.select(index)?;
    }

    match args.command {
        Commands::Get { key } => print_optional(client.get(&key)?),
        Commands::Set { key, value } => println!("{}", client.set(&key, &value)?),
        Commands::Hset { key, field, value } => {
            println!("(integer) {}", client.hset(&key, &field, &value)?)
        }
        Commands::Hget { key, field } => print_optional(client.hget(&key, &field)?),
        Commands::Hkeys { key } => print_list(&client.hkeys(&key)?),
        Commands::Hgetall { key } => {
            let mut pairs: Vec<_> = client.hgetall(&key)?.into_iter().collect();
            pairs.sort();
            if pairs.is_empty() {
                println!("(empty hash)");
            }
            for (field, value) in pairs {
                println!("{:?} => {:?}", field, value);
            }
        }
        Commands::Select { index } => println!("{}", client.select(index)?),
        Commands::Save => println!("{}", client.save()?),
        Commands::Flushdb => println!("{}", client.flushdb()?),
        Commands::Dbsize => println!("(integer) {}", client.dbsize()?),
        Commands::Raw { command, args } => println!("{}", client.execute(&command, &args)?),
    }

    client.quit()?;
    Ok(())
}

fn print_optional(value: Option<String>) {
    match value {
        Some(v) => println!("{:?}", v),
        None => println!("(nil)"),
    }
}

fn print_list(items: &[String]) {
    if items.is_empty() {
        println!("(empty list)");
    }
    for (i, item) in items.iter().enumerate() {
        println!("{}) {:?}", i + 1, item);
    }
}
