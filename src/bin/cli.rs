//! TinyKV CLI Client
//!
//! Command-line interface for interacting with a TinyKV server.

use clap::{Parser, Subcommand};
use tinykv::{Client, ClientConfig, EndKeyEncoding};
use tracing_subscriber::{fmt, EnvFilter};

/// TinyKV CLI
#[derive(Parser, Debug)]
#[command(name = "tinykv-cli")]
#[command(about = "CLI for the TinyKV key-value store")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Connect timeout in milliseconds
    #[arg(long, default_value = "5000")]
    connect_timeout_ms: u64,

    /// Response read buffer size in bytes
    #[arg(long, default_value = "8192")]
    buffer_size: usize,

    /// Send Scan end keys base64-wrapped, as older clients do
    #[arg(long)]
    legacy_end_key: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set a key-value pair
    Put {
        /// Column family
        cf: String,

        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Get a value by key
    Get {
        /// Column family
        cf: String,

        /// The key to get
        key: String,
    },

    /// Delete a key
    Del {
        /// Column family
        cf: String,

        /// The key to delete
        key: String,
    },

    /// Scan a key range
    Scan {
        /// Column family
        cf: String,

        /// First key of the range
        start: String,

        /// End of the range
        end: Option<String>,

        /// Maximum number of pairs
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show key count and column families
    Info,

    /// Persist server data to disk
    Flush,

    /// Compact server storage
    Compact,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tinykv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> tinykv::Result<()> {
    let encoding = if args.legacy_end_key {
        EndKeyEncoding::Base64Wrapped
    } else {
        EndKeyEncoding::Raw
    };

    let config = ClientConfig::builder()
        .addr(&args.server)
        .connect_timeout_ms(args.connect_timeout_ms)
        .read_buffer_size(args.buffer_size)
        .end_key_encoding(encoding)
        .build();

    let mut client = Client::connect_with_config(&config)?;

    match args.command {
        Commands::Put { cf, key, value } => {
            client.put(&cf, &key, &value)?;
            println!("OK");
        }
        Commands::Get { cf, key } => match client.get(&cf, &key)? {
            Some(value) => println!("{}", value),
            None => println!("Key not found"),
        },
        Commands::Del { cf, key } => {
            client.delete(&cf, &key)?;
            println!("OK");
        }
        Commands::Scan {
            cf,
            start,
            end,
            limit,
        } => {
            for item in client.scan(&cf, &start, end.as_deref(), limit)? {
                println!("{}: {}", item.key, item.value);
            }
        }
        Commands::Info => {
            let info = client.info()?;
            println!("total_keys: {}", info.total_keys);
            println!("column_families: {}", info.column_families.join(", "));
        }
        Commands::Flush => {
            client.flush()?;
            println!("OK");
        }
        Commands::Compact => {
            client.compact()?;
            println!("OK");
        }
    }

    client.close()
}
