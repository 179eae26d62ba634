//! Roster CLI - normalize person records and browse posts
//!
//! # Main Commands
//!
//! ```bash
//! roster demo                      # Original data, transformed data and mean of the sample
//! roster transform people.csv      # Normalize records from a CSV or JSON file
//! roster mean people.json          # Mean of the power values only
//! roster posts                     # List posts from the posts API
//! roster post 1                    # Show a post with its author
//! roster serve                     # Start HTTP server (port 3000)
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! roster sample                    # Print the embedded dataset as JSON
//! roster validate people.json      # Check records against the raw record schema
//! ```

use clap::{Parser, Subcommand};
use roster::dataset::sample_records;
use roster::parser::{decode_content, detect_encoding, detect_format, SourceFormat};
use roster::{
    demonstrate, parse_file_auto, transform_file, try_arithmetic_mean, validate_raw_record,
    validate_raw_records, arithmetic_mean, FeedClient, Settings, TransformOptions,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Characters of a post body shown in the list.
const PREVIEW_CHARS: usize = 80;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Normalize person records and browse posts", long_about = None)]
struct Cli {
    /// Posts API base URL (overrides ROSTER_FEED_URL)
    #[arg(long, global = true)]
    feed_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform the embedded sample and print every step
    Demo,

    /// Normalize records from a CSV or JSON file
    Transform {
        /// Input file
        input: PathBuf,

        /// Reject malformed records
        #[arg(long)]
        strict: bool,

        /// Check records against the raw record schema
        #[arg(long)]
        validate: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the mean of the power values
    Mean {
        /// Input file (default: embedded sample)
        input: Option<PathBuf>,

        /// Reject malformed power values
        #[arg(long)]
        strict: bool,
    },

    /// Validate records against the raw record schema
    Validate {
        /// Input file (JSON array or CSV)
        input: PathBuf,
    },

    /// Print the embedded sample dataset
    Sample,

    /// List posts
    Posts {
        /// Show at most this many posts
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a post and its author
    Post {
        /// Post id
        id: u64,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (overrides ROSTER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(url) = cli.feed_url {
        settings.feed_url = url.trim_end_matches('/').to_string();
    }

    let result = match cli.command {
        Commands::Demo => cmd_demo(),

        Commands::Transform {
            input,
            strict,
            validate,
            output,
        } => cmd_transform(
            &input,
            strict || settings.strict,
            validate,
            output.as_deref(),
        ),

        Commands::Mean { input, strict } => {
            cmd_mean(input.as_deref(), strict || settings.strict)
        }

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Sample => cmd_sample(),

        Commands::Posts { limit } => cmd_posts(&settings, limit).await,

        Commands::Post { id } => cmd_post(&settings, id).await,

        Commands::Serve { port } => {
            if let Some(port) = port {
                settings.port = port;
            }
            roster::server::start_server(settings).await
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_demo() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", demonstrate(&sample_records())?);
    Ok(())
}

fn cmd_transform(
    input: &Path,
    strict: bool,
    validate: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let options = TransformOptions { strict, validate };
    let report = transform_file(input, &options)?;

    if let Some(ref source) = report.source {
        eprintln!("   Encoding: {}", source.encoding);
        eprintln!("   Format: {:?}", source.format);
        if let Some(d) = source.delimiter {
            eprintln!("   Delimiter: '{}'", format_delimiter(d));
        }
    }
    eprintln!("   Records: {}", report.count);
    eprintln!("   Mean power: {} ({})", report.mean_rounded, report.mean);

    let json = serde_json::to_string_pretty(&report.transformed)?;
    write_output(&json, output)?;

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_mean(input: Option<&Path>, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    let records = match input {
        Some(path) => parse_file_auto(path)?.records,
        None => sample_records(),
    };

    let mean = if strict {
        try_arithmetic_mean(&records)?
    } else {
        arithmetic_mean(&records)
    };

    println!("Arithmetic Mean: {}", mean);
    println!("Rounded to 2 decimal places: {:.2}", mean);
    eprintln!("Calculated from {} power values", records.len());
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let bytes = fs::read(input)?;
    let content = decode_content(&bytes, &detect_encoding(&bytes))?;

    // JSON is checked as-is so missing or mistyped fields are reported too.
    let invalid: Vec<(usize, Vec<String>)> = match detect_format(&content) {
        SourceFormat::Json => {
            let values: Vec<Value> = serde_json::from_str(&content)?;
            values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| validate_raw_record(v).err().map(|e| (i, e)))
                .collect()
        }
        SourceFormat::Csv => validate_raw_records(&parse_file_auto(input)?.records),
    };

    for (i, errors) in invalid.iter().take(5) {
        eprintln!("\n❌ Record {} invalid:", i);
        for err in errors.iter().take(3) {
            eprintln!("   - {}", err);
        }
    }

    if invalid.is_empty() {
        eprintln!("\n✅ All records valid");
        Ok(())
    } else {
        Err(format!("{} invalid records", invalid.len()).into())
    }
}

fn cmd_sample() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&sample_records())?);
    Ok(())
}

async fn cmd_posts(
    settings: &Settings,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = FeedClient::from_settings(settings)?;
    let posts = client.list_posts().await?;

    eprintln!("📋 {} posts available\n", posts.len());
    for post in posts.iter().take(limit.unwrap_or(usize::MAX)) {
        println!("#{}  User {}", post.id, post.user_id);
        println!("   {}", post.title);
        println!("   {}\n", post.preview(PREVIEW_CHARS));
    }
    Ok(())
}

async fn cmd_post(settings: &Settings, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let client = FeedClient::from_settings(settings)?;
    let detail = client.post_with_author(id).await?;
    let (post, user) = (&detail.post, &detail.author);

    println!("Post #{}", post.id);
    println!("{}\n", post.title);
    println!("{}\n", post.body);
    println!("Author Information");
    println!("   {} (@{})", user.name, user.username);
    println!("   Email:   {}", user.email);
    println!("   Phone:   {}", user.phone);
    println!("   Website: {}", user.website);
    println!("   Company: {}", user.company.name);
    println!("   Address: {}", user.address.one_line());
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
