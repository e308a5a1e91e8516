// ABOUTME: CLI binary for the unfurl link-metadata extractor.
// ABOUTME: Fetches one or more URLs and prints extracted metadata as text or JSON.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use unfurl::{Client, Metadata};

#[derive(Parser, Debug)]
#[command(name = "unfurl")]
#[command(about = "Extract link display metadata (title, description, preview image)")]
struct Args {
    /// Output as JSON instead of plain text
    #[arg(long = "json")]
    json_output: bool,

    /// Overall deadline per URL, in seconds
    #[arg(long = "timeout", default_value_t = 15)]
    timeout: u64,

    /// Reader-proxy base URL for the fallback fetch
    #[arg(long = "proxy-base")]
    proxy_base: Option<String>,

    /// Allow fetching from private/local networks
    #[arg(long = "allow-private-networks")]
    allow_private_networks: bool,

    /// URLs to extract metadata for
    #[arg(required = true)]
    urls: Vec<String>,
}

fn print_text(url: &str, meta: &Metadata) {
    println!("URL: {}", url);
    println!("Title: {}", meta.title);
    println!("Description: {}", meta.description);
    println!("Image: {}", meta.image);
    println!("Source: {}", meta.source);
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Client::builder()
        .overall_timeout(Duration::from_secs(args.timeout))
        .allow_private_networks(args.allow_private_networks);
    if let Some(base) = &args.proxy_base {
        builder = builder.proxy_base(base);
    }
    let client = builder.build();

    let mut had_error = false;
    for url in &args.urls {
        match client.extract_metadata(url).await {
            Ok(meta) => {
                if args.json_output {
                    match serde_json::to_string(&meta) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("error serializing result for {}: {}", url, e);
                            had_error = true;
                        }
                    }
                } else {
                    print_text(url, &meta);
                }
            }
            Err(e) => {
                eprintln!("error extracting {}: {}", url, e);
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
