use clap::Parser;

use chrono::Utc;
use hatebu_threads::fetch::{EntryClient, FetchConfig};
use hatebu_threads::threading::{ThreadNode, build_forest};

#[derive(Parser, Debug)]
#[command(
    name = "dump_threads",
    about = "Fetch a page's bookmark entry and print its comment threads"
)]
struct Args {
    /// Page URL whose bookmark entry should be fetched.
    #[arg(long)]
    url: String,

    /// Override the bookmark API base URL.
    #[arg(long)]
    endpoint: Option<String>,

    /// Emit the build result as JSON instead of a text tree.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let mut config = FetchConfig::from_env();
    if let Some(endpoint) = args.endpoint {
        config.base_url = endpoint;
    }

    let client = EntryClient::new(config)?;
    let snapshot = client.fetch_entry(&args.url).await?;
    let result = build_forest(&snapshot.bookmarks, Utc::now())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} users, {} comment threads on {}",
        snapshot.count,
        result.forest.len(),
        snapshot.entry_url
    );

    for root in &result.forest {
        print_node(root, 0);
        for child in &root.children {
            print_node(child, 1);
        }
    }

    if !result.silent.is_empty() {
        let users: Vec<&str> = result.silent.iter().map(|node| node.user.as_str()).collect();
        println!("silent bookmarks: {}", users.join(", "));
    }

    Ok(())
}

fn print_node(node: &ThreadNode, depth: usize) {
    let text: String = node.segments.iter().map(|segment| segment.text()).collect();
    println!("{}{} ({}) {}", "  ".repeat(depth), node.user, node.age_label, text);
}
