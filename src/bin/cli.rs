//! Masterblog CLI
//!
//! Offline tools for the post file: seed sample data, list, search.

use clap::{Parser, Subcommand};
use masterblog::query::{search_posts, SearchFilter};
use masterblog::seed::{chess_posts, DEFAULT_COUNT};
use masterblog::{Post, PostField, PostStore};
use tracing_subscriber::{fmt, EnvFilter};

/// Masterblog CLI
#[derive(Parser, Debug)]
#[command(name = "masterblog-cli")]
#[command(about = "CLI for the Masterblog post file")]
#[command(version)]
struct Args {
    /// JSON file holding the posts
    #[arg(short, long, default_value = "./posts_storage.json")]
    file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace the file's contents with generated chess posts
    Seed {
        /// Number of posts to generate
        #[arg(short, long, default_value_t = DEFAULT_COUNT)]
        count: usize,
    },

    /// Print every post
    List,

    /// Case-insensitive substring search
    Search {
        /// Matches title, content, author or date
        query: Option<String>,

        /// Matches title only
        #[arg(long)]
        title: Option<String>,

        /// Matches content only
        #[arg(long)]
        content: Option<String>,

        /// Matches author only
        #[arg(long)]
        author: Option<String>,

        /// Matches date only
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> masterblog::Result<()> {
    let store = PostStore::open(&args.file)?;

    match args.command {
        Commands::Seed { count } => {
            let today = chrono::Local::now().date_naive();
            store.replace_all(chess_posts(count, today))?;
            println!("Generated {} chess posts and saved them to '{}'.", count, args.file);
        }
        Commands::List => {
            store.with_posts(|posts| posts.iter().for_each(print_post));
        }
        Commands::Search {
            query,
            title,
            content,
            author,
            date,
        } => {
            let mut filter = SearchFilter::new();
            if let Some(query) = &query {
                filter = filter.query(query);
            }
            for (field, term) in [
                (PostField::Title, &title),
                (PostField::Content, &content),
                (PostField::Author, &author),
                (PostField::Date, &date),
            ] {
                if let Some(term) = term {
                    filter = filter.field(field, term);
                }
            }

            let results = store.with_posts(|posts| search_posts(posts, &filter));
            results.iter().for_each(print_post);
            println!("{} matching posts", results.len());
        }
    }

    Ok(())
}

fn print_post(post: &Post) {
    println!("[{}] {} ({}, {})", post.id, post.title, post.author, post.date);
}
