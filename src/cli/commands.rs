//! CLI commands and argument parsing

use crate::types::Connection;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rate-limit aware retrieval from the Twitter REST API
#[derive(Parser, Debug)]
#[command(name = "tweetwalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// User selector shared by timeline-style commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SubjectArgs {
    /// Screen name (takes precedence over --user-id)
    #[arg(long)]
    pub screen_name: Option<String>,

    /// Numeric user id
    #[arg(long)]
    pub user_id: Option<u64>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show current rate limits
    RateLimits {
        /// Resource family, e.g. `statuses`
        category: Option<String>,

        /// Single resource, e.g. `/statuses/user_timeline`
        subcategory: Option<String>,
    },

    /// Home timeline of the authenticated user
    Home {
        /// Maximum number of tweets
        #[arg(long)]
        max_tweets: Option<usize>,
    },

    /// Tweets posted by a user
    Timeline {
        #[command(flatten)]
        subject: SubjectArgs,

        /// Maximum number of tweets
        #[arg(long)]
        max_tweets: Option<usize>,
    },

    /// Tweets liked by a user
    Favorites {
        #[command(flatten)]
        subject: SubjectArgs,

        /// Maximum number of tweets
        #[arg(long)]
        max_tweets: Option<usize>,
    },

    /// Look up user profiles
    Profiles {
        /// Screen names (comma-separated)
        #[arg(long, value_delimiter = ',', conflicts_with = "user_ids")]
        screen_names: Vec<String>,

        /// User ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        user_ids: Vec<u64>,
    },

    /// Look up tweets by id
    Tweets {
        /// Tweet ids
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
    },

    /// Friend or follower ids of a user
    Connections {
        /// Which side of the connection to list
        #[arg(value_enum, ignore_case = true, default_value_t = Connection::Friends)]
        which: Connection,

        #[command(flatten)]
        subject: SubjectArgs,

        /// Maximum number of ids
        #[arg(long)]
        max_ids: Option<usize>,
    },

    /// Locations with trend data
    TrendLocations {
        /// Latitude, used together with --long
        #[arg(long, requires = "long", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude, used together with --lat
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        long: Option<f64>,
    },

    /// Top trends for a location
    Trends {
        /// Where On Earth id (1 = worldwide)
        #[arg(long, default_value = "1")]
        woeid: u64,
    },

    /// Search recent tweets
    Search {
        /// Search query
        query: String,

        /// Maximum number of search requests
        #[arg(long, default_value = "5")]
        max_requests: usize,
    },

    /// Post a tweet
    Post {
        /// Tweet text
        status: String,

        /// Uploaded media ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        media_ids: Vec<u64>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Pretty-printed JSON document
    Pretty,
}
