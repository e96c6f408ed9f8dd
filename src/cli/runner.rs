//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, SubjectArgs};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::types::{JsonValue, Subject, Users};
use serde_json::Value;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Client::from_config(&self.load_config()?)?;
        let output = self.execute(&client).await?;
        self.output(&output);
        Ok(())
    }

    /// Run the command against `client` and collect its result
    pub async fn execute(&self, client: &Client) -> Result<Value> {
        let output = match &self.cli.command {
            Commands::RateLimits {
                category,
                subcategory,
            } => client
                .rate_limits(category.as_deref(), subcategory.as_deref())
                .await?
                .unwrap_or(Value::Null),
            Commands::Home { max_tweets } => {
                Self::collected(client.home_timeline(*max_tweets).await?)
            }
            Commands::Timeline {
                subject,
                max_tweets,
            } => Self::collected(
                client
                    .user_timeline(Self::subject(subject), *max_tweets)
                    .await?,
            ),
            Commands::Favorites {
                subject,
                max_tweets,
            } => Self::collected(
                client
                    .user_favorites(Self::subject(subject), *max_tweets)
                    .await?,
            ),
            Commands::Profiles {
                screen_names,
                user_ids,
            } => {
                let users = if screen_names.is_empty() {
                    Users::UserIds(user_ids.clone())
                } else {
                    Users::ScreenNames(screen_names.clone())
                };
                Self::collected(client.user_profiles(&users).await?)
            }
            Commands::Tweets { ids } => Self::collected(client.tweets_by_id(ids).await?),
            Commands::Connections {
                which,
                subject,
                max_ids,
            } => Self::collected(
                client
                    .connection_ids(*which, Self::subject(subject), *max_ids)
                    .await?,
            ),
            Commands::TrendLocations { lat, long } => {
                let lat_lon = lat.zip(*long);
                Self::collected(client.trend_locations(lat_lon).await?)
            }
            Commands::Trends { woeid } => Self::collected(client.trends(*woeid).await?),
            Commands::Search {
                query,
                max_requests,
            } => Self::collected(client.search_tweets(query, *max_requests).await?),
            Commands::Post { status, media_ids } => client
                .post_status_update(status, media_ids)
                .await?
                .unwrap_or(Value::Null),
        };
        Ok(output)
    }

    /// Load configuration
    ///
    /// The config file is optional; environment overrides apply either way.
    fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let config = config.with_env_overrides();
        config.validate()?;
        if self.cli.verbose {
            info!(base_url = %config.base_url, auth = config.auth.kind(), "loaded config");
        }
        Ok(config)
    }

    fn subject(args: &SubjectArgs) -> Subject {
        Subject::from_parts(args.screen_name.clone(), args.user_id)
    }

    fn collected(items: Vec<JsonValue>) -> Value {
        info!(count = items.len(), "retrieved");
        Value::Array(items)
    }

    /// Render a result for stdout
    pub fn render(&self, output: &Value) -> Result<String> {
        match (self.cli.format, output) {
            (OutputFormat::Json, Value::Array(items)) => {
                let lines = items
                    .iter()
                    .map(serde_json::to_string)
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(lines.join("\n"))
            }
            (OutputFormat::Json, other) => Ok(serde_json::to_string(other)?),
            (OutputFormat::Pretty, other) => Ok(serde_json::to_string_pretty(other)?),
        }
    }

    /// Output a result
    fn output(&self, output: &Value) {
        match self.render(output) {
            Ok(text) if text.is_empty() => {}
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}
