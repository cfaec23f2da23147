use anyhow::anyhow;
use std::path::PathBuf;

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    /// Base url of the club API, without a trailing slash.
    pub api_url: String,
    /// Streaming endpoint for the live channel.
    pub stream_url: String,
    /// Application origin used for click routing.
    pub app_origin: String,

    pub history_directory: PathBuf,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("PADEL_NOTIFIER_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("PADEL_NOTIFIER_LOG_FILENAME")?;
        let api_url = Self::env_var("PADEL_NOTIFIER_API_URL")?;
        let stream_url = Self::env_var("PADEL_NOTIFIER_STREAM_URL")?;
        let app_origin = Self::env_var("PADEL_NOTIFIER_APP_ORIGIN")?;
        let history_directory = Self::env_var("PADEL_NOTIFIER_HISTORY_DIRECTORY")?.into();

        Ok(Self {
            log_directory,
            log_filename,
            api_url,
            stream_url,
            app_origin,
            history_directory,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }
}
