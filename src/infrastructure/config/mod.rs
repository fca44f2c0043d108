//! Configuration management

use std::fmt;
use std::num::NonZeroU64;
use crate::application::errors::ConfigError;

pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const GUILD_ID_VAR: &str = "DISCORD_GUILD_ID";

/// Bot configuration. Built once at startup and never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    bot_token: String,
    guild_id: String,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = required(&lookup, TOKEN_VAR)?;
        let guild_id = required(&lookup, GUILD_ID_VAR)?;

        let config = Self { bot_token, guild_id };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.guild_snowflake().map(|_| ())
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn guild_id(&self) -> &str {
        &self.guild_id
    }

    /// Guild id as a snowflake, checked at load time
    pub fn guild_snowflake(&self) -> Result<NonZeroU64, ConfigError> {
        self.guild_id
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                name: GUILD_ID_VAR.to_string(),
                reason: format!("expected a non-zero numeric id ({})", e),
            })
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingVar(name.to_string()))
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .finish()
    }
}
