use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};

use parley_core::{Query, ResolverResult};

use super::Resolver;
use crate::error::ResolveError;

/// Reports the local date and time. Never declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeResolver;

impl TimeResolver {
    pub fn new() -> Self {
        Self
    }
}

/// Render a timestamp as "Friday, October 16, 2026, 9:05 AM".
pub fn format_now<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "The current date and time is {}.",
        now.format("%A, %B %-d, %Y, %-I:%M %p")
    )
}

#[async_trait]
impl Resolver for TimeResolver {
    fn name(&self) -> &'static str {
        "time"
    }

    async fn resolve(&self, _query: &Query) -> Result<ResolverResult, ResolveError> {
        Ok(ResolverResult::answered(format_now(&Local::now())))
    }
}
