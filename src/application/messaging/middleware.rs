//! Middleware system for the message processing pipeline

use std::sync::Arc;
use crate::domain::entities::MessageEvent;

/// Context passed through middleware chain
#[derive(Debug, Clone)]
pub struct Context {
    pub message: MessageEvent,
    /// Id of the identity the session authenticated as
    pub self_id: String,
}

impl Context {
    pub fn new(message: MessageEvent, self_id: impl Into<String>) -> Self {
        Self {
            message,
            self_id: self_id.into(),
        }
    }

    pub fn is_self_authored(&self) -> bool {
        self.message.author.id == self.self_id
    }
}

/// Middleware trait - processors that can intercept message handling
pub trait Middleware: Send + Sync {
    fn process(&self, ctx: Context, next: Next) -> MiddlewareResult;
}

/// Result of middleware processing
pub type MiddlewareResult = Result<Context, MiddlewareError>;

/// Middleware errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareError {
    /// Drop the event silently
    Ignored(String),
}

impl std::fmt::Display for MiddlewareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MiddlewareError::Ignored(msg) => write!(f, "Ignored: {}", msg),
        }
    }
}

impl std::error::Error for MiddlewareError {}

/// Next middleware in chain
#[derive(Clone)]
pub struct Next {
    remaining: Arc<[Arc<dyn Middleware>]>,
}

impl Next {
    pub fn new(middlewares: impl Into<Arc<[Arc<dyn Middleware>]>>) -> Self {
        Self {
            remaining: middlewares.into(),
        }
    }

    /// Process remaining middleware
    pub fn run(self, ctx: Context) -> MiddlewareResult {
        match self.remaining.split_first() {
            Some((first, rest)) => first.process(ctx, Next::new(rest.to_vec())),
            None => Ok(ctx),
        }
    }
}

/// Middleware chain builder
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    pub fn add<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    pub fn build(self) -> Vec<Arc<dyn Middleware>> {
        self.middlewares
    }
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops messages the bot wrote itself so it never answers its own replies
pub struct SelfMessageGuard;

impl Middleware for SelfMessageGuard {
    fn process(&self, ctx: Context, next: Next) -> MiddlewareResult {
        if ctx.is_self_authored() {
            return Err(MiddlewareError::Ignored("self-authored message".to_string()));
        }
        next.run(ctx)
    }
}

/// Logging middleware, one line per received message
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn process(&self, ctx: Context, next: Next) -> MiddlewareResult {
        let preview: String = ctx.message.content.chars().take(50).collect();

        tracing::debug!(
            message_id = %ctx.message.id,
            channel_id = %ctx.message.channel_id,
            guild_id = ctx.message.guild_id.as_deref().unwrap_or("-"),
            author_id = %ctx.message.author.id,
            author_is_bot = ctx.message.author.is_bot,
            received_at = %ctx.message.received_at,
            "Received message: {}",
            preview
        );

        let channel_id = ctx.message.channel_id.clone();
        let result = next.run(ctx);

        if let Err(MiddlewareError::Ignored(reason)) = &result {
            tracing::debug!("[{}] Dropped: {}", channel_id, reason);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use std::sync::Mutex;

    struct Tag(&'static str, Arc<Mutex<Vec<&'static str>>>);

    impl Middleware for Tag {
        fn process(&self, ctx: Context, next: Next) -> MiddlewareResult {
            self.1.lock().unwrap().push(self.0);
            next.run(ctx)
        }
    }

    fn ctx(author: &str) -> Context {
        Context::new(MessageEvent::new("m", "c", User::new(author), "ping"), "bot")
    }

    #[test]
    fn chain_runs_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = MiddlewareChain::new()
            .add(Tag("a", Arc::clone(&seen)))
            .add(Tag("b", Arc::clone(&seen)))
            .build();
        Next::new(chain).run(ctx("alice")).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn guard_drops_self_authored() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = MiddlewareChain::new()
            .add(SelfMessageGuard)
            .add(Tag("after", Arc::clone(&seen)))
            .build();
        let err = Next::new(chain).run(ctx("bot")).unwrap_err();
        assert!(matches!(err, MiddlewareError::Ignored(_)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn guard_passes_others() {
        let chain = MiddlewareChain::new()
            .add(LoggingMiddleware)
            .add(SelfMessageGuard)
            .build();
        assert!(Next::new(chain).run(ctx("alice")).is_ok());
    }
}
