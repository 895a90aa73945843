//! Tracing setup for the command-line tool.

use std::collections::HashSet;

use reef_complete::trace_categories;
use tracing_subscriber::{Layer, filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

/// Type of event to trace.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, clap::ValueEnum)]
pub enum TraceEvent {
    /// Traces classification of the cursor position.
    #[clap(name = "completion")]
    Completion,
    /// Traces correction of syntax errors around the cursor.
    #[clap(name = "correction")]
    Correction,
    /// Traces the syntax trees produced for scripts and corrected text.
    #[clap(name = "parse")]
    Parse,
}

impl TraceEvent {
    /// Returns the tracing target that events of this type are emitted under.
    pub const fn target(self) -> &'static str {
        match self {
            Self::Completion => trace_categories::COMPLETION,
            Self::Correction => trace_categories::CORRECTION,
            Self::Parse => trace_categories::PARSE,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct TraceEventConfig {
    enabled_trace_events: HashSet<TraceEvent>,
}

impl TraceEventConfig {
    /// Installs a subscriber writing to stderr, with the given event types raised to debug level.
    pub fn init(enabled_trace_events: &[TraceEvent]) -> Self {
        let config = Self {
            enabled_trace_events: enabled_trace_events.iter().copied().collect(),
        };

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .with_filter(config.compose_filter());

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            // Something went wrong; proceed on anyway but complain audibly.
            eprintln!("warning: failed to initialize tracing.");
        }

        config
    }

    fn compose_filter(&self) -> Targets {
        Targets::new()
            .with_default(tracing_subscriber::filter::LevelFilter::INFO)
            .with_targets(
                self.enabled_trace_events
                    .iter()
                    .map(|event| (event.target(), tracing::Level::DEBUG)),
            )
    }

    pub fn get_enabled_events(&self) -> &HashSet<TraceEvent> {
        &self.enabled_trace_events
    }
}
