//! Event replay command
//!
//! Feeds a recorded stream of host events through `HostOrderAdapter` and
//! prints one JSON object per event on stdout.

use std::path::PathBuf;

use clap::Args;
use serde_json::{json, Value};
use vectarget_core::logging_facility::{init, Profile};
use vectarget_core::model::VectorTarget;
use vectarget_core::{
    CapabilityCatalog, ExError, HostEvent, HostOrderAdapter, Notification, TargetingConfig,
};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// TOML capability configuration
    #[arg(long)]
    pub config: PathBuf,

    /// JSON file holding an array of host events
    pub events: PathBuf,

    /// Emit logs as JSON instead of human-readable text
    #[arg(long)]
    pub log_json: bool,
}

type Adapter = HostOrderAdapter<CapabilityCatalog, Vec<Notification>>;

pub fn execute(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    init(if args.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let config = TargetingConfig::from_path(&args.config)?;
    let (coordinator, catalog) = config.into_parts()?;
    let mut adapter = HostOrderAdapter::new(coordinator, catalog, Vec::new());

    let raw = std::fs::read_to_string(&args.events)
        .map_err(|e| format!("{}: {}", args.events.display(), e))?;
    let events: Vec<HostEvent> = serde_json::from_str(&raw)?;
    tracing::info!(events = events.len(), "replay started");

    for (index, event) in events.into_iter().enumerate() {
        let name = event.name();
        let (mut line, fatal) = replay_one(&mut adapter, event);

        let notifications = std::mem::take(adapter.sink_mut());
        line["index"] = json!(index);
        line["event"] = json!(name);
        line["notifications"] = serde_json::to_value(notifications)?;
        println!("{}", serde_json::to_string(&line)?);

        if let Some(err) = fatal {
            return Err(err.into());
        }
    }

    tracing::info!(
        queued = adapter.coordinator().queues().total_queued(),
        pending = adapter.coordinator().pending().len(),
        "replay finished"
    );
    Ok(())
}

/// Apply one event; returns the output line and, for a fatal error, its message
fn replay_one(adapter: &mut Adapter, event: HostEvent) -> (Value, Option<String>) {
    match event {
        HostEvent::Order(mut command) => {
            let decision = adapter.filter_order_decision(&mut command);
            let mut line = serde_json::to_value(decision).unwrap_or_else(|_| json!({}));
            line["accepted"] = json!(decision.accepts());
            line["sequence"] = json!(command.sequence);
            (line, None)
        }

        HostEvent::DispatchStart {
            actor_id,
            capability_id,
        } => {
            let mut slot: Option<VectorTarget> = None;
            match adapter.on_dispatch_start(actor_id, capability_id, &mut slot) {
                Ok(target) => (json!({ "target": target, "direction": target.direction() }), None),
                Err(err) => {
                    let message = err.to_string();
                    let ex: ExError = err.into();
                    let line = json!({ "error": message, "code": ex.code() });
                    (line, Some(message))
                }
            }
        }

        HostEvent::CancelRequested(request) => {
            let honored = adapter.on_cancel_request(&request);
            (json!({ "honored": honored }), None)
        }
    }
}
