//! Scan command implementation

use std::sync::Arc;

use log::{debug, warn};

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, ScanArgs};
use crate::client::ScanType;
use crate::error::Result;
use crate::output::json::{ScanReport, format_json};
use crate::output::{self, OutputSink, StatusView};
use crate::scan::{CancelToken, Orchestrator};

/// Run a SAST or SCA scan of the project
pub async fn run(opts: &GlobalOptions, scan_type: ScanType, args: &ScanArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    debug!(
        "Scanning {} ({}) via {}",
        ctx.project.name,
        ctx.project.root.display(),
        ctx.client.endpoint(scan_type)
    );

    let sink: Arc<dyn OutputSink> = Arc::new(output::console_for(ctx.format));
    let status = Arc::new(StatusView::new());
    status.subscribe(|update| {
        debug!("Status [{}]: {}", update.state, update.lines.join(" | "));
    });

    let cancel = CancelToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling scan");
                cancel.cancel();
            }
        })
    };

    let orchestrator =
        Orchestrator::new(ctx.client, sink, status).with_caller(args.caller.clone());
    let result = orchestrator.run(&ctx.project, scan_type, &cancel).await;
    interrupt.abort();

    let outcome = result?;
    if ctx.format == OutputFormat::Json {
        let report = ScanReport::new(scan_type, &ctx.project.name, &outcome);
        println!("{}", format_json(&report)?);
    }

    Ok(())
}
