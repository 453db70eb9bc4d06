//! Arguments shared by the scan subcommands

use clap::Args;

use crate::client::models::DEFAULT_CALLER;

/// Options for `scan sast` and `scan sca`
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Label identifying this client in the generated scan name
    #[arg(long, default_value = DEFAULT_CALLER)]
    pub caller: String,
}
