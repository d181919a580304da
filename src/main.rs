// SPDX-License-Identifier: MPL-2.0
use edu_toast::app::{self, Flags};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("edu_toast=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    let config_dir: Option<String> = args.opt_value_from_str("--config-dir")?;

    // Expiry timers run here, independent of the GUI executor.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()?;

    app::run(Flags {
        config_dir,
        runtime: runtime.handle().clone(),
    })?;
    Ok(())
}
