use clap::Parser;
use idh_hook::cli::Args;
use idh_hook::report;
use idh_identity_os::OsUserProvider;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr and only when RUST_LOG asks for them; stdout
    // carries nothing but the one report object.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let provider = OsUserProvider::new();

    let report = args.run(&provider).await;

    // All three report shapes exit 0: callers parse stdout and ignore the
    // exit status.
    report::write_report(&mut std::io::stdout().lock(), &report)?;
    Ok(())
}
