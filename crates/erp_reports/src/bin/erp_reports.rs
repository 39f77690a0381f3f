use anyhow::{Context, Result};
use clap::Parser;
use erp_reports::cli::Cli;
use erp_reports::logging::init_logging;
use erp_reports::pool::connect_pool;
use erp_reports::questions::run_all;
use erp_reports::DatabaseTarget;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let target = DatabaseTarget::parse(&cli.database_url)?;
    tracing::debug!(?target, "database target");

    let pool = connect_pool(&target)
        .await
        .with_context(|| format!("failed to connect to {}:{}/{}", target.host, target.port, target.dbname))?;

    let mut stdout = std::io::stdout().lock();
    let result = run_all(&pool, &mut stdout).await;
    pool.close().await;
    result?;
    Ok(())
}
