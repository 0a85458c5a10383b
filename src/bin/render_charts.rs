use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use douban_charts::analysis;
use douban_charts::charts::ChartKind;
use douban_charts::database_ops::fetch_movies;
use douban_charts::tracing::{default_filter, init_tracing};
use douban_charts::util::db::{Db, DbConfig};
use douban_charts::util::env as env_util;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "render_charts", version, about = "Render the dashboard charts to PNG files")]
struct Cli {
    /// Comma-separated subset of charts (default: all four)
    #[arg(long, value_enum, value_delimiter = ',')]
    only: Option<Vec<ChartKind>>,
    /// Directory the PNG files are written to
    #[arg(long, default_value = "plots")]
    out_dir: PathBuf,
    /// Print the aggregated numbers behind each chart
    #[arg(long, default_value_t = false)]
    print: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_util::init_env();
    init_tracing(default_filter(env_util::env_flag("DEBUG", false)))?;

    let cli = Cli::parse();
    let kinds = cli.only.unwrap_or_else(|| ChartKind::ALL.to_vec());

    let config = DbConfig::from_env()?;
    let db = Db::connect_lazy(&config);

    tokio::fs::create_dir_all(&cli.out_dir)
        .await
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let mut failures = 0usize;
    for kind in kinds {
        let movies = fetch_movies(&db, kind.filter())
            .await
            .with_context(|| format!("loading rows for {}", kind.file_name()))?;

        if cli.print {
            match analysis::describe(kind, &movies) {
                Ok(table) => println!("{table}"),
                Err(e) => println!("{}\n  {e}\n", kind.title()),
            }
        }

        let png = match tokio::task::spawn_blocking(move || analysis::render(kind, &movies)).await? {
            Ok(png) => png,
            Err(e) => {
                error!(chart = kind.file_name(), error = %e, "render failed");
                failures += 1;
                continue;
            }
        };

        let path = cli.out_dir.join(kind.file_name());
        tokio::fs::write(&path, &png)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), bytes = png.len(), "chart written");
    }

    db.pool.close().await;
    if failures > 0 {
        anyhow::bail!("{failures} chart(s) failed to render");
    }
    Ok(())
}
