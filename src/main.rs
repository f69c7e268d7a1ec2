//! Command line tool: query the ISSN Portal for the Keepers data of a list of
//! ISSNs and write the results to the current (or given) directory.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use keepers_query::input::{invalid_issns, read_issn_list, remove_excluded};
use keepers_query::{
    logging, KeepersError, PortalClient, ProgressLog, QueryConfig, QueryRun, RecordArchive, Runner,
};

/// Retrieves Keepers data from the ISSN Portal for a list of ISSNs. The CSV
/// output is written to the output directory.
#[derive(Debug, Parser)]
#[command(name = "keepers-query", version, about)]
struct Cli {
    /// A text file containing one ISSN per line.
    #[arg(long, value_name = "ISSNs")]
    issns: PathBuf,

    /// A text file containing ISSNs to ignore, e.g. the done list of an earlier run.
    #[arg(long, value_name = "IGNORE")]
    ignore: Option<PathBuf>,

    /// Save the JSON records to a folder named "<timestamp>_json_records".
    #[arg(long)]
    save_records: bool,

    /// Pause politely between queries, in seconds.
    #[arg(long, default_value_t = 1.0, value_name = "DELAY")]
    delay: f64,

    /// Log level of the log file (DEBUG, INFO, WARN, ERROR).
    #[arg(long, default_value = "INFO", value_name = "LOGLEVEL")]
    level: String,

    /// Directory receiving all output files.
    #[arg(long, default_value = ".", value_name = "DIR")]
    output_dir: PathBuf,

    /// Base URL of the ISSN Portal.
    #[arg(long, env = "KEEPERS_PORTAL_URL", default_value = keepers_query::config::DEFAULT_BASE_URL, hide = true)]
    base_url: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Blocked runs were already reported by the runner.
            if !err
                .downcast_ref::<KeepersError>()
                .is_some_and(KeepersError::is_fatal)
            {
                error!("{err:#}");
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = QueryConfig::new()
        .with_base_url(cli.base_url.as_str())
        .with_delay(QueryConfig::delay_from_secs(cli.delay)?)
        .with_output_dir(&cli.output_dir)
        .with_save_records(cli.save_records);

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    logging::init(&cli.level, &config.log_file())?;

    info!("Using ISSN list: {}", cli.issns.display());
    let mut issns = read_issn_list(&cli.issns)
        .with_context(|| format!("reading ISSN list {}", cli.issns.display()))?;

    if let Some(ignore) = &cli.ignore {
        info!("Ignoring ISSNs from file: {}", ignore.display());
        let excluded = read_issn_list(ignore)
            .with_context(|| format!("reading ignore list {}", ignore.display()))?;
        issns = remove_excluded(issns, &excluded);
    }
    for issn in invalid_issns(&issns) {
        warn!("Input does not look like a valid ISSN: {issn}");
    }
    info!("Delay between queries: {:?}.", config.delay);

    let mut runner = Runner::new(PortalClient::new(&config)?)
        .with_delay(config.delay)
        .with_progress(ProgressLog::open(config.done_issns())?);
    if config.save_records {
        let archive = RecordArchive::create(config.records_dir())?;
        info!("JSON records will be saved to {}", archive.dir().display());
        runner = runner.with_archive(archive);
    }

    let mut query = QueryRun::new();
    runner.run(&issns, &mut query)?;

    query.write_csv(&config.results_csv())?;
    query.write_organization_list(&config.organizations_list(), &config.timestamp)?;

    info!(
        "Feel free to check the logfile ({}) for errors or warnings.",
        config.log_file().display()
    );
    info!("Done.");
    Ok(())
}
