use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::ArgAction;
use rc_core::calculations::{
    generate_options, report_passes, run_detailed_check, run_sls_check, DesignOption, FinalReinforcement, SlsOutcome,
};
use rc_core::materials::GRADE_TABLE;
use rc_core::record::DesignRecord;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::output;

#[derive(Debug, clap::Parser)]
#[command(version, about = "Reinforced concrete beam design (NZS3101 / NZS4230)")]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Design record to read (JSON). The default record is used when omitted.
    #[arg(short, long, global = true, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Run the selected command. `Ok(false)` means the design did not pass.
    pub fn run(self) -> anyhow::Result<bool> {
        Self::setup_logging(self.verbose);

        let record = match &self.input {
            Some(path) => load_record(path)?,
            None => DesignRecord::default(),
        };
        self.command.run(&record, self.json)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the report, so logs go to stderr
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_line_number(false);

        tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    }
}

#[instrument(level = "debug")]
fn load_record(path: &Path) -> anyhow::Result<DesignRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read design record '{}'", path.display()))?;
    let record = DesignRecord::from_json(&json)
        .with_context(|| format!("failed to parse design record '{}'", path.display()))?;
    info!(id = %record.id, beam_mark = %record.project_info.beam_mark, "loaded design record");
    Ok(record)
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List ranked reinforcement options
    Options {
        /// Show only the first N options
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Detailed clause check of the selected reinforcement
    Check(Selection),

    /// Serviceability check of the selected reinforcement
    Sls(Selection),

    /// Options, detailed check and serviceability check in one go
    All(Selection),

    /// List the material grade table
    Grades,

    /// Print the default design record as JSON
    Init,
}

/// Which reinforcement to check
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct Selection {
    /// Check the K-th ranked option (1-based) instead of the record's reinforcement
    #[arg(long, value_name = "K")]
    option: Option<usize>,
}

impl Command {
    fn run(self, record: &DesignRecord, json: bool) -> anyhow::Result<bool> {
        match self {
            Self::Options { limit } => {
                let options = options_for(record)?;
                let shown = &options[..limit.unwrap_or(options.len()).min(options.len())];
                if json {
                    output::print_json(shown)?;
                } else {
                    output::print_options(shown);
                }
                Ok(!options.is_empty())
            }
            Self::Check(selection) => {
                let reinforcement = selection.resolve(record)?;
                let report = run_detailed_check(
                    &record.design_forces,
                    &record.beam_geometry,
                    &record.material_properties,
                    reinforcement.as_ref(),
                    &record.check_inputs,
                )?;
                if json {
                    output::print_json(&report)?;
                } else {
                    output::print_report("Detailed Check", reinforcement.as_ref(), &report);
                }
                Ok(reinforcement.is_some() && report_passes(&report))
            }
            Self::Sls(selection) => {
                let reinforcement = selection.resolve(record)?;
                let outcome = sls_for(record, reinforcement.as_ref())?;
                if json {
                    output::print_json(&outcome)?;
                } else {
                    output::print_sls(reinforcement.as_ref(), &outcome);
                }
                Ok(outcome.passes())
            }
            Self::All(selection) => {
                let options = options_for(record)?;
                let reinforcement = selection.resolve_from(record, &options)?;
                let report = run_detailed_check(
                    &record.design_forces,
                    &record.beam_geometry,
                    &record.material_properties,
                    reinforcement.as_ref(),
                    &record.check_inputs,
                )?;
                let outcome = sls_for(record, reinforcement.as_ref())?;

                if json {
                    output::print_json(&json!({
                        "options": options,
                        "reinforcement": reinforcement,
                        "detailed_check": report,
                        "sls": outcome,
                    }))?;
                } else {
                    output::print_options(&options);
                    println!();
                    output::print_report("Detailed Check", reinforcement.as_ref(), &report);
                    println!();
                    output::print_sls(reinforcement.as_ref(), &outcome);
                }
                Ok(reinforcement.is_some() && report_passes(&report) && outcome.passes())
            }
            Self::Grades => {
                if json {
                    output::print_json(&*GRADE_TABLE)?;
                } else {
                    output::print_grades(&GRADE_TABLE);
                }
                Ok(true)
            }
            Self::Init => {
                println!("{}", DesignRecord::default().to_json()?);
                Ok(true)
            }
        }
    }
}

impl Selection {
    fn resolve(self, record: &DesignRecord) -> anyhow::Result<Option<FinalReinforcement>> {
        if self.option.is_none() {
            return Ok(record.final_reinforcement);
        }
        let options = options_for(record)?;
        self.resolve_from(record, &options)
    }

    fn resolve_from(self, record: &DesignRecord, options: &[DesignOption]) -> anyhow::Result<Option<FinalReinforcement>> {
        let Some(k) = self.option else {
            return Ok(record.final_reinforcement);
        };
        if k == 0 || k > options.len() {
            bail!("option {} out of range: {} options available", k, options.len());
        }
        let chosen = &options[k - 1];
        debug!(key = %chosen.key(), "using ranked option");
        Ok(Some(chosen.to_reinforcement()))
    }
}

fn options_for(record: &DesignRecord) -> anyhow::Result<Vec<DesignOption>> {
    generate_options(&record.design_forces, &record.beam_geometry, &record.material_properties)
        .context("option search failed")
}

fn sls_for(record: &DesignRecord, reinforcement: Option<&FinalReinforcement>) -> anyhow::Result<SlsOutcome> {
    run_sls_check(
        &record.design_forces,
        &record.beam_geometry,
        &record.material_properties,
        reinforcement,
        &record.sls_inputs,
    )
    .context("serviceability check failed")
}
