use std::path::PathBuf;

use clap::Parser;
use mcss_common::*;

/// MCSS - Maximum common substructure of a collection of molecular graphs
#[derive(Parser, Debug)]
#[command(name = "mcss")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON array of molecular graphs
    pub input: PathBuf,

    /// Reduce to one substructure or to every tied minimal one
    #[arg(short = 'j', long, value_enum)]
    pub job_type: Option<JobTypeArg>,

    /// Atom comparison
    #[arg(long, value_enum)]
    pub atoms: Option<MatchArg>,

    /// Bond comparison
    #[arg(long, value_enum)]
    pub bonds: Option<MatchArg>,

    /// Graphs per reduction task
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Worker threads (0 lets rayon decide)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Tied mappings kept per comparison
    #[arg(long)]
    pub max_mappings: Option<usize>,

    /// JSON configuration file; flags given here override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where to write the result graphs (stdout if omitted)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Optional CSV summary of the result graphs
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Args {
    /// Merge flags over the configuration file over the defaults.
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let base = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        let mut builder = base.into_builder();
        if let Some(job) = self.job_type.clone() {
            builder = builder.job_type(job.into());
        }
        if let Some(atoms) = self.atoms.clone() {
            builder = builder.atom_match(atoms.into());
        }
        if let Some(bonds) = self.bonds.clone() {
            builder = builder.bond_match(bonds.into());
        }
        if let Some(chunk_size) = self.chunk_size {
            builder = builder.chunk_size(chunk_size);
        }
        if let Some(threads) = self.threads {
            builder = builder.threads(threads);
        }
        if let Some(max_mappings) = self.max_mappings {
            builder = builder.max_mappings(max_mappings);
        }
        let config = builder.build();
        config.validate()?;
        Ok(config)
    }
}

/// Command-line argument wrapper for JobType
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum JobTypeArg {
    /// One representative substructure
    #[value(name = "single")]
    Single,
    /// Every tied minimal substructure
    #[value(name = "multiple")]
    Multiple,
}

impl From<JobTypeArg> for JobType {
    fn from(arg: JobTypeArg) -> Self {
        match arg {
            JobTypeArg::Single => JobType::Single,
            JobTypeArg::Multiple => JobType::Multiple,
        }
    }
}

/// Command-line argument wrapper for AtomMatch and BondMatch
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum MatchArg {
    /// Compare every attribute
    #[value(name = "exact")]
    Exact,
    /// Compare element (atoms) or nothing (bonds)
    #[value(name = "relaxed")]
    Relaxed,
}

impl From<MatchArg> for AtomMatch {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Exact => AtomMatch::Exact,
            MatchArg::Relaxed => AtomMatch::Relaxed,
        }
    }
}

impl From<MatchArg> for BondMatch {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Exact => BondMatch::Exact,
            MatchArg::Relaxed => BondMatch::Relaxed,
        }
    }
}
