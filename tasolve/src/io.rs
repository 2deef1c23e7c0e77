use clap::Args;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::PathBuf,
    str::FromStr,
};
use tas_solver::io::Problem;

// Both subcommands take one problem and emit one JSON document
#[derive(Args)]
pub struct IOArgs {
    /// The problem JSON file ("-" implies stdin)
    #[arg(value_parser = clap::value_parser!(PathOrStd))]
    input: PathOrStd,

    /// The output file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    output: PathOrStd,
}

impl IOArgs {
    /// Parse the problem; validation is left to the solve or score step
    pub fn read_problem(&self) -> anyhow::Result<Problem> {
        let reader: Box<dyn Read> = match &self.input {
            PathOrStd::Path(path) => Box::new(BufReader::new(File::open(path)?)),
            PathOrStd::Std => Box::new(stdin().lock()),
        };
        Ok(serde_json::from_reader(reader)?)
    }

    /// Where the report goes
    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        match &self.output {
            PathOrStd::Path(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            PathOrStd::Std => Ok(Box::new(stdout().lock())),
        }
    }
}

/// A file path, or "-" for the standard stream
#[derive(Clone, Debug, PartialEq)]
pub enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}
