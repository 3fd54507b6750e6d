//! Command-line argument parsing.
//!
//! Flags whose value may be omitted (`-w`, `-r`, `-p`) are parsed as
//! `Option<Option<String>>` and normalized into a three-case [`Field`]:
//! absent, present without a value (ask interactively), or given.

use clap::Parser;

use crate::transit::{ClientConfig, DEFAULT_BASE_URL};

const AFTER_HELP: &str = "\
Products:
    suburban, subway, tram, bus, ferry, express, regional
    \"all\" selects every product.

A flag given without a value (e.g. `vbb Zoo -w`) asks for it interactively.
Put the station before such a flag, otherwise it is taken as the flag's value.
Leaving out the station asks for it as well.

Examples:
    vbb Zoo
    vbb 900100003 -r 5 -p subway,tram
    vbb Alexanderplatz -w \"tomorrow 2 pm\"";

/// One option as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// A value was given.
    Provided(T),
    /// The flag was given without a value: ask the user.
    PromptRequested,
    /// Not given at all: use the default.
    Absent,
}

impl<T> Field<T> {
    /// Normalize a clap optional-value flag.
    pub fn from_flag(flag: Option<Option<T>>) -> Self {
        match flag {
            Some(Some(value)) => Field::Provided(value),
            Some(None) => Field::PromptRequested,
            None => Field::Absent,
        }
    }
}

/// Normalized options for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Station id or search text.
    pub station: Field<String>,
    pub when: Field<String>,
    pub results: Field<String>,
    pub products: Field<String>,
}

#[derive(Debug, Parser)]
#[command(name = "vbb")]
#[command(about = "Show upcoming departures at a Berlin/Brandenburg (VBB) station")]
#[command(version)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    #[arg(help = "Station number (like \"900023201\") or search string (like \"Zoo\")")]
    pub station: Option<String>,

    #[arg(
        short,
        long,
        value_name = "N",
        num_args = 0..=1,
        help = "The number of departures to show [default: 8]"
    )]
    pub results: Option<Option<String>>,

    #[arg(
        short,
        long,
        value_name = "LIST",
        num_args = 0..=1,
        help = "Allowed transportation types, comma-separated [default: all]"
    )]
    pub products: Option<Option<String>>,

    #[arg(
        short,
        long,
        value_name = "TEXT",
        num_args = 0..=1,
        help = "A date & time string like \"tomorrow 2 pm\" [default: now]"
    )]
    pub when: Option<Option<String>>,

    #[arg(long, env = "VBB_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,
}

impl Cli {
    /// The normalized options. A missing station is always asked for.
    pub fn options(&self) -> Options {
        let station = match &self.station {
            Some(station) => Field::Provided(station.clone()),
            None => Field::PromptRequested,
        };

        Options {
            station,
            when: Field::from_flag(self.when.clone()),
            results: Field::from_flag(self.results.clone()),
            products: Field::from_flag(self.products.clone()),
        }
    }

    /// Client configuration for the selected endpoint.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new().with_base_url(&self.base_url)
    }
}
