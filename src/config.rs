//! Loading of the static tables and command line handling.
//!
//! Both tables are plain text, one entry per line, whitespace separated. The routing table has
//! four fields per line, `prefix next_hop mask interface` (note that the mask comes third), the
//! ARP table two, `ip mac`. Blank lines are skipped; anything else that does not parse is an
//! error carrying its line number.
use core::fmt;
use std::str::FromStr;
use std::path::Path;
#[cfg(feature = "structopt")]
use std::path::PathBuf;
use std::{fs, io};

#[cfg(feature = "structopt")]
use structopt::StructOpt;

use crate::layer::{arp, route};
use crate::wire::Ipv4Address;

/// The error type of the table loaders.
#[derive(Debug)]
pub enum Error {
    /// Reading the file itself failed.
    Io(io::Error),

    /// A line did not have the expected shape.
    Parse {
        /// The offending line, 1-based.
        line: usize,
        /// The field that was missing or malformed.
        what: &'static str,
    },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Parse { line, what } => write!(f, "line {}: bad or missing {}", line, what),
        }
    }
}

impl std::error::Error for Error {}

/// Load the routing table entries from a file.
///
/// The entries come back in file order; sorting is the job of `route::Table::new`.
pub fn load_routes<P: AsRef<Path>>(path: P) -> Result<Vec<route::Entry>, Error> {
    parse_routes(&fs::read_to_string(path)?)
}

/// Load the ARP table entries from a file.
pub fn load_neighbors<P: AsRef<Path>>(path: P) -> Result<Vec<arp::Entry>, Error> {
    parse_neighbors(&fs::read_to_string(path)?)
}

/// Parse routing table text, see the module documentation for the format.
pub fn parse_routes(text: &str) -> Result<Vec<route::Entry>, Error> {
    let mut entries = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let line_no = index + 1;
        let mut fields = line.split_whitespace();

        entries.push(route::Entry {
            prefix: parse_field(fields.next(), line_no, "prefix")?,
            next_hop: parse_field(fields.next(), line_no, "next hop")?,
            mask: parse_field(fields.next(), line_no, "mask")?,
            interface: parse_field(fields.next(), line_no, "interface")?,
        });
    }

    Ok(entries)
}

/// Parse ARP table text, see the module documentation for the format.
pub fn parse_neighbors(text: &str) -> Result<Vec<arp::Entry>, Error> {
    let mut entries = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let line_no = index + 1;
        let mut fields = line.split_whitespace();

        entries.push(arp::Entry {
            protocol_addr: parse_field(fields.next(), line_no, "ip address")?,
            hardware_addr: parse_field(fields.next(), line_no, "mac address")?,
        });
    }

    Ok(entries)
}

fn parse_field<T: FromStr>(
    field: Option<&str>,
    line: usize,
    what: &'static str,
) -> Result<T, Error> {
    field
        .and_then(|word| word.parse().ok())
        .ok_or(Error::Parse { line, what })
}

/// An interface given on the command line as `NAME,ADDRESS`.
///
/// The name is the OS interface to open and the address is the router's own address on it, used
/// for the self-addressed check of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfaceSpec {
    /// The OS name of the interface, e.g. `eth0`.
    pub name: String,

    /// The router's IPv4 address on this interface.
    pub address: Ipv4Address,
}

/// Error emitted when parsing an interface specification fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIfaceError {
    _private: (),
}

impl fmt::Display for ParseIfaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("expected an interface as `NAME,ADDRESS`")
    }
}

impl FromStr for IfaceSpec {
    type Err = ParseIfaceError;

    fn from_str(src: &str) -> Result<Self, ParseIfaceError> {
        let mut parts = src.splitn(2, ',');

        let name = match parts.next() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => return Err(ParseIfaceError { _private: () }),
        };

        let address = parts.next()
            .and_then(|addr| addr.parse().ok())
            .ok_or(ParseIfaceError { _private: () })?;

        Ok(IfaceSpec { name, address })
    }
}

/// The command line of the router daemon.
#[cfg(feature = "structopt")]
#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "nexthop", about = "A static-table IPv4 forwarding daemon.")]
pub struct Opts {
    /// Path of the routing table file.
    #[structopt(parse(from_os_str))]
    pub routes: PathBuf,

    /// Path of the ARP table file.
    #[structopt(parse(from_os_str))]
    pub neighbors: PathBuf,

    /// The interfaces to attach, each as `NAME,ADDRESS`.
    ///
    /// Interface ids follow argument order: the first interface becomes id 0.
    pub interfaces: Vec<IfaceSpec>,
}

#[cfg(feature = "structopt")]
impl Opts {
    /// Parse the program arguments.
    pub fn from_args() -> Self {
        StructOpt::from_args()
    }
}
