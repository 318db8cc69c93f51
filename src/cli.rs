// CLI layer: parses the flags and dispatches to exactly one `ApiClient`
// operation, printing the flat response line. Validation happens here,
// before any request is sent.

use crate::api::{ApiClient, Visibility, DEFAULT_BASE_URL};
use crate::error::{CliError, CliResult};
use crate::exitcode;
use clap::{ArgAction, Parser};
use std::io::{self, Read, Write};
use tracing::debug;

pub const OPTIONS_SUMMARY: &str =
    "Options: create delete createversion token orgkey appkey appname description visibility version";

pub const NO_ACTION_MESSAGE: &str = "Must specify one of create, delete, createversion";

pub const INVALID_VISIBILITY_MESSAGE: &str = "visibility must be one of organization, public, user";

/// Command-line flags. `--help` is an ordinary flag: it prints the option
/// summary and processing carries on.
#[derive(Parser, Debug)]
#[command(
    name = "apidoc",
    about = "Create, delete and version applications on apidoc",
    disable_help_flag = true
)]
pub struct Cli {
    /// Create an application
    #[arg(long)]
    pub create: bool,

    /// Delete an application and all its versions
    #[arg(long)]
    pub delete: bool,

    /// Create or replace a version, reading the document from stdin
    #[arg(long)]
    pub createversion: bool,

    /// API token generated on the service web site
    #[arg(long, env = "APIDOC_TOKEN", hide_env_values = true, required_unless_present = "help")]
    pub token: Option<String>,

    /// Organization key, first path segment
    #[arg(long, required_unless_present = "help")]
    pub orgkey: Option<String>,

    /// Application key, unique within the organization
    #[arg(long, required_unless_present = "help")]
    pub appkey: Option<String>,

    /// Display name of the application
    #[arg(long, required_if_eq("create", "true"))]
    pub appname: Option<String>,

    #[arg(long, required_if_eq("create", "true"))]
    pub description: Option<String>,

    /// One of public, user, organization (any case)
    #[arg(
        long,
        required_if_eq_any([("create", "true"), ("createversion", "true")])
    )]
    pub visibility: Option<String>,

    /// Version to upsert, e.g. 0.0.1
    #[arg(long, required_if_eq("createversion", "true"))]
    pub version: Option<String>,

    /// Service endpoint
    #[arg(long, env = "APIDOC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Log verbosity on stderr (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Print the option summary
    #[arg(short, long)]
    pub help: bool,
}

/// How a dispatch ended when no error escaped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    NoAction,
    InvalidVisibility,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed => exitcode::OK,
            Outcome::NoAction => exitcode::NO_ACTION,
            Outcome::InvalidVisibility => exitcode::INVALID_VISIBILITY,
        }
    }
}

fn require<'a>(value: &'a Option<String>, name: &'static str) -> CliResult<&'a str> {
    value.as_deref().ok_or(CliError::MissingArgument(name))
}

/// Read the whole document and drop its line breaks. `\n`, `\r\n` and a
/// bare `\r` all end a line; invalid UTF-8 becomes U+FFFD instead of failing.
pub fn read_document<R: Read>(mut input: R) -> io::Result<String> {
    let mut raw = Vec::new();
    input.read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw)
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n'))
        .collect())
}

/// Run the selected action. `--delete` is checked first and wins over any
/// other action, skipping visibility validation. `input` is only read for
/// `--createversion`; its lines are joined without separators.
pub fn run<R: Read, W: Write>(cli: &Cli, api: &ApiClient, input: R, out: &mut W) -> CliResult<Outcome> {
    if cli.help {
        writeln!(out, "{}", OPTIONS_SUMMARY)?;
    }

    if cli.delete {
        let response = api.delete_app(
            require(&cli.token, "token")?,
            require(&cli.orgkey, "orgkey")?,
            require(&cli.appkey, "appkey")?,
        )?;
        writeln!(out, "{}", response)?;
        return Ok(Outcome::Completed);
    }

    if !(cli.create || cli.createversion) {
        writeln!(out, "{}", NO_ACTION_MESSAGE)?;
        return Ok(Outcome::NoAction);
    }

    let visibility = match require(&cli.visibility, "visibility")?.parse::<Visibility>() {
        Ok(v) => v,
        Err(e) => {
            debug!("{}", e);
            writeln!(out, "{}", INVALID_VISIBILITY_MESSAGE)?;
            return Ok(Outcome::InvalidVisibility);
        }
    };

    let token = require(&cli.token, "token")?;
    let org_key = require(&cli.orgkey, "orgkey")?;
    let app_key = require(&cli.appkey, "appkey")?;

    if cli.create {
        let response = api.create_app(
            token,
            org_key,
            require(&cli.appname, "appname")?,
            app_key,
            require(&cli.description, "description")?,
            visibility,
        )?;
        writeln!(out, "{}", response)?;
        return Ok(Outcome::Completed);
    }

    let version = require(&cli.version, "version")?;
    let document = read_document(input)?;
    let response = api.create_app_version(token, org_key, app_key, version, &document, visibility)?;
    writeln!(out, "{}", response)?;
    Ok(Outcome::Completed)
}
