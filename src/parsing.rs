use crate::ApplicationOptions;
use clap::Parser;
use log::info;
use std::env;
use std::ffi::OsString;

/// Long flags that may also be spelled with a single dash, e.g. `-src data.csv`.
const LONG_FLAGS: [&str; 4] = ["src", "dest", "no-headers", "pretty-print"];

impl Default for ApplicationOptions {
    fn default() -> Self {
        Self {
            src: "-".to_owned(),
            dest: None,
            no_headers: false,
            pretty_print: false,
        }
    }
}

/// Boolean flags, which also take an explicit `=true` / `=false` value.
const BOOL_FLAGS: [&str; 2] = ["no-headers", "pretty-print"];

/// Boolean spellings understood by Go's `strconv.ParseBool`.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Rewrites one argument. `None` drops it, as for `-no-headers=false`.
fn rewrite(arg: &str) -> Option<String> {
    let rest = match arg.strip_prefix("--") {
        Some(rest) => rest,
        None => match arg.strip_prefix('-') {
            Some(rest) => rest,
            None => return Some(arg.to_owned()),
        },
    };
    let (name, value) = match rest.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (rest, None),
    };
    if !LONG_FLAGS.contains(&name) {
        return Some(arg.to_owned());
    }

    match value.filter(|_| BOOL_FLAGS.contains(&name)).map(parse_bool) {
        Some(Some(true)) => Some(format!("--{}", name)),
        Some(Some(false)) => None,
        _ => Some(format!("--{}", rest)),
    }
}

/// Rewrites `-src`, `-src=x` and friends to their `--` spelling.
///
/// `-no-headers=true` becomes `--no-headers` and `-no-headers=false` is dropped.
/// A bare `-` and anything after a `--` separator pass through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .filter_map(|arg| {
            if passthrough {
                return Some(arg);
            }
            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    Some(arg)
                }
                Some(flag) => rewrite(flag).map(OsString::from),
                None => Some(arg),
            }
        })
        .collect()
}

pub fn parse_args<I, T>(args: I) -> Result<ApplicationOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    ApplicationOptions::try_parse_from(normalize_args(args))
}

pub fn arg_parse() -> ApplicationOptions {
    env_logger::init();

    let cli = ApplicationOptions::parse_from(normalize_args(env::args_os()));

    info!("Parsed following arguments: ");
    info!("{:?}", &cli);
    cli
}
