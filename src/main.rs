// src/main.rs

//! The `clusterhash` command-line tool: prints the slot or node for keys.
//!
//! Keys are opaque bytes. Command-line keys are taken from the raw OS
//! arguments, stdin keys are split on `\n` without any UTF-8 decoding, and the
//! key column of the output is written back byte for byte.

use anyhow::{Context, Result, anyhow};
use clusterhash::config::Config;
use clusterhash::core::cluster::NodePolicy;
use clusterhash::core::functions::{ClusterHashExtension, default_registry};
use std::env;
use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead, BufWriter, Write};
use tracing::{debug, error};
use tracing_subscriber::filter::EnvFilter;

const USAGE: &str = "\
Usage: clusterhash [--config PATH] [--policy proportional|range-table] [--nodes N] <COMMAND> [KEY...]

Commands:
  slot        print the hash slot of each key
  node        print the node owning each key under the configured policy
  functions   list the scalar functions a host can register

Keys are read from stdin, one per line, when none are given.
Everything after `--` is a key, even if it looks like a flag.";

/// What the tool was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Slot,
    Node,
    Functions,
}

#[derive(Debug)]
struct CliArgs {
    config_path: Option<String>,
    policy: Option<NodePolicy>,
    nodes: Option<i64>,
    mode: Mode,
    keys: Vec<Vec<u8>>,
}

/// The outcome of argument parsing.
#[derive(Debug)]
enum Invocation {
    Version,
    Help,
    Run(CliArgs),
}

fn main() -> Result<()> {
    // Define version information.
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let args: Vec<OsString> = env::args_os().skip(1).collect();

    let cli = match parse_args(&args) {
        Ok(Invocation::Version) => {
            println!("clusterhash version {VERSION}");
            return Ok(());
        }
        Ok(Invocation::Help) => {
            println!("{USAGE}");
            return Ok(());
        }
        Ok(Invocation::Run(cli)) => cli,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(1);
        }
    };

    let mut config = match &cli.config_path {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from \"{path}\": {e:#}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // Logs go to stderr so stdout stays machine-readable.
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(io::stderr)
        .compact()
        .init();

    // Command-line overrides take precedence over the file.
    if let Some(nodes) = cli.nodes {
        config.routing.policy = NodePolicy::Proportional;
        config.routing.nodes = nodes;
    }
    if let Some(policy) = cli.policy {
        config.routing.policy = policy;
    }

    if let Err(e) = run(&cli, &config) {
        error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

fn run(cli: &CliArgs, config: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.mode == Mode::Functions {
        let extension = ClusterHashExtension;
        writeln!(out, "# {} {}", extension.name(), extension.version())?;
        for name in default_registry().names() {
            writeln!(out, "{name}")?;
        }
        return Ok(out.flush()?);
    }

    let router = config.router().context("Invalid routing configuration")?;
    debug!(policy = %router.policy(), nodes = router.node_count(), "routing keys");

    let route = |key: &[u8]| match cli.mode {
        Mode::Slot => router.slot(key) as u32,
        _ => router.node(key),
    };

    if cli.keys.is_empty() {
        route_lines(io::stdin().lock(), &mut out, route)?;
    } else {
        for key in &cli.keys {
            write_row(&mut out, key, route(key))?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Routes every `\n`-separated key read from `input`. A trailing `\r` is
/// dropped so CRLF input routes the same keys.
fn route_lines<R, W, F>(mut input: R, out: &mut W, route: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: Fn(&[u8]) -> u32,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .context("Failed to read key from stdin")?;
        if read == 0 {
            return Ok(());
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        write_row(out, &line, route(&line))?;
    }
}

fn write_row<W: Write>(out: &mut W, key: &[u8], value: u32) -> io::Result<()> {
    out.write_all(key)?;
    writeln!(out, "\t{value}")
}

fn parse_args(args: &[OsString]) -> Result<Invocation> {
    let mut config_path = None;
    let mut policy = None;
    let mut nodes = None;
    let mut mode = None;
    let mut keys = Vec::new();

    if args.is_empty() {
        return Ok(Invocation::Help);
    }

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        // A non-UTF-8 argument can only be a key or a command typo.
        let Some(text) = arg.to_str() else {
            if mode.is_none() {
                return Err(anyhow!("Unknown command: {}", arg.to_string_lossy()));
            }
            keys.push(os_to_bytes(arg));
            continue;
        };

        match text {
            "--version" => return Ok(Invocation::Version),
            "--help" | "-h" => return Ok(Invocation::Help),
            "--config" => {
                let path = next_value(&mut iter, "--config")?;
                config_path = Some(path.to_string());
            }
            "--policy" => {
                let value = next_value(&mut iter, "--policy")?;
                let parsed = value
                    .parse::<NodePolicy>()
                    .map_err(|_| anyhow!("Unknown policy: {value}"))?;
                policy = Some(parsed);
            }
            "--nodes" => {
                let value = next_value(&mut iter, "--nodes")?;
                let parsed = value
                    .parse::<i64>()
                    .map_err(|_| anyhow!("Invalid node count: {value}"))?;
                nodes = Some(parsed);
            }
            "--" => {
                keys.extend(iter.by_ref().map(|k| os_to_bytes(k)));
            }
            flag if flag.starts_with("--") => return Err(anyhow!("Unknown flag: {flag}")),
            word if mode.is_none() => {
                mode = Some(match word {
                    "slot" => Mode::Slot,
                    "node" => Mode::Node,
                    "functions" => Mode::Functions,
                    other => return Err(anyhow!("Unknown command: {other}")),
                });
            }
            key => keys.push(key.as_bytes().to_vec()),
        }
    }

    let mode = mode.ok_or_else(|| anyhow!("No command given"))?;
    Ok(Invocation::Run(CliArgs {
        config_path,
        policy,
        nodes,
        mode,
        keys,
    }))
}

fn next_value<'a>(iter: &mut impl Iterator<Item = &'a OsString>, flag: &str) -> Result<&'a str> {
    let value = iter
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?;
    value
        .to_str()
        .ok_or_else(|| anyhow!("{flag} value is not valid UTF-8"))
}

#[cfg(unix)]
fn os_to_bytes(arg: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    arg.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_to_bytes(arg: &OsStr) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterhash::get_slot;
    use std::io::Cursor;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn run_args(list: &[&str]) -> CliArgs {
        match parse_args(&args(list)).unwrap() {
            Invocation::Run(cli) => cli,
            other => panic!("expected a run, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_slot_with_keys() {
        let cli = run_args(&["slot", "foo", "{user}:1"]);
        assert_eq!(cli.mode, Mode::Slot);
        assert_eq!(cli.keys, vec![b"foo".to_vec(), b"{user}:1".to_vec()]);
        assert!(cli.config_path.is_none());
    }

    #[test]
    fn test_parse_node_overrides() {
        let cli = run_args(&["--nodes", "3", "node", "--policy", "range-table", "k"]);
        assert_eq!(cli.mode, Mode::Node);
        assert_eq!(cli.nodes, Some(3));
        assert_eq!(cli.policy, Some(NodePolicy::RangeTable));
        assert_eq!(cli.keys, vec![b"k".to_vec()]);
    }

    #[test]
    fn test_parse_double_dash_keys() {
        let cli = run_args(&["slot", "--", "--not-a-flag"]);
        assert_eq!(cli.keys, vec![b"--not-a-flag".to_vec()]);
    }

    #[test]
    fn test_help_and_version_after_double_dash_are_keys() {
        let cli = run_args(&["slot", "--", "-h", "--help", "--version"]);
        assert_eq!(
            cli.keys,
            vec![b"-h".to_vec(), b"--help".to_vec(), b"--version".to_vec()]
        );
    }

    #[test]
    fn test_help_and_version_before_double_dash() {
        assert!(matches!(parse_args(&args(&[])).unwrap(), Invocation::Help));
        assert!(matches!(
            parse_args(&args(&["slot", "-h"])).unwrap(),
            Invocation::Help
        ));
        assert!(matches!(
            parse_args(&args(&["--version", "slot"])).unwrap(),
            Invocation::Version
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--nodes"])).is_err());
        assert!(parse_args(&args(&["--nodes", "x", "node"])).is_err());
        assert!(parse_args(&args(&["--policy", "ring", "node"])).is_err());
        assert!(parse_args(&args(&["explode"])).is_err());
        assert!(parse_args(&args(&["--config", "a.toml"])).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_non_utf8_key_argument() {
        use std::os::unix::ffi::OsStringExt;
        let argv = vec![
            OsString::from("slot"),
            OsString::from_vec(b"\xff\xfebar".to_vec()),
        ];
        let Invocation::Run(cli) = parse_args(&argv).unwrap() else {
            panic!("expected a run");
        };
        assert_eq!(cli.keys, vec![b"\xff\xfebar".to_vec()]);
    }

    #[test]
    fn test_route_lines_keeps_non_utf8_keys() {
        let input = Cursor::new(b"foo\n\xff\xfebar\nbaz\n".to_vec());
        let mut out = Vec::new();
        route_lines(input, &mut out, |k| get_slot(k) as u32).unwrap();

        let mut expected = Vec::new();
        for key in [&b"foo"[..], b"\xff\xfebar", b"baz"] {
            expected.extend_from_slice(key);
            expected.extend_from_slice(format!("\t{}\n", get_slot(key)).as_bytes());
        }
        assert_eq!(out, expected);
    }

    #[test]
    fn test_route_lines_strips_crlf_and_handles_missing_newline() {
        let input = Cursor::new(b"foo\r\n\nbar".to_vec());
        let mut out = Vec::new();
        route_lines(input, &mut out, |k| get_slot(k) as u32).unwrap();
        assert_eq!(out, b"foo\t12182\n\t0\nbar\t5061\n".to_vec());
    }
}
