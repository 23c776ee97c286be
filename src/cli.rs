//! Command-line argument parsing.

use std::path::PathBuf;

use crate::error::CliError;

pub fn print_usage() {
    eprintln!("Usage: sheetmind [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <CELL=CONTENT>  Set a cell before evaluating (can be repeated)");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula and print its display value");
    eprintln!("  -r, --render <RANGE>      Print display values of a range, tab-separated");
    eprintln!("  --config <FILE>           Load settings from a TOML file");
    eprintln!("  --no-config               Ignore the default settings file");
    eprintln!("  --list-functions          List built-in range functions");
    eprintln!("  -v                        More logging (repeat for more)");
    eprintln!("  -h, --help                Print help");
}

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// `(address, content)` pairs from `--set`, in order
    pub cells: Vec<(String, String)>,
    pub command: Option<String>,
    pub render: Option<String>,
    pub config: Option<PathBuf>,
    pub no_config: bool,
    pub list_functions: bool,
    pub verbosity: u8,
    pub help: bool,
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Options, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "-s" | "--set" => {
                let assignment = args.next().ok_or(CliError::MissingValue("--set"))?;
                options.cells.push(parse_assignment(&assignment)?);
            }
            "-c" | "--command" => {
                options.command = Some(args.next().ok_or(CliError::MissingValue("--command"))?);
            }
            "-r" | "--render" => {
                options.render = Some(args.next().ok_or(CliError::MissingValue("--render"))?);
            }
            "--config" => {
                let path = args.next().ok_or(CliError::MissingValue("--config"))?;
                options.config = Some(PathBuf::from(path));
            }
            "--no-config" => options.no_config = true,
            "--list-functions" => options.list_functions = true,
            flags if is_verbosity(flags) => {
                let count = u8::try_from(flags.len() - 1).unwrap_or(u8::MAX);
                options.verbosity = options.verbosity.saturating_add(count);
            }
            other if other.starts_with('-') => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            other => return Err(CliError::UnexpectedArgument(other.to_string())),
        }
    }

    if !options.help
        && options.command.is_none()
        && options.render.is_none()
        && !options.list_functions
    {
        return Err(CliError::NothingToDo);
    }
    Ok(options)
}

fn is_verbosity(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && arg[1..].bytes().all(|b| b == b'v')
}

/// Split `A1=content` at the first `=`. Content may itself start with `=`.
fn parse_assignment(text: &str) -> Result<(String, String), CliError> {
    match text.split_once('=') {
        Some((address, content)) if !address.trim().is_empty() => {
            Ok((address.trim().to_string(), content.to_string()))
        }
        _ => Err(CliError::InvalidAssignment(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Options, CliError> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_full_command_line() {
        let options = parse(&[
            "--set", "A1=4", "-s", "A2==A1*2", "-c", "=A1+1", "--render", "A1:A2", "-vv",
            "--config", "sheet.toml",
        ])
        .unwrap();

        assert_eq!(
            options,
            Options {
                cells: vec![
                    ("A1".to_string(), "4".to_string()),
                    ("A2".to_string(), "=A1*2".to_string()),
                ],
                command: Some("=A1+1".to_string()),
                render: Some("A1:A2".to_string()),
                config: Some(PathBuf::from("sheet.toml")),
                no_config: false,
                list_functions: false,
                verbosity: 2,
                help: false,
            }
        );
    }

    #[test]
    fn test_verbosity_accumulates() {
        let options = parse(&["-v", "-vv", "--list-functions"]).unwrap();
        assert_eq!(options.verbosity, 3);
    }

    #[test]
    fn test_long_verbosity_flag_saturates() {
        let flag = format!("-{}", "v".repeat(256));
        let options = parse(&[&flag, "--list-functions"]).unwrap();
        assert_eq!(options.verbosity, u8::MAX);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(&["-c"]), Err(CliError::MissingValue("--command")));
        assert_eq!(
            parse(&["--set", "A1", "-c", "=1"]),
            Err(CliError::InvalidAssignment("A1".to_string()))
        );
        assert_eq!(
            parse(&["--set", "=5", "-c", "=1"]),
            Err(CliError::InvalidAssignment("=5".to_string()))
        );
        assert_eq!(
            parse(&["--bogus"]),
            Err(CliError::UnknownOption("--bogus".to_string()))
        );
        assert_eq!(
            parse(&["file.grd"]),
            Err(CliError::UnexpectedArgument("file.grd".to_string()))
        );
        assert_eq!(parse(&["--set", "A1=1"]), Err(CliError::NothingToDo));
    }

    #[test]
    fn test_help_needs_nothing_else() {
        assert!(parse(&["--help"]).unwrap().help);
    }

    #[test]
    fn test_empty_assignment_content_is_allowed() {
        let options = parse(&["--set", "A1=", "-c", "=A1"]).unwrap();
        assert_eq!(options.cells, vec![("A1".to_string(), String::new())]);
    }
}
