//! Manual parsing of `brew run` arguments.

/// Settings for one `brew run` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub path: String,
    pub max_depth: Option<usize>,
    pub profile: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("missing program path")]
    MissingPath,
    #[error("invalid call depth `{0}`")]
    BadDepth(String),
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
}

/// Parse the arguments after `run`.
///
/// `env_depth` is the value of `BREW_MAX_DEPTH`; `--max-depth=N` wins over it.
pub fn parse_run_options(args: &[String], env_depth: Option<&str>) -> Result<RunOptions, OptionsError> {
    let mut path = None;
    let mut max_depth = env_depth.map(parse_depth).transpose()?;
    let mut profile = false;

    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            max_depth = Some(parse_depth(depth)?);
        } else if arg == "--profile" {
            profile = true;
        } else if arg.starts_with('-') {
            return Err(OptionsError::UnknownFlag(arg.clone()));
        } else if path.is_none() {
            path = Some(arg.clone());
        }
    }

    Ok(RunOptions {
        path: path.ok_or(OptionsError::MissingPath)?,
        max_depth,
        profile,
    })
}

fn parse_depth(text: &str) -> Result<usize, OptionsError> {
    text.trim()
        .parse()
        .map_err(|_| OptionsError::BadDepth(text.to_owned()))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn path_only() {
        let options = parse_run_options(&args(&["prog.json"]), None).unwrap();
        assert_eq!(
            options,
            RunOptions {
                path: "prog.json".to_owned(),
                max_depth: None,
                profile: false,
            }
        );
    }

    #[test]
    fn flags_before_or_after_path() {
        let options =
            parse_run_options(&args(&["--profile", "prog.json", "--max-depth=64"]), None).unwrap();
        assert_eq!(options.max_depth, Some(64));
        assert!(options.profile);
    }

    #[test]
    fn flag_overrides_environment() {
        let from_env = parse_run_options(&args(&["p.json"]), Some("100")).unwrap();
        assert_eq!(from_env.max_depth, Some(100));
        let from_flag = parse_run_options(&args(&["p.json", "--max-depth=5"]), Some("100")).unwrap();
        assert_eq!(from_flag.max_depth, Some(5));
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse_run_options(&args(&[]), None).unwrap_err(),
            OptionsError::MissingPath
        );
        assert_eq!(
            parse_run_options(&args(&["p.json", "--max-depth=lots"]), None).unwrap_err(),
            OptionsError::BadDepth("lots".to_owned())
        );
        assert_eq!(
            parse_run_options(&args(&["p.json"]), Some("-1")).unwrap_err(),
            OptionsError::BadDepth("-1".to_owned())
        );
        assert_eq!(
            parse_run_options(&args(&["p.json", "--fast"]), None).unwrap_err(),
            OptionsError::UnknownFlag("--fast".to_owned())
        );
    }
}
