use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    AuthReset,
}

pub fn parse_args(args: &[String]) -> Result<Option<CliCommand>> {
    if args.len() <= 1 {
        return Ok(None);
    }

    let command = args.get(1).map(String::as_str);
    let subcommand = args.get(2).map(String::as_str);

    if command == Some("auth") && subcommand == Some("reset") {
        return Ok(Some(CliCommand::AuthReset));
    }

    bail!("unknown arguments: {}", args[1..].join(" "))
}

#[cfg(test)]
mod tests {
    use super::{CliCommand, parse_args};

    #[test]
    fn parse_args_returns_auth_reset() {
        let args = vec![
            "jiradash".to_string(),
            "auth".to_string(),
            "reset".to_string(),
        ];

        let parsed = parse_args(&args).expect("parse succeeds");
        assert_eq!(parsed, Some(CliCommand::AuthReset));
    }

    #[test]
    fn parse_args_returns_none_for_empty() {
        let args = vec!["jiradash".to_string()];
        let parsed = parse_args(&args).expect("parse succeeds");
        assert_eq!(parsed, None);
    }

    #[test]
    fn parse_args_rejects_unknown_arguments() {
        let args = vec!["jiradash".to_string(), "--verbose".to_string()];
        assert!(parse_args(&args).is_err());
    }
}
