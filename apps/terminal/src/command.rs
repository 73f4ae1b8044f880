use commitments_api::InvestorId;

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Select(InvestorId),
    Filter(String),
    Refresh,
    Focus,
    Help,
    Quit,
}

impl Command {
    /// Parses a line such as `select 3` or `filter Private Equity`.
    ///
    /// The filter label is everything after the keyword, so labels with
    /// spaces need no quoting.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "select" | "s" => rest
                .parse::<InvestorId>()
                .map(Command::Select)
                .map_err(|_| format!("Not an investor id: '{}'", rest)),
            "filter" | "f" if rest.is_empty() => Err("Usage: filter <asset class>".to_string()),
            "filter" | "f" => Ok(Command::Filter(rest.to_string())),
            "refresh" | "r" => Ok(Command::Refresh),
            "focus" => Ok(Command::Focus),
            "help" | "?" | "" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}', type 'help'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select() {
        assert_eq!(Command::parse("select 3"), Ok(Command::Select(3)));
        assert_eq!(Command::parse("  s   12 "), Ok(Command::Select(12)));
        assert!(Command::parse("select abc").is_err());
        assert!(Command::parse("select").is_err());
    }

    #[test]
    fn test_parse_filter_keeps_spaces() {
        assert_eq!(
            Command::parse("filter Private Equity"),
            Ok(Command::Filter("Private Equity".to_string()))
        );
        assert!(Command::parse("filter").is_err());
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Command::parse("REFRESH"), Ok(Command::Refresh));
        assert_eq!(Command::parse("focus"), Ok(Command::Focus));
        assert_eq!(Command::parse(""), Ok(Command::Help));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert!(Command::parse("dance").is_err());
    }
}
