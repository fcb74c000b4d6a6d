//! Splitting one input line into an argument vector plus redirection targets.

use std::fmt;

/// Direction of an I/O redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `<`: the child reads standard input from a file.
    Input,
    /// `>`: the child writes standard output to a file.
    Output,
}

impl RedirectKind {
    fn operator(self) -> char {
        match self {
            RedirectKind::Input => '<',
            RedirectKind::Output => '>',
        }
    }
}

/// One fully parsed command line, ready to launch.
///
/// Redirection targets never appear in `argv`. An empty `argv` means the
/// line contained nothing but separators; the caller re-prompts without
/// launching anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCommand {
    /// Program name (`argv[0]`) followed by its arguments, in input order.
    pub argv: Vec<String>,
    /// Target of a `< file` redirection, if present.
    pub stdin_path: Option<String>,
    /// Target of a `> file` redirection, if present.
    pub stdout_path: Option<String>,
}

impl ParsedCommand {
    /// True when the line held no program to run.
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// Malformed redirection syntax. The whole line is rejected; nothing is
/// launched and the loop re-prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A redirection operator was the last token on the line.
    MissingTarget(RedirectKind),
    /// The same redirection direction was given twice.
    DuplicateRedirect(RedirectKind),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingTarget(kind) => {
                write!(f, "syntax error: '{}' without a target file", kind.operator())
            }
            ParseError::DuplicateRedirect(kind) => {
                write!(f, "syntax error: duplicate '{}' redirection", kind.operator())
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Scans `line` left to right, splitting on runs of spaces.
///
/// A token that is exactly `<` or `>` consumes the following token as its
/// redirection target instead of appending it to `argv`. An operator glued
/// to other characters (`>out`) is an ordinary argument.
pub fn parse(line: &str) -> Result<ParsedCommand, ParseError> {
    let mut command = ParsedCommand::default();
    let mut tokens = line.split(' ').filter(|token| !token.is_empty());

    while let Some(token) = tokens.next() {
        let kind = match token {
            "<" => RedirectKind::Input,
            ">" => RedirectKind::Output,
            _ => {
                command.argv.push(token.to_string());
                continue;
            }
        };

        let slot = match kind {
            RedirectKind::Input => &mut command.stdin_path,
            RedirectKind::Output => &mut command.stdout_path,
        };
        if slot.is_some() {
            return Err(ParseError::DuplicateRedirect(kind));
        }
        let target = tokens.next().ok_or(ParseError::MissingTarget(kind))?;
        *slot = Some(target.to_string());
    }

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(command: &ParsedCommand) -> Vec<&str> {
        command.argv.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn empty_line_gives_empty_argv() {
        let command = parse("").unwrap();
        assert!(command.is_empty());
        assert_eq!(command.stdin_path, None);
        assert_eq!(command.stdout_path, None);
    }

    #[test]
    fn spaces_only_gives_empty_argv() {
        let command = parse("     ").unwrap();
        assert!(command.is_empty());
    }

    #[test]
    fn splits_on_runs_of_spaces() {
        let command = parse("echo   hello  world").unwrap();
        assert_eq!(argv(&command), ["echo", "hello", "world"]);
    }

    #[test]
    fn input_redirect_extracted_from_argv() {
        let command = parse("cat < in.txt").unwrap();
        assert_eq!(argv(&command), ["cat"]);
        assert_eq!(command.stdin_path.as_deref(), Some("in.txt"));
        assert_eq!(command.stdout_path, None);
    }

    #[test]
    fn output_redirect_extracted_from_argv() {
        let command = parse("echo hi > out.txt").unwrap();
        assert_eq!(argv(&command), ["echo", "hi"]);
        assert_eq!(command.stdout_path.as_deref(), Some("out.txt"));
        assert_eq!(command.stdin_path, None);
    }

    #[test]
    fn redirects_may_appear_anywhere() {
        let command = parse("< in.txt wc -l > out.txt").unwrap();
        assert_eq!(argv(&command), ["wc", "-l"]);
        assert_eq!(command.stdin_path.as_deref(), Some("in.txt"));
        assert_eq!(command.stdout_path.as_deref(), Some("out.txt"));
    }

    #[test]
    fn operator_must_stand_alone() {
        let command = parse("echo >out.txt").unwrap();
        assert_eq!(argv(&command), ["echo", ">out.txt"]);
        assert_eq!(command.stdout_path, None);
    }

    #[test]
    fn trailing_input_operator_is_an_error() {
        assert_eq!(parse("cat <"), Err(ParseError::MissingTarget(RedirectKind::Input)));
    }

    #[test]
    fn trailing_output_operator_is_an_error() {
        assert_eq!(parse("echo hi > "), Err(ParseError::MissingTarget(RedirectKind::Output)));
    }

    #[test]
    fn repeated_direction_is_an_error() {
        assert_eq!(
            parse("sort < a.txt < b.txt"),
            Err(ParseError::DuplicateRedirect(RedirectKind::Input))
        );
        assert_eq!(
            parse("echo > a.txt > b.txt"),
            Err(ParseError::DuplicateRedirect(RedirectKind::Output))
        );
    }

    #[test]
    fn error_messages_name_the_operator() {
        let missing = parse("cat <").unwrap_err().to_string();
        assert!(missing.contains('<'), "got: {}", missing);
        let duplicate = parse("a > b > c").unwrap_err().to_string();
        assert!(duplicate.contains('>'), "got: {}", duplicate);
    }
}
