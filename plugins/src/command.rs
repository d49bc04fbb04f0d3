use std::path::Path;

use regex::Regex;

/// Points a tool's report flag at a generated file.
///
/// This is plain text substitution on the command string: no shell parsing,
/// no quoting.
#[derive(Debug, Clone)]
pub struct OutputFlagRewriter {
    flag: String,
    invocation: Regex,
    existing_flag: Regex,
}

impl OutputFlagRewriter {
    /// `invocation` must match from the start of the command up to the end
    /// of the tool token, e.g. `^.*?dnsenum(\.pl)?`.
    pub fn new(invocation: &str, flag: &str) -> Result<Self, regex::Error> {
        // Greedy prefix: the last occurrence of the flag wins.
        let existing_flag = Regex::new(&format!(r"^.*\s({}\s*\S+)", regex::escape(flag)))?;
        Ok(Self {
            flag: flag.to_string(),
            invocation: Regex::new(invocation)?,
            existing_flag,
        })
    }

    /// Replaces the value of an existing flag, or inserts the flag right after
    /// the tool token. Commands without either are returned unchanged.
    pub fn rewrite(&self, command: &str, output_path: &Path) -> String {
        let replacement = format!("{} {}", self.flag, output_path.display());

        if let Some(caps) = self.existing_flag.captures(command)
            && let Some(current) = caps.get(1)
        {
            return format!(
                "{}{}{}",
                &command[..current.start()],
                replacement,
                &command[current.end()..]
            );
        }

        match self.invocation.find(command) {
            Some(tool) => format!(
                "{} {}{}",
                &command[..tool.end()],
                replacement,
                &command[tool.end()..]
            ),
            None => command.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> OutputFlagRewriter {
        OutputFlagRewriter::new(r"^.*?scan(\.pl)?", "-o").unwrap()
    }

    #[test]
    fn replaces_existing_value_only() {
        let out = rewriter().rewrite("scan -t 4 -o old.xml target", Path::new("/r/new.xml"));
        assert_eq!(out, "scan -t 4 -o /r/new.xml target");
    }

    #[test]
    fn replaces_attached_value() {
        let out = rewriter().rewrite("scan -oold.xml target", Path::new("/r/new.xml"));
        assert_eq!(out, "scan -o /r/new.xml target");
    }

    #[test]
    fn last_flag_wins() {
        let out = rewriter().rewrite("scan -o a.xml -o b.xml target", Path::new("/r/c.xml"));
        assert_eq!(out, "scan -o a.xml -o /r/c.xml target");
    }

    #[test]
    fn inserts_after_tool_token() {
        let out = rewriter().rewrite("perl scan.pl --verbose target", Path::new("/r/new.xml"));
        assert_eq!(out, "perl scan.pl -o /r/new.xml --verbose target");
    }

    #[test]
    fn longer_flags_are_not_mistaken_for_the_flag() {
        let out = rewriter().rewrite("scan --output-format xml target", Path::new("/r/new.xml"));
        assert_eq!(out, "scan -o /r/new.xml --output-format xml target");
    }

    #[test]
    fn unrelated_command_is_unchanged() {
        let out = rewriter().rewrite("ls -la", Path::new("/r/new.xml"));
        assert_eq!(out, "ls -la");
    }
}
