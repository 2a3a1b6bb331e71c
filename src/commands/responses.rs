//! Reply formatters for the dispatcher and the built-in commands.
//!
//! All replies are plain text: Telegram renders the backticks literally since
//! no parse mode is sent.

/// Line of the help message describing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    /// Canonical name
    pub name: String,
    /// Aliases of the command
    pub aliases: Vec<String>,
    /// Description, may be empty
    pub description: String,
    /// Whether the command is restricted to administrators
    pub admin_only: bool,
}

/// Formats the reply for a token that matches no command.
///
/// # Examples
///
/// ```
/// # use hookbot::commands::responses::format_not_found;
/// let msg = format_not_found("frobnicate", "/");
/// assert!(msg.contains("/help"));
/// ```
pub fn format_not_found(token: &str, prefix: &str) -> String {
    format!(
        "❌ Command `{}` not found.\nTry `{}help`.",
        token, prefix
    )
}

/// Formats the reply sent when the caller may not run an admin-only command.
pub fn format_permission_denied() -> String {
    "🚫 You don't have permission to use this command.".to_owned()
}

/// Formats the reply sent when a command fails.
pub fn format_execution_error(name: &str) -> String {
    format!("⚠️ An error occurred while executing `{}`.", name)
}

/// Formats the reply of the `ping` command.
pub fn format_pong() -> String {
    "🏓 Pong!".to_owned()
}

/// Formats the help message listing the commands.
///
/// Each command is listed with its prefix, its aliases in parentheses, its
/// description and an `[admin]` marker for restricted commands.
pub fn format_help(prefix: &str, entries: &[HelpEntry]) -> String {
    if entries.is_empty() {
        return "No commands available.".to_owned();
    }

    let commands = entries
        .iter()
        .map(|entry| {
            let mut line = format!("• {}{}", prefix, entry.name);
            if !entry.aliases.is_empty() {
                line.push_str(&format!(" ({})", entry.aliases.join(", ")));
            }
            if !entry.description.is_empty() {
                line.push_str(&format!(" - {}", entry.description));
            }
            if entry.admin_only {
                line.push_str(" [admin]");
            }
            line
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!("📖 Available commands:\n{}", commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_not_found() {
        assert_eq!(
            format_not_found("frobnicate", "!"),
            "❌ Command `frobnicate` not found.\nTry `!help`."
        );
    }

    #[test]
    fn test_format_execution_error() {
        assert_eq!(
            format_execution_error("ping"),
            "⚠️ An error occurred while executing `ping`."
        );
    }

    #[test]
    fn test_format_help_empty() {
        assert_eq!(format_help("/", &[]), "No commands available.");
    }

    #[test]
    fn test_format_help() {
        let entries = vec![
            HelpEntry {
                name: "ban".to_owned(),
                aliases: vec![],
                description: String::new(),
                admin_only: true,
            },
            HelpEntry {
                name: "help".to_owned(),
                aliases: vec!["h".to_owned(), "?".to_owned()],
                description: "Show all available commands".to_owned(),
                admin_only: false,
            },
        ];

        assert_eq!(
            format_help("/", &entries),
            "📖 Available commands:\n\
             • /ban [admin]\n\
             • /help (h, ?) - Show all available commands"
        );
    }
}
