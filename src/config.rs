use clap::Parser;

/// CLI surface: bare positional tokens, order-independent, so the same
/// invocation works as a compositor keybinding for both roles.
///
/// `verbose` enables debug logging and is consumed locally by either role.
/// Everything else is a command token: a secondary forwards them to the
/// running primary verbatim; a primary uses them to seed the initial cue.
#[derive(Debug, Clone, Parser)]
#[command(name = "hypr-alttab")]
#[command(about = "Windows-style Alt-Tab window switcher for Hyprland", long_about = None)]
pub struct Config {
    /// Tokens: `verbose`, `next`, `back`
    #[arg(value_name = "TOKEN", allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

impl Config {
    pub fn parse() -> Self {
        <Config as Parser>::parse()
    }

    pub fn verbose(&self) -> bool {
        self.tokens.iter().any(|t| t == "verbose")
    }

    /// All tokens except the verbosity flag, in invocation order.
    pub fn command_tokens(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| *t != "verbose")
            .cloned()
            .collect()
    }
}
