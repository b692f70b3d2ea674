//! Shell completion generation for trendscope

use clap::CommandFactory;
use clap_complete::{Generator, generate};
use std::io::Write;

use crate::ui::cli::Cli;

/// Write the completion script for `generator` to `out`
pub fn write_completions<G: Generator>(generator: G, out: &mut dyn Write) {
    let mut app = Cli::command();
    let name = app.get_name().to_string();
    generate(generator, &mut app, name, out);
}

/// Generate shell completions for the given shell on stdout
pub fn print_completions<G: Generator>(generator: G) {
    write_completions(generator, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    #[test]
    fn test_completions_mention_flags() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let mut out = Vec::new();
            write_completions(shell, &mut out);
            let script = String::from_utf8(out).unwrap();
            assert!(script.contains("trendscope"), "{shell} script lacks name");
            assert!(script.contains("variant"), "{shell} script lacks --variant");
        }
    }
}
