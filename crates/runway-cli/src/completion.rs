//! Shell completion scripts.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

/// Write the completion script of the CLI described by `C`.
///
/// The script is registered under the command's own name, so a renamed
/// binary keeps working completions.
pub fn write_completion<C: CommandFactory>(shell: Shell, out: &mut dyn io::Write) {
    let mut cmd = C::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    #[derive(clap::Parser)]
    #[command(name = "runway")]
    struct Flags {
        #[arg(long)]
        rev0: Option<f64>,
        #[arg(long)]
        set_rev: Vec<String>,
    }

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completion::<Flags>(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_script_lists_flags() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("runway"));
        assert!(bash.contains("--rev0"));
        assert!(bash.contains("--set-rev"));
    }

    #[test]
    fn zsh_script_uses_command_name() {
        assert!(script(Shell::Zsh).contains("#compdef runway"));
    }
}
