// Build-time docs: man pages and shell completion scripts under
// `$OUT_DIR/{man,completions}` for packagers.
//
// `src/cli.rs` only needs clap and clap_complete, so it is compiled here on
// its own through `#[path]`.

use std::io;
use std::path::{Path, PathBuf};

use clap::{Command, CommandFactory};
use clap_complete::Shell;

#[path = "src/cli.rs"]
#[allow(dead_code)]
mod cli;

const SHELLS: [Shell; 4] = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::other("OUT_DIR is not set"))?;

    let mut cmd = cli::Cli::command();

    let man_dir = out_dir.join("man");
    std::fs::create_dir_all(&man_dir)?;
    write_man_pages(&cmd, &man_dir)?;

    let completions_dir = out_dir.join("completions");
    std::fs::create_dir_all(&completions_dir)?;
    for shell in SHELLS {
        clap_complete::generate_to(shell, &mut cmd, "uidb", &completions_dir)?;
    }
    Ok(())
}

/// One page per visible command: `uidb.1`, `uidb-devices.1`,
/// `uidb-devices-list.1`, ...
fn write_man_pages(cmd: &Command, dir: &Path) -> io::Result<()> {
    let name = cmd.get_name().to_owned();
    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut page)?;
    std::fs::write(dir.join(format!("{name}.1")), page)?;

    cmd.get_subcommands()
        .filter(|sub| !sub.is_hide_set())
        .try_for_each(|sub| {
            let qualified = sub.clone().name(format!("{name}-{}", sub.get_name()));
            write_man_pages(&qualified, dir)
        })
}
