// Render the taskflow(1) man page to stdout

use clap::CommandFactory;
use std::io::Write;
use taskflow::cli::Cli;

fn main() -> std::io::Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer)?;
    std::io::stdout().write_all(&buffer)
}
