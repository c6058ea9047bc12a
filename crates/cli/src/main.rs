use clap::Parser;

use subtrack_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    subtrack_observability::init(cli.global.log_format);

    let stdout = std::io::stdout();
    subtrack_cli::run(cli, &mut stdout.lock())
}
