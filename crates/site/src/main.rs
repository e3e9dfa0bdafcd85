use clap::Parser;

use sao_site::{Cli, Style};

fn main() -> anyhow::Result<()> {
    sao_observability::init();

    let cli = Cli::parse();
    let style = Style::detect(cli.no_color);

    let page = sao_site::run(&cli, &style)?;
    print!("{page}");
    Ok(())
}
