use clap::Parser;
use roadnet_delay::app::DelayOperation;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct DelayAppArguments {
    #[command(subcommand)]
    op: DelayOperation,
}

fn main() {
    env_logger::init();
    let args = DelayAppArguments::parse();
    match args.op.run() {
        Ok(_) => eprintln!("finished."),
        Err(e) => {
            log::error!("roadnet-delay failed: {e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
