use apiprobe::cli::{commands, parse_cli};
use apiprobe_utils::logging::{self, prelude::*};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = parse_cli();

    if let Err(e) = logging::init("info") {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match commands::start(&cli).await {
        Ok(status) => println!("{}", status),
        Err(e) => {
            if log::log_enabled!(log::Level::Error) {
                error!("{}", e);
            } else {
                eprintln!("{}", e);
            }
            std::process::exit(1);
        }
    }
}
