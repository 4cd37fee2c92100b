use inbox_app::app::{run, AppConfig};

fn main() {
    tracing_subscriber::fmt::init();
    let config = AppConfig::from_env().unwrap_or_default();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(config, args) {
        eprintln!("inbox command failed: {err}");
        std::process::exit(1);
    }
}
