use log::error;
use neoslider::{BusHandle, Config, Slider, StdDelay};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::default();
    let stdout = std::io::stdout();
    let mut slider = match Slider::start(
        config,
        |path| BusHandle::open(path),
        StdDelay,
        stdout.lock(),
    ) {
        Ok(slider) => slider,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = slider.run() {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
