use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("Initial error: {:?}", err);
        return ExitCode::from(csv2json::SETUP_FAILURE);
    }
    csv2json::run()
}
