use std::process;
use tiny_scheme::{cmdline, Interpreter};

fn main() {
    pretty_env_logger::init();
    let interpreter = Interpreter::new();
    let args = std::env::args().collect();
    if let Err(e) = cmdline::launch(args, &interpreter) {
        eprintln!("{}", cmdline::paint_error(&e.to_string(), atty::Stream::Stderr));
        process::exit(1);
    }
}
