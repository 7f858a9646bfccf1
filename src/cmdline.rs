use crate::interpreter::{self, Interpreter};
use crate::printer::pr_str;
use ansi_term::Colour::Red;
use derive_more::From;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fmt;
use std::fs::read_to_string;
use std::path::PathBuf;

const PROMPT: &str = "scheme> ";
const HISTORY_FILE: &str = ".tiny_scheme_history";

#[derive(Debug, From)]
pub enum Error {
    IO(std::io::Error),
    Interpreter(interpreter::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IO(e) => write!(f, "io error: {}", e),
            Error::Interpreter(e) => write!(f, "{}", e),
        }
    }
}

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("scheme")?;
    interface.set_prompt(PROMPT)?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(HISTORY_FILE);
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

/// Red when the stream is a terminal, plain otherwise.
pub fn paint_error(message: &str, stream: atty::Stream) -> String {
    match atty::is(stream) {
        true => Red.paint(message).to_string(),
        false => message.to_string(),
    }
}

pub fn rep(line: &str, interpreter: &Interpreter) -> String {
    match interpreter.run(line) {
        Ok(value) => pr_str(&value),
        Err(e) => paint_error(&e.to_string(), atty::Stream::Stdout),
    }
}

pub fn repl<T: Terminal>(interface: &Interface<T>, processor: impl Fn(&str) -> String) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                interface.add_history_unique(line.clone());
                writeln!(interface, "{}", processor(&line)).ok();
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

/// With file arguments, runs each file in order through `interpreter`.
/// Without, starts the REPL.
pub fn launch(args: Vec<String>, interpreter: &Interpreter) -> Result<(), Error> {
    if args.len() > 1 {
        for path in &args[1..] {
            log::info!("running {}", path);
            let source = read_to_string(path)?;
            interpreter.run(&source)?;
        }
        return Ok(());
    }
    let interface = setup()?;
    repl(&interface, |line| rep(line, interpreter));
    save_history(&interface)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rep_echoes_readable_value() {
        let interpreter = Interpreter::new();
        assert_eq!(rep("(define xs (list 1 2))", &interpreter), "nil");
        assert_eq!(rep("xs", &interpreter), "(1 2)");
    }

    #[test]
    fn rep_reports_errors() {
        let interpreter = Interpreter::new();
        assert!(rep("(+ 1", &interpreter).contains("unexpected end of input"));
    }

    #[test]
    fn launch_runs_files_in_order() {
        let dir = std::env::temp_dir();
        let first = dir.join("tiny_scheme_launch_first.scm");
        let second = dir.join("tiny_scheme_launch_second.scm");
        std::fs::write(&first, "(define launched 41)").unwrap();
        std::fs::write(&second, "(set! launched (+ launched 1))").unwrap();
        let interpreter = Interpreter::new();
        let args = vec![
            "scheme".to_string(),
            first.to_string_lossy().into_owned(),
            second.to_string_lossy().into_owned(),
        ];
        launch(args, &interpreter).unwrap();
        assert_eq!(
            interpreter.run("launched").unwrap(),
            crate::Value::Number(42.0)
        );
    }

    #[test]
    fn launch_reports_missing_file() {
        let interpreter = Interpreter::new();
        let args = vec!["scheme".to_string(), "/no/such/file.scm".to_string()];
        assert!(matches!(launch(args, &interpreter), Err(Error::IO(_))));
    }
}
