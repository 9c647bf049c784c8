use std::env;

use text_anim::{Interpreter, Options, Terminal};
use tracing_subscriber::EnvFilter;

// Plays a script file, or an inline script given with `-e`:
//
//     cargo run --example play -- walk.anim
//     cargo run --example play -- -e ':2,1 2
//     AB
//     CD'
fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("text_anim=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut interpreter = Interpreter::new(Terminal::stdout())
        .with_options(Options::default().clear_screen(true));

    let result = match args.as_slice() {
        [flag, script] if flag == "-e" => interpreter.run(script),
        [path] => interpreter.run_file(path),
        _ => {
            eprintln!("usage: play <script-file> | play -e <script>");
            std::process::exit(2);
        }
    };

    match result {
        Ok(summary) => println!(
            "\ndrew {} lines, paused {:?}",
            summary.lines_drawn, summary.paused
        ),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
