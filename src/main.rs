use argh::FromArgs;

#[derive(FromArgs)]
/// A minimal shell supporting sequential (;) and parallel (&) composition.
struct Args {
    /// run a single command line and exit with its status
    #[argh(option, short = 'c')]
    command: Option<String>,
}

fn main() {
    env_logger::init();
    let args: Args = argh::from_env();

    match args.command {
        Some(line) => std::process::exit(minish::repl::dispatch(&line)),
        None => {
            if let Err(err) = minish::repl::run() {
                eprintln!("minish: {err}");
                std::process::exit(1);
            }
        }
    }
}
