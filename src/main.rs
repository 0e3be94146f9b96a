use std::env;
use std::io;
use std::process;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use getopts::Options;
use log::LevelFilter;
use tally::{Source, Error};

fn main() {
  let args = env::args().collect::<Vec<_>>();
  let prog = args[0].clone();
  let mut opts = Options::new();
  opts.optflag("t", "tokens", "Print the token stream");
  opts.optflag("a", "ast", "Print the syntax tree");
  opts.optflag("s", "states", "Print the LR(1) states and parsing tables");
  opts.optflag("n", "no-run", "Stop after parsing");
  opts.optflag("v", "verbose", "Log at debug level unless RUST_LOG is set");
  opts.optflag("h", "help", "Print this message");

  let matches = match opts.parse(&args[1..]) {
    Ok(m) => m,
    Err(err) => {
      eprintln!("{}", err);
      process::exit(1);
    }
  };

  if matches.opt_present("h") {
    print_usage(prog, opts);
    return;
  }

  let mut logger = env_logger::Builder::new();
  logger.filter_level(if matches.opt_present("v") {
    LevelFilter::Debug
  } else {
    LevelFilter::Warn
  });
  logger.parse_default_env();
  logger.init();

  let path = if matches.free.len() == 1 {
    matches.free[0].clone()
  } else {
    print_usage(prog, opts);
    process::exit(1);
  };

  let options = tally::Options {
    path: path.into(),
    dump_tokens: matches.opt_present("t"),
    dump_ast: matches.opt_present("a"),
    dump_states: matches.opt_present("s"),
    no_run: matches.opt_present("n"),
    ..Default::default()
  };

  let source = match Source::read(&options.path) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("error: {}", err);
      process::exit(1);
    }
  };

  let stdout = io::stdout();
  let result = tally::execute(&options, &source, &mut stdout.lock());
  if let Err(err) = result {
    report(&source, &err);
    process::exit(1);
  }
}

fn report(source: &Source, err: &Error) {
  let mut stderr = StandardStream::stderr(ColorChoice::Auto);
  if tally::report::emit(&mut stderr, &source.name, &source.text, err).is_err() {
    eprintln!("error: {}", err);
  }
}

fn print_usage(prog: String, opts: Options) {
  let brief = format!("Usage: {} [options] PATH", prog);
  print!("{}", opts.usage(&brief));
}
