use std::path::PathBuf;

use clap::Parser;
use log::{error, warn};
use proto_echo::{fixtures, report, EchoInvoker, Error, WapcUnit, DEFAULT_MODULE_PATH, PROTO_ECHO};

/// Round-trips a protobuf record through a waPC guest and prints the reply as JSON
#[derive(Debug, Parser)]
#[command(name = "proto-echo", version, about)]
struct Cli {
  /// WebAssembly module implementing the echo operation
  #[arg(default_value = DEFAULT_MODULE_PATH)]
  module: PathBuf,

  /// Guest operation to invoke
  #[arg(short, long, default_value = PROTO_ECHO)]
  operation: String,

  /// Send a record with only `field_uint64` set
  #[arg(long)]
  minimal: bool,
}

fn main() {
  env_logger::init();
  let cli = Cli::parse();

  match run(&cli) {
    Ok(rendered) => println!("{}", rendered),
    Err(e) => {
      error!("{}", e);
      eprintln!("proto-echo: {}", e);
      std::process::exit(1);
    }
  }
}

// The unit is dropped before this returns, so it is released on every path.
fn run(cli: &Cli) -> Result<String, Error> {
  let unit = WapcUnit::from_file(&cli.module, |msg: &str| println!("{}", msg))?;
  let echo = EchoInvoker::with_operation(unit, cli.operation.as_str());

  let request = if cli.minimal {
    fixtures::minimal()
  } else {
    fixtures::full()
  };
  let reply = echo.round_trip(&request)?;
  if reply != request {
    warn!("'{}' did not echo the request unchanged", echo.operation());
  }

  report::render(&reply)
}
