//! VisiBoole CLI
//!
//! Parses `.vbi` designs and simulates them from the command line.

use vbc::commands::{check_file, explain_error, parse_options, simulate_file, Action, CliOptions};

fn main() {
    vbc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            let options = options_or_exit(&args[2..]);
            let Some(path) = options.positional.first() else {
                eprintln!("Usage: vb check <file.vbi> [--comments] [--cycles=full]");
                std::process::exit(1);
            };
            check_file(path, options.settings);
        }
        "run" => {
            let options = options_or_exit(&args[2..]);
            let Some(path) = options.positional.first() else {
                eprintln!("Usage: vb run <file.vbi> [--comments] [--cycles=full]");
                std::process::exit(1);
            };
            simulate_file(path, options.settings, &Action::Run);
        }
        "click" => {
            let options = options_or_exit(&args[2..]);
            let Some((path, names)) = options.positional.split_first() else {
                eprintln!("Usage: vb click <file.vbi> <variable>...");
                std::process::exit(1);
            };
            simulate_file(path, options.settings, &Action::Click(names.to_vec()));
        }
        "tick" => {
            let options = options_or_exit(&args[2..]);
            let Some((path, rest)) = options.positional.split_first() else {
                eprintln!("Usage: vb tick <file.vbi> [count]");
                std::process::exit(1);
            };
            let count = match rest.first() {
                Some(count) => count.parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("Invalid tick count: {count}");
                    std::process::exit(1);
                }),
                None => 1,
            };
            simulate_file(path, options.settings, &Action::Tick(count));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("VisiBoole {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: vb --explain <ERROR_CODE>");
                eprintln!("Example: vb --explain E2004");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        _ => {
            // If it looks like a design path, run it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("vbi"))
            {
                let options = options_or_exit(&args[2..]);
                simulate_file(command, options.settings, &Action::Run);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn options_or_exit(args: &[String]) -> CliOptions {
    parse_options(args).unwrap_or_else(|arg| {
        eprintln!("Unknown option: {arg}");
        std::process::exit(1);
    })
}

fn print_usage() {
    println!("VisiBoole (boolean hardware description)");
    println!();
    println!("Usage: vb <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <file.vbi>           Parse a design and report diagnostics");
    println!("  run <file.vbi>             Parse a design and print its output");
    println!("  click <file.vbi> <var>...  Parse, toggle each variable in order, print");
    println!("  tick <file.vbi> [count]    Parse, advance the clock (default once), print");
    println!("  --explain <code>           Explain an error code (e.g., E2004)");
    println!("  help                       Show this help message");
    println!("  version                    Show version information");
    println!();
    println!("Options:");
    println!("  --comments          Show comments without a +/- flag");
    println!("  --cycles=<mode>     Cycle detection: self (default), full");
    println!("  --max-depth=<n>     Deepest allowed submodule nesting (default 32)");
    println!("  --no-semicolons     Omit ';' from the rendered output");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=vb_eval=debug        Trace the evaluation pipeline");
    println!("  VB_DEBUG=statements,expanded  Dump intermediate stages (also: database, all)");
    println!();
    println!("Examples:");
    println!("  vb run adder.vbi");
    println!("  vb click adder.vbi a b");
    println!("  vb tick counter.vbi 4");
    println!("  vb check loop.vbi --cycles=full");
    println!("  vb --explain E2010");
}
