//! `datex` - run data expressions over JSON documents.

use datexc::commands::{
    lex_expr, match_expr, parse_expr, replace_expr, rewrite_expr, test_expr, EXIT_ERROR,
};

fn main() {
    datexc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "match" => {
            let mut first_only = false;
            let mut positional = Vec::new();
            for arg in args.iter().skip(2) {
                if arg == "--first" || arg == "-1" {
                    first_only = true;
                } else {
                    positional.push(arg.as_str());
                }
            }

            let Some(&source) = positional.first() else {
                eprintln!("Usage: datex match <expr> [file] [--first]");
                std::process::exit(EXIT_ERROR);
            };
            match_expr(source, positional.get(1).copied(), first_only);
        }
        "test" => {
            if args.len() < 3 {
                eprintln!("Usage: datex test <expr> [file]");
                eprintln!();
                eprintln!("Exits with status 0 when the expression matches, 1 otherwise.");
                std::process::exit(EXIT_ERROR);
            }
            test_expr(&args[2], args.get(3).map(String::as_str));
        }
        "replace" | "rewrite" => {
            if args.len() < 4 {
                eprintln!("Usage: datex {command} <expr> <json> [file]");
                eprintln!();
                eprintln!("Example:");
                eprintln!("  datex {command} '.users * .active' 'false' users.json");
                std::process::exit(EXIT_ERROR);
            }
            let file = args.get(4).map(String::as_str);
            if command == "replace" {
                replace_expr(&args[2], &args[3], file);
            } else {
                rewrite_expr(&args[2], &args[3], file);
            }
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: datex parse <expr>");
                std::process::exit(EXIT_ERROR);
            }
            parse_expr(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: datex lex <expr>");
                std::process::exit(EXIT_ERROR);
            }
            lex_expr(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("datex {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn print_usage() {
    println!("datex - data expressions over JSON documents");
    println!();
    println!("Usage: datex <command> [options]");
    println!();
    println!("Commands:");
    println!("  match <expr> [file]            Print every match, one JSON value per line");
    println!("  test <expr> [file]             Exit 0 if the expression matches, 1 if not");
    println!("  replace <expr> <json> [file]   Replace the first match with <json>");
    println!("  rewrite <expr> <json> [file]   Replace every match with <json>");
    println!("  parse <expr>                   Print the syntax tree as JSON");
    println!("  lex <expr>                     Print the token stream");
    println!("  help                           Show this help message");
    println!("  version                        Show version information");
    println!();
    println!("Match options:");
    println!("  --first, -1         Print only the first match");
    println!();
    println!("Documents are read from [file], or from standard input when it is");
    println!("omitted or `-`. Errors exit with status {EXIT_ERROR}.");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostic logging.");
}
