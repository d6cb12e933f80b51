//! nomenc CLI
//!
//! Resolve names in a module manifest.

use std::path::Path;

use nomen_resolve::LookupKind;
use nomenc::commands::{dump, lookup_extensions, lookup_methods, lookup_type, lookup_value};
use nomenc::{load_file, Program};

fn main() {
    nomenc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let mut kind = LookupKind::Qualified;
    let mut verbose = false;
    let mut positional = Vec::new();
    for arg in args.iter().skip(2) {
        match arg.as_str() {
            "--unqualified" | "-u" => kind = LookupKind::Unqualified,
            "--verbose" | "-v" => verbose = true,
            _ if arg.starts_with('-') => {
                eprintln!("error: unknown option '{arg}'");
                std::process::exit(1);
            }
            _ => positional.push(arg.as_str()),
        }
    }

    let command = args[1].as_str();
    let result = match (command, positional.as_slice()) {
        ("help" | "--help" | "-h", _) => {
            print_usage();
            return;
        }
        ("version" | "--version", _) => {
            println!("nomenc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        ("dump", [manifest]) => {
            let program = load(manifest);
            Ok(dump(&program))
        }
        ("type", [manifest, module, name]) => {
            let mut program = load(manifest);
            report(&program, verbose);
            lookup_type(&mut program, module, name, kind)
        }
        ("value", [manifest, module, name]) => {
            let mut program = load(manifest);
            report(&program, verbose);
            lookup_value(&mut program, module, name, kind)
        }
        ("extensions", [manifest, module, ty]) => {
            let mut program = load(manifest);
            report(&program, verbose);
            lookup_extensions(&mut program, module, ty)
        }
        ("methods", [manifest, module, ty, name]) => {
            let mut program = load(manifest);
            report(&program, verbose);
            lookup_methods(&mut program, module, ty, name)
        }
        ("dump" | "type" | "value" | "extensions" | "methods", _) => {
            eprintln!("error: wrong number of arguments for '{command}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(lines) if lines.is_empty() => {
            println!("not found");
            std::process::exit(2);
        }
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn load(path: &str) -> Program {
    match load_file(Path::new(path)) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn report(program: &Program, verbose: bool) {
    if verbose {
        eprintln!(
            "loaded {} modules, {} declarations",
            program.session.module_count(),
            program.session.decls().len()
        );
    }
}

fn print_usage() {
    println!("nomenc: module-scoped name resolution");
    println!();
    println!("Usage: nomenc <command> <manifest.toml> [args] [options]");
    println!();
    println!("Commands:");
    println!("  type <manifest> <module> <name>              Resolve a type from a module");
    println!("  value <manifest> <module> <name>             Resolve a value's overload set");
    println!("  extensions <manifest> <module> <type>        List a module's extensions of a type");
    println!("  methods <manifest> <module> <type> <name>    Resolve extension members of a type");
    println!("  dump <manifest>                              Show every module and declaration");
    println!("  help                                         Show this help message");
    println!("  version                                      Show version information");
    println!();
    println!("Options:");
    println!("  --unqualified, -u   Look up as a bare identifier (never sees built-ins)");
    println!("  --verbose, -v       Report what was loaded");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=nomen_resolve=trace) to trace lookups.");
}
