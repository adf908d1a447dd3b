//! Tessel CLI
//!
//! Parses SPIR-V type strings into a fresh context and prints their
//! canonical spelling. Failures are rendered as diagnostics on stderr.

use std::io::IsTerminal;

use tessel_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use tessel_diagnostic::{DiagnosticQueue, ErrorCode};
use tessel_ir::{Context, FileLineColLoc, Location};
use tessel_spirv::{SpirvDialect, SpirvType};

fn main() {
    tessel_ir::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "parse-type" => {
            let mut color = ColorMode::Auto;
            let mut specs = Vec::new();
            for arg in args.iter().skip(2) {
                if let Some(mode) = arg.strip_prefix("--color=") {
                    let Some(parsed) = parse_color_mode(mode) else {
                        eprintln!("error: unknown color mode '{mode}' (expected auto, always or never)");
                        std::process::exit(1);
                    };
                    color = parsed;
                } else {
                    specs.push(arg.as_str());
                }
            }
            if specs.is_empty() {
                eprintln!("Usage: tessel parse-type <type>... [--color=auto|always|never]");
                eprintln!("Example: tessel parse-type 'array<4 x f32>' 'ptr<f32, Uniform>'");
                std::process::exit(1);
            }
            if !parse_types(&specs, color) {
                std::process::exit(1);
            }
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: tessel --explain <ERROR_CODE>");
                eprintln!("Example: tessel --explain E1001");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("tessel {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Parse every spec into one context, print the canonical form of each
/// success on stdout, and report failures. Returns `false` if any failed.
fn parse_types(specs: &[&str], color: ColorMode) -> bool {
    let mut ctx = Context::new();
    SpirvDialect::register(&mut ctx);

    let mut queue = DiagnosticQueue::new();
    let mut parsed: Vec<SpirvType> = Vec::new();
    for (index, spec) in specs.iter().enumerate() {
        // Each argument is reported as line N of the command line.
        let line = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let loc: Location = FileLineColLoc::get(&ctx, "<command-line>", line, 1).into();
        if let Some(ty) = SpirvDialect::parse_type(&ctx, spec, loc, &mut queue) {
            println!("{}", SpirvDialect::print_type(&ctx, ty));
            parsed.push(ty);
        }
    }

    tracing::debug!(
        parsed = parsed.len(),
        failed = queue.error_count(),
        "finished parsing type arguments"
    );

    let error_count = queue.error_count();
    let diagnostics = queue.flush();
    if diagnostics.is_empty() {
        return true;
    }

    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(&ctx, color, is_tty);
    emitter.emit_all(&diagnostics);
    emitter.emit_summary(error_count, 0);
    emitter.flush();
    error_count == 0
}

fn parse_color_mode(mode: &str) -> Option<ColorMode> {
    match mode {
        "auto" => Some(ColorMode::Auto),
        "always" => Some(ColorMode::Always),
        "never" => Some(ColorMode::Never),
        _ => None,
    }
}

fn explain_error(code_str: &str) {
    let Some(code) = ErrorCode::ALL
        .iter()
        .copied()
        .find(|code| code.as_str().eq_ignore_ascii_case(code_str))
    else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Known codes: E1001 through E1005");
        std::process::exit(1);
    };

    println!("{code}: {}", code.description());
}

fn print_usage() {
    println!("Tessel IR type tooling");
    println!();
    println!("Usage: tessel <command> [options]");
    println!();
    println!("Commands:");
    println!("  parse-type <type>...  Parse SPIR-V types and print their canonical form");
    println!("  --explain <code>      Explain an error code (e.g., E1001)");
    println!("  help                  Show this help message");
    println!("  version               Show version information");
    println!();
    println!("Options:");
    println!("  --color=<mode>        Diagnostic colors: auto, always, never");
    println!();
    println!("Examples:");
    println!("  tessel parse-type 'array<4 x f32>'");
    println!("  tessel parse-type 'image<f32, 2D, NoDepth>' 'rtarray<i32>'");
    println!("  RUST_LOG=tessel_ir=trace tessel parse-type 'ptr<f32, Uniform>'");
}
