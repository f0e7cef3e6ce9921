use std::{env, process, time::Instant};

use colored::Colorize;
use opus::{
    analyzer::analyzer::analyze,
    errors::errors::Error,
    format_error,
    lexer::lexer::{tokenize, Lexer},
    open_source,
    options::{init_colors, Options, USAGE},
    parser::parser::parse,
};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    init_colors(options.no_color);

    let file_name = options
        .path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| options.path.to_string_lossy().to_string());

    let source = match open_source(&options.path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}", error.to_string().red());
            process::exit(1);
        }
    };

    let start = Instant::now();

    if options.dump_tokens {
        for token in tokenize(source.clone()) {
            println!("{}", token);
        }
    }

    let (parser, mut ast) = parse(Lexer::new(source.clone()));

    if options.verbose {
        println!("Parsed in {:?}", start.elapsed());
    }

    if !parser.get_errors().is_empty() {
        display_errors(parser.get_errors(), &source, &file_name);
        process::exit(1);
    }

    let analyze_start = Instant::now();
    let (analyzer, success) = analyze(&mut ast);

    if options.verbose {
        println!("Analyzed in {:?}", analyze_start.elapsed());
    }

    display_errors(analyzer.get_errors(), &source, &file_name);

    if options.dump_ast {
        println!("{}", ast);
    }
    if options.dump_symbols {
        println!("{}", analyzer.get_symbol_table());
    }

    if options.verbose {
        println!("Total time: {:?}", start.elapsed());
    }

    if !success {
        process::exit(1);
    }
}

fn display_errors(errors: &[Error], source: &str, file_name: &str) {
    for error in errors {
        eprintln!("{}\n", format_error(error, source, file_name));
    }
}
