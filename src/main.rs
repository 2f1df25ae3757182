use std::{
    env,
    fs::{create_dir, read_to_string, write},
    path::PathBuf,
    process,
    time::Instant,
};

use quickc::{errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse};

fn main() {
    let args: Vec<String> = env::args().collect();

    let (show_tokens, file_path) = match args.len() {
        2 => (false, args[1].as_str()),
        3 if args[1] == "--tokens" => (true, args[2].as_str()),
        _ => {
            eprintln!("usage: quickc [--tokens] <file.q>");
            process::exit(1);
        }
    };

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(_) => {
            eprintln!("error: unable to open {}", file_path);
            process::exit(1);
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(error) => fail(error),
    };
    println!("Tokenized in {:?}", start.elapsed());

    if show_tokens {
        for token in &tokens {
            token.debug();
        }
        return;
    }

    let parse_start = Instant::now();
    let analysis = match parse(tokens) {
        Ok(analysis) => analysis,
        Err(error) => fail(error),
    };
    println!("Parsed in {:?}", parse_start.elapsed());

    if !PathBuf::from("build").exists() {
        create_dir("build").unwrap();
    }
    write("build/out.c", analysis.emitter.assemble()).expect("Failed to write build/out.c");

    println!("Total time: {:?}", start.elapsed());
}

fn fail(error: Error) -> ! {
    eprintln!("{}", error);
    process::exit(1)
}
