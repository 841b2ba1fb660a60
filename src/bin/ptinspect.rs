use std::env;
use std::error::Error;
use std::fs;
use std::io::Cursor;
use std::process;
use getopts::{Matches, Options};
use ptfile::sanity;
use tracing_subscriber::EnvFilter;

enum Outcome {
    Ok,
    IoError,
    Broken,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut opts = Options::new();

    opts.optflag("h", "help", "display usage information and exit");
    opts.optflag("m", "md5", "show the MD5 digest of each file");
    opts.optflag("v", "verbose", "show sample details and sanity check failures");
    opts.optflag("V", "version", "display version information and exit");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    if matches.opt_present("V") {
        println!("ptinspect {}", ptfile::VERSION);
        return;
    }

    if matches.opt_present("h") || matches.free.is_empty() {
        let brief = format!("Usage: {} [options] filename...", args[0]);
        print!("{}", opts.usage(&brief));
        return;
    }

    let mut processed = 0;
    let mut errors = 0;

    for path in &matches.free {
        println!("   FILE: {}", path);
        match inspect(path, &matches) {
            Outcome::Ok      => processed += 1,
            Outcome::IoError => {
                println!("  ERROR: IO error, please investigate or report");
                errors += 1;
            }
            Outcome::Broken  => {
                println!("  ERROR: File seems broken, please investigate or report");
                errors += 1;
            }
        }
        println!();
    }

    println!("OK: {}, ERROR: {}, TOTAL {}", processed, errors, processed + errors);

    if errors > 0 {
        process::exit(1);
    }
}

fn inspect(path: &str, matches: &Matches) -> Outcome {
    let b = match fs::read(path) {
        Ok(b)  => b,
        Err(e) => {
            log_error(path, &e);
            return Outcome::IoError;
        }
    };

    if matches.opt_present("m") {
        println!("    MD5: {:x}", md5::compute(&b));
    }

    let module = match ptfile::read(Cursor::new(&b)) {
        Ok(m)  => m,
        Err(e) => {
            log_error(path, &e);
            return Outcome::IoError;
        }
    };

    let verbose = matches.opt_present("v");

    if let Some(insanity) = sanity::diagnose(&module) {
        if verbose {
            println!("  CHECK: {}", insanity);
        }
        return Outcome::Broken;
    }

    println!("  TITLE: {}", module.title);
    println!("SAMPLES: {}/{}", module.used_sample_count, module.sample_table.len());
    for (i, s) in module.sample_table.iter().enumerate() {
        if verbose {
            println!("     {:2}: \"{:22}\" {:5} {:+2} {:2} {:5} {:5}",
                i + 1, s.name, s.sample_length, s.finetune, s.volume, s.repeat_offset, s.repeat_length);
        } else {
            println!("     {:2}: \"{:22}\"", i + 1, s.name);
        }
    }
    if verbose {
        println!("    TAG: {}", module.tag.as_ref().map_or("none", |t| t.as_str()));
        println!("PATTERNS: {}, LENGTH: {}, CHANNELS: {}", module.patterns.len(), module.song_positions, module.channels());
    }

    Outcome::Ok
}

fn log_error(path: &str, e: &dyn Error) {
    eprintln!("{}: {}", path, e);
}
