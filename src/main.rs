use taskflow::cli::run;

fn main() {
    #[cfg(windows)]
    let _ = enable_ansi_support::enable_ansi_support();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run() {
        // Everything reaching here is unexpected: bad input exits earlier
        eprintln!("Internal error: {}", e);
        let mut source = e.source();
        if source.is_some() {
            eprintln!("\nCaused by:");
            let mut indent = 1;
            while let Some(err) = source {
                eprintln!("{:indent$}  {}", "", err);
                source = err.source();
                indent += 1;
            }
        }
        std::process::exit(2);
    }
}
