fn main() {
    if let Err(err) = sample_ddl::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
