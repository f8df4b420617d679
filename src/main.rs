fn main() {
    if let Err(err) = infographic_core::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
