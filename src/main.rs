fn main() {
    arbor::cli::run();
}
