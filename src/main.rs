fn main() -> Result<(), Box<dyn std::error::Error>> {
    glint::cli::main()
}
