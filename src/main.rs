fn main() -> Result<(), Box<dyn std::error::Error>> {
    legato::runtime::run()
}
