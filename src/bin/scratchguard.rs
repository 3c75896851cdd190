use anyhow::Result;

fn main() -> Result<()> {
    scratchguard::cli::run()
}
