fn main() -> anyhow::Result<()> {
    cascframe::cli::run_cli()
}
