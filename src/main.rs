fn main() -> anyhow::Result<()> {
    skeleton_java::cli::run_cli()
}
