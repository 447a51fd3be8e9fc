fn main() -> anyhow::Result<()> {
    mergewatch::initialize_command_line()
}
