fn main() -> anyhow::Result<()> {
    amma_tui::run()
}
