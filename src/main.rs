fn main() -> anyhow::Result<()> {
    assignment_tracker::run()
}
