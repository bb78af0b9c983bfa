use stillroom::{app, reading_room};

fn main() -> anyhow::Result<()> {
    app::run(reading_room::descriptor())
}
