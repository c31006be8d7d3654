use render_tutorial::{Settings, window};

fn main() -> anyhow::Result<()> {
    window::init_logger();
    window::run(Settings::from_env())
}
