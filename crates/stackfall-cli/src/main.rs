mod command;
mod logging;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
