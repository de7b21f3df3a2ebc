mod command;
mod model;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
