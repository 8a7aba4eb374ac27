mod command;
mod record;
mod report;
mod sheet;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
