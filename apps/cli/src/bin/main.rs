use anyhow::Result;
use clap::Parser;
use sqirvy_cli::{App, Command, Config, run};

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();
    app.init_tracing();

    match &app.command {
        Command::Models => print!("{}", run::models()),
        Command::Scrape { urls } => print!("{}", run::scrape(urls).await?),
        Command::Query(inputs)
        | Command::Plan(inputs)
        | Command::Code(inputs)
        | Command::Review(inputs) => {
            let config = Config::load(app.config.as_deref())?;
            let settings = app.settings(&config);
            let system_prompt = app.command.system_prompt().unwrap_or_default();
            let answer = run::query(&settings, system_prompt, &inputs.args).await?;
            println!("{answer}");
        }
    }

    Ok(())
}
