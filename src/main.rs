mod config;
mod error;
mod core {
    pub mod parser;
    pub mod prompt;
    pub mod schema;
}
mod ai {
    pub mod client;
    pub mod prompts;
}
mod pipeline;
mod web;

use std::sync::Arc;

use config::Settings;
use dotenv::dotenv;
use pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::builder().filter_level(log::LevelFilter::Info).init();

    let settings = Settings::from_env()?;
    let pipeline = Arc::new(Pipeline::new(&settings));

    println!("🌙 CYCLE COMPANION READY");
    println!("   Model: {}", settings.model);

    web::serve(pipeline, settings.port).await?;

    Ok(())
}
