use log::info;
use user_directory::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = get_subscriber("user-directory".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);
    info!("Starting the application...");

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    info!("Listening on port {}", application.port());
    application.run_until_stopped().await?;

    Ok(())
}
