use jawbone_client::{Scope, config::Config, http_client::ReqwestJawboneClient};

// Without JAWBONE_AUTH_CODE this prints the URL to visit; with it, exchanges
// the code and prints the token to store as JAWBONE_ACCESS_TOKEN.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let mut client = ReqwestJawboneClient::from_config(&cfg)?;

    if cfg.authorization_code.is_none() {
        let redirect = std::env::var("JAWBONE_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost/code_receiver".to_string());
        println!("{}", client.build_authorization_url(&redirect, Scope::Read)?);
        return Ok(());
    }

    let token = client.exchange_code_for_token().await?;
    println!("{} {}", token.token_type, token.access_token);
    Ok(())
}
