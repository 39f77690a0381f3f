use jawbone_client::{JawboneApi, config::Config, http_client::ReqwestJawboneClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: expects JAWBONE_ACCESS_TOKEN in env; dates as YYYYMMDD args
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let mut args = std::env::args().skip(1);
    let (Some(start), Some(finish)) = (args.next(), args.next()) else {
        eprintln!("usage: total_report START FINISH");
        return Ok(());
    };

    let client = ReqwestJawboneClient::from_config(&cfg)?;
    match client.find_registration_date().await? {
        Some(day) => println!("registered: {}", day),
        None => println!("registered: unknown"),
    }
    let report = client.total(&start, &finish).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
