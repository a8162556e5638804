use tracing::{error, info, span, Level};

use objectdict::{adapters, config, dict, util};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().json().init();

    let span = span!(Level::INFO, "main", context = "main");
    let _e = span.enter();
    info!("called");

    let matches = clap::Command::new("objectdict")
        .arg(clap::Arg::new("CREDENTIALS").required(true).index(1))
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("contains").arg(clap::Arg::new("KEY").required(true).index(1)),
        )
        .subcommand(clap::Command::new("get").arg(clap::Arg::new("KEY").required(true).index(1)))
        .subcommand(
            clap::Command::new("put")
                .arg(clap::Arg::new("KEY").required(true).index(1))
                .arg(clap::Arg::new("VALUE").required(true).index(2)),
        )
        .subcommand(clap::Command::new("pop").arg(clap::Arg::new("KEY").required(true).index(1)))
        .subcommand(
            clap::Command::new("delete").arg(clap::Arg::new("KEY").required(true).index(1)),
        )
        .subcommand(clap::Command::new("keys").arg(clap::Arg::new("PREFIX").index(1)))
        .subcommand(clap::Command::new("items").arg(clap::Arg::new("PREFIX").index(1)))
        .get_matches();

    let credentials = matches.get_one::<String>("CREDENTIALS").unwrap();
    info!(credentials = credentials, "args");

    let config = match config::DictConfig::from_csv(credentials) {
        Err(err) => {
            error!(error_message=%err, error_group="load_config");
            std::process::exit(1);
        }
        Ok(config) => config,
    };

    let provider = match util::bucket::parse_provider_from_uri(&config.bucket) {
        Err(err) => {
            error!(error_message=%err, error_group="parse_provider");
            std::process::exit(1);
        }
        Ok(provider) => provider,
    };

    let client: Box<dyn adapters::ObjectAdapter> = if provider.is_aws() {
        let creds = aws_sdk_s3::config::Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "objectdict",
        );
        let sdk_config = aws_config::from_env()
            .credentials_provider(creds)
            .load()
            .await;

        Box::new(aws_sdk_s3::Client::new(&sdk_config))
    } else {
        // GCS auth comes from application default credentials, not the
        // access/secret pair in the CSV.
        let gcs_config = match google_cloud_storage::client::ClientConfig::default()
            .with_auth()
            .await
        {
            Err(err) => {
                error!(error_message=%err, error_group="gcs_auth");
                std::process::exit(1);
            }
            Ok(gcs_config) => gcs_config,
        };

        Box::new(google_cloud_storage::client::Client::new(gcs_config))
    };

    let mut dict = match dict::ObjectDict::new(client, &config) {
        Err(err) => {
            error!(error_message=%err, error_group="open_dict");
            std::process::exit(1);
        }
        Ok(dict) => dict,
    };

    let result = run(&mut dict, &matches);

    match result {
        Err(err) => {
            error!(error_message=%err, error_group="run");
            std::process::exit(1);
        }
        Ok(_) => {}
    }
}

fn run(
    dict: &mut dict::ObjectDict,
    matches: &clap::ArgMatches,
) -> Result<(), objectdict::model::dict::DictError> {
    match matches.subcommand() {
        Some(("contains", sub)) => {
            let key = sub.get_one::<String>("KEY").unwrap();
            println!("{}", dict.contains(key));
        }
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("KEY").unwrap();
            let value = dict.get(key)?;
            println!("{}", String::from_utf8_lossy(&value));
        }
        Some(("put", sub)) => {
            let key = sub.get_one::<String>("KEY").unwrap();
            let value = sub.get_one::<String>("VALUE").unwrap();
            dict.put(key, value.as_bytes().to_vec())?;
        }
        Some(("pop", sub)) => {
            let key = sub.get_one::<String>("KEY").unwrap();
            let value = dict.pop(key)?;
            println!("{}", String::from_utf8_lossy(&value));
        }
        Some(("delete", sub)) => {
            let key = sub.get_one::<String>("KEY").unwrap();
            dict.delete(key)?;
        }
        Some(("keys", sub)) => {
            let prefix = sub
                .get_one::<String>("PREFIX")
                .map(|p| p.as_str())
                .unwrap_or("");
            for key in dict.keys(prefix) {
                println!("{}", key);
            }
        }
        Some(("items", sub)) => {
            let prefix = sub
                .get_one::<String>("PREFIX")
                .map(|p| p.as_str())
                .unwrap_or("");
            for (key, value) in dict.items(prefix)? {
                println!("{}: {}", key, String::from_utf8_lossy(&value));
            }
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}
