use healmon::admin::AdminClient;
use healmon::config::monitor;
use healmon::errors::{AsError, HealError, UiErrorItem};
use healmon::heal::{HealSession, HealSessionParams, RenderMode, SessionOutcome};
use log::info;

mod cli;

use cli::*;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let build_time = option_env!("HEALMON_BUILD_TIME");
    let version_info = healmon::version::healmon_version_info(build_time);
    let env_help = monitor::env_help();
    let matches = command(&version_info, &env_help).get_matches();
    let mode = render_mode(&matches);

    let code = match run(&matches, mode).await {
        Ok(_) => 0,
        Err(err) => {
            let intro = match err.as_error::<HealError>() {
                Some(HealError::RemoteCall(_)) => "Unable to get heal status",
                Some(_) => "Unable to display heal status",
                None => "Unable to heal",
            };
            eprintln!(
                "{}",
                UiErrorItem::format(intro, &err, mode == RenderMode::Json)
            );
            1
        }
    };
    std::process::exit(code);
}

async fn run(matches: &clap::ArgMatches, mode: RenderMode) -> anyhow::Result<SessionOutcome> {
    let target = matches.value_of("target").unwrap_or("");
    let (bucket, prefix) = parse_target(target)?;
    let opts = heal_opts(matches)?;
    let config = monitor::lookup_config(&config_kvs(matches))?;
    let _logger_guard = healmon::logger::init_global_logger(config.log_level)?;

    let client = AdminClient::new(config.endpoint, config.credentials, config.region)?;

    if matches.is_present("force-stop") {
        client.stop_heal(&bucket, &prefix).await?;
        info!("heal sequence on '{}' stopped", target);
        if mode == RenderMode::Json {
            println!(
                "{}",
                serde_json::json!({"status": "success", "type": "stop", "target": target})
            );
        } else {
            println!("Heal stopped successfully at `{}`.", target);
        }
        return Ok(SessionOutcome::Finished);
    }

    let force_start = matches.is_present("force-start");
    let started = client
        .start_heal(&bucket, &prefix, &opts, force_start)
        .await
        .map_err(|e| healmon::errors::UiError::HealStartFailed.error(e))?;
    info!(
        "heal sequence started on '{}' with client token {}",
        target, started.client_token
    );

    let params = HealSessionParams {
        bucket,
        prefix,
        client_token: started.client_token,
        force_start,
        opts,
    };
    let renderer = mode.renderer(Box::new(std::io::stdout()));
    let mut session =
        HealSession::new(client, params, renderer).with_poll_interval(config.poll_interval);
    Ok(session.run().await?)
}
