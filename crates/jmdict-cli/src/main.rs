//! jmdict-parse エントリーポイント

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use jmdict::LogLevel;
use jmdict_cli::{Args, CliError, load_config, run};

fn main() -> ExitCode {
  let args = Args::parse();

  // 設定の読み込み（ロギング初期化前のため、エラーは標準エラー出力へ直接書く）
  let config = match load_config(args.config.as_deref()) {
    Ok(config) => config,
    Err(err) => return report(&err),
  };

  // ロギングの初期化（RUST_LOG が優先）
  init_tracing(config.log_level());
  tracing::info!(input = %args.input.display(), "設定を読み込みました");

  match run(&args, &config) {
    Ok(summary) => match serde_json::to_string_pretty(&summary) {
      Ok(text) => {
        println!("{text}");
        ExitCode::SUCCESS
      }
      Err(err) => {
        eprintln!("error[internal_error]: {err}");
        ExitCode::FAILURE
      }
    },
    Err(err) => {
      tracing::error!(code = err.code(), "{err}");
      report(&err)
    }
  }
}

fn init_tracing(level: LogLevel) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}

fn report(err: &CliError) -> ExitCode {
  eprintln!("error[{}]: {err}", err.code());
  err.exit_code()
}
