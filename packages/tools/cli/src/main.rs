//! dashgate CLI (`dgctl`)
//!
//! 서비스를 띄우지 않고 role 정책과 라우팅 결과를 확인하는 운영 도구입니다.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "dgctl")]
#[command(author, version, about = "dashgate CLI - inspect role policies and gateway routes", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// 정책을 가진 애플리케이션
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum App {
    Admin,
    Inventory,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect role policies
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },

    /// Inspect gateway routing
    Route {
        #[command(subcommand)]
        action: RouteAction,
    },

    /// Development tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Check a service health endpoint
    Health {
        /// Service base URL (e.g. http://localhost:8080)
        #[arg(long)]
        url: String,
    },
}

#[derive(Subcommand)]
enum PolicyAction {
    /// Print the operation table
    Show {
        #[arg(long, value_enum)]
        app: App,
        /// YAML overrides applied on top of the built-in policy
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Check whether a role may call an operation
    Check {
        #[arg(long, value_enum)]
        app: App,
        #[arg(long)]
        role: String,
        #[arg(long)]
        operation: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RouteAction {
    /// Resolve a request path to its backend URL
    Resolve { path: String },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Encode an unsigned development token
    Encode {
        #[arg(long)]
        sub: String,
        #[arg(long)]
        role: Option<String>,
        /// Lifetime in seconds
        #[arg(long)]
        ttl: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let format = cli.format;

    // 명령 실행
    match cli.command {
        Commands::Policy { action } => match action {
            PolicyAction::Show { app, file } => {
                commands::policy::show(app, file.as_deref(), format)?;
                Ok(ExitCode::SUCCESS)
            }
            PolicyAction::Check {
                app,
                role,
                operation,
                file,
            } => {
                let allowed =
                    commands::policy::check(app, &role, &operation, file.as_deref(), format)?;
                Ok(exit_code(allowed))
            }
        },

        Commands::Route { action } => match action {
            RouteAction::Resolve { path } => {
                let matched = commands::route::resolve(&path, format)?;
                Ok(exit_code(matched))
            }
        },

        Commands::Token { action } => match action {
            TokenAction::Encode { sub, role, ttl } => {
                commands::token::encode(&sub, role, ttl, format)?;
                Ok(ExitCode::SUCCESS)
            }
        },

        Commands::Health { url } => {
            let healthy = commands::health::check(&url, format).await?;
            Ok(exit_code(healthy))
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
