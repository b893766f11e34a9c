//! SecurePay CLI
//!
//! Command-line front end for the SecurePay XML gateway client.

mod config;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use securepay_hex::{PaymentGatewayService, classify, protocol};
use securepay_types::{
    CardDetails, Currency, GatewayConfiguration, GatewayError, GatewayMode, Money, Outcome,
    PaymentAttempt, PaymentRequestContext,
};

#[derive(Parser)]
#[command(name = "securepay")]
#[command(author, version, about = "SecurePay XML gateway client", long_about = None)]
struct Cli {
    /// Override SECUREPAY_MODE (live or test)
    #[arg(long)]
    mode: Option<GatewayMode>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a card payment to the gateway
    Pay {
        #[command(flatten)]
        payment: PaymentArgs,
        /// Record an authorization instead of a completed payment
        #[arg(long)]
        authorize_only: bool,
    },
    /// Print the redacted request document without sending it
    Preview {
        #[command(flatten)]
        payment: PaymentArgs,
    },
    /// Classify a saved gateway response (reads stdin when no file is given)
    Classify {
        /// Response body file
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct PaymentArgs {
    /// Order identifier, sent as the purchase order number
    #[arg(long)]
    order_id: String,
    /// Order total in major units, e.g. 12.34
    #[arg(long)]
    amount: Decimal,
    /// Currency code (defaults to SECUREPAY_CURRENCY, then AUD)
    #[arg(long)]
    currency: Option<String>,
    #[arg(long, env = "SECUREPAY_CARD_NUMBER", hide_env_values = true)]
    card_number: String,
    #[arg(long, env = "SECUREPAY_CARD_CVV", hide_env_values = true)]
    cvv: String,
    /// Expiry month (1-12)
    #[arg(long)]
    expiry_month: u32,
    /// Expiry year, two or four digits
    #[arg(long)]
    expiry_year: u32,
}

impl PaymentArgs {
    fn order(&self, config: &GatewayConfiguration) -> Result<PaymentRequestContext> {
        let currency: Currency = match &self.currency {
            Some(code) => code.parse()?,
            None => config.currency,
        };
        let total = Money::from_major(self.amount, currency)?;
        Ok(PaymentRequestContext::new(self.order_id.clone(), total))
    }

    fn card(&self) -> CardDetails {
        CardDetails::new(
            self.card_number.as_str(),
            self.cvv.as_str(),
            self.expiry_month,
            self.expiry_year,
        )
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,securepay_hex=debug".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(mode: Option<GatewayMode>) -> Result<GatewayConfiguration> {
    let mut config = config::from_env()?;
    if let Some(mode) = mode {
        config.mode = mode;
    }
    Ok(config)
}

/// Exit status for a failed attempt: 2 when the card holder has to fix their
/// details, 1 for everything else.
fn failure_exit_code(err: &GatewayError) -> i32 {
    if err.is_user_correctable() { 2 } else { 1 }
}

fn print_outcome(outcome: &Outcome) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    if let Err(err) = outcome.clone().into_result() {
        std::process::exit(failure_exit_code(&err));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Pay {
            payment,
            authorize_only,
        } => {
            let config = load_config(cli.mode)?;
            tracing::info!(mode = %config.mode, endpoint = config.endpoint(), "using gateway");

            let order = payment.order(&config)?;
            let card = payment.card();
            tracing::info!(card = %card.label(), "submitting payment");
            let mut attempt = PaymentAttempt::new(order, Some(card), !authorize_only);

            let service = PaymentGatewayService::connect(config)?;
            let outcome = match service.process_attempt(&mut attempt).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(failure_exit_code(&err));
                }
            };

            if let Ok(approved) = outcome.clone().into_result() {
                tracing::info!(
                    remote_id = %approved.remote_id,
                    state = ?approved.next_state(attempt.capture()),
                    "payment recorded"
                );
            }
            print_outcome(&outcome)?;
        }

        Commands::Preview { payment } => {
            let config = load_config(cli.mode)?;
            let order = payment.order(&config)?;
            let card = payment.card();
            card.validate()?;
            let xml = protocol::build(&config, &order, Some(&card))?;
            println!("POST {}", config.endpoint());
            println!("{}", protocol::redact(&xml));
        }

        Commands::Classify { file } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let response = protocol::parse(&raw);
            let outcome = classify(&response);
            print_outcome(&outcome)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["securepay"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    const PAY: &[&str] = &[
        "pay",
        "--order-id",
        "42",
        "--amount",
        "12.34",
        "--card-number",
        "4444333322221111",
        "--cvv",
        "123",
        "--expiry-month",
        "7",
        "--expiry-year",
        "26",
    ];

    #[test]
    fn test_pay_arguments_build_order_and_card() {
        let config = GatewayConfiguration::new(GatewayMode::Test, "ABC0001", "abc123");
        let Commands::Pay {
            payment,
            authorize_only,
        } = parse(PAY).command
        else {
            panic!("expected pay command");
        };

        assert!(!authorize_only);
        let order = payment.order(&config).unwrap();
        assert_eq!(order.amount(), 1234);
        assert_eq!(order.currency(), Currency::AUD);
        assert_eq!(payment.card().label(), "Visa ending in 1111");
    }

    #[test]
    fn test_currency_flag_overrides_config() {
        let config = GatewayConfiguration::new(GatewayMode::Test, "ABC0001", "abc123");
        let mut args = PAY.to_vec();
        args.extend_from_slice(&["--currency", "nzd"]);
        let Commands::Pay { payment, .. } = parse(&args).command else {
            panic!("expected pay command");
        };

        assert_eq!(payment.order(&config).unwrap().currency(), Currency::NZD);
    }

    #[test]
    fn test_authorize_only_flag() {
        let mut args = PAY.to_vec();
        args.push("--authorize-only");
        let Commands::Pay { authorize_only, .. } = parse(&args).command else {
            panic!("expected pay command");
        };
        assert!(authorize_only);
    }

    #[test]
    fn test_failure_exit_codes() {
        let declined = Outcome::HardDecline {
            reason: "Do Not Honour".to_string(),
        };
        let unreachable = Outcome::TransportFailure {
            cause: "timed out".to_string(),
        };
        let rejected = Outcome::SoftDecline {
            status_code: "504".to_string(),
            description: None,
        };

        assert_eq!(failure_exit_code(&declined.into_result().unwrap_err()), 2);
        assert_eq!(failure_exit_code(&GatewayError::MissingPaymentDetails), 2);
        assert_eq!(
            failure_exit_code(&GatewayError::InvalidPaymentDetails("bad cvv".to_string())),
            2
        );
        assert_eq!(failure_exit_code(&unreachable.into_result().unwrap_err()), 1);
        assert_eq!(failure_exit_code(&rejected.into_result().unwrap_err()), 1);
    }

    #[test]
    fn test_mode_flag() {
        let cli = parse(&["--mode", "live", "classify"]);
        assert_eq!(cli.mode, Some(GatewayMode::Live));
    }
}
