use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paynow::application::controller::{PaymentForm, SubmissionController};
use paynow::application::state::SubmissionState;
use paynow::config::ClientConfig;
use paynow::error::PaymentError;
use paynow::interfaces::presenter::{TraceToggle, render};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Customer placing the payment
    #[arg(long, default_value = "c_123")]
    customer_id: String,

    /// Amount in USD, at most two decimal places
    #[arg(long, default_value = "125.50", allow_hyphen_values = true)]
    amount: String,

    /// Payee receiving the payment
    #[arg(long, default_value = "p_789")]
    payee_id: String,

    /// Print the agent trace along with the decision
    #[arg(long)]
    show_trace: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = ClientConfig::from_env().into_diagnostic()?;
    let controller = SubmissionController::from_config(&config).into_diagnostic()?;

    let form = PaymentForm::new(cli.customer_id, cli.amount, cli.payee_id);
    controller.submit(&form).await;

    let toggle = if cli.show_trace {
        TraceToggle::expanded()
    } else {
        TraceToggle::default()
    };

    match controller.state() {
        SubmissionState::Failed { message, .. } => {
            Err(PaymentError::Failed(message)).into_diagnostic()
        }
        state => {
            println!("{}", render(&state, toggle));
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
