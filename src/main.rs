use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use paywise::application::flow::{FlowConfig, FlowController};
use paywise::application::wallet::Wallet;
use paywise::domain::card::{CardDetails, format_expiry};
use paywise::domain::currency::{Currency, convert};
use paywise::domain::method::{PaymentMethod, compute_fee};
use paywise::domain::money::{Amount, Balance};
use paywise::domain::ports::{SharedPresenter, SharedSecondFactor, SharedStore};
use paywise::domain::screen::Screen;
use paywise::domain::transaction::TransactionKind;
use paywise::infrastructure::clock::SystemClock;
use paywise::infrastructure::in_memory::InMemoryStore;
use paywise::infrastructure::json_file::JsonFileStore;
use paywise::infrastructure::presenter::TerminalPresenter;
use paywise::infrastructure::second_factor::AutoApprove;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(author, version, about = "PayWise wallet demo", long_about = None)]
struct Cli {
    /// Starting wallet balance.
    #[arg(long, default_value = "1000")]
    balance: Decimal,

    /// Persist transaction records to this JSON file instead of memory.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Enable logging at the given level.
    #[arg(long)]
    log_level: Option<tracing::Level>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the fee breakdown for a top-up amount and method.
    Fees {
        amount: Decimal,
        #[arg(long)]
        method: PaymentMethod,
    },
    /// Top up the wallet.
    Topup {
        amount: Decimal,
        #[arg(long)]
        method: PaymentMethod,
        #[arg(long)]
        card_number: Option<String>,
        #[arg(long)]
        expiry: Option<String>,
        #[arg(long)]
        cvv: Option<String>,
        #[arg(long)]
        holder: Option<String>,
    },
    /// Pay a merchant from the wallet. Without arguments, scans the demo QR.
    Pay {
        amount: Option<Decimal>,
        #[arg(long)]
        merchant: Option<String>,
    },
    /// Show the balance and the last recorded transactions.
    Balance,
    /// Convert an amount between supported currencies at the mock rates.
    Convert {
        amount: Decimal,
        #[arg(long)]
        from: Currency,
        #[arg(long)]
        to: Currency,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(level) = cli.log_level {
        tracing_subscriber::fmt().with_max_level(level).init();
    }

    let store: SharedStore = match &cli.store {
        Some(path) => Arc::new(JsonFileStore::open(path).into_diagnostic()?),
        None => Arc::new(InMemoryStore::new()),
    };
    let presenter: SharedPresenter = Arc::new(TerminalPresenter);
    let second_factor: SharedSecondFactor =
        Arc::new(AutoApprove::with_demo_delays(presenter.clone()));
    let controller = FlowController::new(
        Wallet::new(Balance::new(cli.balance)),
        store,
        presenter,
        Arc::new(SystemClock),
        second_factor,
        FlowConfig::default(),
    );

    let cancel = CancellationToken::new();
    match cli.command {
        Command::Fees { amount, method } => {
            let amount = Amount::new(amount).into_diagnostic()?;
            let breakdown = compute_fee(amount, method).rounded();
            println!("method: {method} ({})", method.fee_description());
            println!("amount: ฿{}", breakdown.base_amount);
            println!("processing fee: ฿{}", breakdown.processing_fee);
            println!("total: ฿{}", breakdown.total);
        }
        Command::Topup {
            amount,
            method,
            card_number,
            expiry,
            cvv,
            holder,
        } => {
            let amount = Amount::new(amount).into_diagnostic()?;
            let card = card_number.map(|number| CardDetails {
                number,
                // Accept "1230" as well as "12/30", like the form input does.
                expiry: format_expiry(&expiry.unwrap_or_default()),
                cvv: cvv.unwrap_or_default(),
                holder_name: holder.unwrap_or_default(),
            });
            controller.show_screen(Screen::TopUp).await;
            let tx = controller
                .submit_topup(amount, method, card, &cancel)
                .await
                .into_diagnostic()?;
            println!("top-up recorded: {}", tx.id);
            controller.show_screen(Screen::Wallet).await;
        }
        Command::Pay { amount, merchant } => {
            let (amount, merchant) = match amount {
                Some(amount) => (
                    Amount::new(amount).into_diagnostic()?,
                    merchant.unwrap_or_else(|| "Unknown merchant".to_string()),
                ),
                None => {
                    let qr = controller.scan_qr(&cancel).await.into_diagnostic()?;
                    (qr.amount, qr.merchant)
                }
            };
            let tx = controller
                .submit_payment(amount, &merchant, &cancel)
                .await
                .into_diagnostic()?;
            println!("payment recorded: {}", tx.id);
            controller.show_screen(Screen::Wallet).await;
        }
        Command::Balance => {
            controller.show_screen(Screen::Wallet).await;
            if let Some(tx) = controller
                .last_transaction(TransactionKind::TopUp)
                .await
                .into_diagnostic()?
            {
                println!("last top-up: {} ฿{}", tx.id, tx.amount);
            }
            if let Some(tx) = controller
                .last_transaction(TransactionKind::Payment)
                .await
                .into_diagnostic()?
            {
                println!("last payment: {} ฿{}", tx.id, tx.amount);
            }
        }
        Command::Convert { amount, from, to } => {
            let mut converted = convert(amount, from, to).round_dp(2);
            converted.rescale(2);
            println!("{amount} {from} = {converted} {to}");
        }
    }

    Ok(())
}
