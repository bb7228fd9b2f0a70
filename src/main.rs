// Participant registration form tools
// Drives the form controller from the command line against a live endpoint

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::warn;
use regform::{
    models::{FieldId, SubmissionOutcome},
    processing::DerivedFieldCalculator,
    validation::FieldValidator,
    EndpointConfig, FormController, FormError, FormView, MemoryView, RegistryEndpoint, ScriptClient,
};

#[derive(Parser)]
#[command(name = "regform", version, about = "Participant registration form tools")]
struct Cli {
    /// Script endpoint URL (defaults to REGFORM_SCRIPT_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Age in whole years for a YYYY-MM-DD birth date
    Age { date_of_birth: String },
    /// Passport expiry for a YYYY-MM-DD issue date
    Expiry { issue_date: String },
    /// Check passport format and whether it is already registered
    CheckPassport { passport_number: String },
    /// Check a mobile number has exactly 10 digits
    CheckMobile { mobile_number: String },
    /// List companies and their customer codes
    Companies,
    /// Submit a registration record
    Submit {
        /// Form field as name=value, repeatable
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Additional field that must be non-empty, repeatable
        #[arg(long)]
        require: Vec<String>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected name=value, got {:?}", raw))
}

fn client(cli: &Cli) -> Result<ScriptClient, FormError> {
    let mut config = match &cli.url {
        Some(url) => EndpointConfig::parse(url)?,
        None => EndpointConfig::from_env()?,
    };
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(secs);
    }
    ScriptClient::new(config)
}

async fn run(cli: Cli) -> Result<bool, FormError> {
    match &cli.command {
        Command::Age { date_of_birth } => {
            println!("{}", DerivedFieldCalculator::age_on_today(date_of_birth)?);
            Ok(true)
        }
        Command::Expiry { issue_date } => {
            println!("{}", DerivedFieldCalculator::calculate_expiry(issue_date)?);
            Ok(true)
        }
        Command::CheckMobile { mobile_number } => {
            let valid = FieldValidator::validate_mobile_number(mobile_number);
            println!("{}", FieldValidator::mobile_message(mobile_number).unwrap_or("VALID"));
            Ok(valid)
        }
        Command::CheckPassport { passport_number } => {
            let controller = FormController::new(
                client(&cli)?,
                MemoryView::with_fields([(FieldId::PassportNumber.name(), passport_number.as_str())]),
            );
            let status = controller.on_passport_input().await;
            let valid = status.map_or(false, |status| {
                FieldValidator::passport_message(status).is_none()
            });
            let view = controller.view();
            println!(
                "{}",
                view.field_error(FieldId::PassportNumber.name()).unwrap_or("VALID")
            );
            Ok(valid)
        }
        Command::Companies => {
            let data = client(&cli)?.company_data().await?;
            for company in data.companies() {
                println!("{}\t{}", company.company_name, company.customer_code);
            }
            Ok(true)
        }
        Command::Submit { fields, require } => {
            let mut rules = regform::models::FormRules::default();
            for name in require {
                rules = rules.with_required(name.as_str());
            }
            let controller =
                FormController::new(client(&cli)?, MemoryView::with_fields(fields.clone()))
                    .with_rules(rules);
            submit(&controller).await
        }
    }
}

async fn submit<E: RegistryEndpoint>(
    controller: &FormController<E, MemoryView>,
) -> Result<bool, FormError> {
    let has = |field: FieldId| {
        controller
            .view()
            .field_value(field.name())
            .map_or(false, |value| !value.is_empty())
    };

    if has(FieldId::DateOfBirth) && !has(FieldId::Age) {
        controller.on_date_of_birth_change();
    }
    if has(FieldId::IssueDate) && !has(FieldId::ExpiryDate) {
        controller.on_issue_date_change();
    }
    if has(FieldId::CompanyName) && !has(FieldId::CustomerCode) {
        match controller.load_companies().await {
            Ok(_) => {
                controller.on_company_selected();
            }
            Err(e) => warn!("Could not load company data: {}", e),
        }
    }
    if has(FieldId::MobileNumber) && !controller.on_mobile_input() {
        warn!("Mobile number is not 10 digits, submitting anyway");
    }

    let outcome = controller.submit().await;
    let view = controller.view();
    match &outcome {
        SubmissionOutcome::Submitted => println!("Thank you! Your application has been submitted."),
        SubmissionOutcome::Duplicate | SubmissionOutcome::Rejected(_) => {
            eprintln!("{}", view.error_banner().unwrap_or_default())
        }
        SubmissionOutcome::MissingRequired(fields) => {
            for field in fields {
                eprintln!("{}: {}", field, view.field_error(field).unwrap_or_default());
            }
        }
        SubmissionOutcome::TransportFailed => eprintln!("{}", view.page_error().unwrap_or_default()),
    }
    Ok(outcome == SubmissionOutcome::Submitted)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}
