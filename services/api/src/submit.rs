use crate::infra::{ConsoleNotifier, TracingAnalytics};
use clap::{Args, Subcommand};
use leadcapture::client::{FailureCause, FormSubmissionHandler, HttpTransport, SubmitOutcome};
use leadcapture::config::AppConfig;
use leadcapture::error::AppError;
use leadcapture::forms::{FormField, FormKind};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Override the configured API base URL (e.g. http://127.0.0.1:3000)
    #[arg(long)]
    pub(crate) base_url: Option<String>,
    #[command(subcommand)]
    pub(crate) form: FormCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum FormCommand {
    /// Request a product demo
    Contact {
        /// Full name
        #[arg(long, default_value = "")]
        name: String,
        /// Work email address
        #[arg(long, default_value = "")]
        email: String,
        /// Company or firm name
        #[arg(long, default_value = "")]
        company: String,
    },
    /// Subscribe to the newsletter
    Newsletter {
        /// Email address to subscribe
        #[arg(long, default_value = "")]
        email: String,
    },
}

impl FormCommand {
    fn into_fields(self) -> (FormKind, Vec<(FormField, String)>) {
        match self {
            FormCommand::Contact {
                name,
                email,
                company,
            } => (
                FormKind::Contact,
                vec![
                    (FormField::Name, name),
                    (FormField::Email, email),
                    (FormField::Company, company),
                ],
            ),
            FormCommand::Newsletter { email } => {
                (FormKind::Newsletter, vec![(FormField::Email, email)])
            }
        }
    }
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let SubmitArgs { base_url, form } = args;

    let mut config = AppConfig::load()?;
    if let Some(base_url) = base_url {
        config.client.base_url = base_url;
    }

    let transport = Arc::new(HttpTransport::new(&config.client)?);
    let (kind, fields) = form.into_fields();
    let mut handler = FormSubmissionHandler::new(
        kind,
        transport.clone(),
        Arc::new(ConsoleNotifier),
        Arc::new(TracingAnalytics),
    );
    for (field, value) in fields {
        handler.update_field(field, value)?;
    }

    println!(
        "Submitting {} form to {}",
        kind.key(),
        transport.endpoint_url(kind)
    );
    match handler.submit().await {
        SubmitOutcome::Invalid => {
            println!("Nothing sent; fix the following fields:");
            for (field, message) in handler.draft().errors() {
                println!("- {}: {}", field.label(), message);
            }
        }
        SubmitOutcome::AlreadySubmitting => {
            println!("A submission is already in flight");
        }
        SubmitOutcome::Accepted { message } => {
            println!("  Server: {message}");
        }
        SubmitOutcome::Failed(FailureCause::Rejected { status, error }) => {
            println!("  Server responded {status}: {error}");
        }
        SubmitOutcome::Failed(FailureCause::Transport(detail)) => {
            println!("  Request failed: {detail}");
        }
    }

    Ok(())
}
