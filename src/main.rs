//! Form Builder - command line client for the forms REST API
//!
//! Lists, publishes and deletes the caller's forms, edits a form with its
//! ordered questions in an interactive shell, and reports on the responses a
//! form received.

mod api;
mod auth;
mod config;
mod controllers;
mod state;
mod ui;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use api::{FormsApi, HttpFormsApi};
use auth::{CredentialProvider, SessionCredentials};
use clap::{Parser, Subcommand};
use config::ClientConfig;
use controllers::{DeleteOutcome, FormEditorController, FormListController, ResponsesController};
use state::{FormId, QuestionId, ResponseId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::ShellExit;

#[derive(Debug, Parser)]
#[command(name = "form-builder", version, about = "Manage forms and their questions")]
struct Cli {
    /// Base URL of the forms API
    #[arg(long, env = "FORM_BUILDER_API_URL", global = true)]
    api_url: Option<String>,

    /// Environment variable the bearer token is read from
    #[arg(long, global = true)]
    token_key: Option<String>,

    /// Renumber display orders whenever a question is removed
    #[arg(long, global = true)]
    normalize_order: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List your forms
    List,
    /// Show a form with its questions
    Show { form_id: String },
    /// Publish an unpublished form, or unpublish a published one
    Publish { form_id: String },
    /// Delete a form
    Delete {
        form_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Create a form in the interactive editor
    New,
    /// Edit a form in the interactive editor
    Edit { form_id: String },
    /// List the responses submitted to a form
    Responses { form_id: String },
    /// Show one response with its answers
    Response { response_id: String },
    /// Delete a response
    DeleteResponse {
        response_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Response statistics of a form
    Summary { form_id: String },
    /// Most common answers to a question
    QuestionStats { question_id: String },
    /// Download every response of a form as a spreadsheet
    Export {
        form_id: String,
        /// Output file (default: form_<id>_responses.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the effective settings to the config file
    SaveConfig,
}

impl Cli {
    /// Command line flags take precedence over the config file
    fn apply_to(&self, config: &mut ClientConfig) {
        if let Some(url) = &self.api_url {
            config.api_base_url = Some(url.clone());
        }
        if let Some(key) = &self.token_key {
            config.token_key = Some(key.clone());
        }
        if self.normalize_order {
            config.normalize_display_order = Some(true);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "form_builder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config: {e:#}");
        ClientConfig::default()
    });
    cli.apply_to(&mut config);

    let api = Arc::new(HttpFormsApi::new(
        config.api_base_url(),
        config.request_timeout(),
    )?);
    let credentials: Arc<dyn CredentialProvider> =
        Arc::new(SessionCredentials::new(config.token_key()));
    let policy = config.display_order_policy();

    match cli.command {
        Command::List => {
            let mut list = FormListController::new(api, credentials);
            list.load().await?;
            print_forms(&list);
        }
        Command::Show { form_id } => {
            let editor =
                FormEditorController::open(api, credentials, Some(FormId::new(form_id)), policy)
                    .await;
            if let Some(err) = editor.error() {
                bail!("{err}");
            }
            print!(
                "{}",
                ui::render_draft(editor.draft(), editor.state(), editor.form_id())
            );
        }
        Command::Publish { form_id } => {
            let form_id = FormId::new(form_id);
            let mut list = FormListController::new(api, credentials);
            list.load().await?;
            let published = list.toggle_publish(&form_id).await?;
            let status = if published { "published" } else { "unpublished" };
            println!("Form {form_id} {status}");
        }
        Command::Delete { form_id, yes } => {
            let form_id = FormId::new(form_id);
            let mut list = FormListController::new(api, credentials);
            list.load().await?;
            let outcome = list
                .delete(&form_id, |id| yes || confirm(&format!("Delete form {id}?")))
                .await?;
            match outcome {
                DeleteOutcome::Deleted => {
                    println!("Deleted form {form_id}");
                    print_forms(&list);
                }
                DeleteOutcome::Cancelled => println!("Cancelled"),
            }
        }
        Command::New => {
            let mut editor = FormEditorController::new(api.clone(), credentials.clone(), policy);
            edit_interactively(&mut editor, api, credentials).await?;
        }
        Command::Edit { form_id } => {
            let mut editor = FormEditorController::open(
                api.clone(),
                credentials.clone(),
                Some(FormId::new(form_id)),
                policy,
            )
            .await;
            edit_interactively(&mut editor, api, credentials).await?;
        }
        Command::Responses { form_id } => {
            let mut responses = ResponsesController::new(api, credentials);
            responses.load(&FormId::new(form_id)).await?;
            print!("{}", ui::render_responses(responses.responses()));
        }
        Command::Response { response_id } => {
            let responses = ResponsesController::new(api, credentials);
            let response = responses.response(&ResponseId::new(response_id)).await?;
            print!("{}", ui::render_response(&response));
        }
        Command::DeleteResponse { response_id, yes } => {
            let response_id = ResponseId::new(response_id);
            let mut responses = ResponsesController::new(api, credentials);
            let outcome = responses
                .delete(&response_id, |id| {
                    yes || confirm(&format!("Delete response {id}?"))
                })
                .await?;
            match outcome {
                DeleteOutcome::Deleted => println!("Deleted response {response_id}"),
                DeleteOutcome::Cancelled => println!("Cancelled"),
            }
        }
        Command::Summary { form_id } => {
            let responses = ResponsesController::new(api, credentials);
            let summary = responses.summary(&FormId::new(form_id)).await?;
            print!("{}", ui::render_summary(&summary));
        }
        Command::QuestionStats { question_id } => {
            let responses = ResponsesController::new(api, credentials);
            let analytics = responses
                .question_analytics(&QuestionId::new(question_id))
                .await?;
            print!("{}", ui::render_question_analytics(&analytics));
        }
        Command::Export { form_id, output } => {
            let form_id = FormId::new(form_id);
            let responses = ResponsesController::new(api, credentials);
            let bytes = responses.export(&form_id).await?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(format!("form_{form_id}_responses.xlsx"))
            });
            fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        Command::SaveConfig => match config.save()? {
            Some(path) => println!("Wrote {}", path.display()),
            None => bail!("no config directory available on this platform"),
        },
    }

    Ok(())
}

/// Run the editor shell on stdin; after a save, show the refreshed form list
async fn edit_interactively(
    editor: &mut FormEditorController<HttpFormsApi>,
    api: Arc<HttpFormsApi>,
    credentials: Arc<dyn CredentialProvider>,
) -> Result<()> {
    match editor.form_id() {
        Some(form_id) => println!("Editing form {form_id}"),
        None => println!("New form"),
    }
    println!("Type `help` for commands.");
    let exit = {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let exit = ui::run_editor(editor, stdin.lock(), &mut stdout).await?;
        stdout.flush()?;
        exit
    };

    if let ShellExit::Saved(_) = exit {
        // The form is saved either way; a failed refresh is only reported
        let mut list = FormListController::new(api, credentials);
        let _ = list.load().await;
        print_forms(&list);
    }
    Ok(())
}

/// Print the cached forms and the last list error, if any
fn print_forms<A: FormsApi>(list: &FormListController<A>) {
    print!("{}", ui::render_forms(list.forms()));
    if let Some(err) = list.error() {
        eprintln!("error: {err}");
    }
}

/// Ask on the terminal; an unreadable answer declines
fn confirm(prompt: &str) -> bool {
    ui::confirm(prompt, &mut io::stdin().lock(), &mut io::stdout()).unwrap_or(false)
}
