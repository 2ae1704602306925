use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use analyser_core::{SelectedFile, Severity};
use analyser_engine::EngineHandle;
use analyser_logging::analyser_info;
use anyhow::Context;
use chrono::Utc;
use log::LevelFilter;

use super::cli::Cli;
use super::config::{load_config, CONFIG_FILENAME};
use super::controller::FormController;
use super::logging::{self, LogDestination};
use super::ui::page::{ElementId, HeadlessPage, Page};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Command-line adapter: plays the user's part on a headless page.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    if cli.verbose {
        logging::initialize(LogDestination::Both, LevelFilter::Debug);
    } else {
        logging::initialize(LogDestination::File, LevelFilter::Info);
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| CONFIG_FILENAME.into());
    let mut config = load_config(&config_path);
    if let Some(base_url) = cli.base_url.clone() {
        config.base_url = base_url;
    }

    let engine =
        EngineHandle::new(config.submit_settings()).context("failed to start analysis engine")?;
    let mut controller = FormController::attach(HeadlessPage::with_all_elements(), engine)?
        .with_success_alert_ttl(config.success_alert_ttl());

    let resume = read_resume(&cli.resume)?;
    controller.validate_resume_file(Some(resume));
    report_alerts(&controller);

    let job_description = match (&cli.job_description, &cli.job_description_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read job description from {}", path.display()))?,
        (None, None) => String::new(),
    };
    controller.set_job_description(job_description);

    controller.handle_submit();
    // No timeout: the request runs until the HTTP stack settles it.
    while !controller.wait_for_submission(POLL_INTERVAL) {}
    report_alerts(&controller);

    let failed = controller
        .state()
        .alerts()
        .iter()
        .any(|alert| alert.severity == Severity::Error);

    if controller.view().results_visible {
        let results_html = controller
            .page()
            .element(ElementId::ResultsContainer)
            .map(|element| element.html.clone())
            .unwrap_or_default();
        write_report(&results_html, cli.output.as_deref())?;
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn read_resume(path: &Path) -> anyhow::Result<SelectedFile> {
    let content =
        fs::read(path).with_context(|| format!("failed to read resume {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    Ok(SelectedFile::new(name, mime_type_for(path), content))
}

/// What a browser would report as the file's type.
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

fn report_alerts<P: Page>(controller: &FormController<P>) {
    for alert in controller.state().alerts().iter() {
        eprintln!("[{}] {}", alert.severity.as_str(), alert.message);
    }
}

/// Wraps the results markup in a minimal standalone document.
pub fn results_document(results_html: &str, generated_at: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Resume Analysis</title></head>\n\
         <body>\n<!-- generated {generated_at} -->\n<div id=\"{id}\">{results_html}</div>\n</body>\n</html>\n",
        id = ElementId::ResultsContainer.dom_id(),
    )
}

fn write_report(results_html: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let document = results_document(results_html, &Utc::now().to_rfc3339());
    match output {
        Some(path) => {
            fs::write(path, document)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            analyser_info!("Wrote report to {:?}", path);
        }
        None => {
            io::stdout()
                .write_all(document.as_bytes())
                .context("failed to write report to stdout")?;
        }
    }
    Ok(())
}
