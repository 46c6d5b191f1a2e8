use std::io::{BufRead, Write};

use crate::assistant::client::{AssistantBackend, HttpAssistant};
use crate::assistant::mock::MockAssistant;
use crate::browser::session::BrowserSession;
use crate::cli::config::Settings;
use crate::coordinator::coordinator::Coordinator;
use crate::reconcile::reconciler::ReconcileReport;
use crate::trace::logger::TraceLogger;

fn build_backend(settings: &Settings) -> Result<Box<dyn AssistantBackend>, String> {
    match settings.backend.as_str() {
        "mock" => Ok(Box::new(MockAssistant::new())),
        "http" => Ok(Box::new(HttpAssistant::new(&settings.endpoint))),
        other => Err(format!("Unknown assistant backend: {}", other)),
    }
}

fn build_tracer(settings: &Settings) -> TraceLogger {
    match settings.trace_path.as_deref() {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    }
}

fn print_report(report: &ReconcileReport, verbose: u8) {
    for applied in &report.applied {
        println!(
            "  filled {} (matched '{}' via {})",
            applied.name, applied.field, applied.strategy
        );
    }
    for field in &report.unmatched {
        println!("  no match for '{}'", field);
    }
    for field in &report.stale {
        println!("  '{}' matched but the element is gone", field);
    }
    if verbose > 0 {
        println!(
            "  {} applied, {} unmatched, {} stale",
            report.applied.len(),
            report.unmatched.len(),
            report.stale.len()
        );
    }
}

// ============================================================================
// scan subcommand
// ============================================================================

pub fn cmd_scan(
    url: &str,
    json: bool,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = BrowserSession::launch(&settings.host_script)?;
    session.navigate(url)?;
    let snapshot = session.scan()?;
    session.quit()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!(
        "{} forms, {} inputs on {}",
        snapshot.form_count(),
        snapshot.input_count(),
        url
    );
    for (index, form) in snapshot.forms.iter().enumerate() {
        println!(
            "Form {} (action={}, method={}):",
            index + 1,
            if form.action.is_empty() { "-" } else { form.action.as_str() },
            if form.method.is_empty() { "-" } else { form.method.as_str() },
        );
        for input in &form.inputs {
            print!("  {} [{}]", input.name, input.input_type);
            if !input.label.is_empty() {
                print!(" label='{}'", input.label);
            }
            if settings.verbose > 0 && !input.surrounding_text.is_empty() {
                print!(" near='{}'", input.surrounding_text);
            }
            println!();
        }
    }

    Ok(())
}

// ============================================================================
// fill subcommand
// ============================================================================

/// Run one autofill round; returns whether any parsed field reached the page.
pub fn cmd_fill(
    url: &str,
    context: Option<&str>,
    settings: &Settings,
) -> Result<bool, Box<dyn std::error::Error>> {
    let backend = build_backend(settings)?;
    let tracer = build_tracer(settings);

    let mut session = BrowserSession::launch(&settings.host_script)?;
    session.navigate(url)?;

    let outcome = {
        let mut coordinator = Coordinator::new(backend.as_ref(), &mut session, &tracer);
        coordinator.autofill(context)?
    };
    session.quit()?;

    if settings.verbose > 0 && !outcome.messages.is_empty() {
        println!("Assistant: {}", outcome.messages);
    }

    let report = &outcome.report;
    if report.applied.is_empty() && report.missed_count() == 0 {
        println!("Nothing to fill.");
        return Ok(true);
    }

    print_report(report, settings.verbose);

    Ok(!report.applied.is_empty())
}

// ============================================================================
// chat subcommand
// ============================================================================

pub fn cmd_chat(url: &str, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let backend = build_backend(settings)?;
    let tracer = build_tracer(settings);

    let mut session = BrowserSession::launch(&settings.host_script)?;
    session.navigate(url)?;

    {
        let mut coordinator = Coordinator::new(backend.as_ref(), &mut session, &tracer);

        let thread_id = coordinator.reset_thread()?;
        if settings.verbose > 0 {
            eprintln!("Thread: {}", thread_id);
        }
        println!("Chatting about {} (empty line or 'exit' to quit)", url);

        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }
            let text = line.trim();
            if text.is_empty() || text == "exit" || text == "quit" {
                break;
            }

            if coordinator.check_navigation()? {
                eprintln!("Page changed; thread reset.");
            }

            match coordinator.add_message(text) {
                Ok(outcome) => {
                    println!("{}", outcome.response);
                    if !outcome.report.applied.is_empty() || outcome.report.missed_count() > 0 {
                        print_report(&outcome.report, settings.verbose);
                    }
                }
                // Service failures end the turn, not the session.
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }

    session.quit()?;
    Ok(())
}
